mod engine;
mod interaction;
mod rpc;

use engine::core::app_setup::create_app;
use engine::core::mount::{mount_canvas, report_mount_error};

fn main() {
    // Without a mount point there is nothing to render into.
    if let Err(err) = mount_canvas() {
        report_mount_error(&err);
        return;
    }

    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
