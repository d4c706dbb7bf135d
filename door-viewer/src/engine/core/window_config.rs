use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        use constants::host::CANVAS_ID;
        // Wheel and drag events inside the canvas must not scroll the page.
        Window {
            canvas: Some(format!("#{CANVAS_ID}")),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Door Viewer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
