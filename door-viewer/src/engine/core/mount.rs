use crate::engine::error::{ViewerError, ViewerResult};

/// Create the render canvas inside the host page container.
#[cfg(target_arch = "wasm32")]
pub fn mount_canvas() -> ViewerResult<()> {
    use constants::host::{CANVAS_ID, CONTAINER_SELECTOR};

    let host_error = |e: wasm_bindgen::JsValue| ViewerError::HostUnavailable(format!("{e:?}"));

    let window = web_sys::window()
        .ok_or_else(|| ViewerError::HostUnavailable("no window object".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ViewerError::HostUnavailable("no document".into()))?;
    let container = document
        .query_selector(CONTAINER_SELECTOR)
        .map_err(host_error)?
        .ok_or_else(|| ViewerError::MissingContainer(CONTAINER_SELECTOR.into()))?;

    let canvas = document.create_element("canvas").map_err(host_error)?;
    canvas.set_id(CANVAS_ID);
    container.append_child(&canvas).map_err(host_error)?;
    Ok(())
}

/// Native builds open their own window.
#[cfg(not(target_arch = "wasm32"))]
pub fn mount_canvas() -> ViewerResult<()> {
    Ok(())
}

/// Report a mount failure where the host page will see it.
pub fn report_mount_error(err: &ViewerError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&err.to_string().into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{err}");
}
