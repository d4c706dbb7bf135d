/// CSS selector of the host page element the viewer mounts into
pub const CONTAINER_SELECTOR: &str = ".model_app";

/// Id given to the canvas created inside the container
pub const CANVAS_ID: &str = "door-viewer-canvas";

/// Model asset loaded when `viewer.json` does not name one
pub const DEFAULT_MODEL_PATH: &str = "models/model-demo.glb";

/// Runtime config asset, relative to the asset root
pub const VIEWER_CONFIG_PATH: &str = "viewer.json";
