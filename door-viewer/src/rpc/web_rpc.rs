use crate::engine::loading::model_loader::ModelLoadFailedEvent;
use crate::interaction::binding::DoorsBoundEvent;
use crate::interaction::doors::{DoorToggleRequest, DoorToggledEvent, ToggleSource};
use crate::interaction::picking::MarkerPickedEvent;
use crate::interaction::session::ViewerSession;
use crate::interaction::state::DoorSide;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing message queue towards the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin bridging viewer events to the embedding page over postMessage.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_viewer_events,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership moves to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message received from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    session: Res<ViewerSession>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut toggle_requests: EventWriter<DoorToggleRequest>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let mut toggles = Vec::new();
                if let Some(response) = handle_rpc_request(&request, &session, &mut toggles) {
                    rpc_interface.queue_response(response);
                }
                toggle_requests.write_batch(toggles);
            }
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle one request and build its response. Door toggles are collected
/// into `toggles` so they run through the same path as pointer clicks.
pub fn handle_rpc_request(
    request: &RpcRequest,
    session: &ViewerSession,
    toggles: &mut Vec<DoorToggleRequest>,
) -> Option<RpcResponse> {
    // Notifications have no ID and get no response.
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_door_states" => handle_get_door_states(session),
        "toggle_door" => handle_toggle_door(&request.params, session, toggles),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_door_states(session: &ViewerSession) -> Result<serde_json::Value, RpcError> {
    let states = session.door_states();
    Ok(serde_json::json!({
        "left": states.left,
        "right": states.right,
        "bound": {
            "left": session.binding(DoorSide::Left).is_some(),
            "right": session.binding(DoorSide::Right).is_some(),
        }
    }))
}

fn handle_toggle_door(
    params: &serde_json::Value,
    session: &ViewerSession,
    toggles: &mut Vec<DoorToggleRequest>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct ToggleDoorParams {
        side: String,
    }

    let toggle_params = serde_json::from_value::<ToggleDoorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'side' parameter"))?;

    let side = DoorSide::from_string(&toggle_params.side)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown door: {}", toggle_params.side)))?;

    if session.binding(side).is_none() {
        return Err(RpcError::invalid_params(&format!("{side} door is not in the model")));
    }

    toggles.push(DoorToggleRequest {
        side,
        source: ToggleSource::Rpc,
    });
    info!("Door toggle requested over RPC: {}", side);

    Ok(serde_json::json!({
        "success": true,
        "side": side
    }))
}

/// Push viewer events to the host page as notifications.
fn forward_viewer_events(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut bound: EventReader<DoorsBoundEvent>,
    mut failures: EventReader<ModelLoadFailedEvent>,
    mut marker_picks: EventReader<MarkerPickedEvent>,
    mut toggled: EventReader<DoorToggledEvent>,
) {
    for event in bound.read() {
        rpc_interface.send_notification(
            "model_loaded",
            serde_json::json!({ "doors": { "left": event.left, "right": event.right } }),
        );
    }
    for event in failures.read() {
        rpc_interface.send_notification(
            "model_load_failed",
            serde_json::json!({ "path": event.path, "error": event.reason }),
        );
    }
    for event in marker_picks.read() {
        rpc_interface.send_notification("marker_picked", serde_json::json!({ "side": event.side }));
    }
    for event in toggled.read() {
        rpc_interface.send_notification(
            "door_toggled",
            serde_json::json!({
                "side": event.side,
                "open": event.open,
                "target_angle_degrees": event.target_angle.to_degrees(),
                "duration": event.duration,
            }),
        );
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the parent window. Native builds have no
/// host page and drop it.
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::session::DoorBinding;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: Some(serde_json::json!(1)),
        }
    }

    fn left_only_session() -> ViewerSession {
        let mut session = ViewerSession::default();
        session.bind(
            Some(DoorBinding {
                door: Entity::from_raw(1),
                marker: Entity::from_raw(2),
            }),
            None,
        );
        session
    }

    #[test]
    fn get_door_states_reports_bits() {
        let mut session = left_only_session();
        session.toggle(DoorSide::Left);
        let response = handle_rpc_request(
            &request("get_door_states", serde_json::Value::Null),
            &session,
            &mut Vec::new(),
        )
        .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["left"], true);
        assert_eq!(result["right"], false);
        assert_eq!(result["bound"]["right"], false);
    }

    #[test]
    fn toggle_door_queues_request() {
        let session = left_only_session();
        let mut toggles = Vec::new();
        let response = handle_rpc_request(
            &request("toggle_door", serde_json::json!({"side": "Left"})),
            &session,
            &mut toggles,
        )
        .unwrap();
        assert!(response.error.is_none());
        assert_eq!(
            toggles,
            vec![DoorToggleRequest {
                side: DoorSide::Left,
                source: ToggleSource::Rpc,
            }]
        );
    }

    #[test]
    fn toggle_unknown_or_unbound_side_is_invalid_params() {
        let session = left_only_session();
        for side in ["middle", "right"] {
            let mut toggles = Vec::new();
            let response = handle_rpc_request(
                &request("toggle_door", serde_json::json!({ "side": side })),
                &session,
                &mut toggles,
            )
            .unwrap();
            assert_eq!(response.error.unwrap().code, -32602);
            assert!(toggles.is_empty());
        }
    }

    #[test]
    fn unknown_method_and_notifications() {
        let session = ViewerSession::default();
        let response = handle_rpc_request(
            &request("get_fps", serde_json::Value::Null),
            &session,
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);

        let mut notification = request("get_door_states", serde_json::Value::Null);
        notification.id = None;
        assert!(handle_rpc_request(&notification, &session, &mut Vec::new()).is_none());
    }

    #[test]
    fn request_without_params_parses() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_door_states","id":7}"#).unwrap();
        assert!(parsed.params.is_null());
        assert_eq!(parsed.id, Some(serde_json::json!(7)));
    }
}
