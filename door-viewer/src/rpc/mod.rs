//! JSON-RPC 2.0 communication layer for the embedding web page.
//!
//! Implements bidirectional messaging between the viewer and its host page via
//! postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (parent window)   <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! New methods get a match arm in `web_rpc::handle_rpc_request` and a
//! handler returning `Result<serde_json::Value, RpcError>`. Handlers never
//! touch the ECS directly; state changes go out as the same events the
//! pointer path uses.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes in use:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Requests
//!
//! - `get_door_states`: current open/closed bit per door and which doors
//!   the model provided
//! - `toggle_door { side }`: flip a door exactly as a click on it would;
//!   `-32602` if the side is unknown or missing from the model
//!
//! ## Notifications
//!
//! - `model_loaded`: which doors were bound
//! - `model_load_failed`: the model path and loader error
//! - `marker_picked`: a door marker was clicked
//! - `door_toggled`: side, new state, target angle in degrees and swing duration

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
