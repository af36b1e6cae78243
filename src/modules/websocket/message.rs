/// WebSocket message protocol between clients and the server.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::notification::model::{NotificationPayload, PlaydateEvent};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Authenticate the connection with a JWT access token
    #[serde(rename_all = "camelCase")]
    Auth { token: String },

    /// Start receiving live updates for a playdate
    #[serde(rename_all = "camelCase")]
    WatchPlaydate { playdate_id: Uuid },

    /// Stop receiving live updates for a playdate
    #[serde(rename_all = "camelCase")]
    UnwatchPlaydate { playdate_id: Uuid },

    /// Keep the connection and the presence entry alive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    AuthSuccess { user_id: Uuid },

    #[serde(rename_all = "camelCase")]
    AuthFailed { reason: String },

    /// Targeted push: friend requests, invitations, cancellations
    #[serde(rename_all = "camelCase")]
    Notification { payload: NotificationPayload },

    /// Room fan-out for a watched playdate
    #[serde(rename_all = "camelCase")]
    PlaydateEvent { playdate_id: Uuid, event: PlaydateEvent },

    /// Friends currently online, sent once after authentication
    #[serde(rename_all = "camelCase")]
    OnlineUsers { user_ids: Vec<Uuid> },

    #[serde(rename_all = "camelCase")]
    UserOnline { user_id: Uuid },

    #[serde(rename_all = "camelCase")]
    UserOffline { user_id: Uuid, last_seen: Option<String> },

    Pong,

    #[serde(rename_all = "camelCase")]
    Error { message: String },
}
