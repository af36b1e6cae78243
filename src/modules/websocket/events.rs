/// Messages exchanged between the session actors and the server actor.
use actix::prelude::*;
use uuid::Uuid;

use super::message::ServerMessage;
use super::session::WebSocketSession;

/// A new connection was established
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: Uuid,
    pub addr: Addr<WebSocketSession>,
}

/// A connection closed; the server releases every registration the
/// session held, regardless of how it ended
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: Uuid,
}

/// A session authenticated as a user
#[derive(Message)]
#[rtype(result = "()")]
pub struct Authenticate {
    pub session_id: Uuid,
    pub user_id: Uuid,
}

/// Subscribe the user to a playdate's live updates
#[derive(Message)]
#[rtype(result = "()")]
pub struct WatchPlaydate {
    pub user_id: Uuid,
    pub playdate_id: Uuid,
}

/// Unsubscribe the user from a playdate's live updates. After this is
/// processed no further room events reach the user.
#[derive(Message)]
#[rtype(result = "()")]
pub struct UnwatchPlaydate {
    pub user_id: Uuid,
    pub playdate_id: Uuid,
}

/// Fan a message out to every user watching a playdate
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct BroadcastToRoom {
    pub playdate_id: Uuid,
    pub message: ServerMessage,
    /// Skip this user (e.g. the originator)
    pub skip_user_id: Option<Uuid>,
}

/// Deliver a message to every session of one user (multi-device)
#[derive(Message)]
#[rtype(result = "()")]
pub struct SendToUser {
    pub user_id: Uuid,
    pub message: ServerMessage,
}

/// Deliver a message to several users at once
#[derive(Message)]
#[rtype(result = "()")]
pub struct SendToUsers {
    pub user_ids: Vec<Uuid>,
    pub message: ServerMessage,
}

/// Users with at least one live session
#[derive(Message)]
#[rtype(result = "Vec<Uuid>")]
pub struct GetOnlineUsers;

/// Stop a session actor once its socket pump has ended, so the
/// stopped() hook runs and the server releases its registrations even
/// though the server still holds the session's address
#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseSession;

/// A user's presence flipped; only their friends are told
#[derive(Message)]
#[rtype(result = "()")]
pub struct UserPresenceChanged {
    pub user_id: Uuid,
    pub is_online: bool,
    pub last_seen: Option<String>,
    pub friend_ids: Vec<Uuid>,
}

/// Tell a freshly authenticated user which of their friends are online
#[derive(Message)]
#[rtype(result = "()")]
pub struct SendInitialPresence {
    pub user_id: Uuid,
    pub friend_ids: Vec<Uuid>,
}
