/// WebSocket server actor: owns every live connection, the user/session
/// mapping and the playdate watch rooms, and routes messages between them.
use actix::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::events::*;
use super::message::ServerMessage;
use super::session::WebSocketSession;

pub struct WebSocketServer {
    /// session_id -> session actor address
    sessions: HashMap<Uuid, Addr<WebSocketSession>>,

    /// user_id -> set of session_ids. One user can hold several
    /// sessions at once (phone + tablet).
    users: HashMap<Uuid, HashSet<Uuid>>,

    /// playdate_id -> set of user_ids watching it
    rooms: HashMap<Uuid, HashSet<Uuid>>,
}

impl WebSocketServer {
    pub fn new() -> Self {
        Self { sessions: HashMap::new(), users: HashMap::new(), rooms: HashMap::new() }
    }

    fn get_online_users(&self) -> Vec<Uuid> {
        self.users.keys().copied().collect()
    }

    fn send_to_session(&self, session_id: &Uuid, message: ServerMessage) {
        if let Some(session_addr) = self.sessions.get(session_id) {
            session_addr.do_send(message);
        }
    }

    fn send_to_user(&self, user_id: &Uuid, message: ServerMessage) {
        if let Some(session_ids) = self.users.get(user_id) {
            for session_id in session_ids {
                self.send_to_session(session_id, message.clone());
            }
        }
    }
}

impl Actor for WebSocketServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server stopped");
    }
}

impl Handler<Connect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        tracing::debug!("New WebSocket session connected: {}", msg.id);

        self.sessions.insert(msg.id, msg.addr);
    }
}

/// Disconnect releases every registration the session held. This runs on
/// every teardown path, so no listener outlives its connection.
impl Handler<Disconnect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        tracing::debug!("WebSocket session disconnected: {}", msg.id);

        self.sessions.remove(&msg.id);

        let mut user_to_remove: Option<Uuid> = None;
        for (&user_id, sessions) in self.users.iter_mut() {
            if sessions.remove(&msg.id) {
                if sessions.is_empty() {
                    user_to_remove = Some(user_id);
                }
                break;
            }
        }

        if let Some(user_id) = user_to_remove {
            self.users.remove(&user_id);

            for room_users in self.rooms.values_mut() {
                room_users.remove(&user_id);
            }

            self.rooms.retain(|_, users| !users.is_empty());

            tracing::info!(
                "User {} fully disconnected (no more sessions) and removed from all rooms",
                user_id
            );
        }
    }
}

impl Handler<Authenticate> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Authenticate, _: &mut Context<Self>) {
        let sessions = self.users.entry(msg.user_id).or_default();
        sessions.insert(msg.session_id);

        tracing::info!(
            "User {} authenticated on session {} ({} active session(s))",
            msg.user_id,
            msg.session_id,
            sessions.len()
        );
    }
}

impl Handler<WatchPlaydate> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: WatchPlaydate, _: &mut Context<Self>) {
        self.rooms.entry(msg.playdate_id).or_default().insert(msg.user_id);

        tracing::debug!(
            "User {} watching playdate {} ({} watchers)",
            msg.user_id,
            msg.playdate_id,
            self.rooms.get(&msg.playdate_id).map_or(0, HashSet::len)
        );
    }
}

impl Handler<UnwatchPlaydate> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: UnwatchPlaydate, _: &mut Context<Self>) {
        if let Some(room) = self.rooms.get_mut(&msg.playdate_id) {
            room.remove(&msg.user_id);

            tracing::debug!(
                "User {} stopped watching playdate {} ({} watchers remaining)",
                msg.user_id,
                msg.playdate_id,
                room.len()
            );

            if room.is_empty() {
                self.rooms.remove(&msg.playdate_id);
            }
        }
    }
}

impl Handler<BroadcastToRoom> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: BroadcastToRoom, _: &mut Context<Self>) {
        if let Some(room_users) = self.rooms.get(&msg.playdate_id) {
            let mut sent_count = 0;

            for &user_id in room_users {
                if let Some(skip_id) = msg.skip_user_id {
                    if user_id == skip_id {
                        continue;
                    }
                }

                if let Some(session_ids) = self.users.get(&user_id) {
                    for session_id in session_ids {
                        self.send_to_session(session_id, msg.message.clone());
                        sent_count += 1;
                    }
                }
            }

            tracing::debug!(
                "Broadcast to playdate {}: sent to {} sessions",
                msg.playdate_id,
                sent_count
            );
        } else {
            tracing::debug!("No watchers for playdate {}, broadcast dropped", msg.playdate_id);
        }
    }
}

impl Handler<SendToUser> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: SendToUser, _: &mut Context<Self>) {
        if let Some(session_ids) = self.users.get(&msg.user_id) {
            let session_count = session_ids.len();
            for session_id in session_ids {
                self.send_to_session(session_id, msg.message.clone());
            }
            tracing::debug!("Sent message to user {} ({} sessions)", msg.user_id, session_count);
        } else {
            tracing::debug!("User {} not online, message not sent", msg.user_id);
        }
    }
}

impl Handler<SendToUsers> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: SendToUsers, _: &mut Context<Self>) {
        let mut sent_count = 0;

        for user_id in &msg.user_ids {
            if let Some(session_ids) = self.users.get(user_id) {
                for session_id in session_ids {
                    self.send_to_session(session_id, msg.message.clone());
                    sent_count += 1;
                }
            }
        }

        tracing::debug!(
            "Sent message to {} users ({} total sessions)",
            msg.user_ids.len(),
            sent_count
        );
    }
}

impl Handler<GetOnlineUsers> for WebSocketServer {
    type Result = Vec<Uuid>;

    fn handle(&mut self, _: GetOnlineUsers, _: &mut Context<Self>) -> Self::Result {
        self.get_online_users()
    }
}

/// Presence fan-out is friend-scoped: only the user's friends are told,
/// and only those currently online.
impl Handler<UserPresenceChanged> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: UserPresenceChanged, _: &mut Context<Self>) {
        // Another device may still hold a session; the user is not
        // offline until the last one is gone.
        if !msg.is_online && self.users.contains_key(&msg.user_id) {
            tracing::debug!(
                "User {} still has live sessions, offline fan-out skipped",
                msg.user_id
            );
            return;
        }

        let event = if msg.is_online {
            ServerMessage::UserOnline { user_id: msg.user_id }
        } else {
            ServerMessage::UserOffline { user_id: msg.user_id, last_seen: msg.last_seen }
        };

        let mut notified_count = 0;
        for friend_id in &msg.friend_ids {
            if self.users.contains_key(friend_id) {
                self.send_to_user(friend_id, event.clone());
                notified_count += 1;
            }
        }

        tracing::info!(
            "Presence change: user {} {} -> notified {}/{} friends",
            msg.user_id,
            if msg.is_online { "online" } else { "offline" },
            notified_count,
            msg.friend_ids.len()
        );
    }
}

/// Sends the just-authenticated user the subset of their friends that
/// currently hold a session.
impl Handler<SendInitialPresence> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: SendInitialPresence, _: &mut Context<Self>) {
        let online_friend_ids: Vec<Uuid> = msg
            .friend_ids
            .iter()
            .filter(|fid| self.users.contains_key(fid))
            .copied()
            .collect();

        let message = ServerMessage::OnlineUsers { user_ids: online_friend_ids.clone() };

        self.send_to_user(&msg.user_id, message);

        tracing::debug!(
            "Sent initial presence to user {}: {}/{} friends online",
            msg.user_id,
            online_friend_ids.len(),
            msg.friend_ids.len()
        );
    }
}

impl Message for ServerMessage {
    type Result = ();
}

impl Default for WebSocketServer {
    fn default() -> Self {
        Self::new()
    }
}
