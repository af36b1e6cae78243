/// WebSocket session actor: one per connection. Holds the auth state,
/// forwards commands to the server actor, and pushes outbound messages
/// to the client through an mpsc channel bridged in handler.rs.
///
/// Async work (redis, DB) runs via `ctx.spawn()` + `into_actor()`.
use actix::prelude::*;
use actix_web::web;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::modules::friend::repository::FriendshipRepository;
use crate::modules::friend::repository_pg::FriendRepositoryPg;
use crate::utils::{Claims, TypeClaims};
use crate::ENV;

use super::events::*;
use super::message::{ClientMessage, ServerMessage};
use super::presence::PresenceService;
use super::server::WebSocketServer;

pub struct WebSocketSession {
    pub id: Uuid,

    /// Set once the client has authenticated
    pub user_id: Option<Uuid>,

    /// Friend ids loaded at auth time, used for presence fan-out on
    /// disconnect
    friend_ids: Vec<Uuid>,

    pub server: Addr<WebSocketServer>,

    /// Outbound JSON channel (bridged to the socket in handler.rs)
    pub tx: mpsc::UnboundedSender<String>,

    presence: web::Data<PresenceService>,
    friend_repo: web::Data<FriendRepositoryPg>,
}

impl WebSocketSession {
    pub fn new(
        server: Addr<WebSocketServer>,
        tx: mpsc::UnboundedSender<String>,
        presence: web::Data<PresenceService>,
        friend_repo: web::Data<FriendRepositoryPg>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: None,
            friend_ids: Vec::new(),
            server,
            tx,
            presence,
            friend_repo,
        }
    }

    fn send_to_client(&self, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = self.tx.send(json) {
                    tracing::error!("Failed to push message to client (session {}): {}", self.id, e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize ServerMessage (session {}): {}", self.id, e);
            }
        }
    }

    fn send_error(&self, message: &str) {
        self.send_to_client(&ServerMessage::Error { message: message.to_string() });
    }

    fn require_auth(&self) -> Option<Uuid> {
        if self.user_id.is_none() {
            self.send_error("Authenticate before performing this action");
            tracing::warn!("Session {} not authenticated, request rejected", self.id);
        }
        self.user_id
    }

    fn handle_client_message(&mut self, msg: &ClientMessage, ctx: &mut Context<Self>) {
        match msg {
            ClientMessage::Auth { token } => {
                self.handle_auth(token, ctx);
            }

            ClientMessage::WatchPlaydate { playdate_id } => {
                self.handle_watch_playdate(*playdate_id);
            }

            ClientMessage::UnwatchPlaydate { playdate_id } => {
                self.handle_unwatch_playdate(*playdate_id);
            }

            ClientMessage::Ping => {
                self.handle_ping(ctx);
            }
        }
    }

    /// Verifies the JWT, binds the session to a user, and kicks off the
    /// presence bootstrap (set online, load friends, fan out).
    fn handle_auth(&mut self, token: &str, ctx: &mut Context<Self>) {
        if self.user_id.is_some() {
            self.send_error("Session already authenticated");
            return;
        }

        let claims = match Claims::decode(token, ENV.jwt_secret.as_ref()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("JWT verification failed (session {}): {}", self.id, e);
                self.send_to_client(&ServerMessage::AuthFailed {
                    reason: "Token invalid or expired".to_string(),
                });
                return;
            }
        };

        if claims._type.as_ref() != Some(&TypeClaims::AccessToken) {
            self.send_to_client(&ServerMessage::AuthFailed {
                reason: "Access token required".to_string(),
            });
            return;
        }

        let user_id = claims.sub;

        self.user_id = Some(user_id);

        self.server.do_send(Authenticate { session_id: self.id, user_id });

        self.send_to_client(&ServerMessage::AuthSuccess { user_id });

        tracing::info!("User {} authenticated on session {}", user_id, self.id);

        let presence = self.presence.clone();
        let friend_repo = self.friend_repo.clone();

        ctx.spawn(
            async move {
                if let Err(e) = presence.set_online(user_id).await {
                    tracing::warn!("Failed to mark user {} online: {}", user_id, e);
                }

                match friend_repo.find_friends(&user_id).await {
                    Ok(friends) => friends.into_iter().map(|f| f.id).collect(),
                    Err(e) => {
                        tracing::warn!("Failed to load friends for {}: {}", user_id, e);
                        Vec::new()
                    }
                }
            }
            .into_actor(self)
            .map(move |friend_ids: Vec<Uuid>, act, _ctx| {
                act.friend_ids = friend_ids.clone();
                act.server
                    .do_send(SendInitialPresence { user_id, friend_ids: friend_ids.clone() });
                act.server.do_send(UserPresenceChanged {
                    user_id,
                    is_online: true,
                    last_seen: None,
                    friend_ids,
                });
            }),
        );
    }

    fn handle_watch_playdate(&self, playdate_id: Uuid) {
        let Some(user_id) = self.require_auth() else {
            return;
        };

        self.server.do_send(WatchPlaydate { user_id, playdate_id });
        tracing::debug!("User {} watching playdate {}", user_id, playdate_id);
    }

    fn handle_unwatch_playdate(&self, playdate_id: Uuid) {
        let Some(user_id) = self.require_auth() else {
            return;
        };

        self.server.do_send(UnwatchPlaydate { user_id, playdate_id });
        tracing::debug!("User {} stopped watching playdate {}", user_id, playdate_id);
    }

    /// Pong plus a presence TTL refresh for authenticated sessions.
    fn handle_ping(&self, ctx: &mut Context<Self>) {
        self.send_to_client(&ServerMessage::Pong);

        if let Some(user_id) = self.user_id {
            let presence = self.presence.clone();
            ctx.spawn(
                async move {
                    if let Err(e) = presence.refresh_presence(user_id).await {
                        tracing::warn!("Failed to refresh presence for {}: {}", user_id, e);
                    }
                }
                .into_actor(self),
            );
        }
    }
}

impl Actor for WebSocketSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session started: {}", self.id);

        self.server.do_send(Connect { id: self.id, addr: ctx.address() });
    }

    /// Runs on every teardown path; the Disconnect message makes the
    /// server release all of this session's registrations.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session stopped: {}", self.id);

        self.server.do_send(Disconnect { id: self.id });

        if let Some(user_id) = self.user_id {
            let presence = self.presence.clone();
            let server = self.server.clone();
            let friend_ids = std::mem::take(&mut self.friend_ids);
            let last_seen = chrono::Utc::now().to_rfc3339();

            actix_web::rt::spawn(async move {
                if let Err(e) = presence.set_offline(user_id).await {
                    tracing::warn!("Failed to mark user {} offline: {}", user_id, e);
                }

                server.do_send(UserPresenceChanged {
                    user_id,
                    is_online: false,
                    last_seen: Some(last_seen),
                    friend_ids,
                });
            });
        }
    }
}

impl Handler<CloseSession> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, _: CloseSession, ctx: &mut Context<Self>) {
        ctx.stop();
    }
}

impl Message for ClientMessage {
    type Result = ();
}

/// Inbound: parsed client messages forwarded from handler.rs
impl Handler<ClientMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, ctx: &mut Context<Self>) {
        self.handle_client_message(&msg, ctx);
    }
}

/// Outbound: messages from the server actor, serialized to the client
impl Handler<ServerMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, _ctx: &mut Context<Self>) {
        self.send_to_client(&msg);
    }
}
