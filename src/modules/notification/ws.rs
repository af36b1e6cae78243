use actix::Addr;
use uuid::Uuid;

use crate::api::error;
use crate::modules::notification::model::{NotificationPayload, PlaydateEvent};
use crate::modules::notification::notifier::{Notifier, PlaydateChannel};
use crate::modules::websocket::events::{BroadcastToRoom, SendToUser};
use crate::modules::websocket::message::ServerMessage;
use crate::modules::websocket::server::WebSocketServer;

/// Delivers notifications and room events over the websocket server
/// actor. `do_send` is fire-and-forget; an offline recipient simply
/// receives nothing, which is the contract for this channel.
#[derive(Clone)]
pub struct WsGateway {
    server: Addr<WebSocketServer>,
}

impl WsGateway {
    pub fn new(server: Addr<WebSocketServer>) -> Self {
        Self { server }
    }
}

#[async_trait::async_trait]
impl Notifier for WsGateway {
    async fn notify(
        &self,
        recipient_id: Uuid,
        payload: NotificationPayload,
    ) -> Result<(), error::SystemError> {
        tracing::debug!("Pushing notification to user {}: {}", recipient_id, payload.title);

        self.server.do_send(SendToUser {
            user_id: recipient_id,
            message: ServerMessage::Notification { payload },
        });

        Ok(())
    }
}

#[async_trait::async_trait]
impl PlaydateChannel for WsGateway {
    async fn publish(
        &self,
        playdate_id: Uuid,
        event: PlaydateEvent,
    ) -> Result<(), error::SystemError> {
        tracing::debug!("Publishing event to playdate room {}", playdate_id);

        self.server.do_send(BroadcastToRoom {
            playdate_id,
            message: ServerMessage::PlaydateEvent { playdate_id, event },
            skip_user_id: None,
        });

        Ok(())
    }
}
