use uuid::Uuid;

use crate::api::error;
use crate::modules::notification::model::{NotificationPayload, PlaydateEvent};

/// Best-effort push channel to a single user. Callers treat delivery as
/// fire-and-forget: failures are logged by the calling service and never
/// propagated to the operation that triggered the notification.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        recipient_id: Uuid,
        payload: NotificationPayload,
    ) -> Result<(), error::SystemError>;
}

/// Best-effort fan-out to every client watching a playdate.
#[async_trait::async_trait]
pub trait PlaydateChannel: Send + Sync {
    async fn publish(
        &self,
        playdate_id: Uuid,
        event: PlaydateEvent,
    ) -> Result<(), error::SystemError>;
}

/// No-op implementations for wiring paths that have no live gateway.
pub struct NullNotifier;

#[async_trait::async_trait]
impl Notifier for NullNotifier {
    async fn notify(
        &self,
        _recipient_id: Uuid,
        _payload: NotificationPayload,
    ) -> Result<(), error::SystemError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlaydateChannel for NullNotifier {
    async fn publish(
        &self,
        _playdate_id: Uuid,
        _event: PlaydateEvent,
    ) -> Result<(), error::SystemError> {
        Ok(())
    }
}
