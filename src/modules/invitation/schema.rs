use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::friend::schema::RequestStatus;

#[derive(Debug, PartialEq, Clone, Serialize, FromRow)]
pub struct PlaydateInvitationEntity {
    pub id: Uuid,
    pub playdate_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
