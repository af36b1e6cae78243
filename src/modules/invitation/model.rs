use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::friend::model::{RequestDirection, RequestUserInfo};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvitationBody {
    pub playdate_id: Uuid,
    pub recipient_id: Uuid,
    #[validate(length(max = 500, message = "Message is too long"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaydateSummary {
    pub id: Uuid,
    pub title: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

/// A pending invitation as seen by one of its parties: `user` is always
/// the counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub direction: RequestDirection,
    pub playdate: PlaydateSummary,
    pub user: RequestUserInfo,
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Join row backing InvitationResponse queries.
#[derive(FromRow)]
pub struct InvitationUserRow {
    pub inv_id: Uuid,
    pub playdate_id: Uuid,
    pub playdate_title: String,
    pub playdate_start: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl InvitationUserRow {
    pub fn into_response(self, direction: RequestDirection) -> InvitationResponse {
        InvitationResponse {
            id: self.inv_id,
            direction,
            playdate: PlaydateSummary {
                id: self.playdate_id,
                title: self.playdate_title,
                start_time: self.playdate_start,
            },
            user: RequestUserInfo {
                id: self.user_id,
                username: self.username,
                display_name: self.display_name,
                avatar_url: self.avatar_url,
            },
            message: self.message,
            created_at: self.created_at,
        }
    }
}
