use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::friend::schema::FriendRequestEntity;
use crate::modules::user::schema::UserEntity;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub friend_since: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestUserInfo {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<UserEntity> for RequestUserInfo {
    fn from(user: UserEntity) -> Self {
        RequestUserInfo {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
        }
    }
}

/// A pending friend request as seen by one of its two parties:
/// `user` is always the counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub direction: RequestDirection,
    pub user: RequestUserInfo,
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Join row backing FriendRequestResponse queries.
#[derive(FromRow)]
pub struct FriendRequestUserRow {
    pub req_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FriendRequestUserRow {
    pub fn into_response(self, direction: RequestDirection) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.req_id,
            direction,
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

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub recipient_id: Uuid,
    #[validate(length(max = 500, message = "Message is too long"))]
    pub message: Option<String>,
}

/// The relation between a viewer and a candidate user. Exactly one
/// variant holds for any pair at any point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FriendshipStatus {
    NotLoggedIn,
    IsSelf,
    Friends,
    #[serde(rename_all = "camelCase")]
    RequestSent { request_id: Uuid },
    #[serde(rename_all = "camelCase")]
    RequestReceived { request: FriendRequestEntity },
    NotFriends,
}

