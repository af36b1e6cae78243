use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Push payload delivered to a single user. `data` carries the typed
/// event so clients can deep-link without parsing the display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationData {
    #[serde(rename_all = "camelCase")]
    FriendRequest { sender_id: Uuid, recipient_id: Uuid, request_id: Uuid },
    #[serde(rename_all = "camelCase")]
    FriendRequestAccepted { sender_id: Uuid, recipient_id: Uuid, request_id: Uuid },
    #[serde(rename_all = "camelCase")]
    Invitation { sender_id: Uuid, recipient_id: Uuid, invitation_id: Uuid },
    #[serde(rename_all = "camelCase")]
    InvitationAccepted { playdate_id: Uuid, invitation_id: Uuid, recipient_id: Uuid },
    #[serde(rename_all = "camelCase")]
    PlaydateCancelled { playdate_id: Uuid },
}

impl NotificationPayload {
    pub fn friend_request(sender_name: &str, sender_id: Uuid, recipient_id: Uuid, request_id: Uuid) -> Self {
        NotificationPayload {
            title: "New friend request".to_string(),
            body: format!("{sender_name} wants to be your friend"),
            data: NotificationData::FriendRequest { sender_id, recipient_id, request_id },
        }
    }

    pub fn friend_request_accepted(
        recipient_name: &str,
        sender_id: Uuid,
        recipient_id: Uuid,
        request_id: Uuid,
    ) -> Self {
        NotificationPayload {
            title: "Friend request accepted".to_string(),
            body: format!("{recipient_name} accepted your friend request"),
            data: NotificationData::FriendRequestAccepted { sender_id, recipient_id, request_id },
        }
    }

    pub fn invitation(
        sender_name: &str,
        playdate_title: &str,
        sender_id: Uuid,
        recipient_id: Uuid,
        invitation_id: Uuid,
    ) -> Self {
        NotificationPayload {
            title: "Playdate invitation".to_string(),
            body: format!("{sender_name} invited you to \"{playdate_title}\""),
            data: NotificationData::Invitation { sender_id, recipient_id, invitation_id },
        }
    }

    pub fn invitation_accepted(
        recipient_name: &str,
        playdate_title: &str,
        playdate_id: Uuid,
        invitation_id: Uuid,
        recipient_id: Uuid,
    ) -> Self {
        NotificationPayload {
            title: "Invitation accepted".to_string(),
            body: format!("{recipient_name} is coming to \"{playdate_title}\""),
            data: NotificationData::InvitationAccepted { playdate_id, invitation_id, recipient_id },
        }
    }

    pub fn playdate_cancelled(playdate_title: &str, playdate_id: Uuid) -> Self {
        NotificationPayload {
            title: "Playdate cancelled".to_string(),
            body: format!("\"{playdate_title}\" has been cancelled"),
            data: NotificationData::PlaydateCancelled { playdate_id },
        }
    }
}

/// Room-scoped event fanned out to every client watching a playdate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlaydateEvent {
    #[serde(rename_all = "camelCase")]
    AttendeeJoined { user_id: Uuid },
    #[serde(rename_all = "camelCase")]
    AttendeeLeft { user_id: Uuid },
    #[serde(rename_all = "camelCase")]
    Updated { playdate: serde_json::Value },
    Cancelled,
}
