use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{FriendRequestResponse, FriendResponse};
use crate::modules::friend::schema::{FriendRequestEntity, FriendshipEntity};

#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    async fn find_friends(&self, user_id: &Uuid)
        -> Result<Vec<FriendResponse>, error::SystemError>;

    /// Removes the edge. Returns false when no edge existed.
    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    /// The pending request between two users, in either direction.
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_request_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    async fn find_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    async fn create_request(
        &self,
        sender_id: &Uuid,
        recipient_id: &Uuid,
        message: &Option<String>,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Deletes the request only while it is still pending and owned by
    /// `sender_id`. Returns false when the row was not deleted, so a
    /// concurrent resolution is observable rather than silently absorbed.
    async fn delete_pending_request(
        &self,
        request_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendStore: FriendshipRepository + FriendRequestRepository + Send + Sync {
    /// Resolves a pending request to accepted or declined as one atomic
    /// read-modify-write. When accepting, the friendship edge is created
    /// in the same transaction. Fails with `NotFound` when the request
    /// does not exist, `Unauthorized` when `recipient_id` is not the
    /// request's recipient, and `InvalidState` when the request has
    /// already been resolved.
    async fn resolve_request(
        &self,
        request_id: &Uuid,
        recipient_id: &Uuid,
        accept: bool,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}
