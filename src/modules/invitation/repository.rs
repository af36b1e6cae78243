use uuid::Uuid;

use crate::api::error;
use crate::modules::invitation::model::InvitationResponse;
use crate::modules::invitation::schema::PlaydateInvitationEntity;

#[async_trait::async_trait]
pub trait InvitationStore: Send + Sync {
    async fn create_invitation(
        &self,
        playdate_id: &Uuid,
        sender_id: &Uuid,
        recipient_id: &Uuid,
        message: &Option<String>,
    ) -> Result<PlaydateInvitationEntity, error::SystemError>;

    async fn find_invitation_by_id(
        &self,
        invitation_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError>;

    async fn find_pending_invitation(
        &self,
        playdate_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError>;

    async fn find_incoming_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError>;

    async fn find_outgoing_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError>;

    /// Resolves a pending invitation as one atomic read-modify-write.
    /// When accepting, the recipient is appended to the playdate's
    /// attendee list with add-if-absent semantics inside the same
    /// transaction, so concurrent accepts cannot duplicate the entry.
    /// Fails with `NotFound` / `Unauthorized` / `InvalidState` under the
    /// same rules as friend-request resolution.
    async fn resolve_invitation(
        &self,
        invitation_id: &Uuid,
        recipient_id: &Uuid,
        accept: bool,
    ) -> Result<PlaydateInvitationEntity, error::SystemError>;

    /// Deletes the invitation only while pending and owned by
    /// `sender_id`. Returns false when nothing was deleted.
    async fn delete_pending_invitation(
        &self,
        invitation_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}
