use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse, FriendshipStatus},
            repository::FriendStore,
            schema::FriendRequestEntity,
        },
        notification::{model::NotificationPayload, notifier::Notifier},
        user::repository::UserRepository,
    },
};

/// Owns the friend-request state machine and the friendship edge set.
/// All mutations of `friend_requests` and `friendships` go through here.
#[derive(Clone)]
pub struct FriendService<S, U>
where
    S: FriendStore + Send + Sync,
    U: UserRepository + Send + Sync,
{
    store: Arc<S>,
    user_repo: Arc<U>,
    notifier: Arc<dyn Notifier>,
}

impl<S, U> FriendService<S, U>
where
    S: FriendStore + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        store: Arc<S>,
        user_repo: Arc<U>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        FriendService { store, user_repo, notifier }
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.store.find_friends(&user_id).await
    }

    pub async fn get_friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let incoming = self.store.find_incoming_requests(&user_id).await?;
        let outgoing = self.store.find_outgoing_requests(&user_id).await?;

        let mut all = Vec::with_capacity(incoming.len() + outgoing.len());
        all.extend(incoming);
        all.extend(outgoing);
        Ok(all)
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        message: Option<String>,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if recipient_id == sender_id {
            return Err(error::SystemError::invalid_operation(
                "Cannot send a friend request to yourself",
            ));
        }

        let sender = self
            .user_repo
            .find_by_id(&sender_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Sender not found"))?;

        if self.user_repo.find_by_id(&recipient_id).await?.is_none() {
            return Err(error::SystemError::not_found("Recipient not found"));
        }

        if self.store.find_friendship(&sender_id, &recipient_id).await?.is_some() {
            return Err(error::SystemError::already_friends("Users are already friends"));
        }

        // Either direction counts: an inbound pending request means the
        // recipient should respond to it, not receive a mirror request.
        if self.store.find_pending_between(&sender_id, &recipient_id).await?.is_some() {
            return Err(error::SystemError::duplicate_request(
                "A pending friend request already exists between these users",
            ));
        }

        let request = self.store.create_request(&sender_id, &recipient_id, &message).await?;

        self.notify(
            recipient_id,
            NotificationPayload::friend_request(
                &sender.display_name,
                sender_id,
                recipient_id,
                request.id,
            ),
        )
        .await;

        Ok(request)
    }

    /// Resolves a pending request. Exactly one response can ever succeed
    /// for a given request; later attempts fail with `InvalidState`.
    pub async fn respond_to_friend_request(
        &self,
        recipient_id: Uuid,
        request_id: Uuid,
        accept: bool,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = self.store.resolve_request(&request_id, &recipient_id, accept).await?;

        if accept {
            match self.user_repo.find_by_id(&recipient_id).await {
                Ok(Some(recipient)) => {
                    self.notify(
                        request.sender_id,
                        NotificationPayload::friend_request_accepted(
                            &recipient.display_name,
                            request.sender_id,
                            recipient_id,
                            request.id,
                        ),
                    )
                    .await;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping acceptance notification for {}: {}", request.id, e)
                }
            }
        }

        Ok(request)
    }

    pub async fn cancel_friend_request(
        &self,
        sender_id: Uuid,
        request_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let request = self
            .store
            .find_request_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        if request.sender_id != sender_id {
            return Err(error::SystemError::unauthorized(
                "Only the sender can cancel a friend request",
            ));
        }

        // The delete re-checks sender and pending status, so a request
        // resolved between the read above and this write is reported
        // instead of silently ignored.
        if !self.store.delete_pending_request(&request_id, &sender_id).await? {
            return Err(error::SystemError::invalid_state(
                "Friend request has already been resolved",
            ));
        }

        Ok(())
    }

    pub async fn remove_friendship(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.store.delete_friendship(&user_id, &friend_id).await? {
            return Err(error::SystemError::not_found("Friendship not found"));
        }
        Ok(())
    }

    /// Derives the relation between `viewer` and `candidate`. The checks
    /// run in a fixed order (self, edge, pending request, none) so the
    /// answer is always exactly one variant.
    pub async fn friendship_status(
        &self,
        viewer: Option<Uuid>,
        candidate: Uuid,
    ) -> Result<FriendshipStatus, error::SystemError> {
        let Some(viewer) = viewer else {
            return Ok(FriendshipStatus::NotLoggedIn);
        };

        if viewer == candidate {
            return Ok(FriendshipStatus::IsSelf);
        }

        if self.user_repo.find_by_id(&candidate).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        if self.store.find_friendship(&viewer, &candidate).await?.is_some() {
            return Ok(FriendshipStatus::Friends);
        }

        if let Some(request) = self.store.find_pending_between(&viewer, &candidate).await? {
            if request.sender_id == viewer {
                return Ok(FriendshipStatus::RequestSent { request_id: request.id });
            }
            return Ok(FriendshipStatus::RequestReceived { request });
        }

        Ok(FriendshipStatus::NotFriends)
    }

    async fn notify(&self, recipient_id: Uuid, payload: NotificationPayload) {
        if let Err(e) = self.notifier.notify(recipient_id, payload).await {
            tracing::warn!("Notification delivery to {} failed: {}", recipient_id, e);
        }
    }
}
