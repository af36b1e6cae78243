use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        invitation::{
            model::InvitationResponse, repository::InvitationStore,
            schema::PlaydateInvitationEntity,
        },
        notification::{
            model::{NotificationPayload, PlaydateEvent},
            notifier::{Notifier, PlaydateChannel},
        },
        playdate::repository::PlaydateRepository,
        user::repository::UserRepository,
    },
};

/// Owns the playdate-invitation lifecycle. Acceptance is the one place
/// the attendee list of a playdate is grown on behalf of another user,
/// and it happens inside the store's transaction.
#[derive(Clone)]
pub struct InvitationService<I, P, U>
where
    I: InvitationStore,
    P: PlaydateRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    invitation_store: Arc<I>,
    playdate_repo: Arc<P>,
    user_repo: Arc<U>,
    notifier: Arc<dyn Notifier>,
    channel: Arc<dyn PlaydateChannel>,
}

impl<I, P, U> InvitationService<I, P, U>
where
    I: InvitationStore,
    P: PlaydateRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        invitation_store: Arc<I>,
        playdate_repo: Arc<P>,
        user_repo: Arc<U>,
        notifier: Arc<dyn Notifier>,
        channel: Arc<dyn PlaydateChannel>,
    ) -> Self {
        InvitationService { invitation_store, playdate_repo, user_repo, notifier, channel }
    }

    pub async fn send_invitation(
        &self,
        sender_id: Option<Uuid>,
        playdate_id: Uuid,
        recipient_id: Uuid,
        message: Option<String>,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let sender_id = sender_id
            .ok_or_else(|| error::SystemError::unauthenticated("Sign in to send invitations"))?;

        if recipient_id == sender_id {
            return Err(error::SystemError::invalid_operation("Cannot invite yourself"));
        }

        let playdate = self
            .playdate_repo
            .find_by_id(&playdate_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        // Only people already part of the playdate may grow it.
        if playdate.host_id != sender_id
            && !self.playdate_repo.is_attendee(&playdate_id, &sender_id).await?
        {
            return Err(error::SystemError::unauthorized(
                "Only the host or an attendee can send invitations",
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

        if self.playdate_repo.is_attendee(&playdate_id, &recipient_id).await? {
            return Err(error::SystemError::invalid_operation(
                "User is already attending this playdate",
            ));
        }

        if self
            .invitation_store
            .find_pending_invitation(&playdate_id, &recipient_id)
            .await?
            .is_some()
        {
            return Err(error::SystemError::duplicate_request(
                "User already has a pending invitation to this playdate",
            ));
        }

        let invitation = self
            .invitation_store
            .create_invitation(&playdate_id, &sender_id, &recipient_id, &message)
            .await?;

        self.notify(
            recipient_id,
            NotificationPayload::invitation(
                &sender.display_name,
                &playdate.title,
                sender_id,
                recipient_id,
                invitation.id,
            ),
        )
        .await;

        Ok(invitation)
    }

    /// Resolves a pending invitation. Acceptance appends the recipient to
    /// the attendee list atomically with the status change; repeated or
    /// concurrent responses beyond the first fail with `InvalidState` and
    /// never duplicate the attendee entry.
    pub async fn respond_to_invitation(
        &self,
        recipient_id: Uuid,
        invitation_id: Uuid,
        accept: bool,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let invitation = self
            .invitation_store
            .resolve_invitation(&invitation_id, &recipient_id, accept)
            .await?;

        if accept {
            self.publish(
                invitation.playdate_id,
                PlaydateEvent::AttendeeJoined { user_id: recipient_id },
            )
            .await;

            match self.acceptance_payload(&invitation, recipient_id).await {
                Ok(payload) => self.notify(invitation.sender_id, payload).await,
                Err(e) => {
                    tracing::warn!(
                        "Skipping acceptance notification for invitation {}: {}",
                        invitation.id,
                        e
                    )
                }
            }
        }

        Ok(invitation)
    }

    pub async fn cancel_invitation(
        &self,
        sender_id: Uuid,
        invitation_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let invitation = self
            .invitation_store
            .find_invitation_by_id(&invitation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Invitation not found"))?;

        if invitation.sender_id != sender_id {
            return Err(error::SystemError::unauthorized(
                "Only the sender can cancel an invitation",
            ));
        }

        if !self.invitation_store.delete_pending_invitation(&invitation_id, &sender_id).await? {
            return Err(error::SystemError::invalid_state(
                "Invitation has already been resolved",
            ));
        }

        Ok(())
    }

    pub async fn get_invitations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError> {
        let incoming = self.invitation_store.find_incoming_invitations(&user_id).await?;
        let outgoing = self.invitation_store.find_outgoing_invitations(&user_id).await?;

        let mut all = Vec::with_capacity(incoming.len() + outgoing.len());
        all.extend(incoming);
        all.extend(outgoing);
        Ok(all)
    }

    async fn acceptance_payload(
        &self,
        invitation: &PlaydateInvitationEntity,
        recipient_id: Uuid,
    ) -> Result<NotificationPayload, error::SystemError> {
        let recipient = self
            .user_repo
            .find_by_id(&recipient_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Recipient not found"))?;

        let title = self
            .playdate_repo
            .find_by_id(&invitation.playdate_id)
            .await?
            .map(|p| p.title)
            .unwrap_or_default();

        Ok(NotificationPayload::invitation_accepted(
            &recipient.display_name,
            &title,
            invitation.playdate_id,
            invitation.id,
            recipient_id,
        ))
    }

    async fn notify(&self, recipient_id: Uuid, payload: NotificationPayload) {
        if let Err(e) = self.notifier.notify(recipient_id, payload).await {
            tracing::warn!("Notification delivery to {} failed: {}", recipient_id, e);
        }
    }

    async fn publish(&self, playdate_id: Uuid, event: PlaydateEvent) {
        if let Err(e) = self.channel.publish(playdate_id, event).await {
            tracing::warn!("Room publish for playdate {} failed: {}", playdate_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::friend::schema::RequestStatus;
    use crate::modules::notification::model::NotificationData;
    use crate::modules::playdate::model::CreatePlaydateModel;
    use crate::modules::playdate::service::PlaydateService;
    use crate::test::{
        FailingNotifier, InMemoryInvitations, InMemoryPlaydates, InMemoryUsers, RecordingNotifier,
    };
    use chrono::{Duration, Utc};

    struct Fixture {
        invitations: InvitationService<InMemoryInvitations, InMemoryPlaydates, InMemoryUsers>,
        playdates: PlaydateService<InMemoryPlaydates>,
        users: Arc<InMemoryUsers>,
        notifier: Arc<RecordingNotifier>,
    }

    fn setup() -> Fixture {
        let users = Arc::new(InMemoryUsers::new());
        let playdate_repo = Arc::new(InMemoryPlaydates::new(users.clone()));
        let invitation_store = Arc::new(InMemoryInvitations::new(playdate_repo.clone()));
        let notifier = Arc::new(RecordingNotifier::new());

        let invitations = InvitationService::with_dependencies(
            invitation_store,
            playdate_repo.clone(),
            users.clone(),
            notifier.clone(),
            notifier.clone(),
        );
        let playdates = PlaydateService::with_dependencies(
            playdate_repo,
            notifier.clone(),
            notifier.clone(),
        );

        Fixture { invitations, playdates, users, notifier }
    }

    async fn hosted_playdate(fixture: &Fixture, host: Uuid) -> Uuid {
        let start = Utc::now() + Duration::days(1);
        let detail = fixture
            .playdates
            .create_playdate(
                host,
                CreatePlaydateModel {
                    title: "Park morning".to_string(),
                    description: None,
                    location: None,
                    start_time: start,
                    end_time: start + Duration::hours(2),
                },
            )
            .await
            .unwrap();
        detail.playdate.id
    }

    #[actix_web::test]
    async fn send_creates_pending_and_notifies_recipient() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, Some("come!".into()))
            .await
            .unwrap();

        assert_eq!(invitation.status, RequestStatus::Pending);

        let sent = fixture.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, guest);
        assert!(matches!(
            sent[0].1.data,
            NotificationData::Invitation { sender_id, recipient_id, invitation_id }
                if sender_id == host && recipient_id == guest && invitation_id == invitation.id
        ));
    }

    #[actix_web::test]
    async fn unauthenticated_sender_rejected() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let err = fixture
            .invitations
            .send_invitation(None, playdate_id, guest, None)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Unauthenticated(_)));
    }

    #[actix_web::test]
    async fn stranger_cannot_invite() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let stranger = fixture.users.add_user("stranger");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let err = fixture
            .invitations
            .send_invitation(Some(stranger), playdate_id, guest, None)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn duplicate_pending_invitation_rejected() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        fixture.invitations.send_invitation(Some(host), playdate_id, guest, None).await.unwrap();

        let err = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::DuplicateRequest(_)));
    }

    #[actix_web::test]
    async fn accept_adds_attendee_exactly_once() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap();

        let resolved = fixture
            .invitations
            .respond_to_invitation(guest, invitation.id, true)
            .await
            .unwrap();
        assert_eq!(resolved.status, RequestStatus::Accepted);

        // A second response must fail and must not touch the attendee list.
        let again = fixture
            .invitations
            .respond_to_invitation(guest, invitation.id, true)
            .await
            .unwrap_err();
        assert!(matches!(again, error::SystemError::InvalidState(_)));

        let attendees = fixture.playdates.get_playdate(playdate_id).await.unwrap().attendees;
        assert_eq!(attendees.iter().filter(|a| a.id == guest).count(), 1);
    }

    #[actix_web::test]
    async fn accept_after_public_join_keeps_single_attendee_entry() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap();

        // The guest joins on their own before responding.
        fixture.playdates.join_playdate(guest, playdate_id).await.unwrap();
        fixture.invitations.respond_to_invitation(guest, invitation.id, true).await.unwrap();

        let attendees = fixture.playdates.get_playdate(playdate_id).await.unwrap().attendees;
        assert_eq!(attendees.iter().filter(|a| a.id == guest).count(), 1);
    }

    #[actix_web::test]
    async fn decline_does_not_add_attendee() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap();

        let resolved = fixture
            .invitations
            .respond_to_invitation(guest, invitation.id, false)
            .await
            .unwrap();
        assert_eq!(resolved.status, RequestStatus::Declined);

        let attendees = fixture.playdates.get_playdate(playdate_id).await.unwrap().attendees;
        assert!(attendees.iter().all(|a| a.id != guest));
    }

    #[actix_web::test]
    async fn only_recipient_can_respond() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap();

        let err = fixture
            .invitations
            .respond_to_invitation(host, invitation.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn inviting_an_attendee_rejected() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        fixture.playdates.join_playdate(guest, playdate_id).await.unwrap();

        let err = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::InvalidOperation(_)));
    }

    #[actix_web::test]
    async fn cancel_is_sender_only_and_pending_only() {
        let fixture = setup();
        let host = fixture.users.add_user("host");
        let guest = fixture.users.add_user("guest");
        let playdate_id = hosted_playdate(&fixture, host).await;

        let invitation = fixture
            .invitations
            .send_invitation(Some(host), playdate_id, guest, None)
            .await
            .unwrap();

        let err =
            fixture.invitations.cancel_invitation(guest, invitation.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Unauthorized(_)));

        fixture.invitations.respond_to_invitation(guest, invitation.id, false).await.unwrap();

        let err = fixture.invitations.cancel_invitation(host, invitation.id).await.unwrap_err();
        assert!(matches!(err, error::SystemError::InvalidState(_)));
    }

    #[actix_web::test]
    async fn notifier_failure_does_not_fail_operation() {
        let users = Arc::new(InMemoryUsers::new());
        let host = users.add_user("host");
        let guest = users.add_user("guest");
        let playdate_repo = Arc::new(InMemoryPlaydates::new(users.clone()));
        let invitation_store = Arc::new(InMemoryInvitations::new(playdate_repo.clone()));

        let invitations = InvitationService::with_dependencies(
            invitation_store,
            playdate_repo.clone(),
            users.clone(),
            Arc::new(FailingNotifier),
            Arc::new(FailingNotifier),
        );
        let playdates = PlaydateService::with_dependencies(
            playdate_repo,
            Arc::new(FailingNotifier),
            Arc::new(FailingNotifier),
        );

        let start = Utc::now() + Duration::days(1);
        let detail = playdates
            .create_playdate(
                host,
                CreatePlaydateModel {
                    title: "Park morning".to_string(),
                    description: None,
                    location: None,
                    start_time: start,
                    end_time: start + Duration::hours(2),
                },
            )
            .await
            .unwrap();

        let invitation = invitations
            .send_invitation(Some(host), detail.playdate.id, guest, None)
            .await
            .unwrap();
        let resolved =
            invitations.respond_to_invitation(guest, invitation.id, true).await.unwrap();
        assert_eq!(resolved.status, RequestStatus::Accepted);
    }
}
