use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        notification::{
            model::{NotificationPayload, PlaydateEvent},
            notifier::{Notifier, PlaydateChannel},
        },
        playdate::{
            model::{CreatePlaydateModel, InsertPlaydate, PlaydateDetail, UpdatePlaydate,
                UpdatePlaydateModel},
            repository::PlaydateRepository,
            schema::PlaydateEntity,
        },
    },
};

#[derive(Clone)]
pub struct PlaydateService<P>
where
    P: PlaydateRepository + Send + Sync,
{
    playdate_repo: Arc<P>,
    notifier: Arc<dyn Notifier>,
    channel: Arc<dyn PlaydateChannel>,
}

impl<P> PlaydateService<P>
where
    P: PlaydateRepository + Send + Sync,
{
    pub fn with_dependencies(
        playdate_repo: Arc<P>,
        notifier: Arc<dyn Notifier>,
        channel: Arc<dyn PlaydateChannel>,
    ) -> Self {
        PlaydateService { playdate_repo, notifier, channel }
    }

    pub async fn create_playdate(
        &self,
        host_id: Uuid,
        playdate: CreatePlaydateModel,
    ) -> Result<PlaydateDetail, error::SystemError> {
        if playdate.start_time >= playdate.end_time {
            return Err(error::SystemError::invalid_operation(
                "Playdate must start before it ends",
            ));
        }

        let insert = InsertPlaydate {
            title: playdate.title,
            description: playdate.description,
            location: playdate.location,
            start_time: playdate.start_time,
            end_time: playdate.end_time,
        };

        let entity = self.playdate_repo.create(&host_id, &insert).await?;
        let attendees = self.playdate_repo.find_attendees(&entity.id).await?;

        Ok(PlaydateDetail { playdate: entity, attendees })
    }

    pub async fn get_playdate(&self, id: Uuid) -> Result<PlaydateDetail, error::SystemError> {
        let playdate = self
            .playdate_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        let attendees = self.playdate_repo.find_attendees(&id).await?;

        Ok(PlaydateDetail { playdate, attendees })
    }

    pub async fn get_playdates_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PlaydateEntity>, error::SystemError> {
        self.playdate_repo.find_for_user(&user_id).await
    }

    pub async fn update_playdate(
        &self,
        host_id: Uuid,
        playdate_id: Uuid,
        update: UpdatePlaydateModel,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let current = self.require_host(host_id, playdate_id).await?;

        // The time window is validated against the merged state so a
        // partial update cannot invert it.
        let start = update.start_time.unwrap_or(current.start_time);
        let end = update.end_time.unwrap_or(current.end_time);
        if start >= end {
            return Err(error::SystemError::invalid_operation(
                "Playdate must start before it ends",
            ));
        }

        let update = UpdatePlaydate {
            title: update.title,
            description: update.description,
            location: update.location,
            start_time: update.start_time,
            end_time: update.end_time,
        };

        let updated = self.playdate_repo.update(&playdate_id, &update).await?;

        let event = PlaydateEvent::Updated {
            playdate: serde_json::to_value(&updated).unwrap_or_default(),
        };
        self.publish(playdate_id, event).await;

        Ok(updated)
    }

    pub async fn cancel_playdate(
        &self,
        host_id: Uuid,
        playdate_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let playdate = self.require_host(host_id, playdate_id).await?;

        let attendees = self.playdate_repo.find_attendees(&playdate_id).await?;

        if !self.playdate_repo.delete(&playdate_id).await? {
            return Err(error::SystemError::not_found("Playdate not found"));
        }

        self.publish(playdate_id, PlaydateEvent::Cancelled).await;

        for attendee in attendees.iter().filter(|a| a.id != host_id) {
            self.notify(
                attendee.id,
                NotificationPayload::playdate_cancelled(&playdate.title, playdate_id),
            )
            .await;
        }

        Ok(())
    }

    /// Idempotent: joining a playdate the user already attends succeeds
    /// without emitting a second event.
    pub async fn join_playdate(
        &self,
        user_id: Uuid,
        playdate_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if self.playdate_repo.find_by_id(&playdate_id).await?.is_none() {
            return Err(error::SystemError::not_found("Playdate not found"));
        }

        let inserted = self.playdate_repo.add_attendee(&playdate_id, &user_id).await?;

        if inserted {
            self.publish(playdate_id, PlaydateEvent::AttendeeJoined { user_id }).await;
        }

        Ok(())
    }

    pub async fn leave_playdate(
        &self,
        user_id: Uuid,
        playdate_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let playdate = self
            .playdate_repo
            .find_by_id(&playdate_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        if playdate.host_id == user_id {
            return Err(error::SystemError::invalid_operation(
                "The host cannot leave their own playdate",
            ));
        }

        if !self.playdate_repo.remove_attendee(&playdate_id, &user_id).await? {
            return Err(error::SystemError::not_found("Not attending this playdate"));
        }

        self.publish(playdate_id, PlaydateEvent::AttendeeLeft { user_id }).await;

        Ok(())
    }

    async fn require_host(
        &self,
        host_id: Uuid,
        playdate_id: Uuid,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let playdate = self
            .playdate_repo
            .find_by_id(&playdate_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        if playdate.host_id != host_id {
            return Err(error::SystemError::unauthorized(
                "Only the host can modify this playdate",
            ));
        }

        Ok(playdate)
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
