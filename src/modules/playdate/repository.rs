use uuid::Uuid;

use crate::api::error;
use crate::modules::playdate::model::{AttendeeResponse, InsertPlaydate, UpdatePlaydate};
use crate::modules::playdate::schema::PlaydateEntity;

#[async_trait::async_trait]
pub trait PlaydateRepository {
    /// Inserts the playdate and the host's attendee row in one
    /// transaction: a playdate never exists without its host attending.
    async fn create(
        &self,
        host_id: &Uuid,
        playdate: &InsertPlaydate,
    ) -> Result<PlaydateEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid)
        -> Result<Option<PlaydateEntity>, error::SystemError>;

    async fn find_attendees(
        &self,
        playdate_id: &Uuid,
    ) -> Result<Vec<AttendeeResponse>, error::SystemError>;

    /// Playdates the user hosts or attends, soonest first.
    async fn find_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PlaydateEntity>, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdatePlaydate,
    ) -> Result<PlaydateEntity, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;

    /// Add-if-absent. Returns false when the user was already attending,
    /// so callers can suppress duplicate join events.
    async fn add_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn remove_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn is_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}
