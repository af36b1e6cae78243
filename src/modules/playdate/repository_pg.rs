use uuid::Uuid;

use crate::{
    api::error,
    modules::playdate::{
        model::{AttendeeResponse, InsertPlaydate, UpdatePlaydate},
        repository::PlaydateRepository,
        schema::PlaydateEntity,
    },
};

#[derive(Clone)]
pub struct PlaydateRepositoryPg {
    pool: sqlx::PgPool,
}

impl PlaydateRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PlaydateRepository for PlaydateRepositoryPg {
    async fn create(
        &self,
        host_id: &Uuid,
        playdate: &InsertPlaydate,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, PlaydateEntity>(
            r#"
            INSERT INTO playdates (id, host_id, title, description, location, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(host_id)
        .bind(&playdate.title)
        .bind(&playdate.description)
        .bind(&playdate.location)
        .bind(playdate.start_time)
        .bind(playdate.end_time)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO playdate_attendees (playdate_id, user_id) VALUES ($1, $2)")
            .bind(entity.id)
            .bind(host_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(entity)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<PlaydateEntity>, error::SystemError> {
        let playdate =
            sqlx::query_as::<_, PlaydateEntity>("SELECT * FROM playdates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(playdate)
    }

    async fn find_attendees(
        &self,
        playdate_id: &Uuid,
    ) -> Result<Vec<AttendeeResponse>, error::SystemError> {
        let attendees = sqlx::query_as::<_, AttendeeResponse>(
            r#"
            SELECT
                u.id,
                u.username,
                u.display_name,
                u.avatar_url,
                pa.joined_at
            FROM playdate_attendees pa
            JOIN users u ON u.id = pa.user_id
            WHERE pa.playdate_id = $1
            ORDER BY pa.joined_at
            "#,
        )
        .bind(playdate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    async fn find_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PlaydateEntity>, error::SystemError> {
        let playdates = sqlx::query_as::<_, PlaydateEntity>(
            r#"
            SELECT p.*
            FROM playdates p
            JOIN playdate_attendees pa ON pa.playdate_id = p.id
            WHERE pa.user_id = $1
            ORDER BY p.start_time
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(playdates)
    }

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdatePlaydate,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let playdate = sqlx::query_as::<_, PlaydateEntity>(
            r#"
        UPDATE playdates
        SET
            title       = COALESCE($2, title),
            description = CASE WHEN $3::boolean THEN $4 ELSE description END,
            location    = CASE WHEN $5::boolean THEN $6 ELSE location END,
            start_time  = COALESCE($7, start_time),
            end_time    = COALESCE($8, end_time),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING *
        "#,
        )
        .bind(id)
        .bind(&update.title) // $2: Option<String>
        .bind(update.description.is_some()) // $3: bool - was description provided?
        .bind(update.description.as_ref().and_then(|v| v.as_ref())) // $4: Option<&String>
        .bind(update.location.is_some()) // $5: bool - was location provided?
        .bind(update.location.as_ref().and_then(|v| v.as_ref())) // $6: Option<&String>
        .bind(update.start_time) // $7: Option<DateTime>
        .bind(update.end_time) // $8: Option<DateTime>
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        Ok(playdate)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM playdates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn add_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            INSERT INTO playdate_attendees (playdate_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(playdate_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn remove_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows =
            sqlx::query("DELETE FROM playdate_attendees WHERE playdate_id = $1 AND user_id = $2")
                .bind(playdate_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(rows > 0)
    }

    async fn is_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let row = sqlx::query(
            "SELECT 1 FROM playdate_attendees WHERE playdate_id = $1 AND user_id = $2",
        )
        .bind(playdate_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }
}
