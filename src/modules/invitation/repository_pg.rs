use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{model::RequestDirection, schema::RequestStatus},
        invitation::{
            model::{InvitationResponse, InvitationUserRow},
            repository::InvitationStore,
            schema::PlaydateInvitationEntity,
        },
    },
};

#[derive(Clone)]
pub struct InvitationRepositoryPg {
    pool: sqlx::PgPool,
}

impl InvitationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InvitationStore for InvitationRepositoryPg {
    async fn create_invitation(
        &self,
        playdate_id: &Uuid,
        sender_id: &Uuid,
        recipient_id: &Uuid,
        message: &Option<String>,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let invitation = sqlx::query_as::<_, PlaydateInvitationEntity>(
            r#"
            INSERT INTO playdate_invitations (id, playdate_id, sender_id, recipient_id, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(playdate_id)
        .bind(sender_id)
        .bind(recipient_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_invitation_by_id(
        &self,
        invitation_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError> {
        let invitation = sqlx::query_as::<_, PlaydateInvitationEntity>(
            "SELECT * FROM playdate_invitations WHERE id = $1",
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_pending_invitation(
        &self,
        playdate_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError> {
        let invitation = sqlx::query_as::<_, PlaydateInvitationEntity>(
            r#"
            SELECT * FROM playdate_invitations
            WHERE playdate_id = $1 AND recipient_id = $2 AND status = 'pending'
            "#,
        )
        .bind(playdate_id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_incoming_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, InvitationUserRow>(
            r#"
            SELECT
                i.id AS inv_id,
                p.id AS playdate_id,
                p.title AS playdate_title,
                p.start_time AS playdate_start,
                u.id AS user_id,
                u.username,
                u.display_name,
                u.avatar_url,
                i.message,
                i.created_at
            FROM playdate_invitations i
            JOIN playdates p ON p.id = i.playdate_id
            JOIN users u ON u.id = i.sender_id
            WHERE i.recipient_id = $1
              AND i.status = 'pending'
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_response(RequestDirection::Incoming)).collect())
    }

    async fn find_outgoing_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, InvitationUserRow>(
            r#"
            SELECT
                i.id AS inv_id,
                p.id AS playdate_id,
                p.title AS playdate_title,
                p.start_time AS playdate_start,
                u.id AS user_id,
                u.username,
                u.display_name,
                u.avatar_url,
                i.message,
                i.created_at
            FROM playdate_invitations i
            JOIN playdates p ON p.id = i.playdate_id
            JOIN users u ON u.id = i.recipient_id
            WHERE i.sender_id = $1
              AND i.status = 'pending'
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_response(RequestDirection::Outgoing)).collect())
    }

    async fn resolve_invitation(
        &self,
        invitation_id: &Uuid,
        recipient_id: &Uuid,
        accept: bool,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let invitation = sqlx::query_as::<_, PlaydateInvitationEntity>(
            "SELECT * FROM playdate_invitations WHERE id = $1 FOR UPDATE",
        )
        .bind(invitation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Invitation not found"))?;

        if invitation.recipient_id != *recipient_id {
            tx.rollback().await?;
            return Err(error::SystemError::unauthorized(
                "Only the recipient can respond to this invitation",
            ));
        }

        if invitation.status != RequestStatus::Pending {
            tx.rollback().await?;
            return Err(error::SystemError::invalid_state(
                "Invitation has already been resolved",
            ));
        }

        let status = if accept { RequestStatus::Accepted } else { RequestStatus::Declined };

        let updated = sqlx::query_as::<_, PlaydateInvitationEntity>(
            r#"
            UPDATE playdate_invitations
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(invitation_id)
        .bind(&status)
        .fetch_one(&mut *tx)
        .await?;

        if accept {
            sqlx::query(
                r#"
                INSERT INTO playdate_attendees (playdate_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(invitation.playdate_id)
            .bind(recipient_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_pending_invitation(
        &self,
        invitation_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            DELETE FROM playdate_invitations
            WHERE id = $1 AND sender_id = $2 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(sender_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}
