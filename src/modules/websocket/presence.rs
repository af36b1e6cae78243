/// Redis-backed online/offline state.
///
/// Key schema:
/// - `presence:{user_id}` -> "1" (TTL 60s) while the user is online
/// - `last_seen:{user_id}` -> ISO 8601 timestamp of the last disconnect
///
/// Client pings refresh the TTL, so a dropped connection expires on its
/// own and a remaining session re-marks the user online within one
/// heartbeat interval.
use deadpool_redis::redis::{self, AsyncCommands};
use uuid::Uuid;

use crate::api::error;

/// Presence TTL in seconds; pings arrive well inside this window.
const PRESENCE_TTL: u64 = 60;

const PRESENCE_PREFIX: &str = "presence:";
const LAST_SEEN_PREFIX: &str = "last_seen:";

#[derive(Clone)]
pub struct PresenceService {
    pool: deadpool_redis::Pool,
}

impl PresenceService {
    pub fn new(pool: deadpool_redis::Pool) -> Self {
        Self { pool }
    }

    pub async fn set_online(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        let mut conn = self.pool.get().await?;
        let key = format!("{PRESENCE_PREFIX}{user_id}");
        conn.set_ex::<_, _, ()>(&key, "1", PRESENCE_TTL).await?;
        Ok(())
    }

    pub async fn set_offline(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        let mut conn = self.pool.get().await?;
        let presence_key = format!("{PRESENCE_PREFIX}{user_id}");
        let last_seen_key = format!("{LAST_SEEN_PREFIX}{user_id}");
        let now = chrono::Utc::now().to_rfc3339();

        // One round-trip: drop presence, record last_seen.
        redis::pipe()
            .del(&presence_key)
            .set(&last_seen_key, &now)
            .query_async::<()>(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn refresh_presence(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        let mut conn = self.pool.get().await?;
        let key = format!("{PRESENCE_PREFIX}{user_id}");
        conn.expire::<_, bool>(&key, PRESENCE_TTL as i64).await?;
        Ok(())
    }

    pub async fn is_online(&self, user_id: Uuid) -> Result<bool, error::SystemError> {
        let mut conn = self.pool.get().await?;
        let key = format!("{PRESENCE_PREFIX}{user_id}");
        let exists: bool = conn.exists(&key).await?;
        Ok(exists)
    }

    pub async fn get_last_seen(
        &self,
        user_id: Uuid,
    ) -> Result<Option<String>, error::SystemError> {
        let mut conn = self.pool.get().await?;
        let key = format!("{LAST_SEEN_PREFIX}{user_id}");
        let last_seen: Option<String> = conn.get(&key).await?;
        Ok(last_seen)
    }

    /// Batch online/last_seen lookup, pipelined to keep round-trips flat
    /// for friend-list sized inputs.
    pub async fn get_online_status_batch(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<PresenceInfo>, error::SystemError> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.pool.get().await?;

        let mut pipe = redis::pipe();
        for user_id in user_ids {
            pipe.exists(format!("{PRESENCE_PREFIX}{user_id}"));
        }
        let online_flags: Vec<bool> = pipe.query_async(&mut *conn).await?;

        let offline_indices: Vec<usize> = online_flags
            .iter()
            .enumerate()
            .filter(|(_, &is_online)| !is_online)
            .map(|(i, _)| i)
            .collect();

        let last_seens: Vec<Option<String>> = if !offline_indices.is_empty() {
            let mut ls_pipe = redis::pipe();
            for &idx in &offline_indices {
                ls_pipe.get(format!("{LAST_SEEN_PREFIX}{}", user_ids[idx]));
            }
            ls_pipe.query_async(&mut *conn).await?
        } else {
            vec![]
        };

        let mut results = Vec::with_capacity(user_ids.len());
        let mut ls_idx = 0;

        for (i, user_id) in user_ids.iter().enumerate() {
            let is_online = online_flags[i];
            let last_seen = if !is_online && ls_idx < last_seens.len() {
                let ls = last_seens[ls_idx].clone();
                ls_idx += 1;
                ls
            } else {
                None
            };

            results.push(PresenceInfo { user_id: *user_id, is_online, last_seen });
        }

        Ok(results)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PresenceInfo {
    pub user_id: Uuid,
    pub is_online: bool,
    pub last_seen: Option<String>,
}
