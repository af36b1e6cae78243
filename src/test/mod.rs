//! In-memory implementations of the repository and notifier seams, used
//! by the service unit tests. A single mutex per store makes the
//! "atomic" trait operations genuinely atomic.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::{
    FriendRequestResponse, FriendResponse, RequestDirection, RequestUserInfo,
};
use crate::modules::friend::repository::{
    FriendRequestRepository, FriendStore, FriendshipRepository,
};
use crate::modules::friend::schema::{
    ordered_pair, FriendRequestEntity, FriendshipEntity, RequestStatus,
};
use crate::modules::invitation::model::{InvitationResponse, PlaydateSummary};
use crate::modules::invitation::repository::InvitationStore;
use crate::modules::invitation::schema::PlaydateInvitationEntity;
use crate::modules::notification::model::{NotificationPayload, PlaydateEvent};
use crate::modules::notification::notifier::{Notifier, PlaydateChannel};
use crate::modules::playdate::model::{AttendeeResponse, InsertPlaydate, UpdatePlaydate};
use crate::modules::playdate::repository::PlaydateRepository;
use crate::modules::playdate::schema::PlaydateEntity;
use crate::modules::user::model::{InsertUser, UpdateUser};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::{UserEntity, UserRole};

// === Users ===

pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, UserEntity>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self { users: Mutex::new(HashMap::new()) }
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let entity = UserEntity {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            hash_password: "not-a-real-hash".to_string(),
            role: UserRole::User,
            display_name: username.to_string(),
            avatar_url: None,
            bio: None,
            phone: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, entity);
        id
    }

    fn get(&self, id: &Uuid) -> Option<UserEntity> {
        self.users.lock().unwrap().get(id).filter(|u| u.deleted_at.is_none()).cloned()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.get(id))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.deleted_at.is_none() && u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let entity = UserEntity {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            role: UserRole::User,
            display_name: user.display_name.clone(),
            avatar_url: None,
            bio: None,
            phone: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(id, entity);
        Ok(id)
    }

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdateUser,
    ) -> Result<UserEntity, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if let Some(username) = &update.username {
            user.username = username.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(display_name) = &update.display_name {
            user.display_name = display_name.clone();
        }
        if let Some(avatar_url) = &update.avatar_url {
            user.avatar_url = avatar_url.clone();
        }
        if let Some(bio) = &update.bio {
            user.bio = bio.clone();
        }
        if let Some(phone) = &update.phone {
            user.phone = phone.clone();
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(id).filter(|u| u.deleted_at.is_none()) {
            Some(user) => {
                user.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search_users(
        &self,
        query: &str,
        limit: i32,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let needle = query.to_lowercase();
        let users = self.users.lock().unwrap();
        let mut found: Vec<UserEntity> = users
            .values()
            .filter(|u| {
                u.deleted_at.is_none()
                    && (u.username.to_lowercase().contains(&needle)
                        || u.display_name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        found.truncate(limit as usize);
        Ok(found)
    }
}

// === Friend store ===

#[derive(Default)]
struct FriendState {
    requests: HashMap<Uuid, FriendRequestEntity>,
    friendships: HashMap<(Uuid, Uuid), FriendshipEntity>,
}

pub struct InMemoryFriendStore {
    state: Mutex<FriendState>,
    users: Arc<InMemoryUsers>,
}

impl InMemoryFriendStore {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self { state: Mutex::new(FriendState::default()), users }
    }

    fn user_info(&self, id: &Uuid) -> Option<RequestUserInfo> {
        self.users.get(id).map(RequestUserInfo::from)
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for InMemoryFriendStore {
    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError> {
        let key = ordered_pair(*user_id_a, *user_id_b);
        Ok(self.state.lock().unwrap().friendships.get(&key).cloned())
    }

    async fn find_friends(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut friends = Vec::new();
        for edge in state.friendships.values() {
            let other = if edge.user_a == *user_id {
                edge.user_b
            } else if edge.user_b == *user_id {
                edge.user_a
            } else {
                continue;
            };

            if let Some(user) = self.users.get(&other) {
                friends.push(FriendResponse {
                    id: user.id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    friend_since: edge.friend_since,
                });
            }
        }
        friends.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(friends)
    }

    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let key = ordered_pair(*user_id_a, *user_id_b);
        Ok(self.state.lock().unwrap().friendships.remove(&key).is_some())
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for InMemoryFriendStore {
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .values()
            .find(|r| {
                r.status == RequestStatus::Pending
                    && ordered_pair(r.sender_id, r.recipient_id)
                        == ordered_pair(*user_id_a, *user_id_b)
            })
            .cloned())
    }

    async fn find_request_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        Ok(self.state.lock().unwrap().requests.get(request_id).cloned())
    }

    async fn find_incoming_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut out = Vec::new();
        for r in state.requests.values() {
            if r.recipient_id == *user_id && r.status == RequestStatus::Pending {
                if let Some(user) = self.user_info(&r.sender_id) {
                    out.push(FriendRequestResponse {
                        id: r.id,
                        direction: RequestDirection::Incoming,
                        user,
                        message: r.message.clone(),
                        created_at: r.created_at,
                    });
                }
            }
        }
        Ok(out)
    }

    async fn find_outgoing_requests(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut out = Vec::new();
        for r in state.requests.values() {
            if r.sender_id == *user_id && r.status == RequestStatus::Pending {
                if let Some(user) = self.user_info(&r.recipient_id) {
                    out.push(FriendRequestResponse {
                        id: r.id,
                        direction: RequestDirection::Outgoing,
                        user,
                        message: r.message.clone(),
                        created_at: r.created_at,
                    });
                }
            }
        }
        Ok(out)
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        recipient_id: &Uuid,
        message: &Option<String>,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();

        // Mirrors the partial unique index on pending pairs.
        let duplicate = state.requests.values().any(|r| {
            r.status == RequestStatus::Pending
                && ordered_pair(r.sender_id, r.recipient_id)
                    == ordered_pair(*sender_id, *recipient_id)
        });
        if duplicate {
            return Err(error::SystemError::duplicate_request(
                "A pending request already exists",
            ));
        }

        let now = Utc::now();
        let request = FriendRequestEntity {
            id: Uuid::now_v7(),
            sender_id: *sender_id,
            recipient_id: *recipient_id,
            status: RequestStatus::Pending,
            message: message.clone(),
            created_at: now,
            updated_at: now,
        };
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn delete_pending_request(
        &self,
        request_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let deletable = matches!(
            state.requests.get(request_id),
            Some(r) if r.sender_id == *sender_id && r.status == RequestStatus::Pending
        );
        if deletable {
            state.requests.remove(request_id);
        }
        Ok(deletable)
    }
}

#[async_trait::async_trait]
impl FriendStore for InMemoryFriendStore {
    async fn resolve_request(
        &self,
        request_id: &Uuid,
        recipient_id: &Uuid,
        accept: bool,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();

        let request = state
            .requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        if request.recipient_id != *recipient_id {
            return Err(error::SystemError::unauthorized(
                "Only the recipient can respond to this friend request",
            ));
        }

        if request.status != RequestStatus::Pending {
            return Err(error::SystemError::invalid_state(
                "Friend request has already been resolved",
            ));
        }

        let status = if accept { RequestStatus::Accepted } else { RequestStatus::Declined };
        let updated = {
            let entry = state.requests.get_mut(request_id).unwrap();
            entry.status = status;
            entry.updated_at = Utc::now();
            entry.clone()
        };

        if accept {
            let (user_a, user_b) = ordered_pair(request.sender_id, request.recipient_id);
            state
                .friendships
                .entry((user_a, user_b))
                .or_insert_with(|| FriendshipEntity { user_a, user_b, friend_since: Utc::now() });
        }

        Ok(updated)
    }
}

// === Playdates ===

#[derive(Default)]
struct PlaydateState {
    playdates: HashMap<Uuid, PlaydateEntity>,
    /// playdate_id -> attendees in join order
    attendees: HashMap<Uuid, Vec<(Uuid, chrono::DateTime<Utc>)>>,
}

pub struct InMemoryPlaydates {
    state: Mutex<PlaydateState>,
    users: Arc<InMemoryUsers>,
}

impl InMemoryPlaydates {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self { state: Mutex::new(PlaydateState::default()), users }
    }

    pub fn users(&self) -> Arc<InMemoryUsers> {
        self.users.clone()
    }
}

#[async_trait::async_trait]
impl PlaydateRepository for InMemoryPlaydates {
    async fn create(
        &self,
        host_id: &Uuid,
        playdate: &InsertPlaydate,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let entity = PlaydateEntity {
            id: Uuid::now_v7(),
            host_id: *host_id,
            title: playdate.title.clone(),
            description: playdate.description.clone(),
            location: playdate.location.clone(),
            start_time: playdate.start_time,
            end_time: playdate.end_time,
            created_at: now,
            updated_at: now,
        };
        state.attendees.insert(entity.id, vec![(*host_id, now)]);
        state.playdates.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<PlaydateEntity>, error::SystemError> {
        Ok(self.state.lock().unwrap().playdates.get(id).cloned())
    }

    async fn find_attendees(
        &self,
        playdate_id: &Uuid,
    ) -> Result<Vec<AttendeeResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut out = Vec::new();
        for (user_id, joined_at) in state.attendees.get(playdate_id).into_iter().flatten() {
            if let Some(user) = self.users.get(user_id) {
                out.push(AttendeeResponse {
                    id: user.id,
                    username: user.username,
                    display_name: user.display_name,
                    avatar_url: user.avatar_url,
                    joined_at: *joined_at,
                });
            }
        }
        Ok(out)
    }

    async fn find_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PlaydateEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        let mut out: Vec<PlaydateEntity> = state
            .attendees
            .iter()
            .filter(|(_, attendees)| attendees.iter().any(|(id, _)| id == user_id))
            .filter_map(|(playdate_id, _)| state.playdates.get(playdate_id).cloned())
            .collect();
        out.sort_by_key(|p| p.start_time);
        Ok(out)
    }

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdatePlaydate,
    ) -> Result<PlaydateEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let playdate = state
            .playdates
            .get_mut(id)
            .ok_or_else(|| error::SystemError::not_found("Playdate not found"))?;

        if let Some(title) = &update.title {
            playdate.title = title.clone();
        }
        if let Some(description) = &update.description {
            playdate.description = description.clone();
        }
        if let Some(location) = &update.location {
            playdate.location = location.clone();
        }
        if let Some(start_time) = update.start_time {
            playdate.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            playdate.end_time = end_time;
        }
        playdate.updated_at = Utc::now();

        Ok(playdate.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        state.attendees.remove(id);
        Ok(state.playdates.remove(id).is_some())
    }

    async fn add_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let attendees = state.attendees.entry(*playdate_id).or_default();
        if attendees.iter().any(|(id, _)| id == user_id) {
            return Ok(false);
        }
        attendees.push((*user_id, Utc::now()));
        Ok(true)
    }

    async fn remove_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let Some(attendees) = state.attendees.get_mut(playdate_id) else {
            return Ok(false);
        };
        let before = attendees.len();
        attendees.retain(|(id, _)| id != user_id);
        Ok(attendees.len() != before)
    }

    async fn is_attendee(
        &self,
        playdate_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .attendees
            .get(playdate_id)
            .is_some_and(|attendees| attendees.iter().any(|(id, _)| id == user_id)))
    }
}

// === Invitations ===

pub struct InMemoryInvitations {
    invitations: Mutex<HashMap<Uuid, PlaydateInvitationEntity>>,
    playdates: Arc<InMemoryPlaydates>,
}

impl InMemoryInvitations {
    pub fn new(playdates: Arc<InMemoryPlaydates>) -> Self {
        Self { invitations: Mutex::new(HashMap::new()), playdates }
    }

    fn build_response(
        &self,
        invitation: &PlaydateInvitationEntity,
        direction: RequestDirection,
    ) -> Option<InvitationResponse> {
        let playdate = {
            let state = self.playdates.state.lock().unwrap();
            state.playdates.get(&invitation.playdate_id).cloned()?
        };
        let counterpart = match direction {
            RequestDirection::Incoming => invitation.sender_id,
            RequestDirection::Outgoing => invitation.recipient_id,
        };
        let user = self.playdates.users().get(&counterpart).map(RequestUserInfo::from)?;

        Some(InvitationResponse {
            id: invitation.id,
            direction,
            playdate: PlaydateSummary {
                id: playdate.id,
                title: playdate.title,
                start_time: playdate.start_time,
            },
            user,
            message: invitation.message.clone(),
            created_at: invitation.created_at,
        })
    }
}

#[async_trait::async_trait]
impl InvitationStore for InMemoryInvitations {
    async fn create_invitation(
        &self,
        playdate_id: &Uuid,
        sender_id: &Uuid,
        recipient_id: &Uuid,
        message: &Option<String>,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let mut invitations = self.invitations.lock().unwrap();

        // Mirrors the partial unique index on (playdate, recipient).
        let duplicate = invitations.values().any(|i| {
            i.status == RequestStatus::Pending
                && i.playdate_id == *playdate_id
                && i.recipient_id == *recipient_id
        });
        if duplicate {
            return Err(error::SystemError::duplicate_request(
                "A pending request already exists",
            ));
        }

        let now = Utc::now();
        let invitation = PlaydateInvitationEntity {
            id: Uuid::now_v7(),
            playdate_id: *playdate_id,
            sender_id: *sender_id,
            recipient_id: *recipient_id,
            status: RequestStatus::Pending,
            message: message.clone(),
            created_at: now,
            updated_at: now,
        };
        invitations.insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn find_invitation_by_id(
        &self,
        invitation_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError> {
        Ok(self.invitations.lock().unwrap().get(invitation_id).cloned())
    }

    async fn find_pending_invitation(
        &self,
        playdate_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<Option<PlaydateInvitationEntity>, error::SystemError> {
        let invitations = self.invitations.lock().unwrap();
        Ok(invitations
            .values()
            .find(|i| {
                i.status == RequestStatus::Pending
                    && i.playdate_id == *playdate_id
                    && i.recipient_id == *recipient_id
            })
            .cloned())
    }

    async fn find_incoming_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError> {
        let pending: Vec<PlaydateInvitationEntity> = {
            let invitations = self.invitations.lock().unwrap();
            invitations
                .values()
                .filter(|i| i.recipient_id == *user_id && i.status == RequestStatus::Pending)
                .cloned()
                .collect()
        };
        Ok(pending
            .iter()
            .filter_map(|i| self.build_response(i, RequestDirection::Incoming))
            .collect())
    }

    async fn find_outgoing_invitations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<InvitationResponse>, error::SystemError> {
        let pending: Vec<PlaydateInvitationEntity> = {
            let invitations = self.invitations.lock().unwrap();
            invitations
                .values()
                .filter(|i| i.sender_id == *user_id && i.status == RequestStatus::Pending)
                .cloned()
                .collect()
        };
        Ok(pending
            .iter()
            .filter_map(|i| self.build_response(i, RequestDirection::Outgoing))
            .collect())
    }

    async fn resolve_invitation(
        &self,
        invitation_id: &Uuid,
        recipient_id: &Uuid,
        accept: bool,
    ) -> Result<PlaydateInvitationEntity, error::SystemError> {
        let updated = {
            let mut invitations = self.invitations.lock().unwrap();

            let invitation = invitations
                .get(invitation_id)
                .cloned()
                .ok_or_else(|| error::SystemError::not_found("Invitation not found"))?;

            if invitation.recipient_id != *recipient_id {
                return Err(error::SystemError::unauthorized(
                    "Only the recipient can respond to this invitation",
                ));
            }

            if invitation.status != RequestStatus::Pending {
                return Err(error::SystemError::invalid_state(
                    "Invitation has already been resolved",
                ));
            }

            let entry = invitations.get_mut(invitation_id).unwrap();
            entry.status =
                if accept { RequestStatus::Accepted } else { RequestStatus::Declined };
            entry.updated_at = Utc::now();
            entry.clone()
        };

        if accept {
            self.playdates.add_attendee(&updated.playdate_id, recipient_id).await?;
        }

        Ok(updated)
    }

    async fn delete_pending_invitation(
        &self,
        invitation_id: &Uuid,
        sender_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut invitations = self.invitations.lock().unwrap();
        let deletable = matches!(
            invitations.get(invitation_id),
            Some(i) if i.sender_id == *sender_id && i.status == RequestStatus::Pending
        );
        if deletable {
            invitations.remove(invitation_id);
        }
        Ok(deletable)
    }
}

// === Notifier doubles ===

pub struct RecordingNotifier {
    sent: Mutex<Vec<(Uuid, NotificationPayload)>>,
    published: Mutex<Vec<(Uuid, PlaydateEvent)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self { sent: Mutex::new(Vec::new()), published: Mutex::new(Vec::new()) }
    }

    pub fn sent(&self) -> Vec<(Uuid, NotificationPayload)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<(Uuid, PlaydateEvent)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        recipient_id: Uuid,
        payload: NotificationPayload,
    ) -> Result<(), error::SystemError> {
        self.sent.lock().unwrap().push((recipient_id, payload));
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlaydateChannel for RecordingNotifier {
    async fn publish(
        &self,
        playdate_id: Uuid,
        event: PlaydateEvent,
    ) -> Result<(), error::SystemError> {
        self.published.lock().unwrap().push((playdate_id, event));
        Ok(())
    }
}

/// Always fails: exercises the log-and-swallow contract of callers.
pub struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn notify(
        &self,
        _recipient_id: Uuid,
        _payload: NotificationPayload,
    ) -> Result<(), error::SystemError> {
        Err(error::SystemError::DatabaseError("push channel unavailable".into()))
    }
}

#[async_trait::async_trait]
impl PlaydateChannel for FailingNotifier {
    async fn publish(
        &self,
        _playdate_id: Uuid,
        _event: PlaydateEvent,
    ) -> Result<(), error::SystemError> {
        Err(error::SystemError::DatabaseError("push channel unavailable".into()))
    }
}
