//! In-memory mock implementation of the user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::user::{NewUser, UserChanges, UserCredentials, UserProfile},
    test_utils::test_datetime,
    use_cases::user::UserRepo,
};

/// In-memory implementation of `UserRepo`, keyed by id.
/// Deleted users are removed outright.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<Uuid, UserCredentials>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserCredentials>) -> Self {
        let map: HashMap<Uuid, UserCredentials> =
            users.into_iter().map(|u| (u.profile.id, u)).collect();
        Self {
            users: Mutex::new(map),
        }
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.profile.username == username)
            .cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.users.lock().unwrap().get(&id).map(|u| u.profile.clone()))
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let mut profiles: Vec<UserProfile> = self
            .users
            .lock()
            .unwrap()
            .values()
            .map(|u| u.profile.clone())
            .collect();
        profiles.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(profiles)
    }

    async fn create(&self, user: &NewUser) -> AppResult<UserProfile> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.profile.username == user.username || u.profile.email == user.email)
        {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }

        let profile = UserProfile {
            id: Uuid::new_v4(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            created_at: Some(test_datetime()),
            updated_at: Some(test_datetime()),
        };
        users.insert(
            profile.id,
            UserCredentials {
                profile: profile.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(profile)
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> AppResult<UserProfile> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or(AppError::NotFound)?;
        user.profile.email = changes.email.clone();
        user.profile.first_name = changes.first_name.clone();
        user.profile.middle_name = changes.middle_name.clone();
        user.profile.last_name = changes.last_name.clone();
        if let Some(hash) = &changes.password_hash {
            user.password_hash = hash.clone();
        }
        Ok(user.profile.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}
