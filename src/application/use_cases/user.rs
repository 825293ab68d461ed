use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        password::hash_password,
        validators::{MIN_PASSWORD_LEN, is_valid_email, is_valid_password},
    },
    domain::entities::user::{NewUser, UserChanges, UserCredentials, UserProfile},
};

/// Storage for user records. Soft-deleted users are invisible to every method.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserCredentials>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>>;
    async fn list(&self) -> AppResult<Vec<UserProfile>>;
    /// Fails with `InvalidInput` when the username or email is taken.
    async fn create(&self, user: &NewUser) -> AppResult<UserProfile>;
    /// Fails with `NotFound` when no live user has this id.
    async fn update(&self, id: Uuid, changes: &UserChanges) -> AppResult<UserProfile>;
    /// Fails with `NotFound` when no live user has this id.
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct UpdateUserInput {
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Empty or absent keeps the current password.
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct UserUseCases {
    repo: Arc<dyn UserRepo>,
    bcrypt_cost: u32,
}

impl UserUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, actor: &str, input: CreateUserInput) -> AppResult<UserProfile> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidInput("Username cannot be empty".into()));
        }
        let (email, first_name, middle_name, last_name) = validate_person(
            &input.email,
            &input.first_name,
            input.middle_name.as_deref(),
            &input.last_name,
        )?;
        if !is_valid_password(&input.password) {
            return Err(password_too_short());
        }
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(AppError::InvalidInput("User is already registered".into()));
        }

        let password_hash = hash_password(&input.password, self.bcrypt_cost).await?;
        let profile = self
            .repo
            .create(&NewUser {
                username: username.to_string(),
                email,
                first_name,
                middle_name,
                last_name,
                password_hash,
                created_by: actor.to_string(),
            })
            .await?;

        tracing::info!(user_id = %profile.id, "User created");
        Ok(profile)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> AppResult<UserProfile> {
        self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> AppResult<Vec<UserProfile>> {
        self.repo.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        actor: &str,
        id: Uuid,
        input: UpdateUserInput,
    ) -> AppResult<UserProfile> {
        let (email, first_name, middle_name, last_name) = validate_person(
            &input.email,
            &input.first_name,
            input.middle_name.as_deref(),
            &input.last_name,
        )?;

        let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) if !is_valid_password(password) => return Err(password_too_short()),
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let profile = self
            .repo
            .update(
                id,
                &UserChanges {
                    email,
                    first_name,
                    middle_name,
                    last_name,
                    password_hash,
                    updated_by: actor.to_string(),
                },
            )
            .await?;

        tracing::info!(user_id = %profile.id, "User updated");
        Ok(profile)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn validate_person(
    email: &str,
    first_name: &str,
    middle_name: Option<&str>,
    last_name: &str,
) -> AppResult<(String, String, Option<String>, String)> {
    if !is_valid_email(email) {
        return Err(AppError::InvalidInput("Invalid email address".into()));
    }
    let first_name = first_name.trim();
    if first_name.is_empty() {
        return Err(AppError::InvalidInput("First name cannot be empty".into()));
    }
    let last_name = last_name.trim();
    if last_name.is_empty() {
        return Err(AppError::InvalidInput("Last name cannot be empty".into()));
    }
    let middle_name = middle_name
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Ok((
        email.trim().to_lowercase(),
        first_name.to_string(),
        middle_name,
        last_name.to_string(),
    ))
}

fn password_too_short() -> AppError {
    AppError::InvalidInput(format!(
        "Password must be at least {MIN_PASSWORD_LEN} characters"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::password::verify_password,
        test_utils::{InMemoryUserRepo, TEST_BCRYPT_COST, create_test_user},
    };

    fn use_cases(repo: Arc<InMemoryUserRepo>) -> UserUseCases {
        UserUseCases::new(repo, TEST_BCRYPT_COST)
    }

    fn create_input(username: &str) -> CreateUserInput {
        CreateUserInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Carol".to_string(),
            middle_name: None,
            last_name: "Jones".to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn update_input() -> UpdateUserInput {
        UpdateUserInput {
            email: "new@example.com".to_string(),
            first_name: "Caroline".to_string(),
            middle_name: Some("  ".to_string()),
            last_name: "Smith".to_string(),
            password: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let repo = Arc::new(InMemoryUserRepo::new());
        let users = use_cases(repo.clone());

        let profile = users.create_user("admin", create_input("carol")).await.unwrap();

        assert_eq!(profile.username, "carol");
        assert_eq!(profile.email, "carol@example.com");
        let stored = repo.find_by_username("carol").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret");
        assert!(verify_password("s3cret", &stored.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_username() {
        let repo = Arc::new(InMemoryUserRepo::with_users(vec![create_test_user(
            "carol",
            "s3cret",
            |_| {},
        )]));

        let err = use_cases(repo)
            .create_user("admin", create_input("carol"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "User is already registered"));
    }

    #[tokio::test]
    async fn test_create_user_validates_input() {
        let users = use_cases(Arc::new(InMemoryUserRepo::new()));

        let mut bad_email = create_input("carol");
        bad_email.email = "not-an-email".to_string();
        let mut short_password = create_input("carol");
        short_password.password = "12345".to_string();
        let mut no_last_name = create_input("carol");
        no_last_name.last_name = " ".to_string();
        let mut no_username = create_input("carol");
        no_username.username = String::new();

        for input in [bad_email, short_password, no_last_name, no_username] {
            let err = users.create_user("admin", input).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_update_user_keeps_password_when_absent() {
        let user = create_test_user("carol", "s3cret", |_| {});
        let id = user.profile.id;
        let repo = Arc::new(InMemoryUserRepo::with_users(vec![user]));
        let users = use_cases(repo.clone());

        let profile = users.update_user("admin", id, update_input()).await.unwrap();

        assert_eq!(profile.email, "new@example.com");
        assert_eq!(profile.first_name, "Caroline");
        assert_eq!(profile.middle_name, None);
        assert_eq!(profile.username, "carol");
        let stored = repo.find_by_username("carol").await.unwrap().unwrap();
        assert!(verify_password("s3cret", &stored.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_user_replaces_password() {
        let user = create_test_user("carol", "s3cret", |_| {});
        let id = user.profile.id;
        let repo = Arc::new(InMemoryUserRepo::with_users(vec![user]));

        let mut input = update_input();
        input.password = Some("n3w-pass".to_string());
        use_cases(repo.clone())
            .update_user("admin", id, input)
            .await
            .unwrap();

        let stored = repo.find_by_username("carol").await.unwrap().unwrap();
        assert!(verify_password("n3w-pass", &stored.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_user_rejects_short_password() {
        let user = create_test_user("carol", "s3cret", |_| {});
        let id = user.profile.id;
        let users = use_cases(Arc::new(InMemoryUserRepo::with_users(vec![user])));

        let mut input = update_input();
        input.password = Some("abc".to_string());
        let err = users.update_user("admin", id, input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let users = use_cases(Arc::new(InMemoryUserRepo::new()));
        let err = users
            .update_user("admin", Uuid::new_v4(), update_input())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_deleted_user_disappears() {
        let user = create_test_user("carol", "s3cret", |_| {});
        let id = user.profile.id;
        let repo = Arc::new(InMemoryUserRepo::with_users(vec![user]));
        let users = use_cases(repo.clone());

        users.delete_user(id).await.unwrap();

        assert!(matches!(users.get_user(id).await.unwrap_err(), AppError::NotFound));
        assert!(repo.find_by_username("carol").await.unwrap().is_none());
        assert!(users.list_users().await.unwrap().is_empty());
        assert!(matches!(users.delete_user(id).await.unwrap_err(), AppError::NotFound));
    }
}
