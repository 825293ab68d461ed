use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::{NewUser, UserChanges, UserCredentials, UserProfile},
    use_cases::user::UserRepo,
};

// User row as stored in the db.
#[derive(sqlx::FromRow)]
pub struct UserDb {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<UserDb> for UserCredentials {
    fn from(row: UserDb) -> Self {
        UserCredentials {
            profile: UserProfile {
                id: row.id,
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                middle_name: row.middle_name,
                last_name: row.last_name,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            password_hash: row.password_hash,
        }
    }
}

impl From<UserDb> for UserProfile {
    fn from(row: UserDb) -> Self {
        UserCredentials::from(row).profile
    }
}

const USER_COLUMNS: &str = "id, username, email, first_name, middle_name, last_name, password_hash, created_at, updated_at";

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL"
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await?;
        Ok(rec.map(UserCredentials::from))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(rec.map(UserProfile::from))
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserDb>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at, username"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    async fn create(&self, user: &NewUser) -> AppResult<UserProfile> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            r#"
                INSERT INTO users
                    (id, username, email, first_name, middle_name, last_name, password_hash, created_by, updated_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.middle_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(&user.created_by)
        .fetch_one(self.pool())
        .await?;
        Ok(rec.into())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> AppResult<UserProfile> {
        let rec = sqlx::query_as::<_, UserDb>(&format!(
            r#"
                UPDATE users
                SET email = $2,
                    first_name = $3,
                    middle_name = $4,
                    last_name = $5,
                    password_hash = COALESCE($6, password_hash),
                    updated_by = $7,
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.middle_name)
        .bind(&changes.last_name)
        .bind(&changes.password_hash)
        .bind(&changes.updated_by)
        .fetch_one(self.pool())
        .await?;
        Ok(rec.into())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET deleted_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool())
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
