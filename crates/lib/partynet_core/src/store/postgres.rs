//! PostgreSQL-backed store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{StoreError, UserStore};
use crate::models::auth::{NewUser, User, UserRecord};
use crate::models::group::{Group, GroupMembership, NewGroup};
use crate::uuid::uuidv7;

const USER_COLUMNS: &str = "id::text, login, email, avatar_url, preferred_public_group, \
     open_id, description, admin, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    login: String,
    email: String,
    avatar_url: String,
    preferred_public_group: String,
    open_id: String,
    description: String,
    admin: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            login: row.login,
            email: row.email,
            avatar_url: row.avatar_url,
            preferred_public_group: row.preferred_public_group,
            open_id: row.open_id,
            description: row.description,
            admin: row.admin,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRecordRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// `UserStore` over a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRecordRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| UserRecord {
            user: r.user.into(),
            password_hash: r.password_hash,
        }))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users \
             (login, email, password_hash, avatar_url, preferred_public_group, open_id, description, admin) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.login)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.avatar_url)
            .bind(&user.preferred_public_group)
            .bind(&user.open_id)
            .bind(&user.description)
            .bind(user.admin)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn create_group(&self, group: NewGroup) -> Result<Group, StoreError> {
        let id = sqlx::query_scalar::<_, String>(
            "INSERT INTO groups (name, kind, parent_group_id, description, avatar) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id::text",
        )
        .bind(&group.name)
        .bind(&group.kind)
        .bind(&group.parent_group_id)
        .bind(&group.description)
        .bind(&group.avatar)
        .fetch_one(&self.pool)
        .await?;
        Ok(Group {
            id,
            name: group.name,
            kind: group.kind,
            parent_group_id: group.parent_group_id,
            description: group.description,
            avatar: group.avatar,
        })
    }

    async fn create_group_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupMembership, StoreError> {
        let id = uuidv7();
        sqlx::query(
            "INSERT INTO group_members (id, group_id, user_id) VALUES ($1, $2::uuid, $3::uuid)",
        )
        .bind(id)
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(GroupMembership {
            id: id.to_string(),
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
        })
    }
}
