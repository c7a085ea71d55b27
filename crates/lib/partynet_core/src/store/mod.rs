//! User/group store.
//!
//! The auth core only talks to the `UserStore` trait. `PgUserStore` is the
//! production backend; `MemoryStore` keeps everything in-process.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{NewUser, User, UserRecord};
use crate::models::group::{Group, GroupMembership, NewGroup};

pub use memory::MemoryStore;
pub use postgres::PgUserStore;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// Lookup and persistence of users and groups.
///
/// Implementations must enforce email uniqueness themselves and report a
/// conflicting `create_user` as `StoreError::Duplicate`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user (with password hash) by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user, returning it with its store-assigned id.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Persist a new group, returning it with its store-assigned id.
    async fn create_group(&self, group: NewGroup) -> Result<Group, StoreError>;

    /// Add a user to a group.
    async fn create_group_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupMembership, StoreError>;
}
