//! In-process store.
//!
//! Mirrors the Postgres constraints: unique user email, memberships must
//! reference existing rows, and a user joins a group at most once.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::auth::{NewUser, User, UserRecord};
use crate::models::group::{Group, GroupMembership, NewGroup};
use crate::uuid::uuidv7;

#[derive(Default)]
struct Tables {
    /// Keyed by email.
    users: HashMap<String, UserRecord>,
    groups: HashMap<String, Group>,
    memberships: Vec<GroupMembership>,
}

/// `UserStore` backed by in-memory maps.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Memberships of the given group.
    pub async fn members_of(&self, group_id: &str) -> Vec<GroupMembership> {
        self.tables
            .read()
            .await
            .memberships
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.tables.read().await.users.get(email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(format!(
                "email '{}' already registered",
                user.email
            )));
        }
        let saved = User {
            id: uuidv7().to_string(),
            login: user.login,
            email: user.email,
            avatar_url: user.avatar_url,
            preferred_public_group: user.preferred_public_group,
            open_id: user.open_id,
            description: user.description,
            admin: user.admin,
            created_at: Utc::now(),
        };
        tables.users.insert(
            saved.email.clone(),
            UserRecord {
                user: saved.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(saved)
    }

    async fn create_group(&self, group: NewGroup) -> Result<Group, StoreError> {
        let saved = Group {
            id: uuidv7().to_string(),
            name: group.name,
            kind: group.kind,
            parent_group_id: group.parent_group_id,
            description: group.description,
            avatar: group.avatar,
        };
        self.tables
            .write()
            .await
            .groups
            .insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }

    async fn create_group_membership(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<GroupMembership, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(group_id) {
            return Err(StoreError::Query(format!("unknown group '{group_id}'")));
        }
        if !tables.users.values().any(|r| r.user.id == user_id) {
            return Err(StoreError::Query(format!("unknown user '{user_id}'")));
        }
        if tables
            .memberships
            .iter()
            .any(|m| m.group_id == group_id && m.user_id == user_id)
        {
            return Err(StoreError::Duplicate(format!(
                "user '{user_id}' already in group '{group_id}'"
            )));
        }
        let membership = GroupMembership {
            id: uuidv7().to_string(),
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
        };
        tables.memberships.push(membership.clone());
        Ok(membership)
    }
}
