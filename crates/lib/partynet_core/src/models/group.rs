//! Group directory models.

use serde::{Deserialize, Serialize};

/// A group of users. `kind` is `"public"` or `"private"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub parent_group_id: String,
    pub description: String,
    pub avatar: String,
}

/// Fields for a group that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub kind: String,
    pub parent_group_id: String,
    pub description: String,
    pub avatar: String,
}

/// Membership of a user in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
}
