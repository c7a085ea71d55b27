//! App-side record ids.
//!
//! Postgres assigns user and group ids itself. Membership rows, and every
//! row of the in-memory store, get a UUIDv7 here so ids sort by creation.

use uuid::Uuid;

/// Fresh creation-ordered id.
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
