//! Newtype wrappers for all domain entity identifiers.
//!
//! Server-assigned identifiers are integers on the wire, so each entity
//! gets a distinct `i64` newtype. Using distinct types prevents
//! accidentally passing a `UserId` where a `MissionId` is expected.
//!
//! [`NotificationId`] is the exception: notifications are identified
//! locally at receipt time, so it wraps a time-ordered v7 UUID. Generated
//! ids are unique and monotonic even under rapid arrival.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around a server-assigned `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw server value.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner value.
            pub fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a school.
    SchoolId
);

define_id!(
    /// Unique identifier for a mission.
    MissionId
);

define_id!(
    /// Unique identifier for an assigned-mission submission.
    SubmissionId
);

define_id!(
    /// Unique identifier for a clan.
    ClanId
);

define_id!(
    /// Unique identifier for a clan chat message.
    MessageId
);

define_id!(
    /// Unique identifier for a shop reward.
    RewardId
);

define_id!(
    /// Unique identifier for a mural post.
    PostId
);

/// Unique identifier for a locally stored notification.
///
/// Assigned at receipt time, never server-issued. Uses UUID v7 so ids are
/// both collision-free and ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    /// Generate a fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an identifier from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
