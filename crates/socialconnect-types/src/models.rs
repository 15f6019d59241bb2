use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An identity record for a viewer or post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub display_name: String,
    /// Derived from the display name at signup. Not unique.
    pub handle: String,
    pub bio: String,
    pub avatar_url: String,
}

/// A single entry in the feed.
///
/// The author is a snapshot of the profile that was active when the post was
/// created, so later sessions never change how an existing post renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: Profile,
    pub body: String,
    pub image_ref: Option<String>,
    pub like_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Human-readable age relative to `now`, e.g. "2 hours ago".
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.created_at);

        let (count, unit) = if elapsed.num_minutes() < 1 {
            return "Just now".to_string();
        } else if elapsed.num_hours() < 1 {
            (elapsed.num_minutes(), "minute")
        } else if elapsed.num_days() < 1 {
            (elapsed.num_hours(), "hour")
        } else {
            (elapsed.num_days(), "day")
        };

        if count == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", count, unit)
        }
    }
}

/// Authentication state of the single viewer.
///
/// The active profile lives inside the `Authenticated` variant, so a session
/// can never claim to be signed in without a profile or vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "profile")]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(Profile),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            Self::Unauthenticated => None,
        }
    }
}
