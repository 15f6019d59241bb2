use serde::{Deserialize, Serialize};

/// Events emitted by the core after a successful state transition.
/// Rejected operations never emit anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Notification {
    /// A viewer signed in with existing credentials
    LoginSucceeded { profile_id: u64, display_name: String },

    /// A new profile was registered and signed in
    SignupSucceeded { profile_id: u64, display_name: String },

    /// A post was added to the feed
    PostCreated { post_id: u64, author_id: u64 },

    /// A post's like counter went up
    PostLiked { post_id: u64, like_count: u32 },
}

impl Notification {
    /// Short title for a toast.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "Welcome back!",
            Self::SignupSucceeded { .. } => "Account created!",
            Self::PostCreated { .. } => "Post created!",
            Self::PostLiked { .. } => "Post liked!",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            Self::LoginSucceeded { .. } => "Successfully logged in to your account.",
            Self::SignupSucceeded { .. } => "Welcome to our social platform.",
            Self::PostCreated { .. } => "Your post has been shared with the community.",
            Self::PostLiked { .. } => "Your appreciation has been counted.",
        }
    }
}
