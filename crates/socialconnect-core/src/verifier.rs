use std::sync::atomic::{AtomicU64, Ordering};

use socialconnect_types::api::SignupRequest;
use socialconnect_types::models::Profile;

use crate::error::Result;

pub const DEFAULT_BIO: &str = "New to the platform";

const DEMO_LOGIN_AVATAR: &str =
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=150&h=150&fit=crop&crop=face";
const DEMO_SIGNUP_AVATAR: &str =
    "https://images.unsplash.com/photo-1633332755192-727a05c4013d?w=150&h=150&fit=crop&crop=face";

/// Ids 1 and 2 belong to the seeded authors, 3 to the fixed login profile.
const FIRST_SIGNUP_ID: u64 = 4;

/// Resolves credentials to a profile.
///
/// The session manager has already rejected empty fields before calling
/// into an implementation.
pub trait CredentialVerifier: Send + Sync {
    /// Look up the profile for an existing identifier/secret pair.
    fn verify(&self, identifier: &str, secret: &str) -> Result<Profile>;

    /// Create a profile for a new registration.
    fn register(&self, request: &SignupRequest) -> Result<Profile>;
}

/// Accepts any credentials. Login always yields the same demonstration
/// profile; signup fabricates a fresh one from the form.
pub struct DemoVerifier {
    default_bio: String,
    next_profile_id: AtomicU64,
}

impl DemoVerifier {
    pub fn new() -> Self {
        Self::with_default_bio(DEFAULT_BIO)
    }

    pub fn with_default_bio(bio: impl Into<String>) -> Self {
        Self {
            default_bio: bio.into(),
            next_profile_id: AtomicU64::new(FIRST_SIGNUP_ID),
        }
    }
}

impl Default for DemoVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVerifier for DemoVerifier {
    fn verify(&self, _identifier: &str, _secret: &str) -> Result<Profile> {
        Ok(Profile {
            id: 3,
            display_name: "John Doe".to_string(),
            handle: "@john_doe".to_string(),
            bio: "Social media enthusiast".to_string(),
            avatar_url: DEMO_LOGIN_AVATAR.to_string(),
        })
    }

    fn register(&self, request: &SignupRequest) -> Result<Profile> {
        let bio = request
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|bio| !bio.is_empty())
            .unwrap_or(self.default_bio.as_str());

        Ok(Profile {
            id: self.next_profile_id.fetch_add(1, Ordering::Relaxed),
            display_name: request.display_name.trim().to_string(),
            handle: derive_handle(&request.display_name),
            bio: bio.to_string(),
            avatar_url: DEMO_SIGNUP_AVATAR.to_string(),
        })
    }
}

/// "Jane  Roe" -> "@jane_roe". Collisions between names are possible.
pub fn derive_handle(display_name: &str) -> String {
    let token = display_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    format!("@{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, bio: Option<&str>) -> SignupRequest {
        SignupRequest {
            display_name: name.to_string(),
            identifier: "jane@example.com".to_string(),
            secret: "hunter2".to_string(),
            bio: bio.map(str::to_string),
        }
    }

    #[test]
    fn handle_is_lowercase_and_space_free() {
        assert_eq!(derive_handle("Jane Roe"), "@jane_roe");
        assert_eq!(derive_handle("  Mary  Ann\tLee "), "@mary_ann_lee");
        assert_eq!(derive_handle("Prince"), "@prince");
    }

    #[test]
    fn distinct_names_can_share_a_handle() {
        assert_eq!(derive_handle("Jane Roe"), derive_handle("jane   ROE"));
    }

    #[test]
    fn login_returns_fixed_profile() {
        let verifier = DemoVerifier::new();
        let a = verifier.verify("a@example.com", "x").unwrap();
        let b = verifier.verify("b@example.com", "y").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id, 3);
        assert_eq!(a.handle, "@john_doe");
    }

    #[test]
    fn register_assigns_fresh_ids() {
        let verifier = DemoVerifier::new();
        let first = verifier.register(&signup("Jane Roe", None)).unwrap();
        let second = verifier.register(&signup("Jane Roe", None)).unwrap();
        assert_eq!(first.id, FIRST_SIGNUP_ID);
        assert_eq!(second.id, FIRST_SIGNUP_ID + 1);
    }

    #[test]
    fn blank_bio_uses_default() {
        let verifier = DemoVerifier::new();
        assert_eq!(verifier.register(&signup("A", None)).unwrap().bio, DEFAULT_BIO);
        assert_eq!(verifier.register(&signup("A", Some("   "))).unwrap().bio, DEFAULT_BIO);
        assert_eq!(
            verifier.register(&signup("A", Some("Painter"))).unwrap().bio,
            "Painter"
        );

        let custom = DemoVerifier::with_default_bio("Lurker");
        assert_eq!(custom.register(&signup("A", None)).unwrap().bio, "Lurker");
    }
}
