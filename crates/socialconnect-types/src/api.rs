use serde::{Deserialize, Serialize};

// -- Auth --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

/// Input for creating a new profile. `bio` falls back to a placeholder when
/// omitted or blank.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub display_name: String,
    pub identifier: String,
    pub secret: String,
    #[serde(default)]
    pub bio: Option<String>,
}

// -- Posts --

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub body: String,
    #[serde(default)]
    pub image_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_bio_is_optional() {
        let req: SignupRequest = serde_json::from_str(
            r#"{ "display_name": "Jane Roe", "identifier": "jane@example.com", "secret": "pw" }"#,
        )
        .unwrap();
        assert!(req.bio.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res = serde_json::from_str::<LoginRequest>(
            r#"{ "identifier": "a", "secret": "b", "remember_me": true }"#,
        );
        assert!(res.is_err());
    }
}
