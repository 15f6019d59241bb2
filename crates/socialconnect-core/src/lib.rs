//! SocialConnect core
//!
//! Session and feed state for a single viewer. Presentation (forms, toasts,
//! layout) lives outside this crate and drives it through [`Hub`] or the
//! individual stores.

pub mod dispatcher;
pub mod error;
pub mod feed;
pub mod hub;
pub mod seed;
pub mod session;
pub mod verifier;

pub use dispatcher::Dispatcher;
pub use error::{CoreError, Result};
pub use feed::FeedStore;
pub use hub::Hub;
pub use session::SessionManager;
pub use verifier::{CredentialVerifier, DemoVerifier};
