use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info};

use socialconnect_types::api::{CreatePostRequest, LoginRequest, SignupRequest};
use socialconnect_types::events::Notification;
use socialconnect_types::models::{Post, Session};

use crate::dispatcher::Dispatcher;
use crate::error::{CoreError, Result};
use crate::feed::FeedStore;
use crate::seed;
use crate::session::SessionManager;
use crate::verifier::CredentialVerifier;

/// One viewer's session, the feed, and the notification channel they share.
///
/// Owned by whatever drives the process (a shell, a test). Separate hubs
/// share nothing.
pub struct Hub<V> {
    sessions: SessionManager<V>,
    feed: FeedStore,
    dispatcher: Dispatcher,
}

impl<V: CredentialVerifier> Hub<V> {
    pub fn new(verifier: V, dispatcher: Dispatcher) -> Self {
        Self {
            sessions: SessionManager::new(verifier, dispatcher.clone()),
            feed: FeedStore::new(dispatcher.clone()),
            dispatcher,
        }
    }

    /// A hub whose feed already holds the starter posts.
    pub fn with_demo_feed(verifier: V, dispatcher: Dispatcher, now: DateTime<Utc>) -> Result<Self> {
        let hub = Self::new(verifier, dispatcher);
        for post in seed::demo_posts(now) {
            hub.feed.seed(post)?;
        }
        info!("Seeded feed with {} demo posts", hub.feed.len()?);
        Ok(hub)
    }

    // -- Session --

    pub fn session(&self) -> &Session {
        self.sessions.session()
    }

    pub fn login(&mut self, request: &LoginRequest) -> Result<Session> {
        self.sessions.login(&request.identifier, &request.secret)
    }

    pub fn signup(&mut self, request: &SignupRequest) -> Result<Session> {
        self.sessions.signup(request)
    }

    pub fn logout(&mut self) -> Session {
        self.sessions.logout()
    }

    // -- Feed --

    /// Create a post as the signed-in viewer.
    pub fn publish(&self, request: &CreatePostRequest) -> Result<Post> {
        let Some(author) = self.sessions.active_profile() else {
            debug!("rejected post: no active viewer");
            return Err(CoreError::Unauthorized("sign in to post".into()));
        };
        self.feed
            .create_post(author, &request.body, request.image_ref.as_deref())
    }

    pub fn like(&self, post_id: u64) -> Result<Option<u32>> {
        self.feed.like_post(post_id)
    }

    pub fn feed(&self) -> Result<Vec<Post>> {
        self.feed.feed()
    }

    pub fn feed_store(&self) -> &FeedStore {
        &self.feed
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.dispatcher.subscribe()
    }
}
