use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use socialconnect_types::events::Notification;
use socialconnect_types::models::{Post, Profile};

use crate::dispatcher::Dispatcher;
use crate::error::{CoreError, Result};

/// A post restored with history: backdated and possibly already liked.
#[derive(Debug, Clone)]
pub struct SeedPost {
    pub author: Profile,
    pub body: String,
    pub image_ref: Option<String>,
    pub like_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Ordered collection of posts, newest first.
///
/// Id allocation, insertion and like increments all run under one lock, so
/// a store shared behind an `Arc` never hands out duplicate ids or loses a
/// like.
pub struct FeedStore {
    inner: Mutex<FeedInner>,
    dispatcher: Dispatcher,
}

struct FeedInner {
    /// Front is the newest post
    posts: VecDeque<Post>,
    next_id: u64,
}

impl FeedInner {
    fn push(
        &mut self,
        author: &Profile,
        body: &str,
        image_ref: Option<&str>,
        like_count: u32,
        created_at: DateTime<Utc>,
    ) -> Post {
        let post = Post {
            id: self.next_id,
            author: author.clone(),
            body: body.to_string(),
            image_ref: image_ref
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            like_count,
            created_at,
        };
        self.next_id += 1;
        self.posts.push_front(post.clone());
        post
    }
}

impl FeedStore {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Mutex::new(FeedInner {
                posts: VecDeque::new(),
                next_id: 1,
            }),
            dispatcher,
        }
    }

    fn with_inner<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut FeedInner) -> T,
    {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| CoreError::Internal(format!("feed lock poisoned: {}", e)))?;
        Ok(f(&mut *inner))
    }

    /// Add a post by `author` to the top of the feed.
    ///
    /// The caller is responsible for only passing the active viewer's
    /// profile. A body that is blank after trimming is rejected and the store
    /// is left untouched.
    pub fn create_post(
        &self,
        author: &Profile,
        body: &str,
        image_ref: Option<&str>,
    ) -> Result<Post> {
        require_body(body)?;

        let post = self.with_inner(|inner| inner.push(author, body, image_ref, 0, Utc::now()))?;

        info!("{} created post {}", post.author.handle, post.id);
        self.dispatcher.broadcast(Notification::PostCreated {
            post_id: post.id,
            author_id: post.author.id,
        });
        Ok(post)
    }

    /// Insert a post that already has history. Emits no notification.
    pub fn seed(&self, seed: SeedPost) -> Result<Post> {
        require_body(&seed.body)?;

        self.with_inner(|inner| {
            inner.push(
                &seed.author,
                &seed.body,
                seed.image_ref.as_deref(),
                seed.like_count,
                seed.created_at,
            )
        })
    }

    /// Add one like. Returns the new count, or `None` if no post has this id.
    pub fn like_post(&self, post_id: u64) -> Result<Option<u32>> {
        let liked = self.with_inner(|inner| {
            inner.posts.iter_mut().find(|p| p.id == post_id).map(|post| {
                post.like_count = post.like_count.saturating_add(1);
                post.like_count
            })
        })?;

        match liked {
            Some(like_count) => {
                self.dispatcher
                    .broadcast(Notification::PostLiked { post_id, like_count });
            }
            None => debug!("like ignored: no post {}", post_id),
        }
        Ok(liked)
    }

    /// Snapshot of every post, newest first.
    pub fn feed(&self) -> Result<Vec<Post>> {
        self.with_inner(|inner| inner.posts.iter().cloned().collect())
    }

    pub fn get_post(&self, post_id: u64) -> Result<Option<Post>> {
        self.with_inner(|inner| inner.posts.iter().find(|p| p.id == post_id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        self.with_inner(|inner| inner.posts.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.with_inner(|inner| inner.posts.is_empty())
    }
}

fn require_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        debug!("rejected post: empty body");
        return Err(CoreError::Validation("post body must not be empty".into()));
    }
    Ok(())
}
