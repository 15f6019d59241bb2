//! Starter content for a fresh feed.

use chrono::{DateTime, Duration, Utc};

use socialconnect_types::models::Profile;

use crate::feed::SeedPost;

/// The two starter posts, oldest first so they receive ids in creation
/// order. Rendered newest first, Alice's post sits on top.
pub fn demo_posts(now: DateTime<Utc>) -> Vec<SeedPost> {
    let alice = Profile {
        id: 1,
        display_name: "Alice Johnson".to_string(),
        handle: "@alice_j".to_string(),
        bio: "Designer & Coffee Enthusiast".to_string(),
        avatar_url: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face".to_string(),
    };
    let marcus = Profile {
        id: 2,
        display_name: "Marcus Chen".to_string(),
        handle: "@marcus_dev".to_string(),
        bio: "Full-stack Developer".to_string(),
        avatar_url: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".to_string(),
    };

    vec![
        SeedPost {
            author: marcus,
            body: "Working on a new React project and loving the developer experience. \
                   The component composition is so elegant!"
                .to_string(),
            image_ref: Some(
                "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            like_count: 41,
            created_at: now - Duration::hours(4),
        },
        SeedPost {
            author: alice,
            body: "Just launched my new design portfolio! Excited to share my latest work \
                   with everyone. 🎨✨"
                .to_string(),
            image_ref: None,
            like_count: 23,
            created_at: now - Duration::hours(2),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::feed::FeedStore;

    #[test]
    fn seeded_feed_matches_starter_layout() {
        let now = Utc::now();
        let feed = FeedStore::new(Dispatcher::new());
        for post in demo_posts(now) {
            feed.seed(post).unwrap();
        }

        let posts = feed.feed().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].author.handle, "@alice_j");
        assert_eq!(posts[0].like_count, 23);
        assert_eq!(posts[0].age_label(now), "2 hours ago");
        assert_eq!(posts[1].author.handle, "@marcus_dev");
        assert_eq!(posts[1].like_count, 41);
        assert!(posts[1].image_ref.is_some());
        assert_eq!(posts[1].age_label(now), "4 hours ago");
    }
}
