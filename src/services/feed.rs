//! Live change feed for the community forum.
//!
//! ARCHITECTURE
//! ============
//! The forum service publishes one frame per successful insert into a
//! `tokio::sync::broadcast` channel. Each `/api/live` socket holds its own
//! receiver and forwards frames whose `topic` it has subscribed to.
//!
//! TOPICS
//! ======
//! - `posts`: every new post (`post:created`)
//! - `posts/{post_id}/comments`: new comments on one post (`comment:created`)

use tokio::sync::broadcast;
use uuid::Uuid;

use super::forum::{Comment, Post};
use crate::frame::{Data, ErrorCode, Frame};

pub const POSTS_TOPIC: &str = "posts";
const FEED_CAPACITY: usize = 256;

/// A parsed, validated subscription topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Posts,
    Comments(Uuid),
}

impl Topic {
    /// Parse `posts` or `posts/{uuid}/comments`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidTopic`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        let raw = raw.trim();
        if raw == POSTS_TOPIC {
            return Ok(Self::Posts);
        }
        let invalid = || FeedError::InvalidTopic(raw.to_string());
        let rest = raw.strip_prefix("posts/").ok_or_else(invalid)?;
        let id = rest.strip_suffix("/comments").ok_or_else(invalid)?;
        let post_id = Uuid::parse_str(id).map_err(|_| invalid())?;
        Ok(Self::Comments(post_id))
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posts => f.write_str(POSTS_TOPIC),
            Self::Comments(post_id) => write!(f, "posts/{post_id}/comments"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("invalid topic: {0}")]
    InvalidTopic(String),
    #[error("missing topic")]
    MissingTopic,
}

impl ErrorCode for FeedError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTopic(_) => "E_FEED_INVALID_TOPIC",
            Self::MissingTopic => "E_FEED_MISSING_TOPIC",
        }
    }
}

/// Broadcast hub for forum change frames.
#[derive(Clone)]
pub struct FeedHub {
    tx: broadcast::Sender<Frame>,
}

impl FeedHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.tx.subscribe()
    }

    /// Number of open live connections holding a receiver.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a `post:created` frame on the `posts` topic.
    pub fn publish_post(&self, post: &Post) {
        self.publish(Frame::event("post:created", to_data(post)).with_topic(Topic::Posts.to_string()));
    }

    /// Publish a `comment:created` frame on the post's comments topic.
    pub fn publish_comment(&self, comment: &Comment) {
        let topic = Topic::Comments(comment.post_id);
        self.publish(Frame::event("comment:created", to_data(comment)).with_topic(topic.to_string()));
    }

    fn publish(&self, frame: Frame) {
        // No receivers is the normal idle state.
        let receivers = self.tx.send(frame).unwrap_or(0);
        tracing::debug!(receivers, "feed: published");
    }
}

impl Default for FeedHub {
    fn default() -> Self {
        Self::new()
    }
}

fn to_data(value: &impl serde::Serialize) -> Data {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        _ => Data::new(),
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
