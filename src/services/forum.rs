//! Forum service: posts and comments for the community pages.
//!
//! DESIGN
//! ======
//! Posts and comments are append-only rows in Postgres. The author's display
//! name and avatar are copied into each row at creation time, so renaming a
//! GitHub account never rewrites history. Posts list newest first, comments
//! oldest first. Every successful insert is published to the [`FeedHub`].

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::feed::FeedHub;
use super::session::SessionUser;
use crate::frame::ErrorCode;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 120;
pub const POST_CONTENT_MAX_CHARS: usize = 5000;
pub const COMMENT_CONTENT_MAX_CHARS: usize = 2000;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ForumError {
    #[error("{0}")]
    Validation(String),
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ErrorCode for ForumError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_FORUM_VALIDATION",
            Self::PostNotFound(_) => "E_POST_NOT_FOUND",
            Self::Database(_) => "E_DATABASE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Author snapshot written into posts and comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&SessionUser> for Author {
    fn from(user: &SessionUser) -> Self {
        Self { id: Some(user.id), name: Some(user.name.clone()), photo_url: user.avatar_url.clone() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
    pub author_photo_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
    pub author_photo_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Submitted post fields, as received from a form or JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub content: String,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Trim and bounds-check a new post. Returns the trimmed title and content.
///
/// # Errors
///
/// Returns [`ForumError::Validation`] with a user-facing message.
pub fn validate_post(new: &NewPost) -> Result<(String, String), ForumError> {
    let title = new.title.trim();
    let content = new.content.trim();
    let title_len = title.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
        return Err(ForumError::Validation(format!(
            "Title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters."
        )));
    }
    check_content(content, POST_CONTENT_MAX_CHARS)?;
    Ok((title.to_string(), content.to_string()))
}

/// Trim and bounds-check a new comment. Returns the trimmed content.
///
/// # Errors
///
/// Returns [`ForumError::Validation`] with a user-facing message.
pub fn validate_comment(new: &NewComment) -> Result<String, ForumError> {
    let content = new.content.trim();
    check_content(content, COMMENT_CONTENT_MAX_CHARS)?;
    Ok(content.to_string())
}

fn check_content(content: &str, max: usize) -> Result<(), ForumError> {
    if content.is_empty() {
        return Err(ForumError::Validation("Content cannot be empty.".into()));
    }
    if content.chars().count() > max {
        return Err(ForumError::Validation(format!("Content must be at most {max} characters.")));
    }
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

fn post_from_row(r: &PgRow) -> Post {
    Post {
        id: r.get("id"),
        title: r.get("title"),
        content: r.get("content"),
        author_id: r.get("author_id"),
        author_name: r.get("author_name"),
        author_photo_url: r.get("author_photo_url"),
        created_at: r.get("created_at"),
    }
}

fn comment_from_row(r: &PgRow) -> Comment {
    Comment {
        id: r.get("id"),
        post_id: r.get("post_id"),
        content: r.get("content"),
        author_id: r.get("author_id"),
        author_name: r.get("author_name"),
        author_photo_url: r.get("author_photo_url"),
        created_at: r.get("created_at"),
    }
}

/// List all posts, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, ForumError> {
    let rows = sqlx::query(
        r"SELECT id, title, content, author_id, author_name, author_photo_url, created_at
          FROM posts
          ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(post_from_row).collect())
}

/// Fetch one post by id.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, ForumError> {
    let row = sqlx::query(
        r"SELECT id, title, content, author_id, author_name, author_photo_url, created_at
          FROM posts
          WHERE id = $1",
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(post_from_row))
}

/// Validate and insert a post, then publish it on the feed.
///
/// # Errors
///
/// Returns a validation error before touching the database, or a database
/// error if the insert fails.
pub async fn create_post(pool: &PgPool, feed: &FeedHub, author: &Author, new: &NewPost) -> Result<Post, ForumError> {
    let (title, content) = validate_post(new)?;
    let row = sqlx::query(
        r"INSERT INTO posts (title, content, author_id, author_name, author_photo_url)
          VALUES ($1, $2, $3, $4, $5)
          RETURNING id, title, content, author_id, author_name, author_photo_url, created_at",
    )
    .bind(title)
    .bind(content)
    .bind(author.id)
    .bind(&author.name)
    .bind(&author.photo_url)
    .fetch_one(pool)
    .await?;

    let post = post_from_row(&row);
    info!(post_id = %post.id, author_id = ?post.author_id, "forum: post created");
    feed.publish_post(&post);
    Ok(post)
}

/// List comments on a post, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, ForumError> {
    let rows = sqlx::query(
        r"SELECT id, post_id, content, author_id, author_name, author_photo_url, created_at
          FROM comments
          WHERE post_id = $1
          ORDER BY created_at ASC, id ASC",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(comment_from_row).collect())
}

/// Validate and insert a comment, then publish it on the post's topic.
///
/// # Errors
///
/// Returns [`ForumError::PostNotFound`] if the post does not exist.
pub async fn create_comment(
    pool: &PgPool,
    feed: &FeedHub,
    author: &Author,
    post_id: Uuid,
    new: &NewComment,
) -> Result<Comment, ForumError> {
    let content = validate_comment(new)?;
    let result = sqlx::query(
        r"INSERT INTO comments (post_id, content, author_id, author_name, author_photo_url)
          VALUES ($1, $2, $3, $4, $5)
          RETURNING id, post_id, content, author_id, author_name, author_photo_url, created_at",
    )
    .bind(post_id)
    .bind(content)
    .bind(author.id)
    .bind(&author.name)
    .bind(&author.photo_url)
    .fetch_one(pool)
    .await;

    let row = match result {
        Ok(row) => row,
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            return Err(ForumError::PostNotFound(post_id));
        }
        Err(e) => return Err(e.into()),
    };

    let comment = comment_from_row(&row);
    info!(%post_id, comment_id = %comment.id, "forum: comment created");
    feed.publish_comment(&comment);
    Ok(comment)
}

#[cfg(test)]
#[path = "forum_test.rs"]
mod tests;
