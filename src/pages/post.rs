//! Single discussion: the post, its comments, and the reply form.

use leptos::prelude::*;
use time::OffsetDateTime;

use super::format::relative_time;
use super::layout::{Avatar, Shell};
use crate::services::forum::{COMMENT_CONTENT_MAX_CHARS, Comment, Post};
use crate::services::session::SessionUser;

/// What the comments section shows.
#[derive(Debug, Clone)]
pub enum CommentsView {
    Failed,
    Empty,
    Listed(Vec<Comment>),
}

impl CommentsView {
    #[must_use]
    pub fn from_result<E>(result: Result<Vec<Comment>, E>) -> Self {
        match result {
            Err(_) => Self::Failed,
            Ok(comments) if comments.is_empty() => Self::Empty,
            Ok(comments) => Self::Listed(comments),
        }
    }
}

/// Reply text and error echoed back after a rejected comment.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub content: String,
    pub error: Option<String>,
}

#[component]
pub fn PostPage(
    viewer: Option<SessionUser>,
    post: Post,
    comments: CommentsView,
    #[prop(optional)] draft: CommentDraft,
    now: OffsetDateTime,
) -> impl IntoView {
    let form = viewer
        .is_some()
        .then(|| view! { <CommentForm post_id=post.id.to_string() draft=draft/> });
    let comments = match comments {
        CommentsView::Failed => view! { <p class="notice notice--error">"Error loading comments."</p> }.into_any(),
        CommentsView::Empty => {
            view! { <p class="notice notice--muted">"No comments yet. Be the first to reply!"</p> }.into_any()
        }
        CommentsView::Listed(comments) => {
            let cards = comments
                .into_iter()
                .map(|comment| view! { <CommentCard comment=comment now=now/> })
                .collect_view();
            view! { <div class="comment-list">{cards}</div> }.into_any()
        }
    };
    let Post { title, content, author_name, author_photo_url, created_at, .. } = post;
    let posted_by = format!("Posted by {}", author_name.as_deref().unwrap_or("Anonymous"));
    let when = relative_time(Some(created_at), now);
    let heading = title.clone();

    view! {
        <Shell title=title active="/community" viewer=viewer>
            <article class="card post-detail">
                <h1 class="card__title">{heading}</h1>
                <div class="post-detail__meta">
                    <Avatar name=author_name photo_url=author_photo_url/>
                    <span class="post-detail__author">{posted_by}</span>
                    <span aria-hidden="true">"•"</span>
                    <span class="post-detail__time">{when}</span>
                </div>
                <p class="post-detail__content">{content}</p>
            </article>
            <section class="comments">
                <h2>"Comments"</h2>
                {form}
                {comments}
            </section>
        </Shell>
    }
}

#[component]
fn CommentForm(post_id: String, draft: CommentDraft) -> impl IntoView {
    let action = format!("/community/{post_id}/comments");
    let error = draft
        .error
        .map(|message| view! { <p class="form__error" role="alert">{message}</p> });

    view! {
        <form class="form card" method="post" action=action>
            {error}
            <label for="comment-content">"Add a comment"</label>
            <textarea id="comment-content" name="content" rows="3" maxlength=COMMENT_CONTENT_MAX_CHARS.to_string()>{draft.content}</textarea>
            <button type="submit" class="button">"Reply"</button>
        </form>
    }
}

#[component]
fn CommentCard(comment: Comment, now: OffsetDateTime) -> impl IntoView {
    let Comment { content, author_name, author_photo_url, created_at, .. } = comment;
    let author = author_name.clone().unwrap_or_else(|| "Anonymous".to_string());
    let when = relative_time(Some(created_at), now);

    view! {
        <div class="card comment">
            <div class="comment__meta">
                <Avatar name=author_name photo_url=author_photo_url/>
                <span class="comment__author">{author}</span>
                <span class="comment__time">{when}</span>
            </div>
            <p class="comment__content">{content}</p>
        </div>
    }
}

/// The post lookup itself failed (not a missing post).
#[component]
pub fn PostErrorPage(viewer: Option<SessionUser>) -> impl IntoView {
    view! {
        <Shell title="Community" active="/community" viewer=viewer>
            <p class="notice notice--error">"Error loading post."</p>
        </Shell>
    }
}

#[cfg(test)]
#[path = "post_test.rs"]
mod tests;
