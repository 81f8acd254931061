//! Community forum: post list and the new-discussion form.

use leptos::prelude::*;
use time::OffsetDateTime;

use super::format::{excerpt, relative_time};
use super::layout::{Avatar, Shell};
use crate::services::forum::{POST_CONTENT_MAX_CHARS, Post, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::services::session::SessionUser;

const EXCERPT_CHARS: usize = 180;

/// What the post list shows.
#[derive(Debug, Clone)]
pub enum CommunityView {
    /// Loading posts failed.
    Failed,
    /// Loaded, nothing posted yet.
    Empty,
    Listed(Vec<Post>),
}

impl CommunityView {
    /// Classify a load result: an empty list is its own state.
    #[must_use]
    pub fn from_result<E>(result: Result<Vec<Post>, E>) -> Self {
        match result {
            Err(_) => Self::Failed,
            Ok(posts) if posts.is_empty() => Self::Empty,
            Ok(posts) => Self::Listed(posts),
        }
    }
}

/// Values and error echoed back into the new-post form after a rejected
/// submission.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

#[component]
pub fn CommunityPage(
    viewer: Option<SessionUser>,
    posts: CommunityView,
    #[prop(optional)] draft: PostDraft,
    now: OffsetDateTime,
) -> impl IntoView {
    let signed_in = viewer.is_some();
    let body = match posts {
        CommunityView::Failed => view! {
            <div class="notice notice--error">
                <p>"Failed to load posts. Please try again later."</p>
            </div>
        }
        .into_any(),
        CommunityView::Empty => view! {
            <p class="notice notice--muted">"No discussions yet. Be the first to start one!"</p>
        }
        .into_any(),
        CommunityView::Listed(posts) => {
            let cards = posts
                .into_iter()
                .map(|post| view! { <PostCard post=post now=now/> })
                .collect_view();
            view! { <div class="post-list">{cards}</div> }.into_any()
        }
    };

    let action = if signed_in {
        view! { <NewPostForm draft=draft/> }.into_any()
    } else {
        view! { <a class="button" href="/login">"Login to Participate"</a> }.into_any()
    };

    view! {
        <Shell title="Community" active="/community" viewer=viewer>
            <section class="page-header page-header--split">
                <div>
                    <h1>"Community Forum"</h1>
                    <p>"Ask questions, share knowledge, and connect with AYUSH experts and enthusiasts."</p>
                </div>
                <div class="page-header__action">{action}</div>
            </section>
            {body}
        </Shell>
    }
}

#[component]
fn NewPostForm(draft: PostDraft) -> impl IntoView {
    let error = draft
        .error
        .map(|message| view! { <p class="form__error" role="alert">{message}</p> });
    let open = error.is_some();

    view! {
        <details class="new-post" open=open>
            <summary class="button button--accent">"Start a Discussion"</summary>
            <form class="form card" method="post" action="/community">
                <h2>"Create a New Post"</h2>
                <p class="form__hint">"Ask a question or share something with the community."</p>
                {error}
                <label for="post-title">"Title"</label>
                <input
                    id="post-title"
                    name="title"
                    type="text"
                    minlength=TITLE_MIN_CHARS.to_string()
                    maxlength=TITLE_MAX_CHARS.to_string()
                    value=draft.title
                />
                <label for="post-content">"Content"</label>
                <textarea id="post-content" name="content" rows="6" maxlength=POST_CONTENT_MAX_CHARS.to_string()>{draft.content}</textarea>
                <button type="submit" class="button">"Post"</button>
            </form>
        </details>
    }
}

#[component]
fn PostCard(post: Post, now: OffsetDateTime) -> impl IntoView {
    let href = format!("/community/{}", post.id);
    let author = post.author_name.clone().unwrap_or_else(|| "Anonymous".to_string());
    let when = relative_time(Some(post.created_at), now);

    view! {
        <a class="card post-card" href=href>
            <h2 class="card__title">{post.title}</h2>
            <p class="post-card__excerpt">{excerpt(&post.content, EXCERPT_CHARS)}</p>
            <div class="post-card__meta">
                <Avatar name=post.author_name photo_url=post.author_photo_url/>
                <span class="post-card__author">{author}</span>
                <span class="post-card__time">{when}</span>
            </div>
        </a>
    }
}

#[cfg(test)]
#[path = "community_test.rs"]
mod tests;
