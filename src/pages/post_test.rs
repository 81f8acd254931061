use super::*;
use uuid::Uuid;

use crate::pages::layout::NotFoundPage;
use crate::pages::render_document;
use crate::state::test_helpers::{dummy_comment, dummy_post};

fn member() -> SessionUser {
    SessionUser { id: Uuid::new_v4(), name: "Ravi Kumar".into(), avatar_url: Some("https://a/r.png".into()) }
}

fn render(viewer: Option<SessionUser>, post: Post, comments: CommentsView) -> String {
    let now = OffsetDateTime::now_utc();
    render_document(|| view! { <PostPage viewer=viewer post=post comments=comments now=now/> })
}

#[test]
fn shows_post_with_author() {
    let post = dummy_post("Brahmi dosage?");
    let html = render(None, post, CommentsView::Empty);
    assert!(html.contains("<h1 class=\"card__title\">Brahmi dosage?</h1>"));
    assert!(html.contains("Posted by Asha Rao"));
    assert!(html.contains(">AR</span>"));
}

#[test]
fn anonymous_author_fallback() {
    let mut post = dummy_post("Who wrote this");
    post.author_name = None;
    let html = render(None, post, CommentsView::Empty);
    assert!(html.contains("Posted by Anonymous"));
    assert!(html.contains(">U</span>"));
}

#[test]
fn comment_states() {
    let html = render(None, dummy_post("a post"), CommentsView::Empty);
    assert!(html.contains("No comments yet. Be the first to reply!"));

    let html = render(None, dummy_post("a post"), CommentsView::Failed);
    assert!(html.contains("Error loading comments."));
    assert!(!html.contains("No comments yet"));

    let post = dummy_post("a post");
    let comments = vec![dummy_comment(post.id, "first reply"), dummy_comment(post.id, "second reply")];
    let html = render(None, post, CommentsView::Listed(comments));
    assert_eq!(html.matches("class=\"card comment\"").count(), 2);
    let first = html.find("first reply").unwrap();
    let second = html.find("second reply").unwrap();
    assert!(first < second);
}

#[test]
fn comment_form_only_when_signed_in() {
    let post = dummy_post("a post");
    let action = format!("action=\"/community/{}/comments\"", post.id);
    let html = render(None, post.clone(), CommentsView::Empty);
    assert!(!html.contains(&action));

    let html = render(Some(member()), post, CommentsView::Empty);
    assert!(html.contains(&action));
}

#[test]
fn error_and_not_found_pages() {
    let html = render_document(|| view! { <PostErrorPage viewer=None/> });
    assert!(html.contains("Error loading post."));

    let html = render_document(|| view! { <NotFoundPage viewer=None message="That discussion does not exist."/> });
    assert!(html.contains("That discussion does not exist."));
}
