use super::*;
use uuid::Uuid;

use crate::pages::render_document;
use crate::state::test_helpers::dummy_post;

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn member() -> SessionUser {
    SessionUser { id: Uuid::new_v4(), name: "Asha Rao".into(), avatar_url: None }
}

fn render(viewer: Option<SessionUser>, posts: CommunityView) -> String {
    let now = now();
    render_document(|| view! { <CommunityPage viewer=viewer posts=posts now=now/> })
}

#[test]
fn view_state_from_result() {
    assert!(matches!(CommunityView::from_result::<()>(Err(())), CommunityView::Failed));
    assert!(matches!(CommunityView::from_result::<()>(Ok(Vec::new())), CommunityView::Empty));
    assert!(matches!(CommunityView::from_result::<()>(Ok(vec![dummy_post("x")])), CommunityView::Listed(p) if p.len() == 1));
}

#[test]
fn empty_state_shows_message_and_no_list() {
    let html = render(None, CommunityView::Empty);
    assert!(html.contains("No discussions yet. Be the first to start one!"));
    assert!(!html.contains("post-list"));
    assert!(!html.contains("Failed to load posts"));
}

#[test]
fn failed_state_shows_error() {
    let html = render(None, CommunityView::Failed);
    assert!(html.contains("Failed to load posts. Please try again later."));
    assert!(!html.contains("No discussions yet"));
}

#[test]
fn anonymous_viewer_gets_login_link() {
    let html = render(None, CommunityView::Empty);
    assert!(html.contains("Login to Participate"));
    assert!(html.contains("href=\"/login\""));
    assert!(!html.contains("Start a Discussion"));
}

#[test]
fn signed_in_viewer_gets_post_form() {
    let html = render(Some(member()), CommunityView::Empty);
    assert!(html.contains("Start a Discussion"));
    assert!(html.contains("action=\"/community\""));
    assert!(!html.contains("Login to Participate"));
}

#[test]
fn listed_posts_render_cards() {
    let post = dummy_post("Neem for skin");
    let href = format!("href=\"/community/{}\"", post.id);
    let mut anonymous = dummy_post("Anonymous question");
    anonymous.author_name = None;

    let html = render(None, CommunityView::Listed(vec![post, anonymous]));
    assert_eq!(html.matches("class=\"card post-card\"").count(), 2);
    assert!(html.contains(&href));
    assert!(html.contains("Neem for skin"));
    assert!(html.contains("<span class=\"post-card__author\">Asha Rao</span>"));
    assert!(html.contains("<span class=\"post-card__author\">Anonymous</span>"));
    assert!(html.contains("less than a minute ago"));
}

#[test]
fn draft_error_is_echoed() {
    let draft = PostDraft { title: "Hi".into(), content: "body".into(), error: Some("Title too short".into()) };
    let viewer = Some(member());
    let now = now();
    let html = render_document(|| {
        view! { <CommunityPage viewer=viewer posts=CommunityView::Empty draft=draft now=now/> }
    });
    assert!(html.contains("Title too short"));
    assert!(html.contains("value=\"Hi\""));
}
