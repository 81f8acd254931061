//! Server-rendered pages.
//!
//! ARCHITECTURE
//! ============
//! Every page is a Leptos component rendered to an HTML string per request
//! (SSR only, no hydration). Handlers in `routes::pages` load data, pick a
//! view state, and hand both to a component from this module. Forms post
//! back to the same server; there is no client-side script.

pub mod announcements;
pub mod community;
pub mod explorer;
pub mod format;
pub mod garden;
pub mod layout;
pub mod login;
pub mod plant;
pub mod post;
pub mod recommendations;

use leptos::prelude::*;

/// Render a page view to a complete HTML document.
pub fn render_document<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    let body = owner.with(|| build().to_html());
    format!("<!DOCTYPE html>{body}")
}
