//! Page shell: document head, navigation, and the viewer's sign-in control.

use leptos::prelude::*;

use super::format::initials;
use crate::services::session::SessionUser;

const NAV_LINKS: [(&str, &str); 5] = [
    ("/garden", "Garden"),
    ("/explorer", "Explorer"),
    ("/announcements", "Announcements"),
    ("/community", "Community"),
    ("/recommendations", "AI Herbalist"),
];

/// Wraps page content in the shared document layout.
#[component]
pub fn Shell(
    #[prop(into)] title: String,
    /// Path of the current page, highlighted in the navigation.
    #[prop(into)]
    active: String,
    viewer: Option<SessionUser>,
    children: Children,
) -> impl IntoView {
    let nav = NAV_LINKS
        .iter()
        .map(|(href, label)| {
            let class = if active.starts_with(*href) { "nav__link nav__link--active" } else { "nav__link" };
            view! { <a class=class href=*href>{*label}</a> }
        })
        .collect_view();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} | AYUSH Garden")}</title>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>
            <body>
                <header class="site-header">
                    <a class="site-header__brand" href="/garden">"AYUSH Garden"</a>
                    <nav class="nav">{nav}</nav>
                    <ViewerControl viewer=viewer/>
                </header>
                <main class="site-main">{children()}</main>
                <footer class="site-footer">
                    <p>"Traditional knowledge for education only. Consult a healthcare provider before use."</p>
                </footer>
            </body>
        </html>
    }
}

#[component]
fn ViewerControl(viewer: Option<SessionUser>) -> impl IntoView {
    match viewer {
        Some(SessionUser { name, avatar_url, .. }) => view! {
            <div class="viewer">
                <Avatar name=Some(name.clone()) photo_url=avatar_url/>
                <span class="viewer__name">{name}</span>
                <form method="post" action="/auth/logout" class="viewer__logout">
                    <button type="submit" class="button button--ghost">"Log out"</button>
                </form>
            </div>
        }
        .into_any(),
        None => view! { <a class="button" href="/login">"Log in"</a> }.into_any(),
    }
}

/// Round avatar: the photo when present, otherwise initials.
#[component]
pub fn Avatar(name: Option<String>, photo_url: Option<String>) -> impl IntoView {
    let fallback = initials(name.as_deref());
    let alt = name.unwrap_or_else(|| "User".to_string());
    match photo_url.filter(|url| !url.is_empty()) {
        Some(src) => view! { <img class="avatar" src=src alt=alt/> }.into_any(),
        None => view! { <span class="avatar avatar--fallback" title=alt>{fallback}</span> }.into_any(),
    }
}

/// Shared not-found body.
#[component]
pub fn NotFound(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Not found"</h1>
            <p>{message}</p>
            <a class="button" href="/garden">"Back to the garden"</a>
        </section>
    }
}

/// Full not-found page.
#[component]
pub fn NotFoundPage(viewer: Option<SessionUser>, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <Shell title="Not found" active="" viewer=viewer>
            <NotFound message=message/>
        </Shell>
    }
}
