//! Announcements and events.

use leptos::prelude::*;

use super::layout::Shell;
use crate::catalog::Announcement;
use crate::services::session::SessionUser;

#[component]
pub fn AnnouncementsPage(items: Vec<Announcement>, viewer: Option<SessionUser>) -> impl IntoView {
    let cards = items
        .into_iter()
        .map(|item| view! { <AnnouncementCard item=item/> })
        .collect_view();

    view! {
        <Shell title="Announcements" active="/announcements" viewer=viewer>
            <section class="page-header page-header--center">
                <h1>"Announcements & Events"</h1>
                <p>"Stay up-to-date with the latest news, workshops, and community events from the world of AYUSH."</p>
            </section>
            <div class="stack">{cards}</div>
        </Shell>
    }
}

#[component]
fn AnnouncementCard(item: Announcement) -> impl IntoView {
    let tags = item
        .tags
        .into_iter()
        .map(|tag| view! { <span class="badge">{tag}</span> })
        .collect_view();

    view! {
        <article class="card announcement">
            <h2 class="card__title">{item.title}</h2>
            <div class="announcement__meta">
                <span class="announcement__date">{item.date}</span>
                <span class="announcement__location">{item.location}</span>
            </div>
            <p>{item.description}</p>
            <div class="badges">{tags}</div>
        </article>
    }
}

#[cfg(test)]
#[path = "announcements_test.rs"]
mod tests;
