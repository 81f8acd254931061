//! Sign-in page.

use leptos::prelude::*;

use super::layout::Shell;

#[component]
pub fn LoginPage(github_enabled: bool) -> impl IntoView {
    let body = if github_enabled {
        view! { <a class="button button--accent" href="/auth/github">"Sign in with GitHub"</a> }.into_any()
    } else {
        view! { <p class="notice notice--muted">"Sign-in is unavailable right now."</p> }.into_any()
    };

    view! {
        <Shell title="Log in" active="/login" viewer=None>
            <section class="card login">
                <h1>"Join the community"</h1>
                <p>"Sign in to start discussions and reply to other members."</p>
                {body}
            </section>
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::render_document;

    #[test]
    fn github_link_when_enabled() {
        let html = render_document(|| view! { <LoginPage github_enabled=true/> });
        assert!(html.contains("href=\"/auth/github\""));
    }

    #[test]
    fn unavailable_when_disabled() {
        let html = render_document(|| view! { <LoginPage github_enabled=false/> });
        assert!(!html.contains("href=\"/auth/github\""));
        assert!(html.contains("Sign-in is unavailable right now."));
    }
}
