//! AI herbalist: goals form, disclaimer, and results.

use leptos::prelude::*;

use super::layout::Shell;
use crate::services::recommend::{DISCLAIMER, GOALS_MAX_CHARS, Recommendation, RecommendedPlant};
use crate::services::session::SessionUser;

/// What the results area shows after a submission.
#[derive(Debug, Clone, Default)]
pub enum RecommendOutcome {
    /// Nothing submitted yet.
    #[default]
    Idle,
    Results(Recommendation),
    Failed(String),
}

#[component]
pub fn RecommendationsPage(
    viewer: Option<SessionUser>,
    /// False when no LLM provider is configured.
    enabled: bool,
    #[prop(optional, into)] goals: String,
    #[prop(optional)] outcome: RecommendOutcome,
) -> impl IntoView {
    let form = if enabled {
        view! {
            <form class="form card" method="post" action="/recommendations">
                <h2>"What are you looking for?"</h2>
                <p class="form__hint">
                    "For example: \"I'm looking for plants that can help with stress and anxiety\" or \"Herbs that can support digestion.\""
                </p>
                <label for="goals">"Your health goals"</label>
                <textarea
                    id="goals"
                    name="goals"
                    rows="5"
                    maxlength=GOALS_MAX_CHARS.to_string()
                    placeholder="e.g. I want to improve my sleep and reduce stress."
                >{goals}</textarea>
                <button type="submit" class="button">"Get Recommendations"</button>
            </form>
        }
        .into_any()
    } else {
        view! {
            <p class="notice notice--muted">"The AI herbalist is currently unavailable."</p>
        }
        .into_any()
    };

    let results = match outcome {
        RecommendOutcome::Idle => ().into_any(),
        RecommendOutcome::Failed(message) => {
            view! { <div class="notice notice--error" role="alert"><p>{message}</p></div> }.into_any()
        }
        RecommendOutcome::Results(result) => view! { <Results result=result/> }.into_any(),
    };

    view! {
        <Shell title="AI Herbalist" active="/recommendations" viewer=viewer>
            <section class="page-header page-header--center">
                <h1>"Personalized Recommendations"</h1>
                <p>
                    "Describe your health goals or preferences, and our AI herbalist will suggest plants that might be beneficial for you."
                </p>
            </section>
            {form}
            <aside class="disclaimer" role="note">
                <strong>"Disclaimer"</strong>
                <p>{DISCLAIMER}</p>
            </aside>
            {results}
        </Shell>
    }
}

#[component]
fn Results(result: Recommendation) -> impl IntoView {
    let Recommendation { summary, plants, text } = result;
    let summary = summary.map(|s| view! { <p class="results__summary">{s}</p> });
    let text = text.map(|t| view! { <p class="results__text">{t}</p> });
    let cards = plants
        .into_iter()
        .map(|plant| view! { <RecommendedCard plant=plant/> })
        .collect_view();

    view! {
        <section class="results">
            <h2>"Recommended plants"</h2>
            {summary}
            <div class="plant-grid">{cards}</div>
            {text}
        </section>
    }
}

#[component]
fn RecommendedCard(plant: RecommendedPlant) -> impl IntoView {
    let RecommendedPlant { name, scientific_name, reason, slug } = plant;
    let heading = match slug {
        Some(slug) => view! { <a href=format!("/plants/{slug}")>{name}</a> }.into_any(),
        None => view! { <span>{name}</span> }.into_any(),
    };
    let scientific = scientific_name.map(|s| view! { <p class="plant-card__scientific">{s}</p> });

    view! {
        <div class="card recommendation">
            <h3 class="plant-card__name">{heading}</h3>
            {scientific}
            <p>{reason}</p>
        </div>
    }
}

#[cfg(test)]
#[path = "recommendations_test.rs"]
mod tests;
