//! 認識結果の表示

use leptos::prelude::*;
use visionguide_common::format::format_percent;
use visionguide_common::{
    ApiEndpoints, Region, ResultDetails, ResultView, RichText, RecognitionPage, SuggestionCard, ViewState,
};

#[component]
pub fn ResultsPanel(state: RwSignal<ViewState>, on_location: Callback<String>) -> impl IntoView {
    // 進捗ティックなど結果以外の変化では描き直さない
    let result = Memo::new(move |_| state.with(|s| s.result().cloned()));

    move || {
        result.get().map(|result| {
            let location = state.with_untracked(|s| s.location().to_string());
            render_result(&result, location, on_location)
        })
    }
}

fn render_result(result: &ResultView, location: String, on_location: Callback<String>) -> AnyView {
    let image = result.image_path.as_deref().map(|path| {
        let src = ApiEndpoints::same_origin().resolve(path);
        let alt = result.original_name.clone();
        view! { <img class="result-image" src=src alt=alt /> }
    });

    let description_title = match result.page {
        RecognitionPage::Artwork => "Themes & Description",
        RecognitionPage::Food => "Food Analysis",
        RecognitionPage::Architecture => "Architectural Details",
    };
    let suggestions_title = match result.page {
        RecognitionPage::Artwork => "Similar Artworks",
        RecognitionPage::Food => "Restaurant Suggestions",
        RecognitionPage::Architecture => "Similar Architecture",
    };

    let location_input = (result.page == RecognitionPage::Food && !result.not_found)
        .then(|| location_picker(location, on_location));

    view! {
        <section class="results-section">
            <div class="result-card">
                {image}
                <div class="result-body">
                    <h2 class="subject-name">{result.subject_name.clone()}</h2>
                    {details_view(&result.details)}
                </div>
            </div>

            <div class="result-description">
                <h3>{description_title}</h3>
                {region_view(&result.description, rich_text_view)}
            </div>

            <div class="result-suggestions">
                <h3>{suggestions_title}</h3>
                {location_input}
                {region_view(&result.suggestions, cards_view)}
            </div>
        </section>
    }
    .into_any()
}

fn details_view(details: &ResultDetails) -> AnyView {
    match details {
        ResultDetails::Artwork {
            artist,
            confidence,
            labels,
            web_entities,
            error,
        } => {
            let labels = labels
                .iter()
                .map(|l| format!("{} ({})", l.description, format_percent(l.confidence)))
                .collect::<Vec<_>>()
                .join(", ");
            let entities = web_entities
                .iter()
                .map(|e| e.description.clone())
                .collect::<Vec<_>>()
                .join(", ");
            view! {
                <p class="artist-name">{format!("Artist: {}", artist)}</p>
                <p class="confidence">{format!("Confidence: {}", format_percent(*confidence))}</p>
                {(!labels.is_empty()).then(|| view! { <p class="labels">{format!("Labels: {}", labels)}</p> })}
                {(!entities.is_empty()).then(|| view! { <p class="web-entities">{format!("Related: {}", entities)}</p> })}
                {error_line(error)}
            }
            .into_any()
        }
        ResultDetails::Food {
            food_type,
            confidence,
            error,
            ..
        } => view! {
            <p class="food-type">{format!("Type: {}", food_type)}</p>
            <p class="confidence">{format!("Confidence: {}", format_percent(*confidence))}</p>
            {error_line(error)}
        }
        .into_any(),
        ResultDetails::Architecture { confidence, error } => view! {
            <p class="confidence">{format!("Confidence: {}", format_percent(*confidence))}</p>
            {error_line(error)}
        }
        .into_any(),
    }
}

fn error_line(error: &Option<String>) -> Option<impl IntoView> {
    error
        .clone()
        .map(|e| view! { <p class="analysis-error">{format!("⚠️ {}", e)}</p> })
}

fn region_view<T: Clone>(region: &Region<T>, ready: impl FnOnce(T) -> AnyView) -> AnyView {
    match region {
        Region::Idle => ().into_any(),
        Region::Loading(text) => view! { <p class="loading">{text.clone()}</p> }.into_any(),
        Region::Ready(value) => ready(value.clone()),
        Region::Empty(text) => view! { <p class="placeholder">{text.clone()}</p> }.into_any(),
        Region::Failed(text) => view! { <p class="error-message">{text.clone()}</p> }.into_any(),
    }
}

fn rich_text_view(segments: Vec<RichText>) -> AnyView {
    let parts = segments
        .into_iter()
        .map(|segment| match segment {
            RichText::Text(text) => text.into_any(),
            RichText::Link(url) => {
                let href = url.clone();
                view! {
                    <a href=href target="_blank" rel="noopener noreferrer">{url}</a>
                }
                .into_any()
            }
            RichText::Break => view! { <br /> }.into_any(),
        })
        .collect_view();
    view! { <div class="description-text">{parts}</div> }.into_any()
}

fn cards_view(cards: Vec<SuggestionCard>) -> AnyView {
    let cards = cards
        .into_iter()
        .map(|card| {
            let links = card
                .links
                .into_iter()
                .map(|link| view! {
                    <a class="card-link" href=link.url target="_blank" rel="noopener noreferrer">
                        {link.label}
                    </a>
                })
                .collect_view();
            view! {
                <div class="suggestion-card">
                    <h4>{card.title}</h4>
                    <p class="card-subtitle">{card.subtitle}</p>
                    <p class="card-detail">{card.detail}</p>
                    <p class="card-location">{card.location}</p>
                    <div class="card-links">{links}</div>
                </div>
            }
        })
        .collect_view();
    view! { <div class="suggestions-grid">{cards}</div> }.into_any()
}

/// レストラン検索の場所入力
fn location_picker(location: String, on_location: Callback<String>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let submit = move || {
        if let Some(input) = input_ref.get() {
            on_location.run(input.value());
        }
    };

    view! {
        <div class="location-input">
            <input
                type="text"
                placeholder="Enter location (e.g., New York)"
                value=location
                node_ref=input_ref
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <button class="btn btn-secondary" on:click=move |_| submit()>"🔄 Update"</button>
        </div>
    }
}
