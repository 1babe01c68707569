//! ヘッダーコンポーネント

use leptos::prelude::*;
use visionguide_common::RecognitionPage;

#[component]
pub fn Header(page: RecognitionPage) -> impl IntoView {
    let nav = RecognitionPage::ALL.map(|target| {
        let href = match target {
            RecognitionPage::Artwork => "/",
            RecognitionPage::Food => "/food",
            RecognitionPage::Architecture => "/architecture",
        };
        let class = if target == page { "nav-link active" } else { "nav-link" };
        view! { <a class=class href=href>{target.title()}</a> }
    });

    view! {
        <header class="header">
            <h1>{format!("VisionGuide - {}", page.title())}</h1>
            <nav class="nav">{nav.into_iter().collect_view()}</nav>
        </header>
    }
}
