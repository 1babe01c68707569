//! プログレスバーコンポーネント

use leptos::prelude::*;
use visionguide_common::{ProgressStage, ViewState};

#[component]
pub fn ProgressBar(state: RwSignal<ViewState>) -> impl IntoView {
    let visible = move || state.with(|s| s.progress().is_visible());
    let fraction = move || state.with(|s| s.progress().fraction());
    let fill_class = move || match state.with(|s| s.progress().stage()) {
        ProgressStage::Complete => "progress-fill complete",
        _ => "progress-fill",
    };

    view! {
        <Show when=visible>
            <div class="progress-container">
                <div class="progress-bar">
                    <div
                        class=fill_class
                        style=move || format!("width: {}%", fraction() * 100.0)
                    />
                </div>
                <p class="progress-text">
                    {move || state.with(|s| {
                        format!("{} {}", s.progress().label(), s.progress().percent_label())
                    })}
                </p>
            </div>
        </Show>
    }
}
