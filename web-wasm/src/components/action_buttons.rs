//! 送信・クリアボタン

use leptos::prelude::*;
use visionguide_common::ViewState;

#[component]
pub fn ActionButtons(
    state: RwSignal<ViewState>,
    on_submit: Callback<()>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let can_submit = move || state.with(|s| s.can_submit());
    let can_clear = move || state.with(|s| s.can_clear());
    let uploading = move || state.with(|s| s.is_uploading());

    view! {
        <div class="action-buttons">
            <button
                class="btn btn-primary upload-btn"
                disabled=move || !can_submit()
                on:click=move |_| on_submit.run(())
            >
                {move || if uploading() { "⏳ Uploading..." } else { "🚀 Upload & Analyze" }}
            </button>
            <button
                class="btn btn-secondary clear-btn"
                disabled=move || !can_clear()
                on:click=move |_| on_clear.run(())
            >
                "🗑️ Clear"
            </button>
        </div>
    }
}
