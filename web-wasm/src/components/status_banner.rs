//! ステータスメッセージ

use leptos::prelude::*;
use visionguide_common::ViewState;

#[component]
pub fn StatusBanner(state: RwSignal<ViewState>) -> impl IntoView {
    move || {
        state.with(|s| {
            s.status().map(|message| {
                view! { <div class=message.css_class()>{message.text.clone()}</div> }
            })
        })
    }
}
