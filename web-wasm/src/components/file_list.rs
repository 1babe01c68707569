//! 送信待ちファイルの一覧

use leptos::prelude::*;
use visionguide_common::{format_file_size, ViewState};

#[component]
pub fn FileList(state: RwSignal<ViewState>, on_remove: Callback<usize>) -> impl IntoView {
    let entries = move || state.with(|s| s.selection().entries());
    let has_files = move || state.with(|s| s.selection().has_candidates());
    let total = move || {
        state.with(|s| {
            format!(
                "{} file(s), {}",
                s.selection().len(),
                format_file_size(s.selection().total_size())
            )
        })
    };

    view! {
        <Show when=has_files>
            <div class="file-list">
                <For
                    each=entries
                    key=|entry| (entry.index, entry.name.clone())
                    children=move |entry| {
                        let index = entry.index;
                        view! {
                            <div class="file-item">
                                <span class="file-icon">{entry.icon}</span>
                                <div class="file-info">
                                    <div class="file-name">{entry.name}</div>
                                    <div class="file-size">{entry.size_label}</div>
                                </div>
                                <button
                                    class="remove-file"
                                    disabled=move || state.with(|s| s.is_uploading())
                                    on:click=move |_| on_remove.run(index)
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    }
                />
                <div class="file-total">{total}</div>
            </div>
        </Show>
    }
}
