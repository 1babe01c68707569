//! アップロードエリアコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use visionguide_common::CandidateFile;
use web_sys::{DragEvent, FileList};

use crate::dom;

#[component]
pub fn UploadArea(
    #[prop(into)] disabled: Signal<bool>,
    on_files: Callback<Vec<CandidateFile>>,
    on_open_camera: Callback<()>,
) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let handle_files = move |files: FileList| {
        spawn_local(async move {
            let candidates = dom::read_files(files).await;
            if !candidates.is_empty() {
                on_files.run(candidates);
            }
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if disabled.get_untracked() {
            return;
        }

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        // ファイル選択ダイアログを開く
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // 同じファイルを続けて選べるようにする
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept="image/*"
                multiple=true
                class="file-input"
                style="display: none"
                node_ref=input_ref
                on:change=on_change
            />
            <div class="upload-icon">"📁"</div>
            <p>"Drag & drop images here or click to browse"</p>
            <p class="text-muted">"Supported formats: JPEG, PNG, GIF, WebP"</p>
            <button
                class="btn btn-secondary camera-btn"
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_open_camera.run(());
                }
            >
                "📷 Take Photo"
            </button>
        </div>
    }
}
