//! メインアプリケーションコンポーネント

use gloo::timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use visionguide_common::{CameraSession, CameraView, CandidateFile, LookupRequest, ViewState};

use crate::api;
use crate::camera::SharedCamera;
use crate::components::{
    action_buttons::ActionButtons,
    camera_modal::{open_camera, CameraModal},
    file_list::FileList,
    header::Header,
    progress_bar::ProgressBar,
    results_panel::ResultsPanel,
    status_banner::StatusBanner,
    upload_area::UploadArea,
};
use crate::dom;

/// 推定進捗を進める間隔
const PROGRESS_TICK_MS: u32 = 200;
/// 1ティックで進む最大量
const PROGRESS_TICK_MAX: f64 = 0.15;
/// 完了表示を残す時間
const PROGRESS_LINGER_MS: u32 = 2_000;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let page = dom::current_page();
    let state = RwSignal::new(ViewState::new(page));
    let camera: SharedCamera = StoredValue::new_local(CameraSession::default());
    let camera_view = RwSignal::new(CameraView::Hidden);

    let on_files = Callback::new(move |files: Vec<CandidateFile>| {
        state.update(|s| s.add_files(files));
    });

    let on_remove = Callback::new(move |index: usize| {
        state.update(|s| {
            if let Err(e) = s.remove_file(index) {
                gloo::console::warn!(e.to_string());
            }
        });
    });

    let on_clear = Callback::new(move |_: ()| state.update(|s| s.clear()));
    let on_submit = Callback::new(move |_: ()| submit_upload(state));
    let on_location = Callback::new(move |location: String| refresh_suggestions(state, location));
    let on_open_camera = Callback::new(move |_: ()| open_camera(camera, camera_view));

    let on_captured = Callback::new(move |file: CandidateFile| {
        state.update(|s| s.add_captured(file));
        arm_status_timer(state);
    });

    view! {
        <div class="container">
            <Header page=page />

            <main class="main-content">
                <UploadArea
                    disabled=Signal::derive(move || state.with(|s| s.is_uploading()))
                    on_files=on_files
                    on_open_camera=on_open_camera
                />
                <FileList state=state on_remove=on_remove />
                <ActionButtons state=state on_submit=on_submit on_clear=on_clear />
                <ProgressBar state=state />
                <StatusBanner state=state />
                <ResultsPanel state=state on_location=on_location />
            </main>

            <CameraModal camera=camera camera_view=camera_view on_captured=on_captured />
        </div>
    }
}

/// 候補をまとめて送信し、結果に応じてルックアップを発行する
fn submit_upload(state: RwSignal<ViewState>) {
    let Some(ticket) = state.try_update(|s| s.begin_upload()).flatten() else {
        return;
    };

    let ticker = Interval::new(PROGRESS_TICK_MS, move || {
        let delta = js_sys::Math::random() * PROGRESS_TICK_MAX;
        state.update(|s| s.tick_progress(delta as f32));
    });

    spawn_local(async move {
        let outcome = api::client().upload(ticket.page, &ticket.files).await;
        drop(ticker);

        let lookups = state
            .try_update(|s| s.finish_upload(outcome))
            .unwrap_or_default();
        arm_status_timer(state);

        Timeout::new(PROGRESS_LINGER_MS, move || state.update(|s| s.hide_progress())).forget();

        for request in lookups {
            spawn_lookup(state, request);
        }
    });
}

/// 場所を変えて類似アイテム（レストラン）を取り直す
fn refresh_suggestions(state: RwSignal<ViewState>, location: String) {
    let request = state
        .try_update(|s| {
            s.set_location(location);
            s.refresh_suggestions()
        })
        .flatten();
    if let Some(request) = request {
        spawn_lookup(state, request);
    }
}

/// ルックアップは互いに独立して並行に走る
fn spawn_lookup(state: RwSignal<ViewState>, request: LookupRequest) {
    spawn_local(async move {
        let reply = api::client().lookup(&request).await;
        state.update(|s| {
            if !s.finish_lookup(&request, reply) {
                gloo::console::debug!("stale lookup dropped");
            }
        });
    });
}

/// 自動で消えるメッセージならタイマーを仕掛ける
fn arm_status_timer(state: RwSignal<ViewState>) {
    let Some(message) = state.with_untracked(|s| s.status().cloned()) else {
        return;
    };
    let Some(after) = message.auto_hide else {
        return;
    };
    let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
    Timeout::new(millis, move || state.update(|s| s.dismiss_status(&message))).forget();
}
