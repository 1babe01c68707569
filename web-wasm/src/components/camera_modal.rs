//! カメラ撮影モーダル

use leptos::prelude::*;
use leptos::task::spawn_local;
use visionguide_common::{CameraView, CandidateFile};

use crate::camera::{grab_jpeg, request_stream, SharedCamera};

const CAMERA_DENIED: &str = "Unable to access camera. Please check permissions and try again.";

/// モーダルを開いてデバイスを要求する
pub fn open_camera(camera: SharedCamera, camera_view: RwSignal<CameraView>) {
    let Some(request) = camera.try_update_value(|c| c.begin_open()) else {
        return;
    };
    camera_view.set(CameraView::Opening);

    let constraints = camera.with_value(|c| c.constraints().clone());
    spawn_local(async move {
        let acquired = request_stream(&constraints).await;
        if let Some(Err(e)) = camera.try_update_value(|c| c.open(request, acquired)) {
            gloo::console::error!(e.to_string());
            gloo::dialogs::alert(CAMERA_DENIED);
        }
        camera_view.set(camera.with_value(|c| c.view()));
    });
}

#[component]
pub fn CameraModal(
    camera: SharedCamera,
    camera_view: RwSignal<CameraView>,
    on_captured: Callback<CandidateFile>,
) -> impl IntoView {
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let sync = move || camera_view.set(camera.with_value(|c| c.view()));

    // ライブになったら映像を繋ぎ、閉じたら外す
    Effect::new(move |_| {
        let view = camera_view.get();
        let Some(video) = video_ref.get() else {
            return;
        };
        match view {
            CameraView::Live => {
                let stream = camera.with_value(|c| c.stream().map(|s| s.raw().clone()));
                video.set_src_object(stream.as_ref());
                let _ = video.play();
            }
            CameraView::Hidden => video.set_src_object(None),
            CameraView::Opening | CameraView::Reviewing => {}
        }
    });

    let close = move || {
        camera.update_value(|c| c.close());
        sync();
    };

    let on_capture = move |_| {
        let (Some(video), Some(canvas)) = (video_ref.get(), canvas_ref.get()) else {
            return;
        };
        let captured = camera.try_update_value(|c| {
            c.capture(|_, constraints| grab_jpeg(&video, &canvas, constraints))
        });
        if let Some(Err(e)) = captured {
            gloo::console::warn!(e.to_string());
        }
        sync();
    };

    let on_retake = move |_| {
        camera.update_value(|c| c.retake());
        sync();
    };

    let on_use = move |_| {
        let file = camera.try_update_value(|c| c.accept()).flatten();
        sync();
        if let Some(file) = file {
            on_captured.run(file);
        }
    };

    let on_backdrop = move |ev: web_sys::MouseEvent| {
        if ev.target() == ev.current_target() {
            close();
        }
    };

    let shown = move || camera_view.get() != CameraView::Hidden;
    let live = move || camera_view.get() == CameraView::Live;
    let reviewing = move || camera_view.get() == CameraView::Reviewing;

    view! {
        <div
            class="modal camera-modal"
            style=move || if shown() { "display: flex" } else { "display: none" }
            on:click=on_backdrop
        >
            <div class="modal-content">
                <div class="modal-header">
                    <h3>"📷 Take Photo"</h3>
                    <button class="close-btn" on:click=move |_| close()>"✕"</button>
                </div>

                <div class="camera-container">
                    <Show when=move || camera_view.get() == CameraView::Opening>
                        <p class="camera-loading">"Starting camera..."</p>
                    </Show>
                    <video
                        class="camera-video"
                        autoplay=true
                        playsinline=true
                        muted=true
                        node_ref=video_ref
                        style=move || if live() { "display: block" } else { "display: none" }
                    />
                    <canvas
                        class="camera-canvas"
                        node_ref=canvas_ref
                        style=move || if reviewing() { "display: block" } else { "display: none" }
                    />
                </div>

                <div class="camera-controls">
                    <Show when=live>
                        <button class="btn btn-primary capture-btn" on:click=on_capture>
                            "📸 Capture"
                        </button>
                    </Show>
                    <Show when=reviewing>
                        <button class="btn btn-secondary retake-btn" on:click=on_retake>
                            "🔄 Retake"
                        </button>
                        <button class="btn btn-primary use-photo-btn" on:click=on_use>
                            "✅ Use Photo"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
