//! getUserMediaとcanvasによる撮影

use base64::{engine::general_purpose::STANDARD, Engine};
use leptos::prelude::{LocalStorage, StoredValue};
use visionguide_common::{CameraSession, CaptureConstraints, Error, MediaStream, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStreamConstraints,
    MediaStreamTrack,
};

/// ページ全体で1つのカメラセッション
pub type SharedCamera = StoredValue<CameraSession<WebStream>, LocalStorage>;

/// ブラウザのMediaStream
pub struct WebStream(web_sys::MediaStream);

impl WebStream {
    pub fn raw(&self) -> &web_sys::MediaStream {
        &self.0
    }
}

impl MediaStream for WebStream {
    fn stop_all_tracks(&mut self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// 背面カメラ優先・理想解像度でストリームを要求する
pub async fn request_stream(constraints: &CaptureConstraints) -> std::result::Result<WebStream, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let devices = window.navigator().media_devices().map_err(describe)?;

    let video = js_sys::Object::new();
    set(&video, "facingMode", &JsValue::from_str(constraints.facing_mode))?;
    set(&video, "width", &JsValue::from(ideal(constraints.ideal_width)?))?;
    set(&video, "height", &JsValue::from(ideal(constraints.ideal_height)?))?;

    let request = MediaStreamConstraints::new();
    request.set_video(&video);

    let promise = devices
        .get_user_media_with_constraints(&request)
        .map_err(describe)?;
    let stream = JsFuture::from(promise).await.map_err(describe)?;

    stream
        .dyn_into::<web_sys::MediaStream>()
        .map(WebStream)
        .map_err(describe)
}

/// 映像の現在フレームをcanvasに描き、JPEGのバイト列として取り出す
pub fn grab_jpeg(
    video: &HtmlVideoElement,
    canvas: &HtmlCanvasElement,
    constraints: &CaptureConstraints,
) -> Result<Vec<u8>> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(Error::NoActiveStream);
    }
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .map_err(|e| Error::DeviceAccess(describe(e)))?
        .ok_or(Error::NoActiveStream)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|e| Error::DeviceAccess(describe(e.into())))?;
    context
        .draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|e| Error::DeviceAccess(describe(e)))?;

    let data_url = canvas
        .to_data_url_with_type_and_encoder_options(
            "image/jpeg",
            &JsValue::from_f64(constraints.jpeg_quality),
        )
        .map_err(|e| Error::DeviceAccess(describe(e)))?;

    decode_data_url(&data_url)
}

/// `data:image/jpeg;base64,...` からバイト列を取り出す
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let encoded = data_url
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or_else(|| Error::DeviceAccess("malformed data url".to_string()))?;
    STANDARD
        .decode(encoded)
        .map_err(|e| Error::DeviceAccess(e.to_string()))
}

fn ideal(value: u32) -> std::result::Result<js_sys::Object, String> {
    let object = js_sys::Object::new();
    set(&object, "ideal", &JsValue::from(value))?;
    Ok(object)
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> std::result::Result<(), String> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(describe)
}

fn describe(e: JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| format!("{}: {}", String::from(err.name()), String::from(err.message())))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}
