//! fetch APIによるTransport実装

use js_sys::{Array, Uint8Array};
use visionguide_common::{CandidateFile, Error, HttpReply, Result, Transport};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpReply> {
        let request = Request::new_with_str(url).map_err(js_error)?;
        send(request).await
    }

    async fn post_files(
        &self,
        url: &str,
        field: &str,
        files: &[CandidateFile],
    ) -> Result<HttpReply> {
        let form = FormData::new().map_err(js_error)?;
        for file in files {
            let blob = to_blob(file)?;
            form.append_with_blob_and_filename(field, &blob, &file.name)
                .map_err(js_error)?;
        }

        // Content-Typeはブラウザがboundary付きで設定する
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        send(request).await
    }
}

async fn send(request: Request) -> Result<HttpReply> {
    let window = web_sys::window().ok_or_else(|| Error::Transport("no window".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    Ok(HttpReply::new(resp.status(), text.as_string().unwrap_or_default()))
}

fn to_blob(file: &CandidateFile) -> Result<Blob> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()));

    let props = BlobPropertyBag::new();
    props.set_type(&file.mime_type);

    Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(js_error)
}

fn js_error(e: JsValue) -> Error {
    let reason = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    Error::Transport(reason)
}
