//! ブラウザ上で動かすテスト（wasm-pack test --headless --chrome）

use visionguide_common::RecognitionPage;
use visionguide_wasm::camera::decode_data_url;
use visionguide_wasm::dom::resolve_page;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn page_attribute_wins_over_path() {
    assert_eq!(resolve_page(Some("food"), Some("/architecture")), RecognitionPage::Food);
}

#[wasm_bindgen_test]
fn page_falls_back_to_path() {
    assert_eq!(resolve_page(None, Some("/architecture.html")), RecognitionPage::Architecture);
    assert_eq!(resolve_page(Some("bogus"), Some("/food/")), RecognitionPage::Food);
    assert_eq!(resolve_page(None, None), RecognitionPage::Artwork);
}

#[wasm_bindgen_test]
fn captured_frame_decodes_to_jpeg_bytes() {
    let bytes = decode_data_url("data:image/jpeg;base64,/9j/4A==").unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}
