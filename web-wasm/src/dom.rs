//! ページ判定とファイル読み込み

use gloo::file::futures::read_as_bytes;
use visionguide_common::{CandidateFile, RecognitionPage};
use web_sys::FileList;

/// `<body data-page="food">` を優先し、なければURLのパスから判定する
pub fn current_page() -> RecognitionPage {
    let Some(window) = web_sys::window() else {
        return RecognitionPage::default();
    };
    let declared = window
        .document()
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute("data-page"));
    let path = window.location().pathname().ok();

    resolve_page(declared.as_deref(), path.as_deref())
}

pub fn resolve_page(declared: Option<&str>, path: Option<&str>) -> RecognitionPage {
    declared
        .and_then(|page| page.parse().ok())
        .or_else(|| path.and_then(RecognitionPage::from_path))
        .unwrap_or_default()
}

/// 選択・ドロップされたファイルを順番どおりに読み込む
///
/// 読めなかったファイルはコンソールに出して飛ばす。
pub async fn read_files(list: FileList) -> Vec<CandidateFile> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(file) = list.get(i) else {
            continue;
        };
        let file = gloo::file::File::from(file);
        match read_as_bytes(&file).await {
            Ok(bytes) => files.push(CandidateFile::new(file.name(), file.raw_mime_type(), bytes)),
            Err(e) => gloo::console::warn!(format!("failed to read {}: {}", file.name(), e)),
        }
    }
    files
}
