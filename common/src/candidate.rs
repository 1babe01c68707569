//! アップロード候補ファイル

/// カメラ撮影した画像のファイル名
pub const CAPTURED_FILE_NAME: &str = "camera-photo.jpg";

/// ピッカー・ドロップ・カメラで選ばれ、送信待ちになっている画像
///
/// ページのメモリ上にだけ存在し、送信成功かクリアで破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mut mime_type = mime_type.into();
        if mime_type.is_empty() {
            mime_type = mime_from_name(&name).to_string();
        }
        Self {
            size: bytes.len() as u64,
            name,
            mime_type,
            bytes,
        }
    }

    /// カメラから取り込んだJPEGフレーム
    pub fn from_captured_frame(jpeg: Vec<u8>) -> Self {
        Self::new(CAPTURED_FILE_NAME, "image/jpeg", jpeg)
    }
}

/// 拡張子からMIMEタイプを推定（ブラウザが型を付けないファイル用）
pub fn mime_from_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}
