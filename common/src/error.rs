//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// カメラの権限がない、またはデバイスが使用できない
    #[error("Unable to access camera: {0}")]
    DeviceAccess(String),

    #[error("No active camera stream")]
    NoActiveStream,

    #[error("Invalid file index {index} (list has {len} files)")]
    InvalidIndex { index: usize, len: usize },

    /// 通信そのものの失敗（接続不可など）
    #[error("Network error: {0}")]
    Transport(String),

    /// 2xx以外のHTTPステータス
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 画面に表示する短いメッセージ
    pub fn user_message(&self) -> String {
        match self {
            Error::Http { message, .. } => message.clone(),
            Error::Json(_) => "Unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
