//! ステータスメッセージ

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    /// この時間が経ったら消す。Noneなら消さない
    pub auto_hide: Option<Duration>,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
            auto_hide: Some(Duration::from_secs(5)),
        }
    }

    /// エラーはユーザーが再操作するまで残す
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
            auto_hide: None,
        }
    }

    pub fn photo_added() -> Self {
        Self {
            kind: StatusKind::Info,
            text: "📷 Photo captured and added for analysis!".to_string(),
            auto_hide: Some(Duration::from_secs(3)),
        }
    }

    pub fn css_class(&self) -> String {
        format!("upload-status {}", self.kind.as_str())
    }
}
