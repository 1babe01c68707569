//! 認識ページ（アート / 料理 / 建築）の定義
//!
//! ページごとにアップロード先エンドポイント、解析フィールド名、
//! 追加で発行するルックアップが異なる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionPage {
    #[default]
    Artwork,
    Food,
    Architecture,
}

impl RecognitionPage {
    pub const ALL: [RecognitionPage; 3] = [
        RecognitionPage::Artwork,
        RecognitionPage::Food,
        RecognitionPage::Architecture,
    ];

    /// マルチパートPOSTの送信先
    pub fn upload_path(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "/upload",
            RecognitionPage::Food => "/upload_food",
            RecognitionPage::Architecture => "/upload_architecture",
        }
    }

    /// アップロード応答の各ファイルに付く解析フィールド名
    pub fn analysis_field(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "artwork_analysis",
            RecognitionPage::Food => "food_analysis",
            RecognitionPage::Architecture => "architecture_analysis",
        }
    }

    /// 説明文ルックアップを発行するか（料理ページは解析結果から組み立てる）
    pub fn fetches_description(&self) -> bool {
        !matches!(self, RecognitionPage::Food)
    }

    /// 解析対象の呼び方（進捗表示・プレースホルダ用）
    pub fn subject_noun(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "artwork",
            RecognitionPage::Food => "food",
            RecognitionPage::Architecture => "architecture",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "Artwork Recognition",
            RecognitionPage::Food => "Food Recognition",
            RecognitionPage::Architecture => "Architecture Recognition",
        }
    }

    /// 名前が取れなかったときの表示名
    pub fn unknown_subject(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "-",
            RecognitionPage::Food => "Unknown Food",
            RecognitionPage::Architecture => "Unknown Building",
        }
    }

    pub fn suggestions_placeholder(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "No similar artworks available",
            RecognitionPage::Food => "No restaurant suggestions available",
            RecognitionPage::Architecture => "No architecture suggestions available",
        }
    }

    pub fn suggestions_loading(&self) -> &'static str {
        match self {
            RecognitionPage::Artwork => "Loading similar artworks...",
            RecognitionPage::Food => "Loading restaurant suggestions...",
            RecognitionPage::Architecture => "Loading similar architecture...",
        }
    }

    /// ページのパス（`/art`, `/food/`, `/architecture.html` など）から判定
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path
            .trim_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let segment = segment.strip_suffix(".html").unwrap_or(segment);
        segment.parse().ok()
    }
}

impl FromStr for RecognitionPage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "art" | "artwork" | "" | "index" => Ok(RecognitionPage::Artwork),
            "food" => Ok(RecognitionPage::Food),
            "architecture" | "building" => Ok(RecognitionPage::Architecture),
            other => Err(Error::Config(format!("unknown recognition page: {}", other))),
        }
    }
}

impl fmt::Display for RecognitionPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecognitionPage::Artwork => "art",
            RecognitionPage::Food => "food",
            RecognitionPage::Architecture => "architecture",
        };
        f.write_str(name)
    }
}
