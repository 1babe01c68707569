use crate::error::{Result, VisionGuideError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use visionguide_common::api::DEFAULT_LOCATION;
use visionguide_common::RecognitionPage;

/// 接続先サーバーの環境変数（設定ファイルより優先）
pub const SERVER_ENV: &str = "VISIONGUIDE_SERVER";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// レストラン検索の場所
    pub default_location: String,
    /// 省略時は対話で選ぶ
    pub default_page: Option<RecognitionPage>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            default_location: DEFAULT_LOCATION.into(),
            default_page: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VisionGuideError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("visionguide").join("config.json"))
    }

    /// 接続先: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_server(&self, cli_override: Option<&str>) -> String {
        let env = std::env::var(SERVER_ENV).ok();
        pick_server(cli_override, env.as_deref(), &self.server_url)
    }

    pub fn set_server(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VisionGuideError::Config(format!(
                "サーバーURLは http:// か https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    pub fn set_location(&mut self, location: &str) {
        let location = location.trim();
        self.default_location = if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location.to_string()
        };
    }
}

pub fn pick_server(cli: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(configured)
        .to_string()
}
