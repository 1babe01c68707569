//! APIの型定義
//!
//! 認識サーバーとやり取りするJSONの形:
//! - UploadResponse: `/upload*` の応答（ファイルごとの解析結果を含む）
//! - DescriptionResponse: `/get_themes`, `/get_architecture_details` の応答
//! - SuggestionsResponse: `/get_*suggestions` の応答
//!
//! 解析結果はサーバー任せの緩いデータなので、存在チェック以外の検証はしない。

use crate::page::RecognitionPage;
use serde::{Deserialize, Deserializer, Serialize};

/// アップロード成功時の応答
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadResponse {
    pub uploaded_count: usize,
    pub uploaded_files: Vec<UploadedFile>,
    pub failed_files: Vec<String>,
    pub message: String,
}

/// アップロード失敗時の応答（`error` か `message` のどちらか）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// アップロードされた1ファイル分のエントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadedFile {
    pub original_name: String,
    pub saved_name: String,
    pub size: Option<u64>,
    pub artwork_analysis: Option<ArtworkAnalysis>,
    pub food_analysis: Option<FoodAnalysis>,
    pub architecture_analysis: Option<ArchitectureAnalysis>,
}

impl UploadedFile {
    /// ページに対応する解析結果を取り出す
    pub fn analysis_for(&self, page: RecognitionPage) -> Option<Analysis> {
        match page {
            RecognitionPage::Artwork => self.artwork_analysis.clone().map(Analysis::Artwork),
            RecognitionPage::Food => self.food_analysis.clone().map(Analysis::Food),
            RecognitionPage::Architecture => self
                .architecture_analysis
                .clone()
                .map(Analysis::Architecture),
        }
    }

    /// プレビュー用画像のパス（サーバーの `/uploads/{saved_name}`）
    pub fn image_path(&self) -> Option<String> {
        if self.saved_name.is_empty() {
            None
        } else {
            Some(format!("/uploads/{}", self.saved_name))
        }
    }
}

/// ページごとの解析結果
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Artwork(ArtworkAnalysis),
    Food(FoodAnalysis),
    Architecture(ArchitectureAnalysis),
}

impl Analysis {
    pub fn subject_name(&self) -> Option<&str> {
        let name = match self {
            Analysis::Artwork(a) => a.artwork_name.as_deref(),
            Analysis::Food(f) => f.food_name.as_deref(),
            Analysis::Architecture(b) => b.building_name.as_deref(),
        };
        name.map(str::trim).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkAnalysis {
    pub artwork_name: Option<String>,
    pub artist_name: Option<String>,
    pub confidence: f64,
    pub art_labels: Vec<Label>,
    pub web_entities: Vec<WebEntity>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodAnalysis {
    pub food_name: Option<String>,
    pub food_type: Option<String>,
    pub confidence: f64,
    pub food_labels: Vec<Label>,
    pub web_entities: Vec<WebEntity>,
    pub error: Option<String>,
}

/// 建築の解析結果。サーバーはアートと同じ解析器を使うため名前は `artwork_name` で届く
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureAnalysis {
    #[serde(rename = "artwork_name", alias = "building_name")]
    pub building_name: Option<String>,
    pub confidence: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub description: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebEntity {
    pub description: String,
    pub score: f64,
}

/// 説明文ルックアップの応答（アートは `themes`、建築は `details`）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DescriptionResponse {
    pub success: bool,
    #[serde(alias = "themes", alias = "details")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub suggestions: Vec<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 類似アートワーク
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtworkSuggestion {
    #[serde(rename = "Name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Artist", deserialize_with = "lenient_string")]
    pub artist: Option<String>,
    #[serde(rename = "Year", deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(rename = "Current Location", deserialize_with = "lenient_string")]
    pub current_location: Option<String>,
    #[serde(rename = "Wikipedia", deserialize_with = "lenient_string")]
    pub wikipedia: Option<String>,
}

/// 類似建築
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildingSuggestion {
    #[serde(rename = "Name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Type Of Architecture", deserialize_with = "lenient_string")]
    pub architecture_type: Option<String>,
    #[serde(rename = "Era", deserialize_with = "lenient_string")]
    pub era: Option<String>,
    #[serde(rename = "Location", deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(rename = "Wikipedia", deserialize_with = "lenient_string")]
    pub wikipedia: Option<String>,
    #[serde(rename = "Address", deserialize_with = "lenient_string")]
    pub address: Option<String>,
}

/// おすすめレストラン
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestaurantSuggestion {
    #[serde(rename = "Restaurant Name", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Cuisine", deserialize_with = "lenient_string")]
    pub cuisine: Option<String>,
    #[serde(rename = "Average Costs", deserialize_with = "lenient_string")]
    pub average_costs: Option<String>,
    #[serde(rename = "Yelp Stars", deserialize_with = "lenient_string")]
    pub yelp_stars: Option<String>,
    #[serde(rename = "Address", deserialize_with = "lenient_string")]
    pub address: Option<String>,
}

/// LLM生成データは数値と文字列が混在するので、どちらも文字列として受ける
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_deserialize() {
        let json = r#"{
            "message": "Upload completed",
            "uploadedCount": 1,
            "uploadedFiles": [{
                "original_name": "mona.jpg",
                "saved_name": "abc.jpg",
                "size": 2048,
                "upload_time": "2025-01-18T10:00:00",
                "artwork_analysis": {
                    "artwork_name": "Mona Lisa",
                    "artist_name": "Leonardo da Vinci",
                    "confidence": 0.92,
                    "art_labels": [{"description": "Painting", "confidence": 0.9}],
                    "web_entities": [{"description": "Louvre", "score": 0.7}],
                    "agent_initialized": true
                }
            }]
        }"#;

        let response: UploadResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.uploaded_count, 1);
        assert!(response.failed_files.is_empty());
        let file = &response.uploaded_files[0];
        assert_eq!(file.image_path().as_deref(), Some("/uploads/abc.jpg"));
        let analysis = file.analysis_for(RecognitionPage::Artwork).unwrap();
        assert_eq!(analysis.subject_name(), Some("Mona Lisa"));
        assert!(file.analysis_for(RecognitionPage::Food).is_none());
    }

    #[test]
    fn test_architecture_analysis_reads_artwork_name() {
        let json = r#"{"original_name": "a.jpg", "saved_name": "b.jpg",
            "architecture_analysis": {"artwork_name": "Sagrada Familia", "confidence": 0.8}}"#;
        let file: UploadedFile = serde_json::from_str(json).unwrap();
        let analysis = file.analysis_for(RecognitionPage::Architecture).unwrap();
        assert_eq!(analysis.subject_name(), Some("Sagrada Familia"));
    }

    #[test]
    fn test_blank_subject_name_is_absent() {
        let analysis = Analysis::Food(FoodAnalysis {
            food_name: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(analysis.subject_name(), None);
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "No files provided", "message": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("No files provided"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_description_response_accepts_themes_and_details() {
        let themes: DescriptionResponse =
            serde_json::from_str(r#"{"success": true, "themes": "Renaissance"}"#).unwrap();
        assert_eq!(themes.text.as_deref(), Some("Renaissance"));

        let details: DescriptionResponse =
            serde_json::from_str(r#"{"success": false, "details": "Error analyzing"}"#).unwrap();
        assert!(!details.success);
        assert_eq!(details.text.as_deref(), Some("Error analyzing"));
    }

    #[test]
    fn test_suggestion_fields_accept_numbers() {
        let json = r#"{"success": true, "suggestions": [
            {"Name": "The Starry Night", "Artist": "Vincent van Gogh", "Year": 1889,
             "Current Location": "MoMA"}
        ]}"#;
        let response: SuggestionsResponse<ArtworkSuggestion> = serde_json::from_str(json).unwrap();
        let item = &response.suggestions[0];
        assert_eq!(item.year.as_deref(), Some("1889"));
        assert_eq!(item.wikipedia, None);
    }

    #[test]
    fn test_suggestions_response_missing_list() {
        let json = r#"{"success": false, "error": "agent failed"}"#;
        let response: SuggestionsResponse<RestaurantSuggestion> =
            serde_json::from_str(json).unwrap();
        assert!(response.suggestions.is_empty());
        assert_eq!(response.error.as_deref(), Some("agent failed"));
    }
}
