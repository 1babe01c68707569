//! 認識サーバーAPIの呼び出し
//!
//! 通信そのものは `Transport` 実装（ブラウザはfetch、CLIはreqwest）に任せ、
//! URLの組み立てと応答の解釈はここにまとめる。

use crate::candidate::CandidateFile;
use crate::error::{Error, Result};
use crate::page::RecognitionPage;
use crate::suggestion::SuggestionCard;
use crate::types::{
    ArtworkSuggestion, BuildingSuggestion, DescriptionResponse, ErrorBody, RestaurantSuggestion,
    SuggestionsResponse, UploadResponse,
};
use serde::de::DeserializeOwned;

/// マルチパートのフィールド名（ファイルごとに繰り返す）
pub const UPLOAD_FIELD: &str = "files";

/// 料理ページで場所が未入力のときの既定値
pub const DEFAULT_LOCATION: &str = "New York";

/// HTTP応答（ステータスと本文だけ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP通信の抽象
///
/// 接続できなかった場合だけ `Error::Transport` を返し、2xx以外のステータスは
/// `HttpReply` として返す。タイムアウトは実装側の既定に従う。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpReply>;

    async fn post_files(&self, url: &str, field: &str, files: &[CandidateFile])
        -> Result<HttpReply>;
}

/// エンドポイントのURL組み立て
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
}

impl ApiEndpoints {
    /// 同一オリジン（ブラウザ用の相対パス）
    pub fn same_origin() -> Self {
        Self::default()
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload(&self, page: RecognitionPage) -> String {
        format!("{}{}", self.base_url, page.upload_path())
    }

    /// 説明文の取得先。料理ページにはない
    pub fn description(&self, page: RecognitionPage, name: &str) -> Option<String> {
        let route = match page {
            RecognitionPage::Artwork => "get_themes",
            RecognitionPage::Architecture => "get_architecture_details",
            RecognitionPage::Food => return None,
        };
        Some(format!("{}/{}/{}", self.base_url, route, urlencoding::encode(name)))
    }

    pub fn suggestions(&self, page: RecognitionPage, name: &str, location: &str) -> String {
        let encoded = urlencoding::encode(name);
        match page {
            RecognitionPage::Artwork => format!("{}/get_suggestions/{}", self.base_url, encoded),
            RecognitionPage::Architecture => format!(
                "{}/get_architecture_suggestions/{}",
                self.base_url, encoded
            ),
            RecognitionPage::Food => format!(
                "{}/get_food_suggestions/{}?location={}",
                self.base_url,
                encoded,
                urlencoding::encode(location)
            ),
        }
    }

    /// `/uploads/...` などサーバー相対パスを絶対化する
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Description,
    Suggestions,
}

/// 表示中の結果に対する追加ルックアップ1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// どの表示結果に対するものか（新しいアップロードで古いものは無効になる）
    pub generation: u64,
    pub kind: LookupKind,
    pub page: RecognitionPage,
    pub subject: String,
    pub location: String,
}

/// 解釈前の類似アイテム応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionsReply {
    pub success: bool,
    pub cards: Vec<SuggestionCard>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LookupReply {
    Description(DescriptionResponse),
    Suggestions(SuggestionsReply),
}

pub struct Client<T> {
    transport: T,
    endpoints: ApiEndpoints,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, endpoints: ApiEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 候補ファイルをまとめて1回のマルチパートで送る
    pub async fn upload(
        &self,
        page: RecognitionPage,
        files: &[CandidateFile],
    ) -> Result<UploadResponse> {
        let url = self.endpoints.upload(page);
        tracing::debug!(%url, count = files.len(), "uploading candidates");
        let reply = self.transport.post_files(&url, UPLOAD_FIELD, files).await?;
        interpret_upload(reply)
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupReply> {
        match request.kind {
            LookupKind::Description => {
                let url = self
                    .endpoints
                    .description(request.page, &request.subject)
                    .ok_or_else(|| {
                        Error::Config(format!("{} page has no description lookup", request.page))
                    })?;
                let reply = self.transport.get(&url).await?;
                Ok(LookupReply::Description(decode_lookup(reply)?))
            }
            LookupKind::Suggestions => {
                let url =
                    self.endpoints
                        .suggestions(request.page, &request.subject, &request.location);
                let reply = self.transport.get(&url).await?;
                let parsed = match request.page {
                    RecognitionPage::Artwork => {
                        into_cards(decode_lookup::<SuggestionsResponse<ArtworkSuggestion>>(reply)?)
                    }
                    RecognitionPage::Food => into_cards(decode_lookup::<
                        SuggestionsResponse<RestaurantSuggestion>,
                    >(reply)?),
                    RecognitionPage::Architecture => into_cards(decode_lookup::<
                        SuggestionsResponse<BuildingSuggestion>,
                    >(reply)?),
                };
                Ok(LookupReply::Suggestions(parsed))
            }
        }
    }
}

fn into_cards<S: Into<SuggestionCard>>(response: SuggestionsResponse<S>) -> SuggestionsReply {
    SuggestionsReply {
        success: response.success,
        cards: response.suggestions.into_iter().map(Into::into).collect(),
        error: response.error,
    }
}

/// アップロード応答の解釈。2xx以外は本文の `error`/`message` を使う
pub fn interpret_upload(reply: HttpReply) -> Result<UploadResponse> {
    if !reply.is_success() {
        return Err(http_error(&reply, "Upload failed"));
    }
    Ok(serde_json::from_str(&reply.body)?)
}

/// ルックアップ応答は500でも `success:false` の本文を持つので、まず本文を読む
fn decode_lookup<R: DeserializeOwned>(reply: HttpReply) -> Result<R> {
    match serde_json::from_str(&reply.body) {
        Ok(parsed) => Ok(parsed),
        Err(e) if reply.is_success() => Err(e.into()),
        Err(_) => Err(http_error(&reply, "Request failed")),
    }
}

fn http_error(reply: &HttpReply, fallback: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(&reply.body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("{} (HTTP {})", fallback, reply.status));
    Error::Http {
        status: reply.status,
        message,
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeTransport;
    use super::*;
    use futures::executor::block_on;

    fn client(transport: FakeTransport) -> Client<FakeTransport> {
        Client::new(transport, ApiEndpoints::same_origin())
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoints = ApiEndpoints::new("http://localhost:5000/");
        assert_eq!(
            endpoints.upload(RecognitionPage::Food),
            "http://localhost:5000/upload_food"
        );
        assert_eq!(
            endpoints.description(RecognitionPage::Artwork, "Mona Lisa").as_deref(),
            Some("http://localhost:5000/get_themes/Mona%20Lisa")
        );
        assert_eq!(endpoints.description(RecognitionPage::Food, "Pizza"), None);
        assert_eq!(
            endpoints.suggestions(RecognitionPage::Food, "Ramen", "San Francisco"),
            "http://localhost:5000/get_food_suggestions/Ramen?location=San%20Francisco"
        );
        assert_eq!(
            endpoints.suggestions(RecognitionPage::Architecture, "Notre-Dame/Paris", ""),
            "http://localhost:5000/get_architecture_suggestions/Notre-Dame%2FParis"
        );
    }

    #[test]
    fn test_upload_success() {
        let api = client(FakeTransport::default().reply(
            200,
            r#"{"message": "Upload completed", "uploadedCount": 1, "uploadedFiles": []}"#,
        ));
        let files = vec![CandidateFile::new("a.jpg", "image/jpeg", vec![1])];
        let response = block_on(api.upload(RecognitionPage::Artwork, &files)).unwrap();

        assert_eq!(response.uploaded_count, 1);
        assert_eq!(*api.transport().requests.borrow(), vec!["/upload"]);
        assert_eq!(*api.transport().uploaded.borrow(), vec![vec!["a.jpg".to_string()]]);
    }

    #[test]
    fn test_upload_error_uses_body_message() {
        let api = client(
            FakeTransport::default().reply(413, r#"{"error": "File too large. Maximum size is 16MB."}"#),
        );
        let err = block_on(api.upload(RecognitionPage::Food, &[])).unwrap_err();
        match err {
            Error::Http { status, message } => {
                assert_eq!(status, 413);
                assert_eq!(message, "File too large. Maximum size is 16MB.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_upload_error_generic_fallback() {
        let api = client(FakeTransport::default().reply(502, "<html>Bad Gateway</html>"));
        let err = block_on(api.upload(RecognitionPage::Artwork, &[])).unwrap_err();
        assert_eq!(err.user_message(), "Upload failed (HTTP 502)");
    }

    #[test]
    fn test_lookup_reads_failure_body_on_500() {
        let api = client(FakeTransport::default().reply(
            500,
            r#"{"success": false, "themes": "Error analyzing themes: quota"}"#,
        ));
        let request = LookupRequest {
            generation: 1,
            kind: LookupKind::Description,
            page: RecognitionPage::Artwork,
            subject: "Mona Lisa".to_string(),
            location: String::new(),
        };
        match block_on(api.lookup(&request)).unwrap() {
            LookupReply::Description(d) => {
                assert!(!d.success);
                assert_eq!(d.text.as_deref(), Some("Error analyzing themes: quota"));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_lookup_suggestions_maps_cards() {
        let api = client(FakeTransport::default().reply(
            200,
            r#"{"success": true, "suggestions": [{"Restaurant Name": "Ippudo", "Cuisine": "Japanese"}]}"#,
        ));
        let request = LookupRequest {
            generation: 1,
            kind: LookupKind::Suggestions,
            page: RecognitionPage::Food,
            subject: "Ramen".to_string(),
            location: "New York".to_string(),
        };
        match block_on(api.lookup(&request)).unwrap() {
            LookupReply::Suggestions(s) => {
                assert!(s.success);
                assert_eq!(s.cards[0].title, "Ippudo");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(
            *api.transport().requests.borrow(),
            vec!["/get_food_suggestions/Ramen?location=New%20York"]
        );
    }

    #[test]
    fn test_transport_failure_propagates() {
        let api = client(FakeTransport::default().fail("connection refused"));
        let err = block_on(api.upload(RecognitionPage::Artwork, &[])).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
