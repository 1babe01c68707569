//! ページのビュー状態と状態遷移
//!
//! UIイベント（追加・削除・クリア・送信）とネットワーク完了をすべて
//! `ViewState` のメソッドとして受け、画面はこの状態から描き直す。
//! 通信は2段階で扱う:
//! 1. `begin_upload` が送信内容を返す
//! 2. 呼び出し側が通信し、結果を `finish_upload` に渡す
//!
//! ルックアップ（説明文・類似アイテム）も同じ形で、`generation` によって
//! 新しいアップロード後に届いた古い結果は捨てられる。

use crate::api::{Client, LookupKind, LookupReply, LookupRequest, Transport, DEFAULT_LOCATION};
use crate::candidate::CandidateFile;
use crate::error::{Error, Result};
use crate::format::{format_percent, rich_text, RichText};
use crate::page::RecognitionPage;
use crate::progress::UploadProgress;
use crate::selection::FileSelection;
use crate::status::StatusMessage;
use crate::suggestion::SuggestionCard;
use crate::types::{Analysis, Label, UploadResponse, UploadedFile, WebEntity};

/// 「見つからなかった」ことを表す被写体名。これらではルックアップしない
pub const NOT_FOUND_SUBJECTS: &[&str] = &[
    "Unable to identify artwork",
    "Artwork could not be found",
    "Unable to identify food item",
    "Analysis Failed",
    "Analysis Error",
];

const NO_DATA: &str = "No data available for this image.";

/// 料理の説明に載せるラベル数
const FOOD_LABEL_LIMIT: usize = 5;

pub fn is_not_found(subject: &str) -> bool {
    let subject = subject.trim();
    NOT_FOUND_SUBJECTS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(subject))
}

/// 結果画面の1領域（説明文・類似アイテム）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region<T> {
    Idle,
    Loading(String),
    Ready(T),
    /// 結果なし（エラーではない）
    Empty(String),
    Failed(String),
}

impl<T> Region<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Region::Loading(_))
    }
}

/// ページごとの解析詳細
#[derive(Debug, Clone, PartialEq)]
pub enum ResultDetails {
    Artwork {
        artist: String,
        confidence: f64,
        labels: Vec<Label>,
        web_entities: Vec<WebEntity>,
        error: Option<String>,
    },
    Food {
        food_type: String,
        confidence: f64,
        labels: Vec<Label>,
        error: Option<String>,
    },
    Architecture {
        confidence: f64,
        error: Option<String>,
    },
}

/// 表示中の結果（1件だけ）
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub generation: u64,
    pub page: RecognitionPage,
    pub original_name: String,
    /// サーバー相対の画像パス（`/uploads/...`）
    pub image_path: Option<String>,
    pub subject_name: String,
    pub not_found: bool,
    pub details: ResultDetails,
    pub description: Region<Vec<RichText>>,
    pub suggestions: Region<Vec<SuggestionCard>>,
}

impl ResultView {
    fn build(generation: u64, page: RecognitionPage, file: &UploadedFile, analysis: Analysis) -> Self {
        let subject = analysis.subject_name().map(str::to_string);
        let not_found = subject.as_deref().map_or(true, is_not_found);
        let subject_name = subject.unwrap_or_else(|| page.unknown_subject().to_string());

        let details = match analysis {
            Analysis::Artwork(a) => ResultDetails::Artwork {
                artist: a.artist_name.unwrap_or_else(|| "-".to_string()),
                confidence: a.confidence,
                labels: a.art_labels,
                web_entities: a.web_entities,
                error: a.error,
            },
            Analysis::Food(f) => ResultDetails::Food {
                food_type: f.food_type.unwrap_or_else(|| "General".to_string()),
                confidence: f.confidence,
                labels: f.food_labels.into_iter().take(FOOD_LABEL_LIMIT).collect(),
                error: f.error,
            },
            Analysis::Architecture(b) => ResultDetails::Architecture {
                confidence: b.confidence,
                error: b.error,
            },
        };

        let description = match &details {
            ResultDetails::Food { .. } => Region::Ready(rich_text(&food_summary(&details))),
            _ if not_found => Region::Empty(NO_DATA.to_string()),
            _ => Region::Idle,
        };
        let suggestions = if not_found {
            Region::Empty(NO_DATA.to_string())
        } else {
            Region::Idle
        };

        Self {
            generation,
            page,
            original_name: file.original_name.clone(),
            image_path: file.image_path(),
            subject_name,
            not_found,
            details,
            description,
            suggestions,
        }
    }

    fn lookup(&self, kind: LookupKind, location: &str) -> LookupRequest {
        LookupRequest {
            generation: self.generation,
            kind,
            page: self.page,
            subject: self.subject_name.clone(),
            location: location.to_string(),
        }
    }
}

/// 料理の説明文（サーバーに問い合わせず解析結果から組み立てる）
fn food_summary(details: &ResultDetails) -> String {
    let ResultDetails::Food {
        food_type,
        confidence,
        labels,
        ..
    } = details
    else {
        return String::new();
    };

    let mut text = format!(
        "Type: {}\nConfidence: {:.1}%\n",
        food_type,
        confidence * 100.0
    );
    if !labels.is_empty() {
        text.push_str("\nDetected Items:\n");
        for label in labels {
            text.push_str(&format!(
                "• {} ({})\n",
                label.description,
                format_percent(label.confidence)
            ));
        }
    }
    text
}

/// 1回のアップロードで送る内容
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub page: RecognitionPage,
    pub files: Vec<CandidateFile>,
}

/// ページ全体のビュー状態
#[derive(Debug, Clone)]
pub struct ViewState {
    page: RecognitionPage,
    selection: FileSelection,
    uploading: bool,
    progress: UploadProgress,
    status: Option<StatusMessage>,
    result: Option<ResultView>,
    generation: u64,
    location: String,
}

impl ViewState {
    pub fn new(page: RecognitionPage) -> Self {
        Self {
            page,
            selection: FileSelection::new(),
            uploading: false,
            progress: UploadProgress::default(),
            status: None,
            result: None,
            generation: 0,
            location: DEFAULT_LOCATION.to_string(),
        }
    }

    pub fn page(&self) -> RecognitionPage {
        self.page
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn progress(&self) -> &UploadProgress {
        &self.progress
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// 送信ボタンの有効状態（送信中は二重送信させない）
    pub fn can_submit(&self) -> bool {
        self.selection.has_candidates() && !self.uploading
    }

    pub fn can_clear(&self) -> bool {
        self.selection.has_candidates()
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = CandidateFile>) {
        self.selection.add(files);
    }

    /// カメラで撮った1枚を追加し、案内を出す
    pub fn add_captured(&mut self, file: CandidateFile) {
        self.selection.add([file]);
        self.status = Some(StatusMessage::photo_added());
    }

    pub fn remove_file(&mut self, index: usize) -> Result<()> {
        self.selection.remove(index).map(|_| ())
    }

    /// 候補と表示中の結果をすべて消す
    pub fn clear(&mut self) {
        self.selection.clear();
        self.status = None;
        if self.result.take().is_some() {
            // 表示を消したので、届く途中のルックアップも無効にする
            self.generation += 1;
        }
        if !self.uploading {
            self.progress.reset();
        }
    }

    /// 自動で消えるメッセージのタイマー満了。別のメッセージに変わっていたら残す
    pub fn dismiss_status(&mut self, expected: &StatusMessage) {
        if self.status.as_ref() == Some(expected) {
            self.status = None;
        }
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        let location = location.into();
        self.location = if location.trim().is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location.trim().to_string()
        };
    }

    /// 送信開始。候補が空、または送信中なら何もしない
    pub fn begin_upload(&mut self) -> Option<UploadTicket> {
        if !self.can_submit() {
            return None;
        }
        self.uploading = true;
        self.status = None;
        self.progress.start(self.page);
        tracing::debug!(page = %self.page, count = self.selection.len(), "upload started");
        Some(UploadTicket {
            page: self.page,
            files: self.selection.files().to_vec(),
        })
    }

    pub fn tick_progress(&mut self, delta: f32) {
        self.progress.tick(delta);
    }

    /// 送信結果を受け取る。成功時は発行すべきルックアップを返す
    pub fn finish_upload(&mut self, outcome: Result<UploadResponse>) -> Vec<LookupRequest> {
        self.uploading = false;

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.progress.reset();
                self.status = Some(StatusMessage::error(format!(
                    "Upload failed: {}",
                    e.user_message()
                )));
                return Vec::new();
            }
        };

        self.progress.complete();
        self.status = Some(StatusMessage::success(upload_summary(&response)));
        self.selection.clear();

        self.generation += 1;
        let selected = response
            .uploaded_files
            .iter()
            .find_map(|file| file.analysis_for(self.page).map(|a| (file, a)));
        self.result = selected.map(|(file, analysis)| {
            ResultView::build(self.generation, self.page, file, analysis)
        });

        self.pending_lookups()
    }

    /// 完了後しばらくして進捗バーを隠す
    pub fn hide_progress(&mut self) {
        if !self.uploading {
            self.progress.reset();
        }
    }

    fn pending_lookups(&mut self) -> Vec<LookupRequest> {
        let location = self.location.clone();
        let Some(result) = self.result.as_mut() else {
            return Vec::new();
        };
        if result.not_found {
            return Vec::new();
        }

        let mut requests = Vec::new();
        if result.page.fetches_description() && matches!(result.description, Region::Idle) {
            result.description = Region::Loading("Loading description...".to_string());
            requests.push(result.lookup(LookupKind::Description, &location));
        }
        if matches!(result.suggestions, Region::Idle) {
            result.suggestions = Region::Loading(result.page.suggestions_loading().to_string());
            requests.push(result.lookup(LookupKind::Suggestions, &location));
        }
        requests
    }

    /// 場所の変更などで類似アイテムを取り直す。取得中なら何もしない
    pub fn refresh_suggestions(&mut self) -> Option<LookupRequest> {
        let location = self.location.clone();
        let result = self.result.as_mut()?;
        if result.not_found || result.suggestions.is_loading() {
            return None;
        }
        result.suggestions = Region::Loading(result.page.suggestions_loading().to_string());
        Some(result.lookup(LookupKind::Suggestions, &location))
    }

    /// ルックアップ結果を反映する。表示が入れ替わっていたら捨てて false
    pub fn finish_lookup(&mut self, request: &LookupRequest, outcome: Result<LookupReply>) -> bool {
        let Some(result) = self.result.as_mut() else {
            return false;
        };
        if result.generation != request.generation {
            tracing::debug!(kind = ?request.kind, "stale lookup ignored");
            return false;
        }

        match request.kind {
            LookupKind::Description => {
                result.description = description_region(outcome);
            }
            LookupKind::Suggestions => {
                result.suggestions = suggestions_region(result.page, outcome);
            }
        }
        true
    }
}

fn upload_summary(response: &UploadResponse) -> String {
    let mut text = format!(
        "Successfully uploaded {} file(s)!",
        response.uploaded_count
    );
    if !response.failed_files.is_empty() {
        text.push_str(&format!(
            " {} file(s) failed: {}",
            response.failed_files.len(),
            response.failed_files.join(", ")
        ));
    }
    text
}

fn lookup_failure(e: &Error) -> String {
    match e {
        Error::Transport(reason) => {
            format!("Failed to connect to analysis service: {}", reason)
        }
        other => other.user_message(),
    }
}

fn description_region(outcome: Result<LookupReply>) -> Region<Vec<RichText>> {
    match outcome {
        Ok(LookupReply::Description(reply)) => {
            let text = reply.text.filter(|t| !t.trim().is_empty());
            match (reply.success, text) {
                (true, Some(text)) => Region::Ready(rich_text(&text)),
                (true, None) => Region::Empty("No description available.".to_string()),
                (false, text) => {
                    Region::Failed(text.unwrap_or_else(|| "Unable to load description.".to_string()))
                }
            }
        }
        Ok(LookupReply::Suggestions(_)) => {
            Region::Failed("Unable to load description.".to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "description lookup failed");
            Region::Failed(lookup_failure(&e))
        }
    }
}

fn suggestions_region(
    page: RecognitionPage,
    outcome: Result<LookupReply>,
) -> Region<Vec<SuggestionCard>> {
    match outcome {
        Ok(LookupReply::Suggestions(reply)) => {
            if !reply.success {
                Region::Failed(
                    reply
                        .error
                        .unwrap_or_else(|| "Error loading suggestions".to_string()),
                )
            } else if reply.cards.is_empty() {
                Region::Empty(page.suggestions_placeholder().to_string())
            } else {
                Region::Ready(reply.cards)
            }
        }
        Ok(LookupReply::Description(_)) => Region::Failed("Error loading suggestions".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "suggestions lookup failed");
            Region::Failed(lookup_failure(&e))
        }
    }
}

/// 送信からルックアップまでを順に実行する（ブラウザ以外のフロントエンド用）
///
/// 候補が空なら通信せず false を返す。
pub async fn submit<T: Transport>(state: &mut ViewState, client: &Client<T>) -> bool {
    let Some(ticket) = state.begin_upload() else {
        return false;
    };

    let outcome = client.upload(ticket.page, &ticket.files).await;
    let lookups = state.finish_upload(outcome);
    for request in lookups {
        let reply = client.lookup(&request).await;
        state.finish_lookup(&request, reply);
    }
    state.hide_progress();
    true
}

/// 類似アイテムだけを取り直す
pub async fn refresh_suggestions<T: Transport>(state: &mut ViewState, client: &Client<T>) -> bool {
    let Some(request) = state.refresh_suggestions() else {
        return false;
    };
    let reply = client.lookup(&request).await;
    state.finish_lookup(&request, reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;
    use crate::api::ApiEndpoints;
    use crate::types::DescriptionResponse;
    use futures::executor::block_on;

    fn file(name: &str) -> CandidateFile {
        CandidateFile::new(name, "image/jpeg", vec![0u8; 64])
    }

    fn client(transport: FakeTransport) -> Client<FakeTransport> {
        Client::new(transport, ApiEndpoints::same_origin())
    }

    const TWO_FILES_SECOND_ANALYZED: &str = r#"{
        "message": "Upload completed",
        "uploadedCount": 2,
        "uploadedFiles": [
            {"original_name": "notes.jpg", "saved_name": "first.jpg"},
            {"original_name": "mona.jpg", "saved_name": "second.jpg",
             "artwork_analysis": {"artwork_name": "Mona Lisa", "artist_name": "Leonardo da Vinci",
                                  "confidence": 0.9}}
        ]
    }"#;

    fn artwork_upload(name: &str) -> String {
        format!(
            r#"{{"message": "Upload completed", "uploadedCount": 1, "uploadedFiles": [
                {{"original_name": "x.jpg", "saved_name": "x.jpg",
                  "artwork_analysis": {{"artwork_name": "{}", "confidence": 0.4}}}}]}}"#,
            name
        )
    }

    #[test]
    fn test_picker_then_drop_then_camera() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("p1.jpg"), file("p2.jpg")]);
        state.add_files(vec![file("d1.jpg")]);
        state.add_captured(CandidateFile::from_captured_frame(vec![1, 2]));

        let names: Vec<_> = state.selection().files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["p1.jpg", "p2.jpg", "d1.jpg", "camera-photo.jpg"]);
        assert_eq!(state.status(), Some(&StatusMessage::photo_added()));
    }

    #[test]
    fn test_clear_disables_controls_from_any_state() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.clear();
        assert!(!state.can_submit() && !state.can_clear());

        state.add_files(vec![file("a.jpg"), file("b.jpg")]);
        assert!(state.can_submit() && state.can_clear());
        state.clear();
        assert!(state.selection().is_empty());
        assert!(!state.can_submit() && !state.can_clear());
    }

    #[test]
    fn test_remove_invalid_index() {
        let mut state = ViewState::new(RecognitionPage::Food);
        state.add_files(vec![file("a.jpg")]);
        assert!(state.remove_file(3).is_err());
        assert!(state.remove_file(0).is_ok());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_submit_empty_makes_no_request() {
        let api = client(FakeTransport::default());
        let mut state = ViewState::new(RecognitionPage::Artwork);

        assert!(!block_on(submit(&mut state, &api)));
        assert_eq!(api.transport().request_count(), 0);
        assert!(state.status().is_none());
    }

    #[test]
    fn test_no_double_submit_while_in_flight() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("a.jpg")]);

        assert!(state.begin_upload().is_some());
        assert!(!state.can_submit());
        assert!(state.begin_upload().is_none());
        assert!(state.progress().is_visible());
    }

    #[test]
    fn test_first_analysis_bearing_result_is_displayed() {
        let api = client(
            FakeTransport::default()
                .reply(200, TWO_FILES_SECOND_ANALYZED)
                .reply(200, r#"{"success": true, "themes": "Portrait"}"#)
                .reply(200, r#"{"success": true, "suggestions": []}"#),
        );
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("notes.jpg"), file("mona.jpg")]);

        assert!(block_on(submit(&mut state, &api)));

        let result = state.result().expect("result displayed");
        assert_eq!(result.subject_name, "Mona Lisa");
        assert_eq!(result.image_path.as_deref(), Some("/uploads/second.jpg"));
        assert_eq!(result.original_name, "mona.jpg");
        assert!(state.selection().is_empty());
        assert_eq!(
            state.status().map(|s| s.text.as_str()),
            Some("Successfully uploaded 2 file(s)!")
        );
        assert_eq!(
            *api.transport().uploaded.borrow(),
            vec![vec!["notes.jpg".to_string(), "mona.jpg".to_string()]]
        );
        assert_eq!(
            *api.transport().requests.borrow(),
            vec!["/upload", "/get_themes/Mona%20Lisa", "/get_suggestions/Mona%20Lisa"]
        );
        assert_eq!(
            result.suggestions,
            Region::Empty("No similar artworks available".to_string())
        );
    }

    #[test]
    fn test_failed_upload_keeps_candidates() {
        let api = client(FakeTransport::default().reply(500, r#"{"error": "Upload failed: disk full"}"#));
        let mut state = ViewState::new(RecognitionPage::Food);
        state.add_files(vec![file("a.jpg"), file("b.jpg")]);

        block_on(submit(&mut state, &api));

        assert_eq!(state.selection().len(), 2);
        assert!(state.can_submit());
        let status = state.status().unwrap();
        assert_eq!(status.text, "Upload failed: Upload failed: disk full");
        assert_eq!(status.auto_hide, None);
        assert!(!state.progress().is_visible());
    }

    #[test]
    fn test_transport_failure_keeps_candidates() {
        let api = client(FakeTransport::default().fail("connection refused"));
        let mut state = ViewState::new(RecognitionPage::Architecture);
        state.add_files(vec![file("a.jpg")]);

        block_on(submit(&mut state, &api));

        assert_eq!(state.selection().len(), 1);
        assert!(state.status().unwrap().text.contains("connection refused"));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_themes_failure_shows_returned_text() {
        let api = client(
            FakeTransport::default()
                .reply(200, &artwork_upload("The Night Watch"))
                .reply(500, r#"{"success": false, "themes": "Error analyzing themes: timeout"}"#)
                .reply(200, r#"{"success": true, "suggestions": [{"Name": "The Anatomy Lesson"}]}"#),
        );
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("x.jpg")]);
        block_on(submit(&mut state, &api));

        let result = state.result().unwrap();
        assert_eq!(
            result.description,
            Region::Failed("Error analyzing themes: timeout".to_string())
        );
        match &result.suggestions {
            Region::Ready(cards) => assert_eq!(cards[0].title, "The Anatomy Lesson"),
            other => panic!("unexpected suggestions: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_subject_skips_lookups() {
        let api = client(FakeTransport::default().reply(200, &artwork_upload("Artwork could not be found")));
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("x.jpg")]);
        block_on(submit(&mut state, &api));

        assert_eq!(api.transport().request_count(), 1);
        let result = state.result().unwrap();
        assert!(result.not_found);
        assert!(matches!(result.description, Region::Empty(_)));
        assert!(matches!(result.suggestions, Region::Empty(_)));
        assert!(state.refresh_suggestions().is_none());
    }

    #[test]
    fn test_unidentified_architecture_skips_lookups() {
        let upload = r#"{"uploadedCount": 1, "uploadedFiles": [{"original_name": "b.jpg",
            "saved_name": "b.jpg", "architecture_analysis": {
            "artwork_name": "Unable to identify artwork", "confidence": 0.0}}]}"#;
        let api = client(FakeTransport::default().reply(200, upload));
        let mut state = ViewState::new(RecognitionPage::Architecture);
        state.add_files(vec![file("b.jpg")]);
        block_on(submit(&mut state, &api));

        assert_eq!(*api.transport().requests.borrow(), vec!["/upload_architecture"]);
        let result = state.result().unwrap();
        assert!(result.not_found);
        assert_eq!(result.subject_name, "Unable to identify artwork");
        assert!(matches!(result.suggestions, Region::Empty(_)));
    }

    #[test]
    fn test_lookups_start_in_loading_state() {
        let mut state = ViewState::new(RecognitionPage::Architecture);
        state.add_files(vec![file("x.jpg")]);
        state.begin_upload();
        let response: UploadResponse = serde_json::from_str(
            r#"{"uploadedCount": 1, "uploadedFiles": [{"original_name": "x.jpg", "saved_name": "y.jpg",
                "architecture_analysis": {"artwork_name": "Fallingwater"}}]}"#,
        )
        .unwrap();

        let lookups = state.finish_upload(Ok(response));
        assert_eq!(lookups.len(), 2);
        let result = state.result().unwrap();
        assert!(result.description.is_loading());
        assert_eq!(
            result.suggestions,
            Region::Loading("Loading similar architecture...".to_string())
        );
        // 取得中は重ねて発行しない
        assert!(state.refresh_suggestions().is_none());
    }

    #[test]
    fn test_new_upload_discards_stale_lookup() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        let upload = |name: &str| -> UploadResponse {
            serde_json::from_str(&artwork_upload(name)).unwrap()
        };

        state.add_files(vec![file("a.jpg")]);
        state.begin_upload();
        let first = state.finish_upload(Ok(upload("Mona Lisa")));

        state.add_files(vec![file("b.jpg")]);
        state.begin_upload();
        let second = state.finish_upload(Ok(upload("The Scream")));

        let stale = LookupReply::Description(DescriptionResponse {
            success: true,
            text: Some("Old text".to_string()),
        });
        assert!(!state.finish_lookup(&first[0], Ok(stale)));

        let fresh = LookupReply::Description(DescriptionResponse {
            success: true,
            text: Some("Anxiety\nhttps://example.com/scream".to_string()),
        });
        assert!(state.finish_lookup(&second[0], Ok(fresh)));

        let result = state.result().unwrap();
        assert_eq!(result.subject_name, "The Scream");
        assert_eq!(
            result.description,
            Region::Ready(vec![
                RichText::Text("Anxiety".to_string()),
                RichText::Break,
                RichText::Link("https://example.com/scream".to_string()),
            ])
        );
    }

    #[test]
    fn test_clear_invalidates_displayed_result() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_files(vec![file("a.jpg")]);
        state.begin_upload();
        let response = serde_json::from_str(&artwork_upload("Guernica")).unwrap();
        let lookups = state.finish_upload(Ok(response));

        state.clear();
        assert!(state.result().is_none());
        assert!(state.status().is_none());
        let reply = LookupReply::Description(DescriptionResponse::default());
        assert!(!state.finish_lookup(&lookups[0], Ok(reply)));
    }

    #[test]
    fn test_food_flow_builds_summary_and_uses_location() {
        let upload = r#"{"uploadedCount": 1, "uploadedFiles": [{"original_name": "p.jpg",
            "saved_name": "p.jpg", "food_analysis": {"food_name": "Pizza", "food_type": "General",
            "confidence": 0.875, "food_labels": [
                {"description": "Pizza", "confidence": 0.95},
                {"description": "Cheese", "confidence": 0.9},
                {"description": "Tomato", "confidence": 0.8},
                {"description": "Basil", "confidence": 0.7},
                {"description": "Crust", "confidence": 0.6},
                {"description": "Oven", "confidence": 0.5}]}}]}"#;
        let api = client(
            FakeTransport::default()
                .reply(200, upload)
                .reply(200, r#"{"success": false, "suggestions": [], "error": "agent unavailable"}"#),
        );
        let mut state = ViewState::new(RecognitionPage::Food);
        state.set_location("  Chicago ");
        state.add_files(vec![file("p.jpg")]);
        block_on(submit(&mut state, &api));

        assert_eq!(
            *api.transport().requests.borrow(),
            vec!["/upload_food", "/get_food_suggestions/Pizza?location=Chicago"]
        );
        let result = state.result().unwrap();
        let Region::Ready(segments) = &result.description else {
            panic!("food description should be composed locally");
        };
        let text = crate::format::plain_text(segments);
        assert!(text.starts_with("Type: General\nConfidence: 87.5%\n"));
        assert!(text.contains("• Crust (60%)"));
        assert!(!text.contains("Oven"));
        assert_eq!(result.suggestions, Region::Failed("agent unavailable".to_string()));
    }

    #[test]
    fn test_refresh_suggestions_after_location_change() {
        let api = client(
            FakeTransport::default()
                .reply(200, r#"{"uploadedCount": 1, "uploadedFiles": [{"original_name": "r.jpg",
                    "saved_name": "r.jpg", "food_analysis": {"food_name": "Ramen"}}]}"#)
                .reply(200, r#"{"success": true, "suggestions": []}"#)
                .reply(200, r#"{"success": true, "suggestions": [{"Restaurant Name": "Ippudo"}]}"#),
        );
        let mut state = ViewState::new(RecognitionPage::Food);
        state.add_files(vec![file("r.jpg")]);
        block_on(submit(&mut state, &api));
        assert!(matches!(state.result().unwrap().suggestions, Region::Empty(_)));

        state.set_location("");
        assert_eq!(state.location(), "New York");
        assert!(block_on(refresh_suggestions(&mut state, &api)));
        assert!(matches!(state.result().unwrap().suggestions, Region::Ready(_)));
    }

    #[test]
    fn test_dismiss_status_only_matching() {
        let mut state = ViewState::new(RecognitionPage::Artwork);
        state.add_captured(CandidateFile::from_captured_frame(vec![1]));
        let armed = StatusMessage::success("old");
        state.dismiss_status(&armed);
        assert!(state.status().is_some());

        state.dismiss_status(&StatusMessage::photo_added());
        assert!(state.status().is_none());
    }

    #[test]
    fn test_is_not_found() {
        assert!(is_not_found("Artwork could not be found"));
        assert!(is_not_found("Unable to identify artwork"));
        assert!(is_not_found(" unable to identify food item "));
        assert!(!is_not_found("Mona Lisa"));
    }
}
