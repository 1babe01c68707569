//! アップロード進捗（見た目だけの推定値）
//!
//! 実際の送信バイト数ではなく、段階ラベルと一定間隔の推定ティックで進める。

use crate::page::RecognitionPage;

/// 送信中に推定ティックで到達できる上限（完了前に100%にしない）
const TICK_CEILING: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStage {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Complete,
}

/// この値を超えたら「解析中」表示に切り替える
const ANALYZING_AT: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress {
    stage: ProgressStage,
    fraction: f32,
    label: String,
    page: RecognitionPage,
}

impl Default for UploadProgress {
    fn default() -> Self {
        Self {
            stage: ProgressStage::Idle,
            fraction: 0.0,
            label: String::new(),
            page: RecognitionPage::default(),
        }
    }
}

impl UploadProgress {
    pub fn stage(&self) -> ProgressStage {
        self.stage
    }

    /// 0.0〜1.0
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.stage != ProgressStage::Idle
    }

    pub fn start(&mut self, page: RecognitionPage) {
        self.page = page;
        self.stage = ProgressStage::Uploading;
        self.fraction = 0.3;
        self.label = "Uploading image...".to_string();
    }

    /// 送信完了、サーバー側の解析待ち
    pub fn analyzing(&mut self) {
        self.stage = ProgressStage::Analyzing;
        self.fraction = self.fraction.max(ANALYZING_AT);
        self.label = format!("Analyzing {}...", self.page.subject_noun());
    }

    /// 推定ティック。完了前は上限で止まる
    pub fn tick(&mut self, delta: f32) {
        if !matches!(self.stage, ProgressStage::Uploading | ProgressStage::Analyzing) {
            return;
        }
        self.fraction = (self.fraction + delta.max(0.0)).min(TICK_CEILING);
        if self.stage == ProgressStage::Uploading && self.fraction >= ANALYZING_AT {
            self.analyzing();
        }
    }

    pub fn complete(&mut self) {
        self.stage = ProgressStage::Complete;
        self.fraction = 1.0;
        self.label = "Complete!".to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.fraction * 100.0)
    }
}
