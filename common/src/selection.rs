//! ファイル選択（候補リスト）

use crate::candidate::CandidateFile;
use crate::error::{Error, Result};
use crate::format::{file_icon, format_file_size};

/// ファイル一覧の1行分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListEntry {
    pub index: usize,
    pub name: String,
    pub size_label: String,
    pub icon: &'static str,
}

/// 送信待ちの候補リスト
///
/// ピッカー → ドロップ → カメラのように段階的に追加でき、追加は常に末尾。
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    files: Vec<CandidateFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のリストに追加する（置き換えない）
    pub fn add(&mut self, files: impl IntoIterator<Item = CandidateFile>) {
        let before = self.files.len();
        self.files.extend(files);
        tracing::debug!(added = self.files.len() - before, total = self.files.len(), "candidates added");
    }

    pub fn remove(&mut self, index: usize) -> Result<CandidateFile> {
        if index >= self.files.len() {
            return Err(Error::InvalidIndex {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn has_candidates(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// 一覧表示用の行
    pub fn entries(&self) -> Vec<FileListEntry> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| FileListEntry {
                index,
                name: file.name.clone(),
                size_label: format_file_size(file.size),
                icon: file_icon(&file.mime_type),
            })
            .collect()
    }
}
