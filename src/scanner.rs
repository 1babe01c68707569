//! アップロード候補の収集
//!
//! 引数のファイルはそのまま、フォルダは画像だけを集める。

use crate::error::{Result, VisionGuideError};
use std::path::{Path, PathBuf};
use visionguide_common::CandidateFile;
use walkdir::WalkDir;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// フォルダ内の画像パスをファイル名順に返す
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(VisionGuideError::FileNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image_path(e.path()))
        .map(|e| e.into_path())
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// 引数の順番を保ったまま候補ファイルを読み込む
pub fn collect_candidates(paths: &[PathBuf], recursive: bool) -> Result<Vec<CandidateFile>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for image in scan_folder(path, recursive)? {
                files.push(read_candidate(&image)?);
            }
        } else if path.is_file() {
            files.push(read_candidate(path)?);
        } else {
            return Err(VisionGuideError::FileNotFound(path.display().to_string()));
        }
    }

    if files.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(VisionGuideError::NoImagesFound(joined));
    }

    tracing::debug!(count = files.len(), "candidates collected");
    Ok(files)
}

fn read_candidate(path: &Path) -> Result<CandidateFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;
    // MIMEは拡張子から推定
    Ok(CandidateFile::new(name, "", bytes))
}
