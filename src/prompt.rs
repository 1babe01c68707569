//! 対話式のページ選択

use crate::error::Result;
use dialoguer::Select;
use std::io::IsTerminal;
use visionguide_common::RecognitionPage;

/// 指定がなければ、端末なら選ばせる。パイプ実行時は既定ページ
pub fn resolve_page(
    explicit: Option<RecognitionPage>,
    configured: Option<RecognitionPage>,
) -> Result<RecognitionPage> {
    if let Some(page) = explicit.or(configured) {
        return Ok(page);
    }
    if !std::io::stdin().is_terminal() {
        return Ok(RecognitionPage::default());
    }
    choose_page()
}

pub fn choose_page() -> Result<RecognitionPage> {
    let titles: Vec<&str> = RecognitionPage::ALL.iter().map(|p| p.title()).collect();
    let selection = Select::new()
        .with_prompt("認識の種類を選んでください")
        .items(&titles)
        .default(0)
        .interact()?;
    Ok(RecognitionPage::ALL[selection])
}
