//! 認識結果を端末向けのテキストにする

use std::fmt::Write;
use visionguide_common::format::{format_percent, plain_text};
use visionguide_common::{
    ApiEndpoints, LookupReply, RecognitionPage, Region, ResultDetails, ResultView, StatusKind,
    SuggestionCard, ViewState,
};

/// 送信後の画面全体（ステータスと結果）
pub fn render_state(state: &ViewState, endpoints: &ApiEndpoints) -> String {
    let mut out = String::new();
    if let Some(status) = state.status() {
        let mark = match status.kind {
            StatusKind::Success => "✔",
            StatusKind::Error => "✖",
            StatusKind::Info => "ℹ",
        };
        let _ = writeln!(out, "{} {}", mark, status.text);
    }
    if let Some(result) = state.result() {
        out.push('\n');
        out.push_str(&render_result(result, endpoints));
    }
    out
}

pub fn render_result(result: &ResultView, endpoints: &ApiEndpoints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📷 {}", result.original_name);
    let _ = writeln!(out, "{}", result.subject_name);
    if let Some(path) = &result.image_path {
        let _ = writeln!(out, "  画像: {}", endpoints.resolve(path));
    }
    render_details(&mut out, &result.details);

    out.push('\n');
    let _ = writeln!(out, "[{}]", description_title(result.page));
    out.push_str(&render_region(&result.description, |segments| {
        plain_text(segments)
    }));

    out.push('\n');
    let _ = writeln!(out, "[{}]", suggestions_title(result.page));
    out.push_str(&render_region(&result.suggestions, |cards| render_cards(cards)));
    out
}

fn render_details(out: &mut String, details: &ResultDetails) {
    match details {
        ResultDetails::Artwork {
            artist,
            confidence,
            labels,
            web_entities,
            error,
        } => {
            let _ = writeln!(out, "  作者: {}", artist);
            let _ = writeln!(out, "  信頼度: {}", format_percent(*confidence));
            for label in labels {
                let _ = writeln!(out, "  - {} ({})", label.description, format_percent(label.confidence));
            }
            if !web_entities.is_empty() {
                let names: Vec<&str> = web_entities.iter().map(|e| e.description.as_str()).collect();
                let _ = writeln!(out, "  関連: {}", names.join(", "));
            }
            render_error(out, error);
        }
        ResultDetails::Food { confidence, error, .. }
        | ResultDetails::Architecture { confidence, error } => {
            let _ = writeln!(out, "  信頼度: {}", format_percent(*confidence));
            render_error(out, error);
        }
    }
}

fn render_error(out: &mut String, error: &Option<String>) {
    if let Some(error) = error {
        let _ = writeln!(out, "  ⚠ {}", error);
    }
}

fn render_region<T>(region: &Region<T>, ready: impl FnOnce(&T) -> String) -> String {
    let mut text = match region {
        Region::Idle => String::new(),
        Region::Loading(text) | Region::Empty(text) => text.clone(),
        Region::Failed(text) => format!("✖ {}", text),
        Region::Ready(value) => ready(value),
    };
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

pub fn render_cards(cards: &[SuggestionCard]) -> String {
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, card.title);
        for line in [&card.subtitle, &card.detail, &card.location] {
            if !line.is_empty() {
                let _ = writeln!(out, "   {}", line);
            }
        }
        for link in &card.links {
            let _ = writeln!(out, "   {} {}", link.label, link.url);
        }
    }
    out
}

/// `describe` / `suggest` の単発ルックアップ
pub fn render_lookup(page: RecognitionPage, reply: &LookupReply) -> String {
    match reply {
        LookupReply::Description(description) => {
            let text = description.text.as_deref().unwrap_or_default();
            match (description.success, text.trim().is_empty()) {
                (true, false) => plain_text(&visionguide_common::rich_text(text)) + "\n",
                (true, true) => "No description available.\n".to_string(),
                (false, _) => format!("✖ {}\n", if text.is_empty() { "Unable to load description." } else { text }),
            }
        }
        LookupReply::Suggestions(suggestions) => {
            if !suggestions.success {
                let error = suggestions.error.as_deref().unwrap_or("Error loading suggestions");
                format!("✖ {}\n", error)
            } else if suggestions.cards.is_empty() {
                format!("{}\n", page.suggestions_placeholder())
            } else {
                render_cards(&suggestions.cards)
            }
        }
    }
}

fn description_title(page: RecognitionPage) -> &'static str {
    match page {
        RecognitionPage::Artwork => "テーマ・解説",
        RecognitionPage::Food => "料理の解析",
        RecognitionPage::Architecture => "建築の詳細",
    }
}

fn suggestions_title(page: RecognitionPage) -> &'static str {
    match page {
        RecognitionPage::Artwork => "似ている作品",
        RecognitionPage::Food => "おすすめのレストラン",
        RecognitionPage::Architecture => "似ている建築",
    }
}

