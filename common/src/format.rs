//! 表示用の整形ヘルパー
//!
//! - ファイルサイズ・MIMEアイコン・パーセント表記
//! - サーバーの説明文をリッチテキスト片に変換（改行と裸のURL）

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://[^\s]+").expect("valid url regex");
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// バイト数を人が読める形にする（1024進、小数2桁で末尾の0は落とす）
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// MIMEタイプから一覧表示用のアイコンを選ぶ
pub fn file_icon(mime_type: &str) -> &'static str {
    if mime_type.starts_with("image/") {
        "🖼️"
    } else if mime_type.starts_with("video/") {
        "🎥"
    } else if mime_type.starts_with("audio/") {
        "🎵"
    } else if mime_type.contains("pdf") {
        "📄"
    } else if mime_type.contains("word") {
        "📝"
    } else if mime_type.contains("excel") || mime_type.contains("spreadsheet") {
        "📊"
    } else if mime_type.contains("zip") || mime_type.contains("rar") {
        "📦"
    } else {
        "📁"
    }
}

/// 0.0〜1.0 の信頼度を整数パーセントに
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// 説明文の表示片
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichText {
    Text(String),
    /// 新しいタブで開くリンク
    Link(String),
    Break,
}

/// サーバーの説明文を表示片に変換する
///
/// 改行は `Break` に、`http(s)://` で始まる空白までの部分は `Link` になる。
/// 構造を持つ解析ではなく、見た目だけの書き換え。
pub fn rich_text(text: &str) -> Vec<RichText> {
    let mut segments = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            segments.push(RichText::Break);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut cursor = 0;
        for m in URL_RE.find_iter(line) {
            if m.start() > cursor {
                segments.push(RichText::Text(line[cursor..m.start()].to_string()));
            }
            segments.push(RichText::Link(m.as_str().to_string()));
            cursor = m.end();
        }
        if cursor < line.len() {
            segments.push(RichText::Text(line[cursor..].to_string()));
        }
    }

    segments
}

/// 表示片をプレーンテキストに戻す（端末出力用）
pub fn plain_text(segments: &[RichText]) -> String {
    segments
        .iter()
        .map(|s| match s {
            RichText::Text(t) | RichText::Link(t) => t.as_str(),
            RichText::Break => "\n",
        })
        .collect()
}
