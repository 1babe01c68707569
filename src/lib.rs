//! VisionGuide CLI
//!
//! ブラウザ版と同じ状態遷移（`visionguide-common`）を端末から使う

pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod transport;
