//! VisionGuide Common Library
//!
//! ブラウザ(WASM)とCLIで共有される型・状態遷移・API契約

pub mod api;
pub mod camera;
pub mod candidate;
pub mod error;
pub mod format;
pub mod page;
pub mod progress;
pub mod selection;
pub mod status;
pub mod suggestion;
pub mod types;
pub mod view;

pub use api::{ApiEndpoints, Client, HttpReply, LookupKind, LookupReply, LookupRequest, Transport};
pub use camera::{CameraSession, CameraView, CaptureConstraints, MediaStream};
pub use candidate::CandidateFile;
pub use error::{Error, Result};
pub use format::{format_file_size, rich_text, RichText};
pub use page::RecognitionPage;
pub use progress::{ProgressStage, UploadProgress};
pub use selection::{FileListEntry, FileSelection};
pub use status::{StatusKind, StatusMessage};
pub use suggestion::{CardLink, SuggestionCard};
pub use types::{Analysis, UploadResponse, UploadedFile};
pub use view::{Region, ResultDetails, ResultView, UploadTicket, ViewState};
