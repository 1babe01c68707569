//! カメラ撮影セッション
//!
//! デバイスの取得そのもの（getUserMedia）はフロントエンド側で行い、
//! ここでは取得済みストリームの所有と状態遷移だけを扱う。
//! ストリームを保持するのは常にこのセッション1つで、閉じる・採用・Dropの
//! どの経路でも `stop_all_tracks` が呼ばれる。

use crate::candidate::CandidateFile;
use crate::error::{Error, Result};

/// 撮影条件
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    /// 背面カメラ優先
    pub facing_mode: &'static str,
    pub jpeg_quality: f64,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            facing_mode: "environment",
            jpeg_quality: 0.8,
        }
    }
}

/// 取得済みのライブ映像ストリーム
pub trait MediaStream {
    /// すべてのトラックを停止してデバイスを解放する
    fn stop_all_tracks(&mut self);
}

/// モーダルの表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraView {
    #[default]
    Hidden,
    /// デバイス取得待ち
    Opening,
    Live,
    /// 撮影済みフレームの確認中
    Reviewing,
}

enum Phase<S> {
    Closed,
    /// 要求番号つきの取得待ち
    Opening(u64),
    Live(S),
    Reviewing { stream: S, frame: Vec<u8> },
}

pub struct CameraSession<S: MediaStream> {
    phase: Phase<S>,
    constraints: CaptureConstraints,
    requests: u64,
}

impl<S: MediaStream> Default for CameraSession<S> {
    fn default() -> Self {
        Self::new(CaptureConstraints::default())
    }
}

impl<S: MediaStream> CameraSession<S> {
    pub fn new(constraints: CaptureConstraints) -> Self {
        Self {
            phase: Phase::Closed,
            constraints,
            requests: 0,
        }
    }

    pub fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    pub fn view(&self) -> CameraView {
        match self.phase {
            Phase::Closed => CameraView::Hidden,
            Phase::Opening(_) => CameraView::Opening,
            Phase::Live(_) => CameraView::Live,
            Phase::Reviewing { .. } => CameraView::Reviewing,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Live(_) | Phase::Reviewing { .. })
    }

    pub fn stream(&self) -> Option<&S> {
        match &self.phase {
            Phase::Live(stream) | Phase::Reviewing { stream, .. } => Some(stream),
            _ => None,
        }
    }

    pub fn captured_frame(&self) -> Option<&[u8]> {
        match &self.phase {
            Phase::Reviewing { frame, .. } => Some(frame),
            _ => None,
        }
    }

    /// モーダルを開いてデバイス取得待ちにする（以前のストリームは解放）
    ///
    /// 戻り値の要求番号を `open` に渡す。
    pub fn begin_open(&mut self) -> u64 {
        self.release();
        self.requests += 1;
        self.phase = Phase::Opening(self.requests);
        self.requests
    }

    /// デバイス取得の結果を受け取る
    ///
    /// 成功ならライブプレビューに入り撮影状態をリセットする。
    /// 失敗なら途中状態をすべて片付けて `DeviceAccess` を返す。
    /// 待っている要求と番号が違う結果（閉じた後や開き直した後に届いたもの）は
    /// 現在の状態に触れず、届いたストリームだけを解放する。
    pub fn open(&mut self, request: u64, acquired: std::result::Result<S, String>) -> Result<()> {
        if !matches!(self.phase, Phase::Opening(waiting) if waiting == request) {
            tracing::debug!(request, "stale camera request ignored");
            if let Ok(mut stream) = acquired {
                stream.stop_all_tracks();
            }
            return Ok(());
        }

        self.phase = Phase::Closed;
        match acquired {
            Ok(stream) => {
                tracing::debug!("camera stream acquired");
                self.phase = Phase::Live(stream);
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(%reason, "camera access failed");
                self.phase = Phase::Closed;
                Err(Error::DeviceAccess(reason))
            }
        }
    }

    /// 現在のフレームを確定させる。ライブ中でなければ何もしない
    ///
    /// `grab` は現在のストリームからJPEGを取り出す処理。
    pub fn capture<F>(&mut self, grab: F) -> Result<bool>
    where
        F: FnOnce(&S, &CaptureConstraints) -> Result<Vec<u8>>,
    {
        let stream = match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Live(stream) => stream,
            other => {
                self.phase = other;
                return Ok(false);
            }
        };

        match grab(&stream, &self.constraints) {
            Ok(frame) => {
                self.phase = Phase::Reviewing { stream, frame };
                Ok(true)
            }
            Err(e) => {
                self.phase = Phase::Live(stream);
                Err(e)
            }
        }
    }

    /// 撮影したフレームを捨ててライブに戻る
    pub fn retake(&mut self) {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Reviewing { stream, .. } => Phase::Live(stream),
            other => other,
        };
    }

    /// 撮影したフレームを候補ファイルとして渡し、デバイスを解放する
    pub fn accept(&mut self) -> Option<CandidateFile> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Reviewing { mut stream, frame } => {
                stream.stop_all_tracks();
                Some(CandidateFile::from_captured_frame(frame))
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// 閉じる・キャンセル。撮影していなくても必ずデバイスを解放する
    pub fn close(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Live(mut stream) | Phase::Reviewing { mut stream, .. } => {
                tracing::debug!("camera stream released");
                stream.stop_all_tracks();
            }
            Phase::Closed | Phase::Opening(_) => {}
        }
    }
}

impl<S: MediaStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
