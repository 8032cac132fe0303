use bytes::Bytes;

use crate::audio::AudioFormat;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// メディアの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    /// マジックバイトから種類を推測する
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(PNG_MAGIC) || data.starts_with(JPEG_MAGIC) {
            return Some(Self::Image);
        }
        AudioFormat::sniff(data).map(|_| Self::Audio)
    }
}

/// アップロードされた入力バイト列
///
/// 変換呼び出しに値渡しで所有権ごと渡され、呼び出し終了とともに破棄される
#[derive(Debug, Clone)]
pub struct InputBlob {
    bytes: Bytes,
    kind: MediaKind,
    container: Option<AudioFormat>,
}

impl InputBlob {
    /// 画像として宣言された入力を作成
    pub fn image(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            kind: MediaKind::Image,
            container: None,
        }
    }

    /// 音声として宣言された入力を作成
    ///
    /// コンテナはマジックバイトから推測し、デコード時のヒントとして使う
    pub fn audio(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let container = AudioFormat::sniff(&bytes);
        Self {
            bytes,
            kind: MediaKind::Audio,
            container,
        }
    }

    /// コンテナを明示的に指定する
    pub fn with_container(mut self, container: AudioFormat) -> Self {
        self.container = Some(container);
        self
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn container(&self) -> Option<AudioFormat> {
        self.container
    }
}

/// 変換結果
///
/// 返却時点で所有権はプレゼンテーション層へ移る
#[derive(Debug, Clone)]
pub struct OutputBlob {
    pub bytes: Bytes,
    pub content_type: &'static str,
    pub file_name: String,
}

impl OutputBlob {
    pub fn new(bytes: impl Into<Bytes>, content_type: &'static str, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
            file_name: file_name.into(),
        }
    }
}
