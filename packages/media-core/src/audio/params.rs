use std::fmt;
use std::str::FromStr;

use crate::blob::InputBlob;
use crate::errors::TransformError;

/// 圧縮時に選択できるビットレート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitrate {
    Kbps32,
    Kbps64,
    Kbps128,
    Kbps192,
    Kbps256,
    Kbps320,
}

impl Bitrate {
    pub const ALL: [Bitrate; 6] = [
        Self::Kbps32,
        Self::Kbps64,
        Self::Kbps128,
        Self::Kbps192,
        Self::Kbps256,
        Self::Kbps320,
    ];

    pub fn kbps(&self) -> u32 {
        match self {
            Self::Kbps32 => 32,
            Self::Kbps64 => 64,
            Self::Kbps128 => 128,
            Self::Kbps192 => 192,
            Self::Kbps256 => 256,
            Self::Kbps320 => 320,
        }
    }

    /// UI・ファイル名で使う表記（例: "128k"）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kbps32 => "32k",
            Self::Kbps64 => "64k",
            Self::Kbps128 => "128k",
            Self::Kbps192 => "192k",
            Self::Kbps256 => "256k",
            Self::Kbps320 => "320k",
        }
    }
}

impl FromStr for Bitrate {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|bitrate| bitrate.as_str() == normalized)
            .ok_or_else(|| {
                TransformError::InvalidBitrate(format!(
                    "{s} (expected one of 32k, 64k, 128k, 192k, 256k, 320k)"
                ))
            })
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 音声コンテナフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 2] = [Self::Mp3, Self::Wav];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mp3",
            Self::Wav => "audio/wav",
        }
    }

    /// マジックバイトからコンテナを推測する
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
            return Some(Self::Wav);
        }
        if data.starts_with(b"ID3") {
            return Some(Self::Mp3);
        }
        // MPEG オーディオのフレーム同期ワード（11bit）
        if data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0 {
            return Some(Self::Mp3);
        }
        None
    }
}

impl FromStr for AudioFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            _ => Err(TransformError::UnsupportedFormat(format!(
                "{s} (expected mp3 or wav)"
            ))),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 音声圧縮のリクエスト
#[derive(Debug, Clone)]
pub struct AudioCompressRequest {
    pub source: InputBlob,
    pub bitrate: Bitrate,
}

/// 音声フォーマット変換のリクエスト
#[derive(Debug, Clone)]
pub struct AudioConvertRequest {
    pub source: InputBlob,
    pub format: AudioFormat,
}
