use thiserror::Error;

/// メディア処理の統合エラー型
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

/// 変換エラー
///
/// どのエラーもリクエスト単位で終端する（リトライ・フォールバックなし）
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("invalid dimension ({width}x{height}): width and height must be at least 1")]
    InvalidDimension { width: i64, height: i64 },

    #[error("invalid bitrate: {0}")]
    InvalidBitrate(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
