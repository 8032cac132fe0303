use crate::blob::MediaKind;
use crate::errors::MediaError;

/// 画像アップロードで許可する拡張子
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg"];

/// 音声アップロードで許可する拡張子
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// アップロードされたファイル名を検証する
///
/// 拡張子による粗いフィルタのみ。中身の検証はデコード時に行う
pub fn validate_upload_name(name: &str, kind: MediaKind) -> Result<(), MediaError> {
    // 空文字チェック
    if name.trim().is_empty() {
        return Err(MediaError::Validation("file name is empty".to_string()));
    }

    // 長さチェック（255文字まで）
    if name.len() > 255 {
        return Err(MediaError::Validation(
            "file name is too long (max 255)".to_string(),
        ));
    }

    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(MediaError::Validation(
            "file name must not contain path separators".to_string(),
        ));
    }

    let allowed = match kind {
        MediaKind::Image => IMAGE_EXTENSIONS,
        MediaKind::Audio => AUDIO_EXTENSIONS,
    };

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !allowed.contains(&extension.as_str()) {
        return Err(MediaError::Validation(format!(
            "unsupported file extension for {name}, expected one of: {}",
            allowed.join(", ")
        )));
    }

    Ok(())
}
