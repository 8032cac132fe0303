use crate::errors::TransformError;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// 画像バイト列をデコードする
///
/// フォーマットはファイル名ではなく内容から推測する。JPEG / PNG 以外は拒否
pub fn decode_image(input: &[u8]) -> Result<(DynamicImage, ImageFormat), TransformError> {
    let reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(format!("failed to guess image format: {e}")))?;

    let format = match reader.format() {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        Some(other) => {
            return Err(TransformError::Decode(format!(
                "unsupported image format: {other:?}"
            )));
        }
        None => return Err(TransformError::Decode("unrecognized image data".to_string())),
    };

    let img = reader
        .decode()
        .map_err(|e| TransformError::Decode(format!("image decode failed: {e}")))?;

    Ok((img, format))
}
