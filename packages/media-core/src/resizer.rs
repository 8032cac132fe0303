use crate::blob::{MediaKind, OutputBlob};
use crate::constants::{MAX_PIXELS, RESIZED_IMAGE_FILE_NAME};
use crate::errors::TransformError;
use crate::transform::{decode_image, encode_png, resize_image, ImageTransformRequest};

/// 画像を指定サイズにリサイズし PNG で返す
///
/// デコード → ソース寸法の検証 → リサイズ → PNG エンコードの順に処理する。
/// 入力の形式（JPEG / PNG）に関わらず出力は常に PNG
pub fn resize(request: ImageTransformRequest) -> Result<OutputBlob, TransformError> {
    let ImageTransformRequest {
        source,
        width,
        height,
    } = request;

    if source.kind() != MediaKind::Image {
        return Err(TransformError::Decode(
            "expected an image upload, got audio".to_string(),
        ));
    }

    let (img, source_format) = decode_image(source.bytes())?;
    validate_source_dimensions(img.width(), img.height())?;

    tracing::debug!(
        source_format = ?source_format,
        src_w = img.width(),
        src_h = img.height(),
        dst_w = width,
        dst_h = height,
        "resizing image"
    );

    let resized = resize_image(&img, width, height)?;
    let output = encode_png(&resized)?;

    Ok(OutputBlob::new(output, "image/png", RESIZED_IMAGE_FILE_NAME))
}

/// ソース画像の総ピクセル数を検証し、メモリ枯渇を防ぐ
fn validate_source_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    let total_pixels = width as u64 * height as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}
