use crate::errors::TransformError;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// 画像を PNG でエンコードする（元フォーマットに関わらずロスレス）
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());

    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| TransformError::ProcessingFailed(format!("PNG encode failed: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let img = DynamicImage::new_rgb8(10, 10);
        let result = encode_png(&img);

        assert!(result.is_ok());
        let data = result.unwrap();
        assert!(!data.is_empty());
        // PNG マジックナンバー確認
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_keeps_alpha() {
        let img = DynamicImage::new_rgba8(4, 4);
        let data = encode_png(&img).unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert!(decoded.color().has_alpha());
    }
}
