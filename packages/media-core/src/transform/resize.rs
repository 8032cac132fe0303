use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeOptions, Resizer};
use image::DynamicImage;

/// 画像を指定サイズちょうどにリサイズする
///
/// アスペクト比は維持しない（指定された幅・高さをそのまま使う）。
/// fast_image_resize の Lanczos3 フィルタを使用し、アルファチャンネルは保持する
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    if target_w == 0 || target_h == 0 {
        return Err(TransformError::InvalidDimension {
            width: target_w.into(),
            height: target_h.into(),
        });
    }

    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    // RGBA8 に変換
    let rgba_img = img.to_rgba8();
    let width = rgba_img.width();
    let height = rgba_img.height();

    let src_image = Image::from_vec_u8(width, height, rgba_img.into_raw(), PixelType::U8x4)
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
                FilterType::Lanczos3,
            )),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let resized = image::RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| {
            TransformError::ProcessingFailed("failed to convert resized image".to_string())
        })?;

    Ok(DynamicImage::ImageRgba8(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_image() {
        let img = DynamicImage::new_rgb8(1000, 1000);
        let result = resize_image(&img, 500, 500);

        assert!(result.is_ok());
        let resized = result.unwrap();
        assert_eq!(resized.width(), 500);
        assert_eq!(resized.height(), 500);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        // 縦横比は保持せず、指定サイズに引き伸ばす
        let img = DynamicImage::new_rgb8(100, 100);
        let resized = resize_image(&img, 50, 200).unwrap();

        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 200);
    }

    #[test]
    fn test_resize_enlarges() {
        let img = DynamicImage::new_rgb8(3, 2);
        let resized = resize_image(&img, 30, 20).unwrap();

        assert_eq!((resized.width(), resized.height()), (30, 20));
    }

    #[test]
    fn test_resize_zero_dimension() {
        let img = DynamicImage::new_rgb8(10, 10);
        let result = resize_image(&img, 0, 10);

        assert!(matches!(
            result,
            Err(TransformError::InvalidDimension { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_resize_exceeds_max_pixels() {
        let img = DynamicImage::new_rgb8(100, 100);
        let result = resize_image(&img, 100000, 100000);

        assert!(result.is_err());
        match result.unwrap_err() {
            TransformError::ResolutionTooLarge { width, height } => {
                assert_eq!(width, 100000);
                assert_eq!(height, 100000);
            }
            _ => panic!("expected ResolutionTooLarge error"),
        }
    }
}
