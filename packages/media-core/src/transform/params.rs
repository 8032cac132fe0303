use crate::blob::InputBlob;
use crate::errors::TransformError;
use crate::validation::validate_dimensions;

/// 画像リサイズのリクエスト
#[derive(Debug, Clone)]
pub struct ImageTransformRequest {
    pub source: InputBlob,
    pub width: u32,
    pub height: u32,
}

impl ImageTransformRequest {
    /// 寸法を検証してリクエストを作成する
    ///
    /// UI から負の値が来る可能性があるため符号付きで受け取る
    pub fn new(source: InputBlob, width: i64, height: i64) -> Result<Self, TransformError> {
        let (width, height) = validate_dimensions(width, height)?;
        Ok(Self {
            source,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_valid() {
        let request = ImageTransformRequest::new(InputBlob::image(vec![1u8]), 50, 200).unwrap();
        assert_eq!(request.width, 50);
        assert_eq!(request.height, 200);
    }

    #[test]
    fn test_request_negative() {
        let result = ImageTransformRequest::new(InputBlob::image(vec![1u8]), -5, 10);
        assert!(matches!(
            result,
            Err(TransformError::InvalidDimension { width: -5, height: 10 })
        ));
    }
}
