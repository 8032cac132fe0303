use crate::errors::TransformError;

/// リサイズ寸法を検証する
///
/// 幅・高さはどちらも 1 以上。クランプはせず、範囲外はエラーにする
pub fn validate_dimensions(width: i64, height: i64) -> Result<(u32, u32), TransformError> {
    let invalid = || TransformError::InvalidDimension { width, height };

    if width < 1 || height < 1 {
        return Err(invalid());
    }

    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;

    Ok((w, h))
}
