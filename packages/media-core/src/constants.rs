/// 画像の最大ピクセル数（1GP = 実質無制限、極端な入力のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;

/// ビットレート未指定時のデフォルト
pub const DEFAULT_BITRATE: &str = "64k";

/// 変換先フォーマット未指定時のデフォルト
pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";

/// リサイズ結果のファイル名
pub const RESIZED_IMAGE_FILE_NAME: &str = "resized_image.png";
