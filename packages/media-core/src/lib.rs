pub mod audio;
pub mod blob;
pub mod constants;
pub mod errors;
pub mod resizer;
pub mod transcoder;
pub mod transform;
pub mod validation;

// 公開API
pub use audio::{
    decode_audio, encode_mp3, encode_wav, AudioCompressRequest, AudioConvertRequest, AudioFormat,
    Bitrate, DecodedAudio,
};
pub use blob::{InputBlob, MediaKind, OutputBlob};
pub use constants::{DEFAULT_AUDIO_FORMAT, DEFAULT_BITRATE, MAX_PIXELS};
pub use errors::{MediaError, TransformError};
pub use resizer::resize;
pub use transcoder::{compress, convert};
pub use transform::{decode_image, encode_png, resize_image, ImageTransformRequest};
pub use validation::{validate_dimensions, validate_upload_name, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};
