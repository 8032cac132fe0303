pub mod params;
pub mod upload;

pub use params::validate_dimensions;
pub use upload::{validate_upload_name, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};
