pub mod decode;
pub mod encode;
pub mod params;
pub mod resize;

pub use decode::decode_image;
pub use encode::encode_png;
pub use params::ImageTransformRequest;
pub use resize::resize_image;
