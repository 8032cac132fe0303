pub mod decode;
pub mod encode;
pub mod params;

#[cfg(test)]
pub(crate) mod fixtures;

pub use decode::{decode_audio, DecodedAudio};
pub use encode::{encode_mp3, encode_wav};
pub use params::{AudioCompressRequest, AudioConvertRequest, AudioFormat, Bitrate};
