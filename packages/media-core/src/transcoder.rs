use crate::audio::{
    decode_audio, encode_mp3, encode_wav, AudioCompressRequest, AudioConvertRequest, AudioFormat,
    Bitrate, DecodedAudio,
};
use crate::blob::{InputBlob, MediaKind, OutputBlob};
use crate::errors::TransformError;

/// 圧縮後 MP3 の Content-Type
const COMPRESSED_CONTENT_TYPE: &str = "audio/mpeg";

/// フォーマット変換で MP3 を出力する際のビットレート（ビットレート指定なしの既定値）
const CONVERT_MP3_BITRATE: Bitrate = Bitrate::Kbps128;

/// 音声を指定ビットレートの MP3 に再エンコードする
pub fn compress(request: AudioCompressRequest) -> Result<OutputBlob, TransformError> {
    let AudioCompressRequest { source, bitrate } = request;
    let audio = decode_source(&source)?;

    tracing::debug!(
        bitrate = %bitrate,
        channels = audio.channels,
        sample_rate = audio.sample_rate,
        duration_secs = audio.duration_secs(),
        "compressing audio"
    );

    let output = encode_mp3(&audio, bitrate)?;

    Ok(OutputBlob::new(
        output,
        COMPRESSED_CONTENT_TYPE,
        format!("compressed_audio_{bitrate}.mp3"),
    ))
}

/// 音声を別のコンテナに変換する
///
/// ビットレートは指定できず、各フォーマットの既定設定でエンコードする
pub fn convert(request: AudioConvertRequest) -> Result<OutputBlob, TransformError> {
    let AudioConvertRequest { source, format } = request;
    let audio = decode_source(&source)?;

    tracing::debug!(
        source_format = ?source.container(),
        target_format = %format,
        channels = audio.channels,
        sample_rate = audio.sample_rate,
        "converting audio"
    );

    let output = match format {
        AudioFormat::Mp3 => encode_mp3(&audio, CONVERT_MP3_BITRATE)?,
        AudioFormat::Wav => encode_wav(&audio)?,
    };

    Ok(OutputBlob::new(
        output,
        format.content_type(),
        format!("converted_audio.{}", format.extension()),
    ))
}

fn decode_source(source: &InputBlob) -> Result<DecodedAudio, TransformError> {
    if source.kind() != MediaKind::Audio {
        return Err(TransformError::Decode(
            "expected an audio upload, got image".to_string(),
        ));
    }
    decode_audio(source.bytes(), source.container())
}
