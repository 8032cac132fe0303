use std::borrow::Cow;
use std::io::Cursor;

use mp3lame_encoder::{Builder, FlushNoGap, InterleavedPcm, MonoPcm};

use crate::audio::{Bitrate, DecodedAudio};
use crate::errors::TransformError;

/// flush 時に書き出される最大バイト数
const FLUSH_RESERVE: usize = 7200;

/// 入力のサンプルレートでは要求ビットレートを出せない場合の変換先
const MPEG1_SAMPLE_RATE: u32 = 44_100;

/// 入力サンプルレートのまま出力したときに出せる最大ビットレート（kbps）
///
/// 32kHz 未満は MPEG-2 / 2.5 になり、LAME は上限を超える指定を黙って下げる
fn max_kbps_for_rate(sample_rate: u32) -> u32 {
    match sample_rate {
        32_000.. => 320,
        16_000.. => 160,
        _ => 64,
    }
}

impl Bitrate {
    fn lame(self) -> mp3lame_encoder::Bitrate {
        match self {
            Self::Kbps32 => mp3lame_encoder::Bitrate::Kbps32,
            Self::Kbps64 => mp3lame_encoder::Bitrate::Kbps64,
            Self::Kbps128 => mp3lame_encoder::Bitrate::Kbps128,
            Self::Kbps192 => mp3lame_encoder::Bitrate::Kbps192,
            Self::Kbps256 => mp3lame_encoder::Bitrate::Kbps256,
            Self::Kbps320 => mp3lame_encoder::Bitrate::Kbps320,
        }
    }
}

/// 固定ビットレート（CBR）の MP3 にエンコードする
///
/// 要求ビットレートが入力サンプルレートの上限を超える場合は 44.1kHz に
/// リサンプリングしてから渡す。3ch 以上の音声はモノラルにダウンミックスする
pub fn encode_mp3(audio: &DecodedAudio, bitrate: Bitrate) -> Result<Vec<u8>, TransformError> {
    let audio: Cow<'_, DecodedAudio> = if bitrate.kbps() > max_kbps_for_rate(audio.sample_rate) {
        tracing::debug!(
            bitrate = %bitrate,
            source_sample_rate = audio.sample_rate,
            target_sample_rate = MPEG1_SAMPLE_RATE,
            "resampling audio to reach requested bitrate"
        );
        Cow::Owned(audio.resample(MPEG1_SAMPLE_RATE))
    } else {
        Cow::Borrowed(audio)
    };

    let (pcm, channels): (Cow<'_, [i16]>, u8) = match audio.channels {
        1 => (Cow::Borrowed(audio.samples.as_slice()), 1),
        2 => (Cow::Borrowed(audio.samples.as_slice()), 2),
        _ => (Cow::Owned(audio.downmix_mono()), 1),
    };

    let mut builder = Builder::new()
        .ok_or_else(|| TransformError::ProcessingFailed("failed to create MP3 encoder".to_string()))?;
    builder
        .set_num_channels(channels)
        .map_err(|e| TransformError::ProcessingFailed(format!("MP3 channel setup failed: {e}")))?;
    builder
        .set_sample_rate(audio.sample_rate)
        .map_err(|e| TransformError::ProcessingFailed(format!("MP3 sample rate setup failed: {e}")))?;
    builder
        .set_brate(bitrate.lame())
        .map_err(|e| TransformError::ProcessingFailed(format!("MP3 bitrate setup failed: {e}")))?;

    let mut encoder = builder
        .build()
        .map_err(|e| TransformError::ProcessingFailed(format!("MP3 encoder init failed: {e}")))?;

    let mut out = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()));
    let encoded = match channels {
        1 => encoder.encode_to_vec(MonoPcm(&pcm[..]), &mut out),
        _ => encoder.encode_to_vec(InterleavedPcm(&pcm[..]), &mut out),
    };
    encoded.map_err(|e| TransformError::ProcessingFailed(format!("MP3 encode failed: {e}")))?;

    out.reserve(FLUSH_RESERVE);
    encoder
        .flush_to_vec::<FlushNoGap>(&mut out)
        .map_err(|e| TransformError::ProcessingFailed(format!("MP3 flush failed: {e}")))?;

    Ok(out)
}

/// WAV（16bit PCM、元のサンプルレート・チャンネル数）にエンコードする
pub fn encode_wav(audio: &DecodedAudio) -> Result<Vec<u8>, TransformError> {
    let spec = hound::WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buf = Cursor::new(Vec::with_capacity(audio.samples.len() * 2 + 44));
    {
        let mut writer = hound::WavWriter::new(&mut buf, spec)
            .map_err(|e| TransformError::ProcessingFailed(format!("WAV header write failed: {e}")))?;
        for &sample in &audio.samples {
            writer
                .write_sample(sample)
                .map_err(|e| TransformError::ProcessingFailed(format!("WAV encode failed: {e}")))?;
        }
        writer
            .finalize()
            .map_err(|e| TransformError::ProcessingFailed(format!("WAV finalize failed: {e}")))?;
    }

    Ok(buf.into_inner())
}
