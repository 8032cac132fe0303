use std::io::{Cursor, ErrorKind};

use bytes::Bytes;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::AudioFormat;
use crate::errors::TransformError;

/// デコード済み音声（インターリーブされた 16bit サンプル）
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<i16>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// チャンネルあたりのフレーム数
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// 全チャンネルを平均してモノラルにする
    pub fn downmix_mono(&self) -> Vec<i16> {
        let channels = usize::from(self.channels.max(1));
        self.samples
            .chunks_exact(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// 線形補間でサンプルレートを変換する（チャンネル数は維持）
    pub fn resample(&self, target_rate: u32) -> DecodedAudio {
        let channels = usize::from(self.channels.max(1));
        let frames = self.frames();

        if self.sample_rate == target_rate || frames <= 1 {
            return DecodedAudio {
                sample_rate: target_rate,
                ..self.clone()
            };
        }

        let output_frames = ((frames as u64 * u64::from(target_rate)) / u64::from(self.sample_rate))
            .max(1) as usize;
        let step = f64::from(self.sample_rate) / f64::from(target_rate);
        let last = frames - 1;

        let mut samples = Vec::with_capacity(output_frames * channels);
        for out_idx in 0..output_frames {
            let pos = out_idx as f64 * step;
            let left = (pos.floor() as usize).min(last);
            let right = (left + 1).min(last);
            let frac = pos - left as f64;

            for ch in 0..channels {
                let a = f64::from(self.samples[left * channels + ch]);
                let b = f64::from(self.samples[right * channels + ch]);
                samples.push((a + (b - a) * frac).round() as i16);
            }
        }

        DecodedAudio {
            samples,
            channels: self.channels,
            sample_rate: target_rate,
        }
    }
}

/// 音声バイト列をデコードする
///
/// コンテナが分かっていればプローブのヒントとして使う。
/// 毎回生のバイト列からデコードし、結果はキャッシュしない
pub fn decode_audio(
    input: &Bytes,
    container: Option<AudioFormat>,
) -> Result<DecodedAudio, TransformError> {
    let mut hint = Hint::new();
    if let Some(container) = container {
        hint.with_extension(container.extension());
    }

    let source = MediaSourceStream::new(Box::new(Cursor::new(input.clone())), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| TransformError::Decode(format!("unrecognized audio container: {e}")))?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TransformError::Decode("no decodable audio track".to_string()))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| TransformError::Decode(format!("unsupported audio codec: {e}")))?;

    let mut samples: Vec<i16> = Vec::new();
    let mut layout: Option<(u16, u32)> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => {
                return Err(TransformError::Decode(format!(
                    "failed to read audio packet: {e}"
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // 壊れたフレームは読み飛ばす
            Err(SymphoniaError::DecodeError(_)) => {
                skipped_packets += 1;
                continue;
            }
            Err(e) => return Err(TransformError::Decode(format!("audio decode failed: {e}"))),
        };

        let spec = *decoded.spec();
        let current = (spec.channels.count() as u16, spec.rate);
        match layout {
            None => layout = Some(current),
            // ストリーム途中でレイアウトが変わるフレームは混ぜられない
            Some(first) if first != current => {
                skipped_packets += 1;
                continue;
            }
            Some(_) => {}
        }

        let mut buffer = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buffer.samples());
    }

    if skipped_packets > 0 {
        tracing::debug!(skipped_packets, "skipped undecodable audio packets");
    }

    let (channels, sample_rate) = layout
        .filter(|_| !samples.is_empty())
        .ok_or_else(|| TransformError::Decode("audio contains no decodable frames".to_string()))?;

    Ok(DecodedAudio {
        samples,
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fixtures::sine_wav;

    #[test]
    fn test_decode_wav() {
        let wav = sine_wav(8_000, 2, 0.5);
        let audio = decode_audio(&wav, Some(AudioFormat::Wav)).unwrap();

        assert_eq!(audio.channels, 2);
        assert_eq!(audio.sample_rate, 8_000);
        assert_eq!(audio.frames(), 4_000);
    }

    #[test]
    fn test_decode_without_hint() {
        let wav = sine_wav(16_000, 1, 0.25);
        let audio = decode_audio(&wav, None).unwrap();

        assert_eq!(audio.channels, 1);
        assert_eq!(audio.frames(), 4_000);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_audio(&Bytes::from_static(b"definitely not audio"), None);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_decode_image_bytes_as_audio() {
        let png = Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0]);
        let result = decode_audio(&png, Some(AudioFormat::Mp3));
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_wav() {
        // ヘッダのみでサンプルが 0 の WAV は出力を作らずデコードエラーにする
        let wav = sine_wav(8_000, 1, 0.0);
        let result = decode_audio(&wav, Some(AudioFormat::Wav));
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_resample_upsamples_each_channel() {
        let audio = DecodedAudio {
            samples: vec![0, 1000, 100, 2000],
            channels: 2,
            sample_rate: 8_000,
        };
        let resampled = audio.resample(16_000);

        assert_eq!(resampled.sample_rate, 16_000);
        assert_eq!(resampled.channels, 2);
        assert_eq!(resampled.frames(), 4);
        // 補間点は左右のフレームの中間値になる
        assert_eq!(&resampled.samples[0..4], &[0, 1000, 50, 1500]);
    }

    #[test]
    fn test_resample_same_rate() {
        let audio = DecodedAudio {
            samples: vec![1, 2, 3],
            channels: 1,
            sample_rate: 44_100,
        };
        assert_eq!(audio.resample(44_100), audio);
    }

    #[test]
    fn test_downmix_mono() {
        let audio = DecodedAudio {
            samples: vec![100, 300, -50, 50, 0, 0],
            channels: 2,
            sample_rate: 8_000,
        };
        assert_eq!(audio.downmix_mono(), vec![200, 0, 0]);
        assert_eq!(audio.frames(), 3);
    }
}
