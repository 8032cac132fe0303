use std::f32::consts::TAU;
use std::io::Cursor;

use bytes::Bytes;

/// テスト用の 440Hz 正弦波 WAV（16bit PCM）を生成する
pub fn sine_wav(sample_rate: u32, channels: u16, seconds: f32) -> Bytes {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
        let frames = (sample_rate as f32 * seconds) as u32;
        for i in 0..frames {
            let t = i as f32 / sample_rate as f32;
            let sample = ((TAU * 440.0 * t).sin() * 0.5 * f32::from(i16::MAX)) as i16;
            for _ in 0..channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    Bytes::from(buf.into_inner())
}

/// MPEG Layer III のフレームヘッダを順にたどり、各フレームのビットレート（kbps）を返す
pub fn mp3_frame_bitrates(data: &[u8]) -> Vec<u32> {
    const MPEG1_KBPS: [u32; 15] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
    const MPEG2_KBPS: [u32; 15] = [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];
    const MPEG1_RATES: [u32; 3] = [44_100, 48_000, 32_000];
    const MPEG2_RATES: [u32; 3] = [22_050, 24_000, 16_000];
    const MPEG25_RATES: [u32; 3] = [11_025, 12_000, 8_000];

    let mut pos = 0;
    if data.starts_with(b"ID3") && data.len() >= 10 {
        let size = data[6..10]
            .iter()
            .fold(0usize, |acc, &b| (acc << 7) | usize::from(b & 0x7F));
        pos = size + 10;
    }

    let mut bitrates = Vec::new();
    while pos + 4 <= data.len() {
        let header = &data[pos..pos + 4];
        if header[0] != 0xFF || header[1] & 0xE0 != 0xE0 {
            pos += 1;
            continue;
        }

        let version = (header[1] >> 3) & 0x03;
        let layer = (header[1] >> 1) & 0x03;
        let bitrate_index = usize::from(header[2] >> 4);
        let rate_index = usize::from((header[2] >> 2) & 0x03);
        let padding = usize::from((header[2] >> 1) & 0x01);

        if layer != 1 || version == 1 || bitrate_index == 0 || bitrate_index == 15 || rate_index == 3 {
            pos += 1;
            continue;
        }

        let (kbps, sample_rate, factor) = match version {
            3 => (MPEG1_KBPS[bitrate_index], MPEG1_RATES[rate_index], 144_000),
            2 => (MPEG2_KBPS[bitrate_index], MPEG2_RATES[rate_index], 72_000),
            _ => (MPEG2_KBPS[bitrate_index], MPEG25_RATES[rate_index], 72_000),
        };

        bitrates.push(kbps);
        let frame_len = (factor * kbps / sample_rate) as usize + padding;
        pos += frame_len.max(1);
    }

    bitrates
}
