//! Sample-rate and channel conversion helpers

/// Linear-interpolation resampler; good enough for speech at 16 kHz.
pub fn resample_linear(samples: &[f32], sr_in: u32, sr_out: u32) -> Vec<f32> {
    if sr_in == sr_out || samples.is_empty() || sr_in == 0 {
        return samples.to_vec();
    }

    let ratio = sr_out as f64 / sr_in as f64;
    let out_len = (samples.len() as f64 * ratio) as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let pos = i as f64 / ratio;
        let i0 = (pos.floor() as usize).min(samples.len() - 1);
        let i1 = (i0 + 1).min(samples.len() - 1);
        let t = (pos - i0 as f64) as f32;
        out.push(samples[i0] * (1.0 - t) + samples[i1] * t);
    }

    out
}

/// Average interleaved frames down to one channel.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Truncate or zero-pad to exactly `len` samples.
pub fn fit_length(mut samples: Vec<f32>, len: usize) -> Vec<f32> {
    samples.resize(len, 0.0);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_rate_is_identity() {
        let s = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_linear(&s, 16_000, 16_000), s);
    }

    #[test]
    fn downsample_halves_length() {
        let s: Vec<f32> = (0..480).map(|i| i as f32).collect();
        let out = resample_linear(&s, 48_000, 24_000);
        assert_eq!(out.len(), 240);
        assert_eq!(out[1], 2.0);
    }

    #[test]
    fn upsample_interpolates() {
        let out = resample_linear(&[0.0, 1.0], 8_000, 16_000);
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn downmix_averages_frames() {
        assert_eq!(downmix(&[1.0, 0.0, 0.5, 0.5], 2), vec![0.5, 0.5]);
        assert_eq!(downmix(&[0.3], 1), vec![0.3]);
    }

    #[test]
    fn fit_length_pads_and_truncates() {
        assert_eq!(fit_length(vec![1.0], 3), vec![1.0, 0.0, 0.0]);
        assert_eq!(fit_length(vec![1.0, 2.0, 3.0], 2), vec![1.0, 2.0]);
    }
}
