//! Overlap-add joining of sample buffers
//!
//! Two buffers are joined by fading the tail of the first out and the head of
//! the second in over `n` samples and summing the overlapping region. Fading
//! happens in `f64`; every blended sample is clamped to the sample width and
//! truncated back to an integer.

use crate::audio::SampleWidth;

/// Linear ramp of `n` points from 0 to 1 inclusive
///
/// A single point ramp is `[0.0]`.
pub fn fade_ramp(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (n - 1) as f64;
            (0..n).map(|i| i as f64 * step).collect()
        }
    }
}

/// Join `a` and `b` with an `n` sample crossfade
///
/// The result has `a.len() + b.len() - n` samples. `n` is reduced to the
/// length of the shorter buffer when it does not fit.
pub fn overlap_add(a: &[i32], b: &[i32], n: usize, width: SampleWidth) -> Vec<i32> {
    let n = n.min(a.len()).min(b.len());
    let ramp = fade_ramp(n);
    let head_end = a.len() - n;

    let mut out = Vec::with_capacity(a.len() + b.len() - n);
    out.extend_from_slice(&a[..head_end]);

    for i in 0..n {
        let fade_out = a[head_end + i] as f64 * ramp[n - 1 - i];
        let fade_in = b[i] as f64 * ramp[i];
        out.push(width.clamp_f64(fade_out + fade_in));
    }

    out.extend_from_slice(&b[n..]);
    out
}

/// Fold a sequence of buffers together with overlap-add
///
/// Empty buffers are skipped. With fewer than two non-empty buffers this is
/// plain concatenation.
pub fn crossfade_all<S: AsRef<[i32]>>(buffers: &[S], n: usize, width: SampleWidth) -> Vec<i32> {
    let mut parts = buffers.iter().map(|b| b.as_ref()).filter(|b| !b.is_empty());

    let Some(first) = parts.next() else {
        return Vec::new();
    };
    let mut acc = first.to_vec();
    for next in parts {
        acc = overlap_add(&acc, next, n, width);
    }
    acc
}
