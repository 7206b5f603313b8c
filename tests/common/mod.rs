#![allow(dead_code)]

use mousiki_resampler::{Up2HqCoefficients, Up2HqState, resampler_private_up2_hq};

/// Deterministic sawtooth-like test signal spanning roughly ±2000.
pub fn test_signal(len: usize) -> Vec<i16> {
    (0..len)
        .map(|i| (((i * 7919) % 4001) as i32 - 2000) as i16)
        .collect()
}

/// Upsamples `input` with the reference coefficients, returning a fresh output vector.
pub fn upsample(state: &mut Up2HqState, input: &[i16]) -> Vec<i16> {
    let mut output = vec![0i16; input.len() * 2];
    resampler_private_up2_hq(state, &Up2HqCoefficients::SILK, &mut output, input);
    output
}
