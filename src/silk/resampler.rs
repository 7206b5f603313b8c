//! Stage-level entry points for SILK's resampler kernels.
//!
//! A full SILK resampler picks one kernel per input/output rate pair and keeps a
//! delay buffer in front of it. That selection and buffering live with the
//! caller; this module only defines how such a caller talks to a kernel:
//! [`ResamplerStage`] exposes a stage behind a uniform interface, and
//! [`silk_resampler_stage`] is the checked call used by a dispatcher holding
//! `&mut dyn ResamplerStage`.

use core::fmt;

use log::{debug, trace};

use super::resampler_private_up2_hq::{
    CoefficientError, NotchCoefficients, ResamplerStateUp2Hq, Up2HqCoefficients,
};

/// Errors returned by the stage-level resampler entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplerError {
    /// The output buffer cannot hold the samples produced from the input block.
    OutputTooSmall { needed: usize, available: usize },
    /// The coefficient set handed to a stage initialiser is malformed.
    InvalidCoefficients(CoefficientError),
}

impl fmt::Display for ResamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputTooSmall { needed, available } => write!(
                f,
                "output buffer too small: need {needed} samples, have {available}"
            ),
            Self::InvalidCoefficients(err) => write!(f, "invalid resampler coefficients: {err}"),
        }
    }
}

impl core::error::Error for ResamplerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidCoefficients(err) => Some(err),
            Self::OutputTooSmall { .. } => None,
        }
    }
}

impl From<CoefficientError> for ResamplerError {
    fn from(value: CoefficientError) -> Self {
        Self::InvalidCoefficients(value)
    }
}

/// Kernel variants a stage can report.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplerMode {
    /// High-quality 2× upsampler: all-pass cascades followed by a notch.
    Up2Hq,
}

/// One resampling kernel together with its per-channel memory.
///
/// Implementations keep their state between calls so a signal may be fed in
/// blocks of any size. A stage must never be shared between channels.
pub trait ResamplerStage {
    fn mode(&self) -> ResamplerMode;

    /// Number of output samples produced from `input_len` input samples.
    fn output_len(&self, input_len: usize) -> usize;

    /// Resamples `input` into the front of `output` and returns the number of
    /// samples written.
    ///
    /// # Panics
    ///
    /// * If `output.len()` is smaller than `self.output_len(input.len())`.
    fn process(&mut self, output: &mut [i16], input: &[i16]) -> usize;

    /// Clears the filter memory.
    fn reset(&mut self);
}

/// Initialises a 2× HQ upsampler stage from raw coefficient tables.
///
/// The tables are validated here, once, so no malformed set ever reaches the
/// per-sample loop.
pub fn silk_resampler_up2_hq_init(
    even: [i16; 2],
    odd: [i16; 2],
    notch: [i16; 4],
) -> Result<ResamplerStateUp2Hq, ResamplerError> {
    let coefs = Up2HqCoefficients::new(even, odd, NotchCoefficients(notch))?;
    Ok(ResamplerStateUp2Hq::with_coefficients(coefs))
}

/// Runs `stage` on `input`, returning the number of samples written to `output`.
///
/// Unlike [`ResamplerStage::process`] this reports an undersized output buffer
/// as an error instead of panicking. Samples past the produced count are left
/// untouched.
pub fn silk_resampler_stage(
    stage: &mut dyn ResamplerStage,
    output: &mut [i16],
    input: &[i16],
) -> Result<usize, ResamplerError> {
    let needed = stage.output_len(input.len());
    if output.len() < needed {
        debug!(
            "silk_resampler_stage: {:?} needs {} output samples, buffer holds {}",
            stage.mode(),
            needed,
            output.len()
        );
        return Err(ResamplerError::OutputTooSmall {
            needed,
            available: output.len(),
        });
    }

    let produced = stage.process(&mut output[..needed], input);
    trace!(
        "silk_resampler_stage: {:?} consumed {} samples, produced {}",
        stage.mode(),
        input.len(),
        produced
    );
    Ok(produced)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::error::Error;

    use super::*;
    use crate::silk::resampler_private_up2_hq::{Phase, Up2HqState, resampler_private_up2_hq};
    use crate::silk::resampler_rom::{
        SILK_RESAMPLER_UP2_HQ_0, SILK_RESAMPLER_UP2_HQ_1, SILK_RESAMPLER_UP2_HQ_NOTCH,
    };

    fn ramp(len: usize) -> Vec<i16> {
        (0..len).map(|x| ((x as i32 * 37) - 400) as i16).collect()
    }

    #[test]
    fn up2_stage_matches_direct_kernel() {
        let mut stage = ResamplerStateUp2Hq::new();
        let input = ramp(80);
        let mut output = vec![0i16; input.len() * 2];

        let produced = silk_resampler_stage(&mut stage, &mut output, &input).unwrap();
        assert_eq!(produced, input.len() * 2);

        let mut reference = Up2HqState::new();
        let mut expected = vec![0i16; input.len() * 2];
        resampler_private_up2_hq(
            &mut reference,
            &Up2HqCoefficients::SILK,
            &mut expected,
            &input,
        );
        assert_eq!(output, expected);
        assert_eq!(stage.s_iir, reference);
    }

    #[test]
    fn dyn_stage_reports_mode_and_length() {
        let mut up2 = ResamplerStateUp2Hq::new();
        let stage: &mut dyn ResamplerStage = &mut up2;
        assert_eq!(stage.mode(), ResamplerMode::Up2Hq);
        assert_eq!(stage.output_len(0), 0);
        assert_eq!(stage.output_len(160), 320);
    }

    #[test]
    fn blocks_match_single_call() {
        let input = ramp(96);

        let mut whole = ResamplerStateUp2Hq::new();
        let mut expected = vec![0i16; input.len() * 2];
        silk_resampler_stage(&mut whole, &mut expected, &input).unwrap();

        let mut chunked = ResamplerStateUp2Hq::new();
        let mut output = Vec::new();
        for block in input.chunks(10) {
            let mut buf = vec![0i16; block.len() * 2];
            let produced = silk_resampler_stage(&mut chunked, &mut buf, block).unwrap();
            output.extend_from_slice(&buf[..produced]);
        }

        assert_eq!(output, expected);
        assert_eq!(chunked.s_iir, whole.s_iir);
    }

    #[test]
    fn rejects_undersized_output() {
        let mut stage = ResamplerStateUp2Hq::new();
        let mut output = [9i16; 5];
        let err = silk_resampler_stage(&mut stage, &mut output, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ResamplerError::OutputTooSmall {
                needed: 6,
                available: 5
            }
        );
        assert_eq!(output, [9; 5]);
        assert_eq!(stage.s_iir, Up2HqState::new());
    }

    #[test]
    fn reset_restores_fresh_behaviour() {
        let input = ramp(12);
        let mut stage = ResamplerStateUp2Hq::new();
        let mut first = vec![0i16; 24];
        silk_resampler_stage(&mut stage, &mut first, &input).unwrap();

        ResamplerStage::reset(&mut stage);
        let mut second = vec![0i16; 24];
        silk_resampler_stage(&mut stage, &mut second, &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn init_accepts_reference_tables() {
        let stage = silk_resampler_up2_hq_init(
            SILK_RESAMPLER_UP2_HQ_0,
            SILK_RESAMPLER_UP2_HQ_1,
            SILK_RESAMPLER_UP2_HQ_NOTCH,
        )
        .unwrap();
        assert_eq!(stage, ResamplerStateUp2Hq::new());
    }

    #[test]
    fn init_rejects_swapped_allpass_signs() {
        let err = silk_resampler_up2_hq_init(
            SILK_RESAMPLER_UP2_HQ_0,
            [-11_521, 16_295],
            SILK_RESAMPLER_UP2_HQ_NOTCH,
        )
        .unwrap_err();
        let inner = CoefficientError::FirstSectionNotPositive {
            phase: Phase::Odd,
            value: -11_521,
        };
        assert_eq!(err, ResamplerError::InvalidCoefficients(inner));
        assert!(err.source().is_some());
    }
}
