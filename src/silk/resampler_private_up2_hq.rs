//! Port of the high-quality 2× upsampler used by SILK's resamplers.
//!
//! This mirrors the fixed-point helper found in `silk_resampler_private_up2_HQ.c`.
//! Each output phase runs its own cascade of two first-order all-pass sections;
//! both phases then share one biquad notch filter placed just above the input
//! Nyquist frequency. The notch runs at the output rate, so its two delay cells
//! swap roles between the even and odd phase of every input sample. The routine
//! consumes `len` 16-bit input samples and emits `2 * len` output samples while
//! updating a six-cell Q10 state in place.

use core::fmt;

use log::debug;

use super::resampler::{ResamplerMode, ResamplerStage};
use super::resampler_rom::{
    SILK_RESAMPLER_UP2_HQ_0, SILK_RESAMPLER_UP2_HQ_1, SILK_RESAMPLER_UP2_HQ_NOTCH,
};
use super::sigproc_fix::{add32, lshift, rshift, sat16, smlawb, smulwb, sub32};

/// Output phase an all-pass coefficient pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Produces output samples `2k`.
    Even,
    /// Produces output samples `2k + 1`.
    Odd,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Even => f.write_str("even"),
            Self::Odd => f.write_str("odd"),
        }
    }
}

/// Errors returned when building a coefficient set for the upsampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientError {
    /// The first all-pass section needs a strictly positive coefficient.
    FirstSectionNotPositive { phase: Phase, value: i16 },
    /// The second all-pass section needs a strictly negative coefficient.
    SecondSectionNotNegative { phase: Phase, value: i16 },
    /// A quantised notch coefficient does not fit in 16 bits.
    NotchOutOfRange { index: usize },
}

impl fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstSectionNotPositive { phase, value } => write!(
                f,
                "{phase} phase: first all-pass coefficient must be positive, got {value}"
            ),
            Self::SecondSectionNotNegative { phase, value } => write!(
                f,
                "{phase} phase: second all-pass coefficient must be negative, got {value}"
            ),
            Self::NotchOutOfRange { index } => {
                write!(f, "notch coefficient {index} does not fit in 16 bits")
            }
        }
    }
}

impl core::error::Error for CoefficientError {}

/// Notch taps `[n0, n1, n2]` in Q16 followed by the output gain in Q15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotchCoefficients(pub [i16; 4]);

impl NotchCoefficients {
    /// Quantises the analogue notch design `B = [1, b1, 1]`, `A = [1, a1, a2]`
    /// with output gain `gain`.
    ///
    /// Uses the same rounding as the table generator of the reference ROM, so
    /// `from_design(0.12, 0.055, 0.8, 0.87)` yields [`SILK_RESAMPLER_UP2_HQ_NOTCH`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_design(b1: f64, a1: f64, a2: f64, gain: f64) -> Result<Self, CoefficientError> {
        let scaled = [b1 * 65_536.0, -a1 * 65_536.0, (1.0 - a2) * 65_536.0, gain * 32_768.0];
        let mut taps = [0i16; 4];
        for (index, (tap, value)) in taps.iter_mut().zip(scaled).enumerate() {
            let rounded = libm::round(value);
            if !(f64::from(i16::MIN)..=f64::from(i16::MAX)).contains(&rounded) {
                debug!("notch design rejected: coefficient {index} quantises to {rounded}");
                return Err(CoefficientError::NotchOutOfRange { index });
            }
            *tap = rounded as i16;
        }
        Ok(Self(taps))
    }
}

/// Validated coefficient set for the two all-pass cascades and the shared notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Up2HqCoefficients {
    even: [i16; 2],
    odd: [i16; 2],
    notch: NotchCoefficients,
}

impl Up2HqCoefficients {
    /// The reference SILK tables from [`super::resampler_rom`].
    pub const SILK: Self = match Self::validate(
        SILK_RESAMPLER_UP2_HQ_0,
        SILK_RESAMPLER_UP2_HQ_1,
        NotchCoefficients(SILK_RESAMPLER_UP2_HQ_NOTCH),
    ) {
        Ok(coefs) => coefs,
        Err(_) => panic!("reference up2 HQ tables violate the all-pass sign layout"),
    };

    /// Builds a coefficient set, rejecting all-pass pairs that are not `(> 0, < 0)`.
    pub fn new(
        even: [i16; 2],
        odd: [i16; 2],
        notch: NotchCoefficients,
    ) -> Result<Self, CoefficientError> {
        Self::validate(even, odd, notch).inspect_err(|err| {
            debug!("up2 HQ coefficient set rejected: {err}");
        })
    }

    const fn validate(
        even: [i16; 2],
        odd: [i16; 2],
        notch: NotchCoefficients,
    ) -> Result<Self, CoefficientError> {
        if let Err(err) = check_allpass_pair(Phase::Even, even) {
            return Err(err);
        }
        if let Err(err) = check_allpass_pair(Phase::Odd, odd) {
            return Err(err);
        }
        Ok(Self { even, odd, notch })
    }

    pub const fn even(&self) -> [i16; 2] {
        self.even
    }

    pub const fn odd(&self) -> [i16; 2] {
        self.odd
    }

    pub const fn notch(&self) -> NotchCoefficients {
        self.notch
    }
}

impl Default for Up2HqCoefficients {
    fn default() -> Self {
        Self::SILK
    }
}

const fn check_allpass_pair(phase: Phase, pair: [i16; 2]) -> Result<(), CoefficientError> {
    if pair[0] <= 0 {
        return Err(CoefficientError::FirstSectionNotPositive {
            phase,
            value: pair[0],
        });
    }
    if pair[1] >= 0 {
        return Err(CoefficientError::SecondSectionNotNegative {
            phase,
            value: pair[1],
        });
    }
    Ok(())
}

/// Q10 delay elements of the upsampler.
///
/// Matches the six-entry `sIIR` array of the C state: cells 0-1 belong to the
/// even all-pass cascade, 2-3 to the odd cascade and 4-5 to the shared notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Up2HqState {
    pub even_allpass: [i32; 2],
    pub odd_allpass: [i32; 2],
    pub notch: [i32; 2],
}

impl Up2HqState {
    /// Creates a new state with all delay elements cleared.
    pub const fn new() -> Self {
        Self {
            even_allpass: [0; 2],
            odd_allpass: [0; 2],
            notch: [0; 2],
        }
    }

    /// Builds the state from the flat `sIIR` layout.
    pub const fn from_cells(cells: [i32; 6]) -> Self {
        Self {
            even_allpass: [cells[0], cells[1]],
            odd_allpass: [cells[2], cells[3]],
            notch: [cells[4], cells[5]],
        }
    }

    /// Returns the state in the flat `sIIR` layout.
    pub const fn to_cells(&self) -> [i32; 6] {
        [
            self.even_allpass[0],
            self.even_allpass[1],
            self.odd_allpass[0],
            self.odd_allpass[1],
            self.notch[0],
            self.notch[1],
        ]
    }
}

/// Resampler state carrying the delay elements and coefficients of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResamplerStateUp2Hq {
    /// Internal IIR delay elements stored in Q10 format.
    pub s_iir: Up2HqState,
    coefs: Up2HqCoefficients,
}

impl ResamplerStateUp2Hq {
    /// Creates a cleared state using the reference SILK coefficients.
    pub const fn new() -> Self {
        Self {
            s_iir: Up2HqState::new(),
            coefs: Up2HqCoefficients::SILK,
        }
    }

    /// Creates a cleared state running a custom, already validated, coefficient set.
    pub fn with_coefficients(coefs: Up2HqCoefficients) -> Self {
        if coefs != Up2HqCoefficients::SILK {
            debug!(
                "up2 HQ stage using custom coefficients: even={:?} odd={:?} notch={:?}",
                coefs.even, coefs.odd, coefs.notch.0
            );
        }
        Self {
            s_iir: Up2HqState::new(),
            coefs,
        }
    }

    pub fn coefficients(&self) -> &Up2HqCoefficients {
        &self.coefs
    }

    /// Clears the delay elements, keeping the coefficients.
    pub fn reset(&mut self) {
        self.s_iir = Up2HqState::new();
    }

    pub fn resampler_private_up2_hq_wrapper(&mut self, output: &mut [i16], input: &[i16]) {
        resampler_private_up2_hq(&mut self.s_iir, &self.coefs, output, input);
    }
}

impl ResamplerStage for ResamplerStateUp2Hq {
    fn mode(&self) -> ResamplerMode {
        ResamplerMode::Up2Hq
    }

    fn output_len(&self, input_len: usize) -> usize {
        input_len * 2
    }

    fn process(&mut self, output: &mut [i16], input: &[i16]) -> usize {
        self.resampler_private_up2_hq_wrapper(output, input);
        input.len() * 2
    }

    fn reset(&mut self) {
        ResamplerStateUp2Hq::reset(self);
    }
}

/// Runs the high-quality 2× upsampler on `input`, writing interleaved even/odd samples
/// into `output[..2 * input.len()]` and updating `state` in place.
///
/// Internal arithmetic is Q10 with wrapping 32-bit adds; full-scale 16-bit input
/// stays well inside that headroom.
///
/// # Panics
///
/// * If `output.len()` is smaller than `2 * input.len()`.
pub fn resampler_private_up2_hq(
    state: &mut Up2HqState,
    coefs: &Up2HqCoefficients,
    output: &mut [i16],
    input: &[i16],
) {
    assert!(
        output.len() >= input.len() * 2,
        "output buffer too small: need {} samples",
        input.len() * 2
    );

    let notch = &coefs.notch.0;
    for (&sample, pair) in input.iter().zip(output.chunks_exact_mut(2)) {
        let in32 = lshift(i32::from(sample), 10);

        let out32 = allpass_cascade(&mut state.even_allpass, in32, coefs.even);
        let [s4, s5] = &mut state.notch;
        let out32 = notch_section(out32, s5, *s4, notch);
        pair[0] = apply_gain(out32, notch[3]);

        let out32 = allpass_cascade(&mut state.odd_allpass, in32, coefs.odd);
        let [s4, s5] = &mut state.notch;
        let out32 = notch_section(out32, s4, *s5, notch);
        pair[1] = apply_gain(out32, notch[3]);
    }
}

/// Two first-order all-pass sections. The second coefficient is applied as
/// `1 + a[1] / 65536` by accumulating `y` onto itself.
#[inline]
fn allpass_cascade(state: &mut [i32; 2], in32: i32, a: [i16; 2]) -> i32 {
    let y = sub32(in32, state[0]);
    let x = smulwb(y, a[0]);
    let out32_1 = add32(state[0], x);
    state[0] = add32(in32, x);

    let y = sub32(out32_1, state[1]);
    let x = smlawb(y, y, a[1]);
    let out32_2 = add32(state[1], x);
    state[1] = add32(out32_1, x);

    out32_2
}

/// One half-rate evaluation of the shared notch. `feedback` is the cell written
/// in this phase and `other` the cell written by the opposite phase.
#[inline]
fn notch_section(input: i32, feedback: &mut i32, other: i32, notch: &[i16; 4]) -> i32 {
    let acc = smlawb(input, *feedback, notch[2]);
    let acc = smlawb(acc, other, notch[1]);
    let out32 = smlawb(acc, other, notch[0]);
    *feedback = sub32(acc, *feedback);
    out32
}

/// Applies the Q15 gain, rounds away the Q10 scaling and saturates.
#[inline]
fn apply_gain(value: i32, gain_q15: i16) -> i16 {
    sat16(rshift(smlawb(256, value, gain_q15), 9))
}
