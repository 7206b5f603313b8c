//! Coefficient tables for the high-quality 2× upsampler.
//!
//! Ported from `silk_resampler_rom.c` of the SILK reference implementation (the
//! revision whose up2 HQ stage is two all-pass sections per phase plus a notch
//! just above Nyquist). Values copied verbatim; see the upstream license header
//! for provenance.

/// Q16 all-pass coefficients for the even output phase.
///
/// The second entry is stored as `coef - 65536` and applied through
/// `smlawb(y, y, coef)`, which realises the coefficient `33727 / 65536`.
pub const SILK_RESAMPLER_UP2_HQ_0: [i16; 2] = [4_280, (33_727 - 65_536) as i16];

/// Q16 all-pass coefficients for the odd output phase.
pub const SILK_RESAMPLER_UP2_HQ_1: [i16; 2] = [16_295, (54_015 - 65_536) as i16];

/// Notch filter taps (Q16) followed by the output gain (Q15).
///
/// Matlab design: `B = [1, 0.12, 1]; A = [1, 0.055, 0.8]; G = 0.87;`
/// quantised as `round(B(2)*2^16), round(-A(2)*2^16), round((1-A(3))*2^16), round(G*2^15)`.
pub const SILK_RESAMPLER_UP2_HQ_NOTCH: [i16; 4] = [7_864, -3_604, 13_107, 28_508];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allpass_tables_keep_sign_layout() {
        for table in [SILK_RESAMPLER_UP2_HQ_0, SILK_RESAMPLER_UP2_HQ_1] {
            assert!(table[0] > 0);
            assert!(table[1] < 0);
        }
        assert_eq!(SILK_RESAMPLER_UP2_HQ_0[1], -31_809);
        assert_eq!(SILK_RESAMPLER_UP2_HQ_1[1], -11_521);
    }

    #[test]
    fn notch_gain_is_below_unity() {
        assert!(SILK_RESAMPLER_UP2_HQ_NOTCH[3] < i16::MAX);
        assert!(SILK_RESAMPLER_UP2_HQ_NOTCH[3] > 0);
    }
}
