//! Fixed-point helpers from `silk/SigProc_FIX.h` used by the resampler kernels.
//!
//! The C sources express these as macros over `opus_int32`. Here each macro is a
//! small `#[inline]` function with an explicit overflow policy:
//!
//! - plain 32-bit additions and subtractions wrap (two's complement),
//! - the `*W*` multiplies form the product in 64 bits before shifting, so the
//!   intermediate never overflows,
//! - right shifts are arithmetic and therefore round towards negative infinity.

/// Wrapping 32-bit addition (`silk_ADD32`).
#[inline]
pub fn add32(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// Wrapping 32-bit subtraction (`silk_SUB32`).
#[inline]
pub fn sub32(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

/// Left shift that discards the bits shifted out (`silk_LSHIFT`).
///
/// Converting a 16-bit sample to Q10 is `lshift(i32::from(sample), 10)`; every
/// `i16` fits after that shift, so no saturation is applied.
#[inline]
pub fn lshift(value: i32, shift: u32) -> i32 {
    value.wrapping_shl(shift)
}

/// Arithmetic right shift (`silk_RSHIFT`), truncating towards negative infinity.
#[inline]
pub fn rshift(value: i32, shift: u32) -> i32 {
    value >> shift
}

/// `(a * b) >> 16` with a 64-bit intermediate (`silk_SMULWB`).
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn smulwb(a: i32, b: i16) -> i32 {
    let product = i64::from(a) * i64::from(b);
    (product >> 16) as i32
}

/// `a + ((b * c) >> 16)` with a 64-bit product and a wrapping add (`silk_SMLAWB`).
#[inline]
pub fn smlawb(a: i32, b: i32, c: i16) -> i32 {
    a.wrapping_add(smulwb(b, c))
}

/// Clamps `value` into the signed 16-bit range (`silk_SAT16`).
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn sat16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
