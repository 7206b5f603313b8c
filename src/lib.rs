#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod silk;

pub use silk::resampler::{
    ResamplerError, ResamplerMode, ResamplerStage, silk_resampler_stage,
    silk_resampler_up2_hq_init,
};
pub use silk::resampler_private_up2_hq::{
    CoefficientError, NotchCoefficients, Phase, ResamplerStateUp2Hq, Up2HqCoefficients,
    Up2HqState, resampler_private_up2_hq,
};
