pub mod resampler;
pub mod resampler_private_up2_hq;
pub mod resampler_rom;
pub mod sigproc_fix;
