#![no_main]

use libfuzzer_sys::fuzz_target;
use mousiki_resampler::{Up2HqCoefficients, Up2HqState, resampler_private_up2_hq};

const MAX_SAMPLES: usize = 4096;

fuzz_target!(|data: &[u8]| {
    let Some((&split, payload)) = data.split_first() else {
        return;
    };

    let input: Vec<i16> = payload
        .chunks_exact(2)
        .take(MAX_SAMPLES)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let split = usize::from(split).min(input.len());
    let coefs = Up2HqCoefficients::SILK;

    let mut whole_state = Up2HqState::new();
    let mut whole = vec![0i16; input.len() * 2];
    resampler_private_up2_hq(&mut whole_state, &coefs, &mut whole, &input);

    let mut state = Up2HqState::new();
    let mut chunked = vec![0i16; input.len() * 2];
    let (head_out, tail_out) = chunked.split_at_mut(split * 2);
    resampler_private_up2_hq(&mut state, &coefs, head_out, &input[..split]);
    resampler_private_up2_hq(&mut state, &coefs, tail_out, &input[split..]);

    assert_eq!(whole, chunked);
    assert_eq!(whole_state, state);
});
