#![no_main]

use arbitrary::Arbitrary;
use lattice_dsa::{generate_key_pair, sign, verify_bytes, SecurityLevel};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct VerifyInput {
    level: u8,
    seed: [u8; 32],
    message: Vec<u8>,
    signature: Vec<u8>,
    flip: Option<(u16, u8)>,
}

fn level_from(byte: u8) -> SecurityLevel {
    match byte % 3 {
        0 => SecurityLevel::Level2,
        1 => SecurityLevel::Level3,
        _ => SecurityLevel::Level5,
    }
}

fuzz_target!(|input: VerifyInput| {
    let level = level_from(input.level);
    let (sk, pk) = match generate_key_pair(level, Some(&input.seed[..])) {
        Ok(keys) => keys,
        Err(_) => return,
    };

    // Arbitrary bytes must not panic
    let _ = verify_bytes(&input.message, &input.signature, &pk);

    // A genuine signature verifies, and a single flipped bit breaks it
    if let Ok(signature) = sign(&input.message, &sk) {
        let mut bytes = signature.to_bytes();
        assert!(verify_bytes(&input.message, &bytes, &pk));

        if let Some((pos, bit)) = input.flip {
            let idx = pos as usize % bytes.len();
            bytes[idx] ^= 1 << (bit % 8);
            assert!(!verify_bytes(&input.message, &bytes, &pk));
        }
    }
});
