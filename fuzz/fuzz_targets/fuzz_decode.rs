#![no_main]

use lattice_dsa::{Encodable, PrivateKey, PublicKey, SecurityLevel, Signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let level = match selector % 3 {
        0 => SecurityLevel::Level2,
        1 => SecurityLevel::Level3,
        _ => SecurityLevel::Level5,
    };

    // Public keys have no redundancy, so parsing is a bijection
    if let Ok(pk) = PublicKey::from_bytes(body, level) {
        assert_eq!(pk.to_bytes(), body);
    }
    if let Ok(sk) = PrivateKey::from_bytes(body, level) {
        assert_eq!(sk.to_bytes().len(), body.len());
    }
    if let Ok(sig) = Signature::from_bytes(body, level) {
        assert_eq!(sig.to_bytes().len(), body.len());
    }

    if let Ok(text) = std::str::from_utf8(body) {
        let _ = PublicKey::from_hex(text, level);
        let _ = Signature::from_base64(text, level);
    }
});
