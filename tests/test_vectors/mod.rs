// Signature test vectors
// Each vector is generated from a fixed seed, so regenerating it must
// reproduce every byte. Vectors serialize to JSON for export, and the
// known answers below pin the SHA-256 of every generated key and signature.

use lattice_dsa::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Test vector for one (level, seed, message) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureTestVector {
    pub level: SecurityLevel,
    pub seed: String,
    pub message: String,
    pub public_key: String,
    /// SHA-256 of the private key bytes
    pub private_key_digest: String,
    pub signature: String,
}

/// Generate a test vector from a seed and message
pub fn generate_test_vector(level: SecurityLevel, seed: &[u8], message: &[u8]) -> SignatureTestVector {
    let (sk, pk) = generate_key_pair(level, Some(seed)).expect("Failed to generate key pair");
    let signature = sign(message, &sk).expect("Failed to sign message");

    SignatureTestVector {
        level,
        seed: hex::encode(seed),
        message: hex::encode(message),
        public_key: pk.to_hex(),
        private_key_digest: hex::encode(Sha256::digest(sk.to_bytes())),
        signature: signature.to_hex(),
    }
}

fn counting_seed(start: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    for (i, b) in seed.iter_mut().enumerate() {
        *b = start.wrapping_add(i as u8);
    }
    seed
}

/// Standard test vectors, one per level
pub fn standard_test_vectors() -> Vec<SignatureTestVector> {
    let message = b"The quick brown fox jumps over the lazy dog";
    vec![
        generate_test_vector(SecurityLevel::Level2, &counting_seed(0x00), message),
        generate_test_vector(SecurityLevel::Level3, &counting_seed(0x40), message),
        generate_test_vector(SecurityLevel::Level5, &counting_seed(0x80), message),
    ]
}

/// Edge cases: empty message, short seed, all-ones seed, long message
pub fn special_case_test_vectors() -> Vec<SignatureTestVector> {
    vec![
        generate_test_vector(SecurityLevel::Level2, &counting_seed(0xc0), b""),
        generate_test_vector(SecurityLevel::Level2, &[0xFF; 8], b"Joy!"),
        generate_test_vector(SecurityLevel::Level3, &[0xFF; 32], &[0x5a; 4096]),
        generate_test_vector(SecurityLevel::Level5, &[], b"empty seed"),
    ]
}

/// Pinned SHA-256 digests of the key pair and signature for one input
pub struct KnownAnswer {
    pub level: SecurityLevel,
    pub seed: Vec<u8>,
    pub message: Vec<u8>,
    pub public_key_sha256: &'static str,
    pub private_key_sha256: &'static str,
    pub signature_sha256: &'static str,
}

/// Known answers covering the standard and special-case inputs
pub fn known_answers() -> Vec<KnownAnswer> {
    let fox = b"The quick brown fox jumps over the lazy dog".to_vec();
    vec![
        KnownAnswer {
            level: SecurityLevel::Level2,
            seed: counting_seed(0x00).to_vec(),
            message: fox.clone(),
            public_key_sha256: "eeb4f11e2b8959fd00532dd7b7dd6cd50f0f32c95fe47ce1e0fdcc198036d915",
            private_key_sha256: "df3ec214a2ba4870de5b0450039d4312c0df19731fb0a1326211503b752e90ef",
            signature_sha256: "3aff0aa6c72439677cdca498d36aed1098d88e66d83ba96fe9a10db33d3bf73d",
        },
        KnownAnswer {
            level: SecurityLevel::Level3,
            seed: counting_seed(0x40).to_vec(),
            message: fox.clone(),
            public_key_sha256: "6d67e53157ac64438cdec6a21f2c7b21812846063f72f920edfb0f18648bf75c",
            private_key_sha256: "d48d3e080937e223df9b43dda1d2d4785c9915ca46bd983babe60acef4a93249",
            signature_sha256: "d064b0f7fe66e61396144abd2034de84f51d01caa4dc17729dd1b608812f293f",
        },
        KnownAnswer {
            level: SecurityLevel::Level5,
            seed: counting_seed(0x80).to_vec(),
            message: fox,
            public_key_sha256: "12d68e1a5f6507b8f029990fd832f283e4987dc417c813b258cfa640a95fe2a8",
            private_key_sha256: "105f11540b3ce21384422d152a036632d171f6869b7da07456d24c1a64415996",
            signature_sha256: "8eefa1d91c7609cc070e2f93645c7018b4c26b05dde437454598361d6b01f9f2",
        },
        KnownAnswer {
            level: SecurityLevel::Level2,
            seed: counting_seed(0xc0).to_vec(),
            message: Vec::new(),
            public_key_sha256: "33e675eb95b5dfb7a28b819fccf5bd24429f6611d5044e0573abf43812020ae3",
            private_key_sha256: "6b80b0ce30f5b0d16d3128c72643472ad16d32b7422e18d527871436ea0a1337",
            signature_sha256: "f11230a360b64ad80915234ef91dfc6226804e54ff3ae86e46ae40774e8e50f3",
        },
        KnownAnswer {
            level: SecurityLevel::Level2,
            seed: vec![0xFF; 8],
            message: b"Joy!".to_vec(),
            public_key_sha256: "40e3ed1dfbd9abd2657ba2efc9fe7f6a70f5988758bc5f0caa0a2b3661e16ed1",
            private_key_sha256: "0872361d49568e3403effdd080cf5190043b1bc0492f4bf9f5c2c56b024b79f8",
            signature_sha256: "9b32a5f5b8c0ecfc395e1f62c42b849977c9ee8e7055cdf6a33886b7f799bafa",
        },
        KnownAnswer {
            level: SecurityLevel::Level3,
            seed: vec![0xFF; 32],
            message: vec![0x5a; 4096],
            public_key_sha256: "7237616476f29805812c098ba0157cd5984bb93a7c11d66387f5e701c176fb5c",
            private_key_sha256: "fbc904df604a58735190e6bce2ca82c9be5567e7b8c80a64fad59cf9fe24b436",
            signature_sha256: "29e4b812e0ee77c18280d59fe0acaa8bd3895cc9d38ac3517abd81145afbe728",
        },
        KnownAnswer {
            level: SecurityLevel::Level5,
            seed: Vec::new(),
            message: b"empty seed".to_vec(),
            public_key_sha256: "86d4c81ff29b431c7c5ae1a7cc2feafc9800d81acc8c7a8f55fbdc69ea565972",
            private_key_sha256: "6c8f82a61811825a74e7471f284cfaad32c9a30020529344c700e9e4bb966ca8",
            signature_sha256: "b1a58bf01219f5e4832cca968319d1df4a850cee08ea1fab47e3b05bf8c40f37",
        },
        KnownAnswer {
            level: SecurityLevel::Level3,
            seed: (0u8..32).collect(),
            message: b"counting seed message".to_vec(),
            public_key_sha256: "154595ad640f4ac0963f224c332f82404eb581c51bd2e04d167db9dff1a94d4b",
            private_key_sha256: "9138f962b043bd8c3b690c6b7b05ef4bc1ff54b9fdfdf7d9f451aaf645b36f0b",
            signature_sha256: "0ce6be2ad167c2d7dadc23c414840ee503aabc1b51fe51584ad9343eb4f4f97d",
        },
        KnownAnswer {
            level: SecurityLevel::Level5,
            seed: vec![0x42; 32],
            message: Vec::new(),
            public_key_sha256: "6b74ab4289024807bc78114029fa2ac27d4d091669c73fd95f8c5010afa8ae09",
            private_key_sha256: "1a4b8e6cdeb6940e09b89595ef9f4b790400d680042057bc6951d61c7d9a7251",
            signature_sha256: "2b572b230ba8920daa94ae459321baa5b5ddc0a52dff4bf85d916f2c282e1fcf",
        },
    ]
}
