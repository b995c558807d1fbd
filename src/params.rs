/*!
 * Parameter tables for the lattice signature scheme
 *
 * Ring constants are shared by every security level. The per-level values
 * (matrix shape, rounding granularity, rejection bounds) live in three
 * immutable `ParameterSet` records selected through `SecurityLevel`.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Ring degree
pub const N: usize = 256;
/// Ring modulus
pub const Q: i32 = 8380417;
/// Q^-1 mod 2^32, used by Montgomery reduction
pub const QINV: i32 = 58728449;
/// Number of low-order bits dropped from t
pub const D: u32 = 13;
/// Length of rho, K and the challenge seed
pub const SEEDBYTES: usize = 32;
/// Output length of the collision-resistant hash (tr, mu, rhoprime)
pub const CRHBYTES: usize = 48;

/// Packed size of one t1 polynomial (10 bits per coefficient)
pub const POLYT1_PACKED_BYTES: usize = 320;
/// Packed size of one t0 polynomial (13 bits per coefficient)
pub const POLYT0_PACKED_BYTES: usize = 416;

/// Bound on the secret coefficients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Eta {
    Two,
    Four,
}

impl Eta {
    pub fn value(self) -> i32 {
        match self {
            Eta::Two => 2,
            Eta::Four => 4,
        }
    }

    /// Bits per packed coefficient
    pub fn bits(self) -> u32 {
        match self {
            Eta::Two => 3,
            Eta::Four => 4,
        }
    }

    pub fn packed_bytes(self) -> usize {
        self.bits() as usize * N / 8
    }
}

impl TryFrom<i32> for Eta {
    type Error = CryptoError;

    fn try_from(value: i32) -> CryptoResult<Self> {
        match value {
            2 => Ok(Eta::Two),
            4 => Ok(Eta::Four),
            other => Err(CryptoError::invalid_parameter(
                "eta",
                "2 or 4",
                &other.to_string(),
                error_codes::UNSUPPORTED_ETA,
            )),
        }
    }
}

/// Range of the masking vector coefficients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gamma1 {
    /// 2^17
    Pow17,
    /// 2^19
    Pow19,
}

impl Gamma1 {
    pub fn value(self) -> i32 {
        match self {
            Gamma1::Pow17 => 1 << 17,
            Gamma1::Pow19 => 1 << 19,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Gamma1::Pow17 => 18,
            Gamma1::Pow19 => 20,
        }
    }

    pub fn packed_bytes(self) -> usize {
        self.bits() as usize * N / 8
    }
}

impl TryFrom<i32> for Gamma1 {
    type Error = CryptoError;

    fn try_from(value: i32) -> CryptoResult<Self> {
        match value {
            v if v == 1 << 17 => Ok(Gamma1::Pow17),
            v if v == 1 << 19 => Ok(Gamma1::Pow19),
            other => Err(CryptoError::invalid_parameter(
                "gamma1",
                "2^17 or 2^19",
                &other.to_string(),
                error_codes::UNSUPPORTED_GAMMA1,
            )),
        }
    }
}

/// Low-order rounding range used by decompose and the hint engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gamma2 {
    /// (Q-1)/88, high parts take 44 values
    QMinus1Over88,
    /// (Q-1)/32, high parts take 16 values
    QMinus1Over32,
}

impl Gamma2 {
    pub fn value(self) -> i32 {
        match self {
            Gamma2::QMinus1Over88 => (Q - 1) / 88,
            Gamma2::QMinus1Over32 => (Q - 1) / 32,
        }
    }

    /// Largest high part produced by decompose
    pub fn max_high(self) -> i32 {
        match self {
            Gamma2::QMinus1Over88 => 43,
            Gamma2::QMinus1Over32 => 15,
        }
    }

    /// Bits per packed w1 coefficient
    pub fn w1_bits(self) -> u32 {
        match self {
            Gamma2::QMinus1Over88 => 6,
            Gamma2::QMinus1Over32 => 4,
        }
    }

    pub fn w1_packed_bytes(self) -> usize {
        self.w1_bits() as usize * N / 8
    }
}

impl TryFrom<i32> for Gamma2 {
    type Error = CryptoError;

    fn try_from(value: i32) -> CryptoResult<Self> {
        match value {
            v if v == (Q - 1) / 88 => Ok(Gamma2::QMinus1Over88),
            v if v == (Q - 1) / 32 => Ok(Gamma2::QMinus1Over32),
            other => Err(CryptoError::invalid_parameter(
                "gamma2",
                "(Q-1)/88 or (Q-1)/32",
                &other.to_string(),
                error_codes::UNSUPPORTED_GAMMA2,
            )),
        }
    }
}

/// Numeric parameters for one security level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    pub level: SecurityLevel,
    /// Rows of the public matrix
    pub k: usize,
    /// Columns of the public matrix
    pub l: usize,
    pub gamma1: Gamma1,
    pub gamma2: Gamma2,
    /// Number of nonzero challenge coefficients
    pub tau: usize,
    pub eta: Eta,
    /// tau * eta
    pub beta: i32,
    /// Maximum number of hint bits in a signature
    pub omega: usize,
    pub d: u32,
}

const LEVEL2: ParameterSet = ParameterSet {
    level: SecurityLevel::Level2,
    k: 4,
    l: 4,
    gamma1: Gamma1::Pow17,
    gamma2: Gamma2::QMinus1Over88,
    tau: 39,
    eta: Eta::Two,
    beta: 78,
    omega: 80,
    d: D,
};

const LEVEL3: ParameterSet = ParameterSet {
    level: SecurityLevel::Level3,
    k: 6,
    l: 5,
    gamma1: Gamma1::Pow19,
    gamma2: Gamma2::QMinus1Over32,
    tau: 49,
    eta: Eta::Four,
    beta: 196,
    omega: 55,
    d: D,
};

const LEVEL5: ParameterSet = ParameterSet {
    level: SecurityLevel::Level5,
    k: 8,
    l: 7,
    gamma1: Gamma1::Pow19,
    gamma2: Gamma2::QMinus1Over32,
    tau: 60,
    eta: Eta::Two,
    beta: 120,
    omega: 75,
    d: D,
};

impl ParameterSet {
    /// Packed size of one eta-bounded polynomial
    pub fn poly_eta_packed_bytes(&self) -> usize {
        self.eta.packed_bytes()
    }

    /// Packed size of one z polynomial
    pub fn poly_z_packed_bytes(&self) -> usize {
        self.gamma1.packed_bytes()
    }

    /// Packed size of one w1 polynomial
    pub fn poly_w1_packed_bytes(&self) -> usize {
        self.gamma2.w1_packed_bytes()
    }

    /// Hint section: omega index bytes followed by k group-end markers
    pub fn hint_bytes(&self) -> usize {
        self.omega + self.k
    }

    pub fn public_key_bytes(&self) -> usize {
        SEEDBYTES + self.k * POLYT1_PACKED_BYTES
    }

    pub fn private_key_bytes(&self) -> usize {
        2 * SEEDBYTES
            + CRHBYTES
            + (self.l + self.k) * self.poly_eta_packed_bytes()
            + self.k * POLYT0_PACKED_BYTES
    }

    pub fn signature_bytes(&self) -> usize {
        SEEDBYTES + self.l * self.poly_z_packed_bytes() + self.hint_bytes()
    }
}

/// The three supported security levels
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// NIST security category 2
    Level2,
    /// NIST security category 3
    Level3,
    /// NIST security category 5
    Level5,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level{}", self.id())
    }
}

impl SecurityLevel {
    /// Look up a level by its numeric identifier
    ///
    /// # Arguments
    ///
    /// * `id` - 2, 3 or 5
    ///
    /// # Returns
    ///
    /// The matching level, or `InvalidParameter` for any other identifier
    pub fn from_id(id: u8) -> CryptoResult<Self> {
        match id {
            2 => Ok(SecurityLevel::Level2),
            3 => Ok(SecurityLevel::Level3),
            5 => Ok(SecurityLevel::Level5),
            other => Err(CryptoError::invalid_parameter(
                "security_level",
                "2, 3 or 5",
                &other.to_string(),
                error_codes::INVALID_SECURITY_LEVEL,
            )),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            SecurityLevel::Level2 => 2,
            SecurityLevel::Level3 => 3,
            SecurityLevel::Level5 => 5,
        }
    }

    pub fn parameters(&self) -> &'static ParameterSet {
        match self {
            SecurityLevel::Level2 => &LEVEL2,
            SecurityLevel::Level3 => &LEVEL3,
            SecurityLevel::Level5 => &LEVEL5,
        }
    }

    /// Get the public key size for this level in bytes
    pub fn public_key_length(&self) -> usize {
        self.parameters().public_key_bytes()
    }

    /// Get the private key size for this level in bytes
    pub fn private_key_length(&self) -> usize {
        self.parameters().private_key_bytes()
    }

    /// Get the signature size for this level in bytes
    pub fn signature_length(&self) -> usize {
        self.parameters().signature_bytes()
    }

    pub fn all() -> [SecurityLevel; 3] {
        [
            SecurityLevel::Level2,
            SecurityLevel::Level3,
            SecurityLevel::Level5,
        ]
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = CryptoError;

    fn try_from(id: u8) -> CryptoResult<Self> {
        SecurityLevel::from_id(id)
    }
}

/// Select the parameter set for a numeric level identifier
pub fn select_level(id: u8) -> CryptoResult<&'static ParameterSet> {
    SecurityLevel::from_id(id).map(|level| level.parameters())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_lengths() {
        let expected = [
            (SecurityLevel::Level2, 1312, 2544, 2420),
            (SecurityLevel::Level3, 1952, 4016, 3293),
            (SecurityLevel::Level5, 2592, 4880, 4595),
        ];
        for (level, pk, sk, sig) in expected {
            assert_eq!(level.public_key_length(), pk, "{}", level);
            assert_eq!(level.private_key_length(), sk, "{}", level);
            assert_eq!(level.signature_length(), sig, "{}", level);
        }
    }

    #[test]
    fn test_beta_is_tau_times_eta() {
        for level in SecurityLevel::all() {
            let p = level.parameters();
            assert_eq!(p.beta, p.tau as i32 * p.eta.value());
            assert_eq!(p.level, level);
        }
    }

    #[test]
    fn test_invalid_level_id() {
        for id in [0u8, 1, 4, 6, 255] {
            let err = select_level(id).unwrap_err();
            assert_eq!(err.error_code(), error_codes::INVALID_SECURITY_LEVEL);
        }
        assert!(SecurityLevel::try_from(3u8).is_ok());
    }

    #[test]
    fn test_typed_parameters_reject_unknown_values() {
        assert_eq!(Eta::try_from(4).unwrap(), Eta::Four);
        assert!(Eta::try_from(3).is_err());
        assert_eq!(Gamma1::try_from(1 << 19).unwrap(), Gamma1::Pow19);
        assert!(Gamma1::try_from(1 << 18).is_err());
        assert_eq!(Gamma2::try_from(95232).unwrap(), Gamma2::QMinus1Over88);
        assert_eq!(Gamma2::try_from(261888).unwrap(), Gamma2::QMinus1Over32);
        assert_eq!(
            Gamma2::try_from(1000).unwrap_err().error_code(),
            error_codes::UNSUPPORTED_GAMMA2
        );
    }

    #[test]
    fn test_packed_sizes() {
        assert_eq!(Eta::Two.packed_bytes(), 96);
        assert_eq!(Eta::Four.packed_bytes(), 128);
        assert_eq!(Gamma1::Pow17.packed_bytes(), 576);
        assert_eq!(Gamma1::Pow19.packed_bytes(), 640);
        assert_eq!(Gamma2::QMinus1Over88.w1_packed_bytes(), 192);
        assert_eq!(Gamma2::QMinus1Over32.w1_packed_bytes(), 128);
    }
}
