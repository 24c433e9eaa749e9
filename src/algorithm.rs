use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// Signature scheme a wallet signs with.
///
/// Parsed once from configuration at start-up; an unknown name is the only way
/// to get `KeyAlgorithmUnavailable`, so wallets built from a parsed value never
/// fail on algorithm availability afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureAlgorithm {
    /// ECDSA over secp256k1 with a SHA-256 message digest, DER signatures.
    #[default]
    EcdsaSecp256k1Sha256,
}

impl SignatureAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaSecp256k1Sha256 => "SHA256withECDSA",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256withecdsa" | "secp256k1" | "ecdsa-secp256k1" => {
                Ok(SignatureAlgorithm::EcdsaSecp256k1Sha256)
            }
            _ => Err(WalletError::KeyAlgorithmUnavailable(s.to_string())),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        for name in ["SHA256withECDSA", "secp256k1", " ECDSA-secp256k1 "] {
            assert_eq!(
                name.parse::<SignatureAlgorithm>().unwrap(),
                SignatureAlgorithm::EcdsaSecp256k1Sha256
            );
        }
    }

    #[test]
    fn unknown_name_is_unavailable() {
        let err = "SHA1withDSA".parse::<SignatureAlgorithm>().unwrap_err();
        assert!(matches!(err, WalletError::KeyAlgorithmUnavailable(ref n) if n == "SHA1withDSA"));
    }

    #[test]
    fn display_round_trips() {
        let alg = SignatureAlgorithm::default();
        assert_eq!(alg.to_string().parse::<SignatureAlgorithm>().unwrap(), alg);
    }
}
