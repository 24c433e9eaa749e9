//! Wallet hashing and human-readable rendering of hash bytes.

use bech32::{Bech32, Hrp};
use bigdecimal::BigDecimal;
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Result, WalletError};

/// SHA-256 over the wallet's public state. The private key is never an input.
///
/// Layout: `encoded public key ‖ address ‖ u32-BE len ‖ RFC 3339 creation date
/// (nanoseconds, UTC) ‖ balance as a plain decimal string`.
pub fn wallet_hash(
    encoded_public_key: &[u8],
    address: &[u8],
    creation_date: &DateTime<Utc>,
    balance: &BigDecimal,
) -> [u8; 32] {
    let date = creation_date.to_rfc3339_opts(SecondsFormat::Nanos, true);

    let mut hasher = Sha256::new();
    hasher.update(encoded_public_key);
    hasher.update(address);
    hasher.update((date.len() as u32).to_be_bytes());
    hasher.update(date.as_bytes());
    hasher.update(balance.normalized().to_string().as_bytes());
    hasher.finalize().into()
}

pub fn human_readable_hash(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Bech32 rendering under `prefix`.
pub fn bech32_encode(prefix: &str, bytes: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(prefix).map_err(|e| WalletError::Encoding(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, bytes).map_err(|e| WalletError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn hash_is_deterministic() {
        let zero = BigDecimal::from(0);
        let a = wallet_hash(&[4u8; 65], &[1u8; 20], &date(1_700_000_000), &zero);
        let b = wallet_hash(&[4u8; 65], &[1u8; 20], &date(1_700_000_000), &zero);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_covers_every_input() {
        let zero = BigDecimal::from(0);
        let base = wallet_hash(&[4u8; 65], &[1u8; 20], &date(1_700_000_000), &zero);
        assert_ne!(base, wallet_hash(&[5u8; 65], &[1u8; 20], &date(1_700_000_000), &zero));
        assert_ne!(base, wallet_hash(&[4u8; 65], &[2u8; 20], &date(1_700_000_000), &zero));
        assert_ne!(base, wallet_hash(&[4u8; 65], &[1u8; 20], &date(1_700_000_001), &zero));
        assert_ne!(
            base,
            wallet_hash(&[4u8; 65], &[1u8; 20], &date(1_700_000_000), &BigDecimal::from(1))
        );
    }

    #[test]
    fn human_readable_is_lower_hex() {
        assert_eq!(human_readable_hash(&[0xab, 0x01, 0xff]), "ab01ff");
        assert_eq!(human_readable_hash(&[]), "");
    }

    #[test]
    fn bech32_uses_prefix() {
        let encoded = bech32_encode("ygg", &[0u8; 20]).unwrap();
        assert!(encoded.starts_with("ygg1"));
        assert!(bech32_encode("", &[0u8; 20]).is_err());
    }
}
