use bip39::Mnemonic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tiny_hderive::bip32::ExtendedPrivKey;
use tracing::debug;

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Result, WalletError};
use crate::keys::KeyPair;
use crate::wallet::Wallet;

/// BIP44 account path; the address index is appended.
pub const DERIVATION_PATH_PREFIX: &str = "m/44'/118'/0'/0";

/// BIP39 seed for `phrase` with an empty passphrase.
pub fn seed_from_mnemonic(phrase: &str) -> Result<[u8; 64]> {
    let mnemonic = Mnemonic::parse(phrase.trim())
        .map_err(|e| WalletError::InvalidKeyMaterial(format!("invalid mnemonic: {}", e)))?;
    Ok(mnemonic.to_seed(""))
}

pub fn derivation_path(index: usize) -> String {
    format!("{}/{}", DERIVATION_PATH_PREFIX, index)
}

#[inline]
pub fn derive_key_pair(seed: &[u8], index: usize) -> Result<KeyPair> {
    let path = derivation_path(index);
    let derived = ExtendedPrivKey::derive(seed, path.as_str())
        .map_err(|e| WalletError::InvalidKeyMaterial(format!("derivation of {} failed: {:?}", path, e)))?;
    KeyPair::from_secret_bytes(&derived.secret())
}

/// Build `count` wallets for consecutive indices starting at `start_index`.
///
/// `progress` is bumped every 1000 wallets and once more at the end, so callers
/// can poll it from another thread.
pub fn generate_wallets_batch(
    seed: &[u8],
    start_index: usize,
    count: usize,
    algorithm: SignatureAlgorithm,
    progress: Arc<AtomicUsize>,
) -> Result<Vec<Wallet>> {
    let mut wallets = Vec::with_capacity(count);

    for i in 0..count {
        let key_pair = derive_key_pair(seed, start_index + i)?;
        wallets.push(Wallet::builder().key_pair(key_pair).algorithm(algorithm).build()?);

        if (i + 1) % 1000 == 0 {
            progress.fetch_add(1000, Ordering::Relaxed);
        }
    }

    progress.fetch_add(count % 1000, Ordering::Relaxed);
    debug!(start_index, count, "generated wallet batch");
    Ok(wallets)
}
