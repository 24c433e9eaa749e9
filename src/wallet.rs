use std::fmt;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use secp256k1::{PublicKey, SecretKey};
use tracing::debug;

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Result, WalletError};
use crate::hasher::{bech32_encode, human_readable_hash, wallet_hash};
use crate::keys::{encode_public_key, KeyPair};
use crate::signing::{self, Signable};
use crate::view::WalletView;

pub const ADDRESS_LEN: usize = 20;

/// Direction of a balance transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

/// Key-pair-backed identity with an immutable balance snapshot.
///
/// Only reachable through [`WalletBuilder`]. Balance changes return a new
/// `Wallet`; identity fields (keys, creation date, address, wallet hash) are
/// carried over untouched.
#[derive(Clone)]
pub struct Wallet {
    public_key: PublicKey,
    private_key: SecretKey,
    creation_date: DateTime<Utc>,
    address: [u8; ADDRESS_LEN],
    balance: BigDecimal,
    wallet_hash: [u8; 32],
    algorithm: SignatureAlgorithm,
}

impl Wallet {
    pub fn builder() -> WalletBuilder {
        WalletBuilder::default()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn address(&self) -> &[u8; ADDRESS_LEN] {
        &self.address
    }

    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    /// Identity digest computed from the zero-balance state at build time.
    pub fn wallet_hash(&self) -> &[u8; 32] {
        &self.wallet_hash
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// Same identity, new balance.
    pub fn with_balance(&self, balance: BigDecimal) -> Wallet {
        Wallet {
            balance,
            ..self.clone()
        }
    }

    /// Apply `delta` in `direction`. There is no floor; a debit larger than the
    /// balance yields a negative balance. `delta` itself must not be negative.
    pub fn update_balance(&self, delta: &BigDecimal, direction: Direction) -> Result<Wallet> {
        if *delta < BigDecimal::zero() {
            return Err(WalletError::InvalidDelta(format!(
                "delta must be non-negative, got {}",
                delta
            )));
        }
        let balance = match direction {
            Direction::Credit => &self.balance + delta,
            Direction::Debit => &self.balance - delta,
        };
        debug!(
            address = %self.human_readable_address(),
            ?direction,
            %delta,
            %balance,
            "balance transition"
        );
        Ok(self.with_balance(balance))
    }

    /// Sign the transaction's content hash and store the signature on it.
    pub fn sign_transaction<T: Signable + ?Sized>(&self, txn: &mut T) -> Result<()> {
        let signature = signing::sign(self.algorithm, &self.private_key, txn.content_hash())?;
        debug!(address = %self.human_readable_address(), "signed transaction");
        txn.set_signature(signature);
        Ok(())
    }

    /// Check a signature produced by this wallet over `content_hash`.
    pub fn verify(&self, content_hash: &[u8], signature: &[u8]) -> bool {
        signing::verify(self.algorithm, &self.public_key, content_hash, signature)
    }

    pub fn human_readable_address(&self) -> String {
        human_readable_hash(&self.address)
    }

    /// Address rendered as bech32 under `prefix`.
    pub fn bech32_address(&self, prefix: &str) -> Result<String> {
        bech32_encode(prefix, &self.address)
    }

    /// External form of this wallet; carries no private key.
    pub fn view(&self) -> WalletView {
        WalletView::from(self)
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&human_readable_hash(&self.wallet_hash))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.human_readable_address())
            .field("balance", &self.balance.to_string())
            .field("creation_date", &self.creation_date)
            .field("wallet_hash", &human_readable_hash(&self.wallet_hash))
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Last [`ADDRESS_LEN`] bytes of an encoded public key.
pub fn derive_address(encoded_public_key: &[u8]) -> Result<[u8; ADDRESS_LEN]> {
    let len = encoded_public_key.len();
    if len < ADDRESS_LEN {
        return Err(WalletError::InvalidPublicKey { len });
    }
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&encoded_public_key[len - ADDRESS_LEN..]);
    Ok(address)
}

/// The only way to construct a [`Wallet`].
#[derive(Debug, Default)]
pub struct WalletBuilder {
    key_pair: Option<KeyPair>,
    algorithm: SignatureAlgorithm,
    creation_date: Option<DateTime<Utc>>,
}

impl WalletBuilder {
    pub fn key_pair(mut self, key_pair: KeyPair) -> Self {
        self.key_pair = Some(key_pair);
        self
    }

    pub fn algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Fix the creation timestamp instead of reading the clock.
    pub fn creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    pub fn build(self) -> Result<Wallet> {
        let key_pair = self.key_pair.ok_or(WalletError::MissingKeyPair)?;
        if !key_pair.is_consistent() {
            return Err(WalletError::KeyMismatch);
        }
        let (public_key, private_key) = key_pair.into_parts();

        let creation_date = self.creation_date.unwrap_or_else(Utc::now);
        let encoded = encode_public_key(&public_key);
        let address = derive_address(&encoded)?;
        let balance = BigDecimal::zero();
        let wallet_hash = wallet_hash(&encoded, &address, &creation_date, &balance);

        let wallet = Wallet {
            public_key,
            private_key,
            creation_date,
            address,
            balance,
            wallet_hash,
            algorithm: self.algorithm,
        };
        debug!(
            address = %wallet.human_readable_address(),
            algorithm = %wallet.algorithm,
            "built wallet"
        );
        Ok(wallet)
    }
}
