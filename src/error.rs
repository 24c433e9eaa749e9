/// Errors raised while building, transitioning or signing with a wallet.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("a key pair is required to build a wallet")]
    MissingKeyPair,
    #[error("signature algorithm unavailable: {0}")]
    KeyAlgorithmUnavailable(String),
    #[error("encoded public key too short for an address: {len} bytes")]
    InvalidPublicKey { len: usize },
    #[error("public key does not belong to the private key")]
    KeyMismatch,
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
    #[error("signing failed: {0}")]
    SigningFailure(String),
    #[error("invalid balance delta: {0}")]
    InvalidDelta(String),
    #[error("encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;
