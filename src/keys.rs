use std::fmt;

use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::error::{Result, WalletError};

/// Length of an encoded (uncompressed SEC1) public key.
pub const ENCODED_PUBLIC_KEY_LEN: usize = 65;

// Pre-compute and cache the secp256k1 context
thread_local! {
    static SECP: Secp256k1<secp256k1::All> = Secp256k1::new();
}

/// Run `f` with this thread's secp256k1 context.
pub(crate) fn with_secp<R>(f: impl FnOnce(&Secp256k1<secp256k1::All>) -> R) -> R {
    SECP.with(f)
}

/// Asymmetric key pair handed to the wallet builder.
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl KeyPair {
    /// Fresh random key pair from the OS RNG.
    pub fn generate() -> Self {
        with_secp(|secp| {
            let (secret, public) = secp.generate_keypair(&mut secp256k1::rand::thread_rng());
            KeyPair { public, secret }
        })
    }

    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_slice(bytes)
            .map_err(|e| WalletError::InvalidKeyMaterial(e.to_string()))?;
        let public = with_secp(|secp| PublicKey::from_secret_key(secp, &secret));
        Ok(KeyPair { public, secret })
    }

    /// Pairs are not checked here; `WalletBuilder::build` rejects mismatches.
    pub fn from_parts(public: PublicKey, secret: SecretKey) -> Self {
        KeyPair { public, secret }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub(crate) fn into_parts(self) -> (PublicKey, SecretKey) {
        (self.public, self.secret)
    }

    /// Whether the public half was derived from the secret half.
    pub fn is_consistent(&self) -> bool {
        with_secp(|secp| PublicKey::from_secret_key(secp, &self.secret) == self.public)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(self.public.serialize()))
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// The encoded form addresses are cut from: uncompressed SEC1 (`0x04 ‖ X ‖ Y`).
pub fn encode_public_key(public: &PublicKey) -> [u8; ENCODED_PUBLIC_KEY_LEN] {
    public.serialize_uncompressed()
}
