//! Transaction signing: digest the content hash, sign, hand back DER bytes.
//!
//! Every call builds its own message from the content hash and uses the
//! thread's immutable secp256k1 context, so a wallet may sign from several
//! threads at once without locking.

use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, SecretKey};
use sha2::{Digest, Sha256};

use crate::algorithm::SignatureAlgorithm;
use crate::error::{Result, WalletError};
use crate::keys::with_secp;

/// What a wallet needs from a transaction to authorize it.
pub trait Signable {
    /// Hash identifying the transaction's content.
    fn content_hash(&self) -> &[u8];

    fn set_signature(&mut self, signature: Vec<u8>);
}

fn message_for(algorithm: SignatureAlgorithm, content_hash: &[u8]) -> Result<Message> {
    if content_hash.is_empty() {
        return Err(WalletError::SigningFailure("empty content hash".into()));
    }
    match algorithm {
        SignatureAlgorithm::EcdsaSecp256k1Sha256 => {
            let digest: [u8; 32] = Sha256::digest(content_hash).into();
            Ok(Message::from_digest(digest))
        }
    }
}

/// Sign `content_hash` with `secret`, returning a DER-encoded signature.
pub fn sign(
    algorithm: SignatureAlgorithm,
    secret: &SecretKey,
    content_hash: &[u8],
) -> Result<Vec<u8>> {
    let msg = message_for(algorithm, content_hash)?;
    let signature = with_secp(|secp| secp.sign_ecdsa(&msg, secret));
    Ok(signature.serialize_der().to_vec())
}

/// Check a DER signature over `content_hash` against `public`.
pub fn verify(
    algorithm: SignatureAlgorithm,
    public: &PublicKey,
    content_hash: &[u8],
    signature: &[u8],
) -> bool {
    let Ok(msg) = message_for(algorithm, content_hash) else {
        return false;
    };
    let Ok(signature) = Signature::from_der(signature) else {
        return false;
    };
    with_secp(|secp| secp.verify_ecdsa(&msg, &signature, public).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPair;

    const ALG: SignatureAlgorithm = SignatureAlgorithm::EcdsaSecp256k1Sha256;

    #[test]
    fn sign_then_verify() {
        let kp = KeyPair::from_secret_bytes(&[11u8; 32]).unwrap();
        let sig = sign(ALG, kp.secret_key(), b"content").unwrap();
        assert!(verify(ALG, kp.public_key(), b"content", &sig));
        assert!(!verify(ALG, kp.public_key(), b"other content", &sig));
    }

    #[test]
    fn signatures_are_deterministic() {
        let kp = KeyPair::from_secret_bytes(&[12u8; 32]).unwrap();
        let a = sign(ALG, kp.secret_key(), &[1, 2, 3]).unwrap();
        let b = sign(ALG, kp.secret_key(), &[1, 2, 3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_key_fails_verification() {
        let signer = KeyPair::from_secret_bytes(&[13u8; 32]).unwrap();
        let other = KeyPair::from_secret_bytes(&[14u8; 32]).unwrap();
        let sig = sign(ALG, signer.secret_key(), b"tx").unwrap();
        assert!(!verify(ALG, other.public_key(), b"tx", &sig));
    }

    #[test]
    fn empty_content_hash_is_rejected() {
        let kp = KeyPair::from_secret_bytes(&[15u8; 32]).unwrap();
        let err = sign(ALG, kp.secret_key(), &[]).unwrap_err();
        assert!(matches!(err, WalletError::SigningFailure(_)));
        assert!(!verify(ALG, kp.public_key(), &[], &[0x30]));
    }

    #[test]
    fn garbage_signature_does_not_verify() {
        let kp = KeyPair::from_secret_bytes(&[16u8; 32]).unwrap();
        assert!(!verify(ALG, kp.public_key(), b"tx", &[0xde, 0xad]));
    }
}
