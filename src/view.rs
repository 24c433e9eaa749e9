use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hasher::human_readable_hash;
use crate::wallet::Wallet;

/// Serialized form of a wallet for transport or storage.
///
/// There is no private key field; nothing built from a `WalletView` can leak one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub address: String,
    pub wallet_hash: String,
    /// Base64 of the compressed public key.
    pub public_key: String,
    pub creation_date: DateTime<Utc>,
    /// Plain decimal string, no float round-trip.
    pub balance: String,
}

impl From<&Wallet> for WalletView {
    fn from(wallet: &Wallet) -> Self {
        WalletView {
            address: human_readable_hash(wallet.address()),
            wallet_hash: human_readable_hash(wallet.wallet_hash()),
            public_key: general_purpose::STANDARD.encode(wallet.public_key().serialize()),
            creation_date: wallet.creation_date(),
            balance: wallet.balance().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPair;
    use crate::wallet::Direction;
    use bigdecimal::BigDecimal;

    #[test]
    fn view_renders_hashes_and_omits_private_key() {
        let kp = KeyPair::from_secret_bytes(&[21u8; 32]).unwrap();
        let wallet = Wallet::builder().key_pair(kp).build().unwrap();
        let wallet = wallet
            .update_balance(&BigDecimal::from(3), Direction::Credit)
            .unwrap();
        let view = wallet.view();

        assert_eq!(view.address, wallet.human_readable_address());
        assert_eq!(view.wallet_hash, wallet.to_string());
        assert_eq!(view.balance, "3");

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"walletHash\""));
        assert!(!json.to_lowercase().contains("private"));
        assert!(!json.contains(&hex::encode([21u8; 32])));

        let back: WalletView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
