pub mod algorithm;
pub mod cli;
pub mod error;
pub mod generator;
pub mod hasher;
pub mod keys;
pub mod signing;
pub mod view;
pub mod wallet;

pub use algorithm::SignatureAlgorithm;
pub use cli::Args;
pub use error::{Result, WalletError};
pub use generator::{derive_key_pair, generate_wallets_batch, seed_from_mnemonic};
pub use keys::KeyPair;
pub use signing::Signable;
pub use view::WalletView;
pub use wallet::{Direction, Wallet, WalletBuilder};
