use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of wallets to build
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// First derivation index
    #[arg(long, default_value_t = 0)]
    pub start_index: usize,

    /// Mnemonic phrase (will prompt if not provided)
    #[arg(short, long)]
    pub mnemonic: Option<String>,

    /// Use fresh random key pairs instead of a mnemonic
    #[arg(short, long, conflicts_with = "mnemonic")]
    pub random: bool,

    /// Output file path
    #[arg(short, long, default_value = "data/wallets/wallets.json")]
    pub output: String,

    /// Also print bech32 addresses under this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Signature algorithm name
    #[arg(short = 'a', long, default_value = "SHA256withECDSA")]
    pub algorithm: String,

    /// Hex content hash to sign with the first wallet
    #[arg(short, long)]
    pub sign: Option<String>,

    /// Number of parallel threads (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["ygg-wallet"]);
        assert_eq!(args.count, 1);
        assert_eq!(args.algorithm, "SHA256withECDSA");
        assert!(!args.random);
        assert!(args.prefix.is_none());
    }

    #[test]
    fn random_conflicts_with_mnemonic() {
        let res = Args::try_parse_from(["ygg-wallet", "--random", "--mnemonic", "abandon"]);
        assert!(res.is_err());
    }
}
