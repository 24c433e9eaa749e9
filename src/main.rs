use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ygg_wallet::{
    generate_wallets_batch, seed_from_mnemonic, Args, KeyPair, Signable, SignatureAlgorithm,
    Wallet,
};

const MAX_WALLETS: usize = 10_000_000;

/// Bare content hash handed in on the command line.
struct DigestTxn {
    hash: Vec<u8>,
    signature: Option<Vec<u8>>,
}

impl Signable for DigestTxn {
    fn content_hash(&self) -> &[u8] {
        &self.hash
    }

    fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = Some(signature);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if args.count == 0 || args.count > MAX_WALLETS {
        anyhow::bail!("count must be between 1 and {}", MAX_WALLETS);
    }

    // Validated once; wallets built from it never re-check availability.
    let algorithm: SignatureAlgorithm = args.algorithm.parse()?;

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("failed to configure thread pool")?;

    info!(count = args.count, %algorithm, threads = num_threads, "building wallets");
    let start_time = Instant::now();

    let wallets = if args.random {
        (0..args.count)
            .into_par_iter()
            .map(|_| Wallet::builder().key_pair(KeyPair::generate()).algorithm(algorithm).build())
            .collect::<ygg_wallet::Result<Vec<_>>>()?
    } else {
        let phrase = match args.mnemonic.clone() {
            Some(m) => m,
            None => {
                println!("Enter your mnemonic phrase:");
                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;
                input.trim().to_string()
            }
        };
        let seed = seed_from_mnemonic(&phrase)?;
        derive_in_parallel(&args, &seed, algorithm, num_threads)?
    };

    info!(
        built = wallets.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "wallets ready"
    );

    if let Some(prefix) = &args.prefix {
        for wallet in &wallets {
            println!("{}", wallet.bech32_address(prefix)?);
        }
    }

    if let Some(hash_hex) = &args.sign {
        let first = wallets.first().context("no wallet to sign with")?;
        let mut txn = DigestTxn {
            hash: hex::decode(hash_hex).context("--sign expects a hex content hash")?,
            signature: None,
        };
        first.sign_transaction(&mut txn)?;
        if let Some(signature) = &txn.signature {
            println!("address:   {}", first.human_readable_address());
            println!("signature: {}", hex::encode(signature));
        }
    }

    write_views(&args.output, &wallets)?;
    info!(output = %args.output, "wrote wallet views");
    Ok(())
}

fn derive_in_parallel(
    args: &Args,
    seed: &[u8],
    algorithm: SignatureAlgorithm,
    num_threads: usize,
) -> Result<Vec<Wallet>> {
    let pb = ProgressBar::new(args.count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")?
            .progress_chars("#>-"),
    );

    let progress = Arc::new(AtomicUsize::new(0));
    let done = Arc::new(AtomicUsize::new(0));

    let pb_clone = pb.clone();
    let progress_clone = progress.clone();
    let done_clone = done.clone();
    let total = args.count;
    let progress_handle = std::thread::spawn(move || loop {
        std::thread::sleep(Duration::from_millis(100));
        let current = progress_clone.load(Ordering::Relaxed);
        pb_clone.set_position(current as u64);
        if current >= total || done_clone.load(Ordering::Relaxed) > 0 {
            break;
        }
    });

    let per_thread = (args.count + num_threads - 1) / num_threads;
    let batches: Vec<ygg_wallet::Result<Vec<Wallet>>> = (0..num_threads)
        .into_par_iter()
        .map(|thread_id| {
            let offset = thread_id * per_thread;
            let count = per_thread.min(args.count.saturating_sub(offset));
            if count == 0 {
                Ok(Vec::new())
            } else {
                generate_wallets_batch(seed, args.start_index + offset, count, algorithm, progress.clone())
            }
        })
        .collect();

    done.store(1, Ordering::Relaxed);
    if progress_handle.join().is_err() {
        warn!("progress thread panicked");
    }
    pb.finish_and_clear();

    let mut wallets = Vec::with_capacity(args.count);
    for batch in batches {
        wallets.extend(batch?);
    }
    Ok(wallets)
}

fn write_views(output: &str, wallets: &[Wallet]) -> Result<()> {
    if let Some(parent) = Path::new(output).parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(output).with_context(|| format!("cannot create {}", output))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(b"[")?;
    for (i, wallet) in wallets.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n  ")?;
        serde_json::to_writer(&mut writer, &wallet.view())?;
    }
    writer.write_all(b"\n]")?;
    writer.flush()?;
    Ok(())
}
