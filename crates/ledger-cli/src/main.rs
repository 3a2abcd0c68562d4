use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_core::{pow, Chain, SystemClock, Wallet};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Drive the signed, proof-of-work gated ledger")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. info, ledger_core=debug)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Three wallets pay each other in a ring, then the chain is printed
    Demo {
        /// Seed the nonce generator for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Pretty-print the resulting chain
        #[arg(long)]
        pretty: bool,
    },
    /// Run the proof-of-work search for a single nonce seed
    Mine {
        #[arg(long)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.cmd {
        Command::Demo { seed, pretty } => demo(seed, pretty)?,
        Command::Mine { seed } => {
            let solution = pow::mine(seed);
            println!("solution: {solution}");
            println!("digest: {}", pow::attempt(seed, solution));
        }
    }
    Ok(())
}

fn demo(seed: Option<u64>, pretty: bool) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut chain = Chain::with_sources(SystemClock, rng);

    let alice = Wallet::generate()?;
    let bob = Wallet::generate()?;
    let carol = Wallet::generate()?;

    for (payer, amount, payee) in [(&alice, 50, &bob), (&bob, 23, &carol), (&carol, 5, &alice)] {
        let receipt = payer.send(&mut chain, amount, payee.public_key())?;
        info!(
            index = receipt.index,
            amount,
            solution = receipt.solution,
            hash = %receipt.hash,
            "transfer recorded"
        );
    }

    let rendered = if pretty {
        serde_json::to_string_pretty(chain.blocks())?
    } else {
        serde_json::to_string(chain.blocks())?
    };
    println!("{rendered}");
    Ok(())
}
