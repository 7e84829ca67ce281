use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use mottle::{batch, Config};

/// Batch-mutate an image corpus: append random trailers to each file, crop by
/// random margins, and re-encode under an optional size target.
#[derive(Parser)]
#[command(name = "mottle", version)]
struct Args {
    /// Corpus root directory (prompted for when omitted)
    #[arg(long)]
    path: Option<PathBuf>,
    /// Maximum mutation-chain length per file (prompted for when omitted)
    #[arg(long)]
    times: Option<u32>,
    /// Size target in kilobytes; zero or negative keeps default-quality output
    #[arg(long, default_value_t = 300)]
    target_kb: i64,
    /// Print one JSON array of report lines instead of streaming them
    #[arg(long)]
    json: bool,
    /// Run a single pass and exit instead of prompting to continue
    #[arg(long)]
    once: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(time_seed());

    loop {
        let config = resolve_config(&args)?;
        let reports = batch::run(&config, &mut rng)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        if args.once || !ask_again()? {
            break;
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let (root, times, target_kb) = match (&args.path, args.times) {
        (Some(path), Some(times)) => (path.clone(), times, args.target_kb),
        _ => {
            let root = PathBuf::from(prompt("corpus root: ")?);
            let times = prompt("max modifications per file: ")?.parse()?;
            let target_kb = prompt("size target in KB (0 keeps default quality): ")?.parse()?;
            (root, times, target_kb)
        }
    };

    let mut config = Config::new(root, times);
    config.target_kb = (target_kb > 0).then_some(target_kb as u64);
    config.quiet = args.json;
    Ok(config)
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_again() -> io::Result<bool> {
    Ok(prompt("run again? (y/n): ")?.eq_ignore_ascii_case("y"))
}

// One time-derived seed at startup; every later draw advances this generator.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
