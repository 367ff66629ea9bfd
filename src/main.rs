//! Command-line runner for the oscillator SSA.
//!
//! Usage:
//!   oscillator-ssa                          # canonical configuration, one run
//!   oscillator-ssa config.json -r 8 -t 4    # 8 replicates on 4 threads

use anyhow::{Context, Result, bail};
use oscillator_ssa::{ReactionNetwork, SimulationConfig, Species, run_replicates};

struct Args {
    config_path: Option<String>,
    replicates: usize,
    threads: Option<usize>,
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut parsed = Args {
        config_path: None,
        replicates: 1,
        threads: None,
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--replicates" | "-r" => {
                i += 1;
                let value = args.get(i).context("--replicates needs a value")?;
                parsed.replicates = value
                    .parse()
                    .with_context(|| format!("invalid replicate count '{value}'"))?;
            }
            "--threads" | "-t" => {
                i += 1;
                let value = args.get(i).context("--threads needs a value")?;
                parsed.threads = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid thread count '{value}'"))?,
                );
            }
            "--help" | "-h" => {
                println!("Usage: oscillator-ssa [CONFIG.json] [options]");
                println!();
                println!("Options:");
                println!("  --replicates, -r N   Number of independent runs (default: 1)");
                println!("  --threads, -t N      Worker threads (default: Rayon's choice)");
                println!("  --help, -h           Show this help");
                return Ok(None);
            }
            other if other.starts_with('-') => bail!("unknown option '{other}'"),
            path => parsed.config_path = Some(path.to_string()),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let config = match &args.config_path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => SimulationConfig::default(),
    };

    let network = ReactionNetwork::oscillator();
    let results = run_replicates(&network, &config, args.replicates, args.threads)?;

    println!("replicate\tstatus\tsteps\tfinal_time\tactivator\trepressor");
    for (idx, result) in results.iter().enumerate() {
        let last = result.final_state();
        println!(
            "{}\t{}\t{}\t{:.4}\t{}\t{}",
            idx,
            result.status.label(),
            result.steps,
            result.final_time(),
            last[Species::Activator],
            last[Species::Repressor]
        );
        if let Some(err) = result.error() {
            log::error!("replicate {} failed: {}", idx, err);
        }
    }
    Ok(())
}
