use std::path::PathBuf;

use anyhow::Result;
use bytepair_rs::checkpoint::{save_merges, vocab_path};
use bytepair_rs::{load_corpus, Checkpointer, Trainer, TrainerConfig};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{info, LevelFilter};

const DEFAULT_CORPUS: &str = "enw3";

#[derive(Parser, Debug)]
#[command(author, version, about = "Train a byte-pair encoding over a binary corpus", long_about = None)]
struct Cli {
    /// Corpus file; tokens are written to <CORPUS>.gtok
    #[arg(value_name = "CORPUS", default_value = DEFAULT_CORPUS)]
    input: PathBuf,

    /// Stop after this many merges even if pairs still repeat
    #[arg(long, value_name = "COUNT", default_value_t = TrainerConfig::default().max_merges)]
    max_merges: usize,

    /// Merges between token stream checkpoints (0 = final checkpoint only)
    #[arg(long, value_name = "COUNT", default_value_t = TrainerConfig::default().checkpoint_interval)]
    checkpoint_interval: usize,

    /// Also write the merge list to <CORPUS>.gvoc so tokens can be decoded later
    #[arg(long)]
    save_vocab: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

/// Level forced by `-v`/`-q`; `None` leaves the choice to `RUST_LOG`.
fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    if quiet > 0 {
        Some(match quiet {
            1 => LevelFilter::Warn,
            2 => LevelFilter::Error,
            _ => LevelFilter::Off,
        })
    } else {
        match verbose {
            0 => None,
            1 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

fn logger_builder(env: Env<'_>, verbose: u8, quiet: u8) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp_millis();
    if let Some(level) = level_override(verbose, quiet) {
        builder.filter_level(level);
    }
    builder
}

fn init_logging(verbose: u8, quiet: u8) {
    let env = Env::default().default_filter_or("info");
    let _ = logger_builder(env, verbose, quiet).try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let corpus = load_corpus(&cli.input)?;

    let config = TrainerConfig::default()
        .with_max_merges(cli.max_merges)
        .with_checkpoint_interval(cli.checkpoint_interval);
    let mut trainer = Trainer::new(&corpus, config);
    drop(corpus);

    let checkpointer = Checkpointer::for_input(&cli.input);
    let stats = trainer.run(|seq| checkpointer.save(seq).map(|_| ()))?;
    info!(
        "Wrote {} tokens to {}",
        stats.live_tokens,
        checkpointer.path().display()
    );

    if cli.save_vocab {
        let path = vocab_path(&cli.input);
        save_merges(&path, trainer.thesaurus())?;
        info!(
            "Wrote {} merges to {}",
            trainer.thesaurus().merges().len(),
            path.display()
        );
    }

    Ok(())
}
