use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use combolist::error::Error;
use combolist::utils::{format_duration, format_mb, format_number};
use combolist::{
    CancelToken, Config, Engine, Outcome, OutputSink, RunSummary, SeedLoader, TokenPool, Window,
};

/// Length-bounded token-combination wordlist generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Word tokens, raw (e.g. "omer faruk toptas")
    #[arg(short, long)]
    words: Option<String>,

    /// Number tokens, raw (e.g. "19 90 2025")
    #[arg(short, long)]
    numbers: Option<String>,

    /// Symbol tokens, raw (a single run like "!@#$" splits per character)
    #[arg(short, long)]
    symbols: Option<String>,

    /// Word seed file, one token per line
    #[arg(long)]
    words_file: Option<String>,

    /// Number seed file, one token per line
    #[arg(long)]
    numbers_file: Option<String>,

    /// Symbol seed file, one token per line
    #[arg(long)]
    symbols_file: Option<String>,

    /// Minimum output line length (overrides config)
    #[arg(long)]
    min_len: Option<usize>,

    /// Maximum output line length (overrides config)
    #[arg(long)]
    max_len: Option<usize>,

    /// Generate upper/lower case variants for each token
    #[arg(long)]
    case_variants: bool,

    /// Output file path (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;
    display_banner();

    let mut config = match &args.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Configuration loaded from: {}", path);
            config
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let seeds = SeedLoader::assemble(&config.tokens)?;

    let pool = TokenPool::build(
        &seeds,
        config.expansion.case_variants,
        config.expansion.max_variants_per_token,
    )?;
    for record in pool.expansions() {
        info!("'{}' -> {} variants", record.original, record.variants);
    }
    info!("Pool size (unique): {}", pool.len());
    if config.expansion.case_variants {
        info!(
            "Variant cap per token: {}",
            config.expansion.max_variants_per_token
        );
    }

    let window = Window::new(config.window.min_len, config.window.max_len)?;
    let engine = Engine::new(pool, window, config.progress.settings())?;

    info!("Estimated sequences: {}", engine.estimated_total());
    info!("Note: the estimate counts ordered sequences; the unique line count can be lower");

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping...");
                cancel.trip();
            }
        });
    }

    let bar = ProgressBar::new(saturating_u64(engine.estimated_total()));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut sink = OutputSink::create(&config.output.path)?;
    let out_path = config.output.path.clone();
    info!("Writing to: {}", out_path);

    let run_cancel = cancel.clone();
    let run_bar = bar.clone();
    let (summary, bytes_written) = tokio::task::spawn_blocking(move || {
        let summary = engine.run(&mut sink, &run_cancel, |report| {
            run_bar.set_position(
                report
                    .attempted
                    .min(saturating_u64(report.estimated_total)),
            );
            run_bar.set_message(format!(
                "{} lines | {}",
                format_number(report.written),
                format_mb(report.bytes_written)
            ));
        })?;
        let bytes = sink.finish()?;
        Ok::<_, Error>((summary, bytes))
    })
    .await??;

    bar.finish_and_clear();

    info!("═══════════════════════════════════════════════");
    match summary.outcome {
        Outcome::Completed => {
            info!("RUN COMPLETE");
            print_summary(&out_path, &summary, bytes_written);
            info!("═══════════════════════════════════════════════");
            Ok(())
        }
        Outcome::Cancelled => {
            warn!("Run cancelled; partial results are preserved");
            print_summary(&out_path, &summary, bytes_written);
            info!("═══════════════════════════════════════════════");
            std::process::exit(130);
        }
    }
}

fn print_summary(path: &str, summary: &RunSummary, bytes_written: u64) {
    info!("Output: {}", path);
    info!("Unique lines: {}", format_number(summary.written));
    info!("File size: {}", format_mb(bytes_written));
    info!("Estimated completion: {:.2}%", summary.percent());
    info!("Elapsed: {}", format_duration(summary.elapsed_secs));
    if summary.elapsed_secs > 0.0 {
        info!(
            "Rate: {:.0} lines/s",
            summary.written as f64 / summary.elapsed_secs
        );
    }
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(words) = &args.words {
        config.tokens.words = vec![words.clone()];
    }
    if let Some(numbers) = &args.numbers {
        config.tokens.numbers = vec![numbers.clone()];
    }
    if let Some(symbols) = &args.symbols {
        config.tokens.symbols = vec![symbols.clone()];
    }
    if args.words_file.is_some() {
        config.tokens.words_file = args.words_file.clone();
    }
    if args.numbers_file.is_some() {
        config.tokens.numbers_file = args.numbers_file.clone();
    }
    if args.symbols_file.is_some() {
        config.tokens.symbols_file = args.symbols_file.clone();
    }
    if let Some(min_len) = args.min_len {
        config.window.min_len = min_len;
    }
    if let Some(max_len) = args.max_len {
        config.window.max_len = max_len;
    }
    if args.case_variants {
        config.expansion.case_variants = true;
    }
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .init();

    Ok(())
}

fn display_banner() {
    println!(
        "
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║   COMBOLIST — token-combination wordlist generator        ║
║                                                           ║
║   For auditing credentials you own or are authorized      ║
║   to test. Keep the length window tight.                  ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝
    "
    );
}
