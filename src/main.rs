//! CLI entry point for sizewalk

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use sizewalk::output::{EXIT_PROMPT, prompt};
use sizewalk::walker::{default_protected_path, default_root, resolve_path};
use sizewalk::{ListingFormatter, Measurement, OutputConfig, SizeWalker, WalkerConfig, print_json};
use termcolor::{ColorChoice, StandardStream};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sizewalk")]
#[command(about = "List directories by total size, largest first")]
#[command(version)]
struct Args {
    /// Directory to measure (default: the system volume root)
    path: Option<PathBuf>,

    /// Directory that is never walked or listed (default: the OS install directory)
    #[arg(long = "protected", value_name = "PATH", conflicts_with = "no_protected")]
    protected: Option<PathBuf>,

    /// Walk every directory, including the OS install directory
    #[arg(long = "no-protected")]
    no_protected: bool,

    /// Number of parallel workers for sibling directories
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "1")]
    jobs: usize,

    /// Show only the N largest directories
    #[arg(short = 'n', long = "limit", value_name = "N")]
    limit: Option<usize>,

    /// Decimal places for sizes
    #[arg(long = "decimals", default_value = "2")]
    decimals: usize,

    /// Pause after this many lines when running interactively (0 = never)
    #[arg(long = "page-size", default_value = "25")]
    page_size: usize,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Wait for Enter before exiting
    #[arg(long = "wait")]
    wait: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress warnings about unreadable directories
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let root = resolve_path(&args.path.clone().unwrap_or_else(default_root));
    let protected_path = if args.no_protected {
        None
    } else {
        args.protected
            .as_deref()
            .map(resolve_path)
            .or_else(|| default_protected_path().as_deref().map(resolve_path))
    };

    let walker = SizeWalker::new(WalkerConfig {
        protected_path,
        parallel_workers: args.jobs,
    });

    let report = match walker.walk(&root) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("sizewalk: {}", e);
            process::exit(1);
        }
    };

    if report.total == Measurement::Inaccessible {
        eprintln!("sizewalk: cannot access '{}'", root.display());
        process::exit(1);
    }

    let output_config = OutputConfig {
        use_color: if args.json {
            false
        } else {
            should_use_color(args.color)
        },
        decimals: args.decimals,
        page_size: args.page_size,
    };

    let mut records = report.index.clone().into_sorted();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();

    let result = if args.json {
        print_json(&report, &records, args.decimals)
    } else {
        let color_choice = if output_config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(color_choice);
        let formatter = ListingFormatter::new(output_config);

        let stdin = io::stdin();
        let mut stdin = stdin.lock();
        let pager: Option<&mut dyn BufRead> = if interactive {
            Some(&mut stdin)
        } else {
            None
        };

        formatter
            .write_records(&mut stdout, &records, pager)
            .and_then(|_| formatter.write_summary(&mut stdout, &report))
    };

    if let Err(e) = result {
        eprintln!("sizewalk: error writing output: {}", e);
        process::exit(1);
    }

    if args.wait && io::stdin().is_terminal() {
        let stdin = io::stdin();
        if let Err(e) = prompt(&mut io::stdout(), &mut stdin.lock(), EXIT_PROMPT) {
            eprintln!("sizewalk: {}", e);
            process::exit(1);
        }
    }
}
