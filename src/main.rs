use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;

use anagrind::config::SearchConfig;
use anagrind::coordinator;
use anagrind::errors::{DictionaryError, SolveError};
use anagrind::search::ProgressFn;
use anagrind::word_list::WordList;

/// Multi-word anagram solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The phrase to decompose (multiple arguments are joined together)
    #[arg(required = true)]
    words: Vec<String>,

    /// Path to the dictionary file (one lowercase word per line)
    #[arg(short, long, default_value = "dictionary/words.txt")]
    dictionary: String,

    /// Number of parallel search workers
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Enable memoization of sub-results by remaining letters
    #[arg(long)]
    cache: bool,

    /// Maximum number of cache entries before eviction
    #[arg(long, default_value_t = 1_000_000)]
    cache_limit: usize,

    /// Fraction of cache capacity to reclaim on eviction
    #[arg(long, default_value_t = 0.1)]
    cache_clear_fraction: f64,

    /// Disable the trie-walk fast path for small remainders
    #[arg(long)]
    no_fast_path: bool,

    /// Fast-path selection threshold (relative speed factor)
    #[arg(long, default_value_t = 0.3)]
    fast_path_speed: f64,

    /// Number of results per batch streamed from each worker
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Show a per-worker progress meter on stderr
    #[arg(long)]
    progress: bool,
}

/// Entry point of the anagrind CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them in a
/// user-friendly way before exiting with a nonzero code.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("ANAGRIND_DEBUG").is_ok();
    anagrind::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error to stderr, with detailed formatting where available
        if let Some(solve_err) = e.downcast_ref::<SolveError>() {
            eprintln!("Error: {}", solve_err.display_detailed());
        } else if let Some(dict_err) = e.downcast_ref::<DictionaryError>() {
            eprintln!("Error: {}", dict_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Parse CLI arguments with Clap (unknown flags are fatal here).
/// 2. Load the dictionary from disk.
/// 3. Solve the query against the dictionary.
/// 4. Print each decomposition on stdout.
/// 5. Print timings on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = SearchConfig {
        worker_count: cli.workers,
        caching_enabled: cli.cache,
        cache_limit: cli.cache_limit,
        cache_clear_fraction: cli.cache_clear_fraction,
        fast_path_enabled: !cli.no_fast_path,
        fast_path_relative_speed: cli.fast_path_speed,
        result_batch_size: cli.batch_size,
    };

    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.dictionary)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let query = cli.words.join("");
    let meter: Option<&ProgressFn> = if cli.progress { Some(&progress_meter) } else { None };

    let t_solve = Instant::now();
    let results = coordinator::solve(&query, &word_list.words, &config, meter)?;
    let solve_secs = t_solve.elapsed().as_secs_f64();

    if cli.progress {
        eprintln!();
    }

    for result in &results {
        println!("{result}");
    }

    eprintln!(
        "Loaded {} words in {load_secs:.3}s; solved in {solve_secs:.3}s ({} decompositions).",
        word_list.words.len(),
        results.len()
    );

    Ok(())
}

/// Per-worker percentage meter, one column block per worker, redrawn in
/// place with carriage returns. Diagnostic output only; goes to stderr.
fn progress_meter(worker_id: usize, done: usize, total: usize) {
    let percent = if total == 0 {
        100.0
    } else {
        done as f64 / total as f64 * 100.0
    };
    let mut line = String::from("\r");
    if worker_id > 0 {
        // move right into this worker's column
        line.push_str(&format!("\x1b[{}C", worker_id * 8));
    }
    line.push_str(&format!("{percent:6.2}%"));
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(line.as_bytes());
    let _ = stderr.flush();
}
