use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use futures::StreamExt;
use log::LevelFilter;
use std::path::PathBuf;

use scour::{EntryKind, NameList, SweepOptions, SweptEntry};

#[derive(Parser, Debug)]
#[command(
    name = "scour",
    version,
    about = "Recursively find and remove files and directories by filter"
)]
struct Args {
    /// Directory to sweep
    root: PathBuf,

    /// File basename to select; repeat for a set, "*.*" selects all files
    #[arg(long = "file", value_name = "NAME")]
    files: Vec<String>,

    /// Directory basename to select; repeat for a set, "*" selects all
    #[arg(long = "dir", value_name = "NAME")]
    dirs: Vec<String>,

    /// Extension to select files by, including the dot (e.g. ".bak")
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Select files whose basename starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Basename to protect from an otherwise-positive match
    #[arg(long, value_name = "NAME")]
    ignore: Vec<String>,

    /// Treat a single --file/--dir value as a regular expression
    #[arg(long)]
    regex: bool,

    /// Only select entries older than this many seconds
    #[arg(long, value_name = "SECONDS")]
    age: Option<f64>,

    /// Deepest directory level to consider (the root is level 0)
    #[arg(long, value_name = "LEVEL")]
    max_depth: Option<u32>,

    /// Cap on the number of entries selected and removed
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Report what would be removed without touching anything
    #[arg(long)]
    dry_run: bool,

    /// Emit the results as JSON instead of per-line output
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn name_list(values: Vec<String>) -> Option<NameList> {
    match values.len() {
        0 => None,
        1 => values.into_iter().next().map(NameList::One),
        _ => Some(NameList::Many(values)),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();
}

fn print_record(entry: &SweptEntry, dry_run: bool) {
    let verb = if dry_run {
        "would remove".yellow()
    } else if entry.deleted {
        "removed".green()
    } else {
        "failed".red()
    };
    let kind = match entry.kind {
        EntryKind::Directory => "dir",
        EntryKind::File => "file",
    };
    println!("{} {:<4} {}", verb, kind, entry.path.display());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = SweepOptions {
        files: name_list(args.files),
        dirs: name_list(args.dirs),
        extensions: name_list(args.extensions),
        prefix: args.prefix,
        ignore: name_list(args.ignore),
        regex: args.regex,
        age_seconds: args.age,
        max_depth: args.max_depth,
        limit: args.limit,
        dry_run: args.dry_run,
    };

    let mut stream = scour::sweep_stream(&args.root, options)?;
    let mut records = Vec::new();
    let mut removed = 0usize;

    while let Some(record) = stream.next().await {
        let entry = record?;
        if entry.deleted {
            removed += 1;
        }
        if args.json {
            records.push(entry);
        } else {
            print_record(&entry, args.dry_run);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if args.dry_run {
        println!("{} entries would be removed", removed);
    } else {
        println!("{} entries removed", removed);
    }

    Ok(())
}
