use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::env;
use std::path::{Path, PathBuf};
use vale_edit::{
    load_from_path, DocumentError, DocumentReport, EditOutcome, Engine, Exceptions, FsStore,
    Registry, RevisionBatch, RootGuard,
};
use walkdir::WalkDir;

/// Config file picked up from the current directory when no other is given.
const LOCAL_CONFIG: &str = "vale-edit.toml";

#[derive(Parser)]
#[command(name = "vale-edit")]
#[command(about = "Apply Vale lint alerts as edits to prose documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply Vale alerts to documents, overwriting them in place
    Apply {
        #[command(flatten)]
        run: RunArgs,

        /// Dry run - show what would be changed without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Show the edits that would be applied, without writing
    Check {
        #[command(flatten)]
        run: RunArgs,
    },

    /// List configured checks and their edit kinds
    Rules {
        /// Rule config (TOML); defaults to built-in Google style rules
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Vale JSON output, or a directory of them
    #[arg(short, long, default_value = "vale_output.json")]
    input: PathBuf,

    /// Rule config (TOML); defaults to built-in Google style rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Heading exceptions YAML, overriding the config
    #[arg(short, long)]
    exceptions: Option<PathBuf>,

    /// Refuse to touch documents outside this directory
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Log every edit decision to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply { run, dry_run, diff } => cmd_apply(run, dry_run, diff),
        Commands::Check { run } => cmd_apply(run, true, true),
        Commands::Rules { config } => cmd_rules(config),
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the rule registry using multiple sources
///
/// Priority order:
/// 1. Explicit --config flag
/// 2. VALE_EDIT_CONFIG environment variable
/// 3. vale-edit.toml in the current directory
/// 4. Built-in Google style rules
fn resolve_registry(cli_config: Option<PathBuf>) -> Result<Registry> {
    if let Some(path) = cli_config {
        return Ok(load_from_path(&path)?.into());
    }

    if let Ok(env_path) = env::var("VALE_EDIT_CONFIG") {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(load_from_path(&path)?.into());
        }
        eprintln!(
            "{}",
            format!(
                "Warning: VALE_EDIT_CONFIG is set but path doesn't exist: {}",
                env_path
            )
            .yellow()
        );
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        println!("{}", format!("Using config {}", local.display()).dimmed());
        return Ok(load_from_path(local)?.into());
    }

    Ok(Registry::default())
}

/// Load heading exceptions, degrading to an empty list.
fn resolve_exceptions(cli_exceptions: Option<PathBuf>, registry: &Registry) -> Exceptions {
    let Some(path) = cli_exceptions.or_else(|| registry.exceptions_path().cloned()) else {
        return Exceptions::default();
    };

    match Exceptions::load(&path) {
        Ok(exceptions) => {
            println!(
                "Exceptions: {} words from {}",
                exceptions.len(),
                path.display()
            );
            exceptions
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("Warning: {e}; heading case has no exceptions").yellow()
            );
            Exceptions::default()
        }
    }
}

/// Helper: Collect Vale JSON files to apply.
///
/// A directory contributes every `*.json` directly inside it.
fn discover_batch_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("json")
        {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();

    if files.is_empty() {
        anyhow::bail!("No .json Vale output found in {}", input.display());
    }

    Ok(files)
}

/// Helper: Show unified diff between original and revised content
fn display_diff(file: &Path, original: &str, revised: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (revised)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, revised);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", sign);
        if change.missing_newline() {
            println!();
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    documents: usize,
    applied: usize,
    skipped: usize,
    lines_skipped: usize,
    failed: usize,
}

fn print_report(report: &DocumentReport, dry_run: bool, show_diff: bool, totals: &mut Totals) {
    for line in &report.lines {
        println!("  Editing line {}:", line.line);
        for outcome in &line.outcomes {
            match outcome {
                EditOutcome::Applied { .. } => println!("    {} {}", "✓".green(), outcome),
                EditOutcome::Skipped { .. } => println!("    {} {}", "✗".red(), outcome),
            }
        }
    }

    for line in &report.out_of_bounds {
        println!(
            "  {} Unable to find line {}. Skipping.",
            "⊘".cyan(),
            line
        );
    }

    if report.discarded > 0 {
        println!(
            "  {} {} revisions without a line number discarded",
            "⊙".yellow(),
            report.discarded
        );
    }

    if show_diff && report.changed() {
        display_diff(&report.path, &report.original, &report.revised);
    }

    if dry_run {
        println!(
            "  {}",
            format!("[DRY RUN] {} not written", report.path.display()).cyan()
        );
    } else {
        println!(
            "  {} Completed revisions for {}",
            "✓".green(),
            report.path.display()
        );
    }

    totals.documents += 1;
    totals.applied += report.applied();
    totals.skipped += report.skipped();
    totals.lines_skipped += report.out_of_bounds.len();
}

fn print_document_error(error: &DocumentError, totals: &mut Totals) {
    eprintln!("  {} {}", "✗".red(), error);
    if let DocumentError::Persist { .. } = error {
        eprintln!("  {}", "Document edits were not saved".red());
    }
    totals.failed += 1;
}

fn cmd_apply(run: RunArgs, dry_run: bool, show_diff: bool) -> Result<()> {
    init_logging(run.verbose);

    // 1. Resolve rules and exceptions once for the whole run
    let registry = resolve_registry(run.config)?;
    let exceptions = resolve_exceptions(run.exceptions, &registry);

    // 2. Document store
    let mut store = FsStore::new().dry_run(dry_run);
    if let Some(root) = &run.root {
        let guard = RootGuard::new(root)?;
        println!("Root: {}", guard.root().display());
        store = store.with_guard(guard);
    }

    let engine = Engine::new(&registry, &exceptions);
    let mut totals = Totals::default();

    if dry_run {
        println!("{}", "[DRY RUN - showing what would be applied]".cyan());
    }

    // 3. Apply each Vale output file
    for batch_file in discover_batch_files(&run.input)? {
        println!("Loading alerts from {}...", batch_file.display());

        let batch = match RevisionBatch::load(&batch_file) {
            Ok(batch) => batch,
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e);
                totals.failed += 1;
                continue;
            }
        };

        if batch.is_empty() {
            println!("{}", "  No documents in Vale output".yellow());
            continue;
        }

        for (path, result) in engine.apply_batch(&store, &batch) {
            println!("\nEditing file {}", path.display());
            match result {
                Ok(report) => print_report(&report, dry_run, show_diff, &mut totals),
                Err(e) => print_document_error(&e, &mut totals),
            }
        }

        println!();
    }

    // 4. Summary
    println!("{}", "Summary:".bold());
    println!("  {} documents revised", format!("{}", totals.documents).green());
    println!("  {} edits applied", format!("{}", totals.applied).green());
    println!("  {} edits skipped", format!("{}", totals.skipped).yellow());
    println!("  {} lines skipped", format!("{}", totals.lines_skipped).cyan());
    println!("  {} failed", format!("{}", totals.failed).red());

    if totals.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_rules(config: Option<PathBuf>) -> Result<()> {
    let registry = resolve_registry(config)?;

    println!("{}", "Configured checks".bold());
    let width = registry.rules().map(|(check, _)| check.len()).max().unwrap_or(0);
    for (check, kind) in registry.rules() {
        println!("  {:width$}  {}", check, kind.to_string().cyan(), width = width);
    }

    println!();
    match registry.exceptions_path() {
        Some(path) => println!("Exceptions: {}", path.display()),
        None => println!("Exceptions: {}", "none".dimmed()),
    }

    Ok(())
}
