mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use yarnlint::{CommandSchema, ContentKind, Diagnostic, Document};

#[derive(Parser)]
#[command(name = "yarnlint", version, about = "Yarn Spinner dialogue linter")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check .yarn files and report diagnostics
    Check(CheckArgs),

    /// Run .test.yarn fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Command schema (.toml or .json); without one, commands are not validated
    #[arg(short, long, env = "YARNLINT_SCHEMA")]
    schema: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Check files regardless of extension
    #[arg(long)]
    any_extension: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.yarn file or directory containing them
    path: PathBuf,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Annotated source snippets
    Human,
    /// One `file:line:col: error: message` line per diagnostic
    Short,
    /// A JSON object mapping each file to its diagnostics
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => {
            let exit_code = do_check(args, cli.no_color);
            process::exit(exit_code);
        }
        Command::Test(args) => {
            if args.list_categories {
                test_runner::list_categories(&args.path);
                return;
            }
            let exit_code = test_runner::run_tests(&args.path, cli.no_color, &args.category);
            process::exit(exit_code);
        }
    }
}

/// Returns the exit code: 0 = clean, 1 = diagnostics or unreadable files,
/// 2 = the schema could not be loaded.
fn do_check(args: CheckArgs, no_color: bool) -> i32 {
    let schema = match args.schema.as_deref().map(CommandSchema::from_path) {
        None => None,
        Some(Ok(schema)) => Some(schema),
        Some(Err(e)) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();

    let mut files = SimpleFiles::new();
    let mut json = serde_json::Map::new();
    let mut failed = false;

    for path in &args.files {
        let kind = if args.any_extension {
            ContentKind::Yarn
        } else {
            ContentKind::from_path(path)
        };
        if !kind.is_yarn() {
            tracing::info!(path = %path.display(), "skipping non-.yarn file");
            continue;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path.display(), e);
                failed = true;
                continue;
            }
        };

        let name = path.display().to_string();
        let document = Document::new(name.clone(), kind, &source);
        let diagnostics = yarnlint::scan(&document, schema.as_ref());
        failed |= !diagnostics.is_empty();

        match args.format {
            Format::Human => {
                let file_id = files.add(name, source);
                for diagnostic in &diagnostics {
                    let report = diagnostic.to_report(file_id, &document);
                    let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &report);
                }
            }
            Format::Short => print_short(&name, &diagnostics),
            Format::Json => {
                json.insert(name, serde_json::json!(diagnostics));
            }
        }
    }

    if args.format == Format::Json {
        match serde_json::to_string_pretty(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("error: {}", e),
        }
    }

    if failed { 1 } else { 0 }
}

fn print_short(name: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("{}:{}: error: {}", name, diagnostic.range.start, diagnostic.message);
    }
}

/// Resolve `relative` against the directory containing `file`.
pub(crate) fn sibling_path(file: &Path, relative: &str) -> PathBuf {
    file.parent()
        .map(|p| p.join(relative))
        .unwrap_or_else(|| PathBuf::from(relative))
}
