//! xlsxkb CLI
//!
//! RFP質問リストのスプレッドシートをナレッジベースMarkdownに変換するコマンドラインツール。

use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};
use xlsxkb::{ConversionSummary, KbError, KnowledgeBaseBuilder, SheetSelector};

/// 既定の出力先
const DEFAULT_OUTPUT: &str = "Agent Instructions/TMC Tender Agent-knowledge-base.md";

/// Convert an RFP question spreadsheet into a Markdown knowledge base.
#[derive(Parser, Debug)]
#[command(name = "xlsxkb", version, about, long_about = None)]
struct Cli {
    /// Spreadsheet to convert (xlsx, xlsm, xlsb, xls, ods).
    #[arg(value_name = "EXCEL_FILE")]
    input: Option<PathBuf>,

    /// Output Markdown file (its directory must already exist).
    #[arg(short, long, default_value = DEFAULT_OUTPUT, env = "XLSXKB_OUTPUT")]
    output: PathBuf,

    /// Only process the named sheet (repeatable). Defaults to all sheets.
    #[arg(short, long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Log format: text (default) or json.
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// ログ出力形式
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let Some(input) = cli.input.clone() else {
        print_usage();
        process::exit(1);
    };

    init_tracing(&cli);

    match run(&cli, &input) {
        Ok(summary) => print_success(&summary, &cli.output),
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "xlsxkb=info",
        1 => "xlsxkb=debug",
        _ => "xlsxkb=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .without_time()
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

fn run(cli: &Cli, input: &Path) -> Result<ConversionSummary, KbError> {
    let selector = if cli.sheets.is_empty() {
        SheetSelector::All
    } else {
        SheetSelector::Names(cli.sheets.clone())
    };

    let converter = KnowledgeBaseBuilder::new()
        .with_sheet_selector(selector)
        .build()?;

    converter.convert_file(input, &cli.output)
}

fn print_usage() {
    let bin = Cli::command().get_name().to_string();
    println!("Usage: {} <excel-file>", bin);
    println!(
        "Example: {} \"Resources/Solicitation_TMC_Sourcing_-_Master_RFP_Question_List.xlsx\"",
        bin
    );
}

fn print_success(summary: &ConversionSummary, output: &Path) {
    let output = summary.output.as_deref().unwrap_or(output);

    println!();
    println!("Generated markdown knowledge base: {}", output.display());
    println!("   Total entries: {}", summary.entries);
    println!("   Sheets processed: {}", summary.sheets);

    println!();
    println!("Next steps:");
    println!("   1. Review the generated file: {}", output.display());
    println!("   2. Edit and refine questions/categories as needed");
    println!("   3. Get TMC Tender Agent ID:");
    println!(
        "      docker exec supabase_db_rfpez-app-local psql -U postgres -d postgres -c \"SELECT id FROM agents WHERE name = 'TMC Tender';\""
    );
    println!("   4. Generate SQL migration:");
    println!(
        "      node scripts/kb-to-sql-migration.js \"{}\" <agent-id>",
        output.display()
    );
    println!("   5. Apply migration locally:");
    println!("      supabase migration up");
    println!("   6. Commit and deploy via GitHub Actions");
}

fn handle_error(error: KbError) {
    match error {
        KbError::InputNotFound(path) => {
            eprintln!("Error: File not found: {}", path.display());
        }
        KbError::NoEntries => {
            eprintln!("Error: No entries found in Excel file");
            eprintln!("Check that at least one sheet has a header row and question text.");
        }
        KbError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        KbError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the output directory exists and is writable.");
        }
        KbError::SheetNotFound(name) => {
            eprintln!("Error: Sheet '{}' not found", name);
        }
        KbError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        KbError::Json(json_err) => {
            eprintln!("Metadata Error: {}", json_err);
        }
    }
}
