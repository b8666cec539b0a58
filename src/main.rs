//! sheetmerge - Combine spreadsheets into a single workbook

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sheetmerge::config::{
    Config, DuplicateHeaders, OutputFormat, TargetLanguage, TranslationSettings,
    DEFAULT_OUTPUT_FILE, DEFAULT_TRANSLATE_URL,
};
use sheetmerge::loader::{load_all, UploadedFile};
use sheetmerge::output::OutputFactory;
use sheetmerge::transform::combine;
use sheetmerge::translate::{LibreTranslateClient, Translator};
use sheetmerge::{Pipeline, Selections};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    None,
    #[value(alias = "english")]
    En,
    #[value(alias = "spanish")]
    Es,
}

impl From<CliLanguage> for TargetLanguage {
    fn from(l: CliLanguage) -> Self {
        match l {
            CliLanguage::None => TargetLanguage::None,
            CliLanguage::En => TargetLanguage::English,
            CliLanguage::Es => TargetLanguage::Spanish,
        }
    }
}

/// Combine multiple spreadsheets into a single Excel workbook
#[derive(Parser, Debug)]
#[command(name = "sheetmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spreadsheet files to combine, in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path of the combined workbook
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Column(s) to drop from the combined data (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    drop: Vec<String>,

    /// Fail if a column to drop does not exist
    #[arg(long)]
    strict_drop: bool,

    /// Translate column headers into this language
    #[arg(short, long, value_enum, default_value = "none")]
    language: CliLanguage,

    /// Base URL of a LibreTranslate-compatible service
    #[arg(long, env = "SHEETMERGE_TRANSLATE_URL", default_value = DEFAULT_TRANSLATE_URL)]
    translate_url: String,

    /// API key for the translation service
    #[arg(long, env = "SHEETMERGE_TRANSLATE_API_KEY", hide_env_values = true)]
    translate_api_key: Option<String>,

    /// Timeout in seconds for each translation request
    #[arg(long, default_value_t = 30)]
    translate_timeout: u64,

    /// Append numeric suffixes to duplicate translated headers
    #[arg(long)]
    suffix_duplicates: bool,

    /// Number of rows shown in previews
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,

    /// Preview format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Do not print previews
    #[arg(long)]
    no_preview: bool,

    /// Print the combined column names and exit
    #[arg(long)]
    list_columns: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "sheetmerge=warn",
        1 => "sheetmerge=info",
        _ => "sheetmerge=debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.files)
        .with_output_file(cli.output)
        .with_drop_columns(cli.drop)
        .with_strict_drop(cli.strict_drop)
        .with_target_language(cli.language.into())
        .with_duplicate_headers(if cli.suffix_duplicates {
            DuplicateHeaders::Suffix
        } else {
            DuplicateHeaders::Keep
        })
        .with_translation(TranslationSettings {
            endpoint: cli.translate_url,
            api_key: cli.translate_api_key,
            timeout: Duration::from_secs(cli.translate_timeout),
        })
        .with_preview_rows(cli.preview_rows)
        .with_output_format(cli.format.into());

    let files = config
        .input_files
        .iter()
        .map(|path| {
            UploadedFile::from_path(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.list_columns {
        let combined = combine(load_all(&files)?);
        for name in combined.column_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let client = match config.target_language.code() {
        Some(_) => Some(
            LibreTranslateClient::new(&config.translation)
                .context("Failed to create translation client")?,
        ),
        None => None,
    };

    let mut pipeline = Pipeline::new(Selections::from(&config));
    if let Some(client) = &client {
        pipeline = pipeline.with_translator(client as &dyn Translator);
    }

    let output = pipeline.run(&files)?;

    if !cli.no_preview {
        let formatter = OutputFactory::create(config.output_format);
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        formatter.render(
            &output.combined,
            "Combined Data Preview",
            config.preview_rows,
            &mut stdout,
        )?;
        if output.table != output.combined {
            formatter.render(
                &output.table,
                "Updated Data Preview",
                config.preview_rows,
                &mut stdout,
            )?;
        }
    }

    output
        .buffer
        .write_to(&config.output_file)
        .with_context(|| format!("Failed to write {}", config.output_file.display()))?;

    eprintln!(
        "Wrote {} ({} rows, {} columns)",
        config.output_file.display(),
        output.table.row_count(),
        output.table.column_count()
    );

    Ok(())
}
