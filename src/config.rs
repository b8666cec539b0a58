//! Configuration handling for sheetmerge

use std::path::PathBuf;
use std::time::Duration;

/// Default name of the exported workbook
pub const DEFAULT_OUTPUT_FILE: &str = "Combined_Data.xlsx";

/// Default LibreTranslate-compatible endpoint
pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.com";

/// Output format for table previews
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Target language for header translation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetLanguage {
    #[default]
    None,
    English,
    Spanish,
}

impl TargetLanguage {
    /// Language code sent to the translation service, `None` when disabled
    pub fn code(self) -> Option<&'static str> {
        match self {
            TargetLanguage::None => None,
            TargetLanguage::English => Some("en"),
            TargetLanguage::Spanish => Some("es"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TargetLanguage::None),
            "en" | "english" => Ok(TargetLanguage::English),
            "es" | "spanish" => Ok(TargetLanguage::Spanish),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::None => write!(f, "None"),
            TargetLanguage::English => write!(f, "English"),
            TargetLanguage::Spanish => write!(f, "Spanish"),
        }
    }
}

/// What to do when translated headers collide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateHeaders {
    /// Keep colliding names as-is; columns stay distinct by position
    #[default]
    Keep,
    /// Append " (2)", " (3)", ... to later occurrences
    Suffix,
}

/// Connection settings for the translation service
#[derive(Debug, Clone)]
pub struct TranslationSettings {
    /// Base URL of a LibreTranslate-compatible service
    pub endpoint: String,
    /// Optional API key
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Configuration for a combine run
#[derive(Debug, Clone)]
pub struct Config {
    /// Input spreadsheets, in combine order
    pub input_files: Vec<PathBuf>,
    /// Where the combined workbook is written
    pub output_file: PathBuf,
    /// Columns to drop after combining
    pub drop_columns: Vec<String>,
    /// Fail instead of ignoring drop columns that do not exist
    pub strict_drop: bool,
    /// Header translation target
    pub target_language: TargetLanguage,
    /// Policy for colliding translated headers
    pub duplicate_headers: DuplicateHeaders,
    /// Translation service settings
    pub translation: TranslationSettings,
    /// Number of rows shown in previews
    pub preview_rows: usize,
    /// Preview format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            drop_columns: Vec::new(),
            strict_drop: false,
            target_language: TargetLanguage::default(),
            duplicate_headers: DuplicateHeaders::default(),
            translation: TranslationSettings::default(),
            preview_rows: 10,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config with input files
    pub fn new(input_files: Vec<PathBuf>) -> Self {
        Self {
            input_files,
            ..Default::default()
        }
    }

    /// Set the output path
    pub fn with_output_file(mut self, path: PathBuf) -> Self {
        self.output_file = path;
        self
    }

    /// Set columns to drop
    pub fn with_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.drop_columns = columns;
        self
    }

    /// Enable strict drop checking
    pub fn with_strict_drop(mut self, strict: bool) -> Self {
        self.strict_drop = strict;
        self
    }

    /// Set header translation target
    pub fn with_target_language(mut self, language: TargetLanguage) -> Self {
        self.target_language = language;
        self
    }

    /// Set duplicate header policy
    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaders) -> Self {
        self.duplicate_headers = policy;
        self
    }

    /// Set translation service settings
    pub fn with_translation(mut self, settings: TranslationSettings) -> Self {
        self.translation = settings;
        self
    }

    /// Set preview row count
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Set preview format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}
