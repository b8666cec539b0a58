//! The combine pipeline: load, combine, prune, translate, export

use tracing::info;

use crate::config::{Config, DuplicateHeaders, TargetLanguage};
use crate::error::{PipelineError, Result};
use crate::loader::{load_all, UploadedFile};
use crate::model::Table;
use crate::output::{export_xlsx, ExportBuffer};
use crate::transform::{combine, prune, prune_strict};
use crate::translate::{HeaderTranslator, Translator};

/// User selections that drive the optional stages
#[derive(Debug, Clone, Default)]
pub struct Selections {
    /// Columns to drop; empty means the drop step is off
    pub drop_columns: Vec<String>,
    /// Error on drop columns that do not exist
    pub strict_drop: bool,
    /// Header translation target
    pub target_language: TargetLanguage,
    /// Policy for colliding translated headers
    pub duplicate_headers: DuplicateHeaders,
}

impl From<&Config> for Selections {
    fn from(config: &Config) -> Self {
        Self {
            drop_columns: config.drop_columns.clone(),
            strict_drop: config.strict_drop,
            target_language: config.target_language,
            duplicate_headers: config.duplicate_headers,
        }
    }
}

/// Everything one run produces
#[derive(Debug)]
pub struct PipelineOutput {
    /// Table straight after combining, before any optional stage
    pub combined: Table,
    /// Final table that was exported
    pub table: Table,
    /// Encoded workbook
    pub buffer: ExportBuffer,
}

/// Stateless pipeline; every run recomputes everything from its inputs
pub struct Pipeline<'t> {
    selections: Selections,
    translator: Option<&'t dyn Translator>,
}

impl<'t> Pipeline<'t> {
    pub fn new(selections: Selections) -> Self {
        Self {
            selections,
            translator: None,
        }
    }

    /// Translation capability used when a target language is selected
    pub fn with_translator(mut self, translator: &'t dyn Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Run every stage over the uploaded files; any failure aborts the run
    pub fn run(&self, files: &[UploadedFile]) -> Result<PipelineOutput> {
        info!(files = files.len(), "starting combine run");

        let combined = combine(load_all(files)?);
        let table = self.transform(combined.clone())?;
        let buffer = export_xlsx(&table)?;

        Ok(PipelineOutput {
            combined,
            table,
            buffer,
        })
    }

    /// Apply the optional prune and translate stages
    pub fn transform(&self, table: Table) -> Result<Table> {
        let drop = self.selections.drop_columns.as_slice();
        let table = if self.selections.strict_drop {
            prune_strict(table, drop)?
        } else {
            prune(table, drop)
        };

        match (self.selections.target_language.code(), self.translator) {
            (Some(code), Some(translator)) => HeaderTranslator::new(translator)
                .with_duplicate_headers(self.selections.duplicate_headers)
                .translate(table, code),
            (Some(code), None) => Err(PipelineError::MissingTranslator(code.to_string())),
            (None, _) => Ok(table),
        }
    }
}
