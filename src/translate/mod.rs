//! Header translation through an external translation capability

mod libre;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::config::DuplicateHeaders;
use crate::error::{PipelineError, Result, TranslateError};
use crate::model::Table;

pub use libre::LibreTranslateClient;

/// A text translation capability. Source language is auto-detected.
pub trait Translator {
    /// Translate `text` into the language identified by `target`
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target)
    }
}

/// Renames every column of a table through a [`Translator`]
pub struct HeaderTranslator<T> {
    translator: T,
    duplicates: DuplicateHeaders,
}

impl<T: Translator> HeaderTranslator<T> {
    pub fn new(translator: T) -> Self {
        Self {
            translator,
            duplicates: DuplicateHeaders::default(),
        }
    }

    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaders) -> Self {
        self.duplicates = policy;
        self
    }

    /// Translate all headers into `target`.
    ///
    /// One call per column, in column order. Names are only committed once
    /// every call has succeeded; the first failure aborts with the column name.
    pub fn translate(&self, mut table: Table, target: &str) -> Result<Table> {
        let mut translated = Vec::with_capacity(table.column_count());

        for column in &table.columns {
            let name = self
                .translator
                .translate(&column.name, target)
                .map_err(|source| PipelineError::Translation {
                    column: column.name.clone(),
                    source,
                })?;
            debug!(from = %column.name, to = %name, language = target, "translated header");
            translated.push(name);
        }

        if self.duplicates == DuplicateHeaders::Suffix {
            suffix_duplicates(&mut translated);
        }

        for (column, name) in table.columns.iter_mut().zip(translated) {
            column.name = name;
        }

        info!(columns = table.column_count(), language = target, "translated headers");
        Ok(table)
    }
}

/// Append " (2)", " (3)", ... to repeated names, skipping names already taken
fn suffix_duplicates(names: &mut [String]) {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    let mut taken: Vec<String> = Vec::with_capacity(names.len());

    for name in names.iter_mut() {
        if taken.contains(name) {
            let count = counts.entry(name.clone()).or_insert(1);
            let mut candidate;
            loop {
                *count += 1;
                candidate = format!("{} ({})", name, count);
                if !taken.contains(&candidate) {
                    break;
                }
            }
            *name = candidate;
        }
        taken.push(name.clone());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Dictionary-backed translator that fails on unknown words
    pub struct FakeTranslator {
        words: HashMap<String, String>,
        pub calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeTranslator {
        pub fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                words: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn spanish() -> Self {
            Self::new(&[("Name", "Nombre"), ("Age", "Edad"), ("City", "Ciudad")])
        }
    }

    impl Translator for FakeTranslator {
        fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
            self.calls
                .borrow_mut()
                .push((text.to_string(), target.to_string()));
            self.words
                .get(text)
                .cloned()
                .ok_or_else(|| TranslateError::Service {
                    status: 400,
                    message: format!("no translation for {}", text),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTranslator;
    use super::*;
    use crate::model::CellValue;

    fn sample() -> Table {
        let mut table = Table::from_names(&["Name", "Age"]);
        table.add_row(vec!["Alice".into(), 30i64.into()], 2);
        table
    }

    #[test]
    fn test_translate_headers() {
        let fake = FakeTranslator::spanish();
        let translated = HeaderTranslator::new(&fake).translate(sample(), "es").unwrap();

        assert_eq!(translated.column_names(), vec!["Nombre", "Edad"]);
        assert_eq!(translated.rows, sample().rows);
        assert_eq!(
            *fake.calls.borrow(),
            vec![
                ("Name".to_string(), "es".to_string()),
                ("Age".to_string(), "es".to_string())
            ]
        );
    }

    #[test]
    fn test_translate_failure_names_column() {
        let fake = FakeTranslator::new(&[("Name", "Nombre")]);
        let err = HeaderTranslator::new(&fake)
            .translate(sample(), "es")
            .unwrap_err();

        match err {
            PipelineError::Translation { column, .. } => assert_eq!(column, "Age"),
            other => panic!("expected translation error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let fake = FakeTranslator::new(&[("Name", "Nombre"), ("Age", "Nombre")]);
        let translated = HeaderTranslator::new(&fake).translate(sample(), "es").unwrap();

        assert_eq!(translated.column_names(), vec!["Nombre", "Nombre"]);
        assert_eq!(translated.rows[0].cells[1], CellValue::Int(30));
    }

    #[test]
    fn test_duplicates_suffixed() {
        let fake = FakeTranslator::new(&[("Name", "Nombre"), ("Age", "Nombre")]);
        let translated = HeaderTranslator::new(&fake)
            .with_duplicate_headers(DuplicateHeaders::Suffix)
            .translate(sample(), "es")
            .unwrap();

        assert_eq!(translated.column_names(), vec!["Nombre", "Nombre (2)"]);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let mut names = vec!["a".to_string(), "a (2)".to_string(), "a".to_string()];
        suffix_duplicates(&mut names);
        assert_eq!(names, vec!["a", "a (2)", "a (3)"]);
    }
}
