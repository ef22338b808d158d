//! Financial Data Service - normalizes uploaded financial files
//!
//! Parsing is delegated to a `FinancialParser`. The shipped parser only
//! records which files were provided.

use std::sync::Arc;

use crate::domain::value_objects::{FinancialData, UploadedFile};

/// Turns uploaded spreadsheets into normalized financials
pub trait FinancialParser: Send + Sync {
    fn parse(&self, files: &[UploadedFile]) -> FinancialData;
}

/// Lists source files without reading them
#[derive(Debug, Default, Clone, Copy)]
pub struct FileManifestParser;

impl FinancialParser for FileManifestParser {
    fn parse(&self, files: &[UploadedFile]) -> FinancialData {
        FinancialData {
            source_files: files.iter().map(|file| file.name.clone()).collect(),
            ..FinancialData::default()
        }
    }
}

pub struct FinancialDataService {
    parser: Arc<dyn FinancialParser>,
}

impl FinancialDataService {
    pub fn new(parser: Arc<dyn FinancialParser>) -> Self {
        Self { parser }
    }

    pub fn process_financials(&self, files: &[UploadedFile]) -> FinancialData {
        let data = self.parser.parse(files);
        tracing::info!("Processed {} financial files", data.source_files.len());
        data
    }
}

impl Default for FinancialDataService {
    fn default() -> Self {
        Self::new(Arc::new(FileManifestParser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parser_only_lists_files() {
        let service = FinancialDataService::default();
        let files = vec![
            UploadedFile::named("model.xlsx"),
            UploadedFile::named("budget.csv"),
        ];

        let data = service.process_financials(&files);
        assert_eq!(data.source_files, vec!["model.xlsx", "budget.csv"]);
        assert!(data.revenue.is_empty());
        assert!(data.ebitda.is_empty());
        assert!(data.assumptions.is_empty());
    }

    #[test]
    fn test_no_files_yields_empty_shell() {
        let data = FinancialDataService::default().process_financials(&[]);
        assert_eq!(data, FinancialData::default());
    }

    #[test]
    fn test_parser_is_swappable() {
        struct FixedParser;
        impl FinancialParser for FixedParser {
            fn parse(&self, _files: &[UploadedFile]) -> FinancialData {
                FinancialData {
                    revenue: vec![10.0, 13.0],
                    ..FinancialData::default()
                }
            }
        }

        let data = FinancialDataService::new(Arc::new(FixedParser)).process_financials(&[]);
        assert_eq!(data.revenue, vec![10.0, 13.0]);
    }
}
