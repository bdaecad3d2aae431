//! Diagnostic normalization.
//!
//! Maps compiler diagnostics 1:1 into the vendor-neutral record shape
//! the registry stores. This step is pure: it never fails, never
//! reorders, and never drops a diagnostic.

use crate::models::{Diagnostic, RangeDetails, ResultDetails, UniformAnalysisResult};

/// Converts diagnostics into uniform results, preserving emission order.
///
/// `analyzer` is the constant backend identifier stamped on every record.
pub fn to_uniform_results(analyzer: &str, diagnostics: &[Diagnostic]) -> Vec<UniformAnalysisResult> {
    diagnostics
        .iter()
        .map(|diagnostic| UniformAnalysisResult {
            analyzer: analyzer.to_string(),
            description: diagnostic.message.clone(),
            analyzer_rule_name: diagnostic.code.clone(),
            severity: diagnostic.severity,
            doc_url: None,
            details: ResultDetails {
                range: RangeDetails {
                    start: diagnostic.range.start.to_string(),
                    end: diagnostic.range.end.to_string(),
                },
            },
        })
        .collect()
}
