//! Data models for the analysis runner.
//!
//! This module contains the core data structures shared between the
//! analyzer backend, the transform step, and the registry wire protocol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a diagnostic, as reported by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The spec violates a rule but still compiles.
    Warning,
    /// The spec is invalid for the rule in question.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Error => write!(f, "error"),
        }
    }
}

impl DiagnosticSeverity {
    /// Parses a severity keyword from compiler output.
    ///
    /// Returns `None` for anything that is not a recognized severity,
    /// letting callers skip unrelated output lines.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "warning" => Some(DiagnosticSeverity::Warning),
            "error" => Some(DiagnosticSeverity::Error),
            _ => None,
        }
    }
}

/// A line/column pair inside the analyzed specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    /// The registry wire format for positions: `"line:column"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// The source span a diagnostic applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// One finding emitted by the compiler for the analyzed specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable description of the finding.
    pub message: String,
    /// Machine-readable rule code (e.g. `no-unused`).
    pub code: String,
    pub severity: DiagnosticSeverity,
    pub range: SourceRange,
}

/// The vendor-neutral record uploaded to the registry, one per [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniformAnalysisResult {
    /// Identifier of the compiler that produced the diagnostic.
    pub analyzer: String,
    pub description: String,
    pub analyzer_rule_name: String,
    pub severity: DiagnosticSeverity,
    /// Always absent in this flow; serialized as an explicit `null`.
    pub doc_url: Option<String>,
    pub details: ResultDetails,
}

/// Location details of a uniform result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDetails {
    pub range: RangeDetails,
}

/// Source range serialized as `"line:column"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDetails {
    pub start: String,
    pub end: String,
}

/// State of an analysis run as tracked by the registry.
///
/// A run transitions `started -> completed` on success or
/// `started -> failed` on any error; there is no other transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisState {
    Started,
    Completed,
    Failed,
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisState::Started => write!(f, "started"),
            AnalysisState::Completed => write!(f, "completed"),
            AnalysisState::Failed => write!(f, "failed"),
        }
    }
}

/// The uploaded report wrapper: `{ "results": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResults {
    pub results: Vec<UniformAnalysisResult>,
}

/// Body of a registry state update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdateRequest {
    pub state: AnalysisState,
    /// Correlation handle from the `started` response. Attached to every
    /// terminal update, even when empty; never sent on `started`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Uploaded report; only present on `completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<ValidationResults>,
}

impl StateUpdateRequest {
    /// The opening transition of a run.
    pub fn started() -> Self {
        Self {
            state: AnalysisState::Started,
            operation_id: None,
            validation_results: None,
        }
    }

    /// The successful terminal transition, carrying the full report.
    pub fn completed(operation_id: String, results: Vec<UniformAnalysisResult>) -> Self {
        Self {
            state: AnalysisState::Completed,
            operation_id: Some(operation_id),
            validation_results: Some(ValidationResults { results }),
        }
    }

    /// The failing terminal transition. The handle may still be empty if
    /// the run failed before `started` was acknowledged.
    pub fn failed(operation_id: String) -> Self {
        Self {
            state: AnalysisState::Failed,
            operation_id: Some(operation_id),
            validation_results: None,
        }
    }
}

/// Registry response to a state update.
///
/// `operationId` is only meaningful on the `started` call and may be
/// missing entirely; callers default it to an empty handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdateResponse {
    #[serde(default)]
    pub operation_id: Option<String>,
}

/// Immutable input identifying one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Registry identifier of the API definition to analyze.
    pub definition_id: String,
    /// Ruleset file applied by the analyzer backend, if any.
    pub ruleset_path: Option<PathBuf>,
}
