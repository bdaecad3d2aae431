//! Static-analysis backends.
//!
//! The orchestrator treats the compiler as a black box: give it the raw
//! spec content, get back a sequence of diagnostics. Any backend that
//! satisfies [`Analyzer`] can stand behind that contract; the shipped
//! one drives the TypeSpec compiler as a subprocess.

pub mod typespec;

pub use typespec::TypeSpecAnalyzer;

use crate::models::Diagnostic;
use anyhow::Result;
use async_trait::async_trait;

/// A static-analysis backend for API specifications.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Constant identifier of this backend, recorded on every uploaded
    /// result (e.g. `"typespec"`).
    fn id(&self) -> &'static str;

    /// Compiles the raw spec content and returns the diagnostics it
    /// produced, in emission order. Compilation faults (malformed input,
    /// internal compiler errors) surface as `Err`.
    async fn compile(&self, content: &str) -> Result<Vec<Diagnostic>>;
}
