//! TypeSpec compiler backend.
//!
//! Stages the fetched spec content into a temporary `.tsp` file and runs
//! the TypeSpec CLI over it (`tsp compile <file> --no-emit`), collecting
//! diagnostics from the compiler's output. Lines that do not look like
//! diagnostics (progress chatter, summaries) are ignored.

use crate::analyzer::Analyzer;
use crate::models::{Diagnostic, DiagnosticSeverity, Position, SourceRange};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Identifier recorded on every result produced by this backend.
pub const TYPESPEC_ANALYZER_ID: &str = "typespec";

/// Analyzer backend that shells out to the TypeSpec CLI.
pub struct TypeSpecAnalyzer {
    /// Compiler executable, usually `tsp`.
    command: String,
    /// Optional ruleset/config file passed to the compiler.
    ruleset: Option<PathBuf>,
}

impl TypeSpecAnalyzer {
    pub fn new(command: String, ruleset: Option<PathBuf>) -> Self {
        Self { command, ruleset }
    }
}

#[async_trait]
impl Analyzer for TypeSpecAnalyzer {
    fn id(&self) -> &'static str {
        TYPESPEC_ANALYZER_ID
    }

    async fn compile(&self, content: &str) -> Result<Vec<Diagnostic>> {
        // The CLI compiles files, not stdin, so stage the content on disk.
        let mut spec_file = tempfile::Builder::new()
            .prefix("speclint-")
            .suffix(".tsp")
            .tempfile()
            .context("Failed to create temporary spec file")?;
        spec_file
            .write_all(content.as_bytes())
            .context("Failed to stage spec content")?;

        let mut command = Command::new(&self.command);
        command.arg("compile").arg(spec_file.path()).arg("--no-emit");
        if let Some(ref ruleset) = self.ruleset {
            command.arg("--config").arg(ruleset);
        }

        debug!("Running {} compile {:?}", self.command, spec_file.path());
        let output = command
            .output()
            .await
            .with_context(|| format!("Failed to launch compiler command: {}", self.command))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = parse_compiler_output(&stdout, &stderr);

        // The compiler exits non-zero when it finds errors; that is a
        // normal analysis outcome as long as diagnostics were emitted.
        if !output.status.success() && diagnostics.is_empty() {
            bail!(
                "Compiler exited with {} and no diagnostics: {}",
                output.status,
                stderr.trim()
            );
        }

        debug!("Compiler produced {} diagnostics", diagnostics.len());
        Ok(diagnostics)
    }
}

/// Parses diagnostics from the compiler's stdout and stderr, in order.
fn parse_compiler_output(stdout: &str, stderr: &str) -> Vec<Diagnostic> {
    stdout
        .lines()
        .chain(stderr.lines())
        .filter_map(parse_diagnostic_line)
        .collect()
}

/// Parses one output line of the form
/// `<file>:<line>:<col>[-<line>:<col>] - <severity> <code>: <message>`.
///
/// Returns `None` for any line that does not match, so callers can run
/// this over the full output and keep only real diagnostics.
fn parse_diagnostic_line(line: &str) -> Option<Diagnostic> {
    let (location, rest) = line.trim().split_once(" - ")?;
    let (head, message) = rest.split_once(": ")?;
    let (severity, code) = head.split_once(' ')?;
    let severity = DiagnosticSeverity::parse(severity)?;

    if code.is_empty() || message.is_empty() {
        return None;
    }

    Some(Diagnostic {
        message: message.to_string(),
        code: code.to_string(),
        severity,
        range: parse_span(location)?,
    })
}

/// Parses `<file>:<line>:<col>` or `<file>:<line>:<col>-<line>:<col>`.
/// A span without an explicit end collapses to its start position.
fn parse_span(location: &str) -> Option<SourceRange> {
    let (head, last) = location.rsplit_once(':')?;

    // Ranged form first: "<file>:<sl>:<sc>-<el>" + ":<ec>". A dash in the
    // file name fails the numeric parse and falls through to the simple form.
    if let Some((prefix, end_line)) = head.rsplit_once('-') {
        if let (Ok(end_line), Ok(end_char)) = (end_line.parse(), last.parse()) {
            if let Some((file_and_line, start_char)) = prefix.rsplit_once(':') {
                if let Some((_, start_line)) = file_and_line.rsplit_once(':') {
                    if let (Ok(start_line), Ok(start_char)) =
                        (start_line.parse(), start_char.parse())
                    {
                        return Some(SourceRange::new(
                            Position::new(start_line, start_char),
                            Position::new(end_line, end_char),
                        ));
                    }
                }
            }
        }
    }

    let character: u32 = last.parse().ok()?;
    let (_, line) = head.rsplit_once(':')?;
    let line: u32 = line.parse().ok()?;
    let position = Position::new(line, character);
    Some(SourceRange::new(position, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_diagnostic() {
        let diagnostic =
            parse_diagnostic_line("main.tsp:2:0 - warning no-unused: Unused import").unwrap();
        assert_eq!(diagnostic.message, "Unused import");
        assert_eq!(diagnostic.code, "no-unused");
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Warning);
        assert_eq!(diagnostic.range.start, Position::new(2, 0));
        assert_eq!(diagnostic.range.end, Position::new(2, 0));
    }

    #[test]
    fn test_parse_ranged_diagnostic() {
        let diagnostic = parse_diagnostic_line(
            "main.tsp:2:0-2:10 - error invalid-ref: Unknown identifier Pet",
        )
        .unwrap();
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
        assert_eq!(diagnostic.range.start, Position::new(2, 0));
        assert_eq!(diagnostic.range.end, Position::new(2, 10));
        assert_eq!(diagnostic.message, "Unknown identifier Pet");
    }

    #[test]
    fn test_parse_dashed_file_name() {
        let diagnostic =
            parse_diagnostic_line("my-spec.tsp:3:1 - warning no-unused: Unused import").unwrap();
        assert_eq!(diagnostic.range.start, Position::new(3, 1));
        assert_eq!(diagnostic.range.end, Position::new(3, 1));
    }

    #[test]
    fn test_chatter_lines_are_ignored() {
        assert!(parse_diagnostic_line("TypeSpec compiler v0.55.0").is_none());
        assert!(parse_diagnostic_line("Compilation completed successfully.").is_none());
        assert!(parse_diagnostic_line("").is_none());
        // Severity must be a recognized keyword.
        assert!(parse_diagnostic_line("main.tsp:1:0 - note some-code: hello").is_none());
    }

    #[test]
    fn test_parse_output_preserves_order() {
        let stdout = "\
main.tsp:2:0 - warning no-unused: Unused import
Some unrelated progress line
main.tsp:9:4-9:20 - error invalid-ref: Unknown identifier Pet
";
        let diagnostics = parse_compiler_output(stdout, "");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code, "no-unused");
        assert_eq!(diagnostics[1].code, "invalid-ref");
    }

    #[tokio::test]
    async fn test_compile_with_silent_command_yields_no_diagnostics() {
        // `true` exits 0 without output: a clean compile with no findings.
        let analyzer = TypeSpecAnalyzer::new("true".to_string(), None);
        let diagnostics = analyzer.compile("model Pet {}").await.unwrap();
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_compile_failure_without_diagnostics_is_an_error() {
        let analyzer = TypeSpecAnalyzer::new("false".to_string(), None);
        assert!(analyzer.compile("model Pet {}").await.is_err());
    }
}
