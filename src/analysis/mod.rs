//! The analysis orchestrator.
//!
//! Sequences one analysis run against the registry: record `started`,
//! fetch the spec content, compile it, normalize the diagnostics, and
//! record `completed` with the report attached. Any failure along the
//! way funnels into a single cleanup path that records `failed` with
//! whatever operation handle was captured, then re-raises.

pub mod transform;

pub use transform::to_uniform_results;

use crate::analyzer::Analyzer;
use crate::models::{AnalysisRequest, StateUpdateRequest};
use crate::registry::RegistryClient;
use anyhow::Result;
use tracing::{error, info};

/// Runs the full analyze-and-upload protocol for one request.
///
/// Every collaborator call is attempted exactly once; there are no
/// retries and no intermediate states. On failure the original error is
/// returned to the caller after the `failed` update lands. If that
/// cleanup update itself fails, its error propagates instead.
pub async fn analyze_and_upload<R, A>(
    request: &AnalysisRequest,
    registry: &R,
    analyzer: &A,
) -> Result<()>
where
    R: RegistryClient + ?Sized,
    A: Analyzer + ?Sized,
{
    let mut operation_id = String::new();

    match run_protocol(request, registry, analyzer, &mut operation_id).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!(
                "Error occurred during analysis of {}: {:#}",
                request.definition_id, err
            );
            registry
                .update_analysis_state(&StateUpdateRequest::failed(operation_id))
                .await?;
            Err(err)
        }
    }
}

/// The happy-path sequence. The operation handle is written through
/// `operation_id` as soon as it is known so the cleanup path in
/// [`analyze_and_upload`] can attach it even on mid-run failures.
async fn run_protocol<R, A>(
    request: &AnalysisRequest,
    registry: &R,
    analyzer: &A,
    operation_id: &mut String,
) -> Result<()>
where
    R: RegistryClient + ?Sized,
    A: Analyzer + ?Sized,
{
    info!("Starting analysis of definition {}", request.definition_id);
    let response = registry
        .update_analysis_state(&StateUpdateRequest::started())
        .await?;
    *operation_id = response.operation_id.unwrap_or_default();
    info!(
        "Operation id: {}",
        if operation_id.is_empty() {
            "empty"
        } else {
            operation_id.as_str()
        }
    );

    info!("Fetching specification content");
    let content = registry.get_specification_content().await?;

    info!("Compiling specification with {}", analyzer.id());
    let diagnostics = analyzer.compile(&content).await?;

    info!("Transforming {} diagnostics", diagnostics.len());
    let results = transform::to_uniform_results(analyzer.id(), &diagnostics);

    info!("Uploading report");
    registry
        .update_analysis_state(&StateUpdateRequest::completed(
            operation_id.clone(),
            results,
        ))
        .await?;

    info!("Analysis of {} complete", request.definition_id);
    Ok(())
}
