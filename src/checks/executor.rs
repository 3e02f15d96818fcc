//! Runs one check descriptor against a tenant

use crate::admin::{self, TenantApi};
use crate::checks::outcome::{CheckOutcome, ResourceResult};
use crate::checks::CheckDescriptor;
use crate::error::Result;

/// Execute a check and fold any failure into an `Error` outcome
///
/// Retrieval and evaluation errors never escape; their message is kept
/// verbatim in the outcome. Nothing is retried.
pub async fn execute<A: TenantApi>(api: &A, check: &CheckDescriptor) -> CheckOutcome {
    let id = check.id();
    tracing::debug!("Running {} against {}", id, check.source.name());

    let outcome = match evaluate(api, check).await {
        Ok(results) => CheckOutcome::from_results(results),
        Err(e) => {
            tracing::debug!("{} failed: {}", id, e);
            CheckOutcome::error(e.to_string())
        }
    };

    tracing::info!(
        "{} finished: {} ({} result(s))",
        id,
        outcome.status(),
        outcome.details().len()
    );
    outcome
}

async fn evaluate<A: TenantApi>(api: &A, check: &CheckDescriptor) -> Result<Vec<ResourceResult>> {
    let records = admin::fetch(api, check.source).await?;
    check.rule.apply(&records, check.source.is_collection())
}
