//! Aggregates over the citation ledger
//!
//! Both reports are computed from a single consistent read of the ledger,
//! so collected plus pending always equals the total fine volume even under
//! concurrent settlements.

use serde::Serialize;
use std::collections::HashMap;

use citation_core::{CitationError, CitationStatus};

use crate::storage::CitationStore;

/// Ledger-wide totals
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_violations: u64,
    /// Sum of fines across all citations, regardless of status
    pub total_fines: i64,
    /// Sum of fines over paid citations
    pub collected_fines: i64,
    /// Sum of fines over citations not yet paid
    pub pending_fines: i64,
}

/// Citation count for one violation type
#[derive(Debug, Serialize)]
pub struct TypeBreakdown {
    pub type_name: String,
    pub count: u64,
}

/// Compute ledger-wide totals from one consistent read.
pub async fn summary(store: &dyn CitationStore) -> Result<Summary, CitationError> {
    let citations = store.list_citations().await.map_err(CitationError::from)?;

    let mut report = Summary {
        total_violations: citations.len() as u64,
        total_fines: 0,
        collected_fines: 0,
        pending_fines: 0,
    };

    for citation in &citations {
        report.total_fines += citation.fine_amount;
        if citation.status == CitationStatus::Paid {
            report.collected_fines += citation.fine_amount;
        } else {
            report.pending_fines += citation.fine_amount;
        }
    }

    Ok(report)
}

/// Count citations per violation type, sorted by count descending then name.
///
/// Types with no citations are omitted.
pub async fn by_type(store: &dyn CitationStore) -> Result<Vec<TypeBreakdown>, CitationError> {
    let citations = store.list_citations().await.map_err(CitationError::from)?;
    let types = store
        .list_violation_types()
        .await
        .map_err(CitationError::from)?;

    let names: HashMap<_, _> = types.into_iter().map(|t| (t.id, t.name)).collect();

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for citation in &citations {
        if let Some(name) = names.get(&citation.violation_type) {
            *counts.entry(name.as_str()).or_default() += 1;
        }
    }

    let mut breakdown: Vec<TypeBreakdown> = counts
        .into_iter()
        .map(|(type_name, count)| TypeBreakdown {
            type_name: type_name.to_string(),
            count,
        })
        .collect();

    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.type_name.cmp(&b.type_name)));
    Ok(breakdown)
}
