//! Evidence gathering for one question.
//!
//! Runs the web and encyclopedia lookups concurrently, since they are
//! independent and target different services. Either lookup failing degrades
//! to an empty list for that origin; gathering itself never fails. Retries
//! are not this layer's job.

use tracing::{debug, warn};

use crate::traits::{EncyclopediaSearcher, WebSearcher};
use crate::types::{EvidenceBundle, EvidenceItem, GatherConfig};

/// Gather evidence for a question from both search collaborators.
///
/// Output ordering is web results first (provider-ranked), then encyclopedia
/// results.
pub async fn gather<W, E>(
    web: &W,
    encyclopedia: &E,
    question: &str,
    config: &GatherConfig,
) -> EvidenceBundle
where
    W: WebSearcher,
    E: EncyclopediaSearcher,
{
    let (web_results, encyclopedia_results) = tokio::join!(
        web.search(question, config.max_web_results),
        encyclopedia.search(question, config.max_encyclopedia_results),
    );

    let web_items: Vec<EvidenceItem> = match web_results {
        Ok(hits) => hits
            .into_iter()
            .map(|hit| EvidenceItem::web(hit.url, hit.content))
            .collect(),
        Err(err) => {
            warn!(question, error = %err, "web search failed, continuing without it");
            Vec::new()
        }
    };

    let encyclopedia_items: Vec<EvidenceItem> = match encyclopedia_results {
        Ok(hits) => hits
            .into_iter()
            .map(|hit| EvidenceItem::encyclopedia(hit.title, hit.snippet))
            .collect(),
        Err(err) => {
            warn!(question, error = %err, "encyclopedia search failed, continuing without it");
            Vec::new()
        }
    };

    debug!(
        question,
        web = web_items.len(),
        encyclopedia = encyclopedia_items.len(),
        "gathered evidence"
    );

    EvidenceBundle::from_parts(web_items, encyclopedia_items)
}
