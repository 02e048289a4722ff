//! Source-quality audit.
//!
//! Scores the sources cited across all fact checks against tables of trusted
//! and questionable domains, weighted by domain diversity. The score rides
//! along in report metadata as a secondary signal; it never changes the
//! judgment rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::VerificationAnalysis;

/// Domains (or domain fragments) treated as reliable.
const TRUSTED_DOMAINS: &[&str] = &[
    // Academic and research
    "edu",
    "ac.uk",
    "research",
    "sciencedirect.com",
    "nature.com",
    "science",
    "ncbi.nlm.nih.gov",
    "pubmed",
    "journals",
    "doi.org",
    "springer",
    // Government
    "gov",
    "nih.gov",
    "cdc.gov",
    "who.int",
    "un.org",
    "europa.eu",
    // Medical
    "mayoclinic",
    "clevelandclinic",
    "health",
    "medical",
    "medicine",
    // News outlets with fact-checking desks
    "reuters.com",
    "apnews.com",
    "bbc",
    "npr",
    "pbs",
    // Fact-checking sites
    "factcheck",
    "politifact",
    "snopes",
    "fullfact",
    // Encyclopedia marker used by the gatherer
    "wikipedia",
];

/// Domain fragments that lower the score.
const QUESTIONABLE_DOMAINS: &[&str] = &[
    "blog",
    "forum",
    "social",
    "opinion",
    "personal",
    ".xyz",
    ".info",
    "conspiracy",
    "alternative",
    "rumor",
    "partisan",
    "biased",
];

/// Outcome of the source-quality audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAudit {
    /// Quality score in [0.0, 1.0], 0.5 baseline. 0.0 means no sources were
    /// available to evaluate.
    pub score: f64,

    /// Human-readable summary of the evaluation.
    pub reasoning: String,

    pub total_sources: usize,
    pub trusted_sources: usize,
    pub questionable_sources: usize,
    pub distinct_domains: usize,
}

/// Audit the sources cited across all analyses.
pub fn audit_sources(analyses: &[VerificationAnalysis]) -> SourceAudit {
    let mut total = 0usize;
    let mut trusted = 0usize;
    let mut questionable = 0usize;
    let mut domains: HashSet<String> = HashSet::new();

    for analysis in analyses {
        for source in &analysis.sources {
            total += 1;
            let domain = extract_domain(source);
            domains.insert(domain.clone());

            if TRUSTED_DOMAINS.iter().any(|t| domain.contains(t)) {
                trusted += 1;
            }
            if QUESTIONABLE_DOMAINS.iter().any(|q| domain.contains(q)) {
                questionable += 1;
            }
        }
    }

    if total == 0 {
        return SourceAudit {
            score: 0.0,
            reasoning: "No sources provided for evaluation.".to_string(),
            total_sources: 0,
            trusted_sources: 0,
            questionable_sources: 0,
            distinct_domains: 0,
        };
    }

    let trusted_ratio = trusted as f64 / total as f64;
    let questionable_ratio = questionable as f64 / total as f64;

    // More distinct domains across checks means a stronger signal.
    let diversity = (domains.len() as f64 / analyses.len().max(1) as f64).min(1.0);

    let score = ((trusted_ratio - questionable_ratio) * diversity + 0.5).clamp(0.0, 1.0);

    let reasoning = format!(
        "Evaluated {total} sources from {} domains: {trusted} trusted, \
         {questionable} potentially questionable (diversity factor {diversity:.2}).",
        domains.len(),
    );

    SourceAudit {
        score,
        reasoning,
        total_sources: total,
        trusted_sources: trusted,
        questionable_sources: questionable,
        distinct_domains: domains.len(),
    }
}

/// Lowercased host for URLs, the lowercased string itself otherwise.
fn extract_domain(source: &str) -> String {
    Url::parse(source)
        .ok()
        .and_then(|url| url.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_else(|| source.to_lowercase())
}
