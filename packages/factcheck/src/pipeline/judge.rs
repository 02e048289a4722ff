//! Judgment aggregation: many per-question analyses, one verdict.
//!
//! A state machine over aggregate counts, not individual items. The decision
//! order encodes the system's risk posture: being wrong about "real" is
//! worse than being wrong about "uncertain", so false signals dominate. Every
//! branch floors its confidence at 0.5: a judgment was reached, and the
//! system never reports one as worse than a coin flip.

use crate::types::{
    clamp_confidence, JudgeConfig, Judgment, Verdict, VerificationAnalysis, VerificationStatus,
};

/// Coarse grouping used during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    VerifiedLike,
    FalseLike,
    UncertainLike,
}

fn bucket(status: VerificationStatus) -> Bucket {
    match status {
        VerificationStatus::Verified => Bucket::VerifiedLike,
        VerificationStatus::False
        | VerificationStatus::Misleading
        | VerificationStatus::PartiallyTrue => Bucket::FalseLike,
        VerificationStatus::Unsubstantiated
        | VerificationStatus::UnableToVerify
        | VerificationStatus::Error => Bucket::UncertainLike,
    }
}

/// Aggregate all analyses into one judgment with default thresholds.
pub fn judge(analyses: &[VerificationAnalysis]) -> Judgment {
    judge_with_config(analyses, &JudgeConfig::default())
}

/// Aggregate all analyses into one judgment.
///
/// Deterministic and stateless: the same analysis list always produces the
/// same judgment, reason string included.
pub fn judge_with_config(analyses: &[VerificationAnalysis], config: &JudgeConfig) -> Judgment {
    if analyses.is_empty() {
        return Judgment::new(Verdict::Uncertain, 0.0, "No analyses to judge.");
    }

    let total = analyses.len();
    let mut verified = 0usize;
    let mut false_like = 0usize;
    let mut uncertain = 0usize;
    let mut best_verified_confidence: f64 = 0.0;
    let mut dominant_false: Option<f64> = None;

    for analysis in analyses {
        match bucket(analysis.status) {
            Bucket::VerifiedLike => {
                verified += 1;
                best_verified_confidence = best_verified_confidence.max(analysis.confidence);
            }
            Bucket::FalseLike => {
                false_like += 1;
                if analysis.confidence >= config.dominant_false_threshold {
                    let current = dominant_false.unwrap_or(0.0);
                    dominant_false = Some(current.max(analysis.confidence));
                }
            }
            Bucket::UncertainLike => uncertain += 1,
        }
    }

    // Error analyses carry confidence 0 by construction, so a failed check
    // degrades the average without aborting aggregation.
    let avg_confidence =
        analyses.iter().map(|a| a.confidence).sum::<f64>() / total as f64;

    let summary = summarize(analyses, verified, false_like, uncertain, avg_confidence);

    // First matching rule wins.
    if let Some(confidence) = dominant_false {
        return Judgment::new(Verdict::Fake, confidence.max(0.5), summary);
    }

    if false_like > 0 {
        return Judgment::new(
            Verdict::Misleading,
            avg_confidence.clamp(0.5, 0.8),
            summary,
        );
    }

    let verified_ratio = verified as f64 / total as f64;
    if verified_ratio >= config.real_ratio_threshold
        && avg_confidence >= config.real_confidence_threshold
    {
        let confidence = avg_confidence.max(best_verified_confidence).clamp(0.5, 1.0);
        return Judgment::new(Verdict::Real, confidence, summary);
    }

    Judgment::new(Verdict::Uncertain, avg_confidence.clamp(0.5, 0.7), summary)
}

/// Build the reproducible reason string: bucket counts, average confidence,
/// and a brief excerpt per question in input order.
fn summarize(
    analyses: &[VerificationAnalysis],
    verified: usize,
    false_like: usize,
    uncertain: usize,
    avg_confidence: f64,
) -> String {
    let mut reason = format!(
        "Based on {verified} verified, {false_like} false, and {uncertain} uncertain \
         fact checks out of {} (average confidence {:.2}).",
        analyses.len(),
        clamp_confidence(avg_confidence),
    );

    for (i, analysis) in analyses.iter().enumerate() {
        reason.push_str(&format!(
            "\n- Check #{}: {} - {}",
            i + 1,
            analysis.status.as_str(),
            excerpt(&analysis.reasoning, 100)
        ));
    }

    reason
}

/// First `max_chars` characters of the text, with an ellipsis when cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
