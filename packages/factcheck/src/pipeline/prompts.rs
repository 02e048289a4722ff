//! Prompt templates for question generation and claim verification.
//!
//! The verification prompt pins the response format the parser expects:
//! seven numbered sections in a fixed order, plus an optional per-source
//! evaluation section. The parser tolerates deviation, but the prompt is the
//! first line of defense.

use crate::types::{EvidenceBundle, EvidenceOrigin};

/// Sentinel the question generator returns (and we match case-insensitively)
/// when content has nothing checkable in it.
pub const NOT_ENOUGH_CONTEXT: &str = "not enough context";

/// Template for generating verification questions from content.
pub const QUESTION_PROMPT: &str = r#"Critically evaluate the following content:

{content}

Determine if it contains factual claims suitable for investigation or if it is subjective, unverifiable, nonsensical, or too vague.
If unsuitable for fact-checking, return ONLY the exact text: 'not enough context'.
Otherwise, generate {num_questions} specific, concise yes/no questions targeting the main factual claims.
Focus on verifiable facts and data points, source credibility, and the context and timing of each claim.
Return ONLY the questions, each on a new line, without any numbering or bullet points."#;

/// Template for verifying one question against gathered evidence.
pub const VERIFICATION_PROMPT: &str = r#"Please perform a fact-checking assessment based only on the provided context and evidence.

Original Content:
{content}

Question to Verify:
{question}

Web Search Evidence:
{web_evidence}

Encyclopedia Evidence:
{encyclopedia_evidence}

Instructions:
Analyze the evidence gathered above to answer the question in relation to the original content.
Provide:
1. Verification Status: (e.g., Verified, False, Partially True, Misleading, Unsubstantiated, Unable to Verify)
2. Confidence Score: (0.0 to 1.0, your certainty in the status based only on the provided evidence)
3. Supporting Evidence: (specific points from the evidence that support the status)
4. Contradicting Evidence: (specific points from the evidence that contradict the status)
5. Reasoning: (step-by-step assessment referencing the evidence)
6. Evidence Gaps: (missing information needed for a more certain assessment)
7. Recommendations: (further checks if needed)
8. Source Evaluation: (for each source, YES or NO on whether it supports the claim, with a brief reason)

Respond only with the structured analysis, using the numbered headings above."#;

/// Fill the question-generation template.
pub fn format_question_prompt(content: &str, num_questions: usize) -> String {
    QUESTION_PROMPT
        .replace("{content}", content)
        .replace("{num_questions}", &num_questions.to_string())
}

/// Fill the verification template. Evidence is rendered web-first with
/// bounded excerpts so prompt size stays bounded.
pub fn format_verification_prompt(
    content: &str,
    question: &str,
    evidence: &EvidenceBundle,
    max_excerpt_chars: usize,
) -> String {
    VERIFICATION_PROMPT
        .replace("{content}", content)
        .replace("{question}", question)
        .replace(
            "{web_evidence}",
            &render_evidence(evidence, EvidenceOrigin::Web, max_excerpt_chars),
        )
        .replace(
            "{encyclopedia_evidence}",
            &render_evidence(evidence, EvidenceOrigin::Encyclopedia, max_excerpt_chars),
        )
}

/// Render one origin's evidence as bullet lines, or a "none found" marker.
fn render_evidence(bundle: &EvidenceBundle, origin: EvidenceOrigin, max_chars: usize) -> String {
    let lines: Vec<String> = bundle
        .from_origin(origin)
        .map(|item| {
            let excerpt = truncate_chars(&item.excerpt, max_chars);
            match origin {
                EvidenceOrigin::Web => format!("- {} (Source: {})", excerpt, item.locator),
                EvidenceOrigin::Encyclopedia => format!("- {}: {}", item.locator, excerpt),
            }
        })
        .collect();

    if lines.is_empty() {
        match origin {
            EvidenceOrigin::Web => "No web results found.".to_string(),
            EvidenceOrigin::Encyclopedia => "No encyclopedia results found.".to_string(),
        }
    } else {
        lines.join("\n")
    }
}

/// Truncate to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvidenceItem;

    #[test]
    fn verification_prompt_renders_web_before_encyclopedia() {
        let bundle = EvidenceBundle::from_parts(
            vec![EvidenceItem::web("https://a.com", "web excerpt")],
            vec![EvidenceItem::encyclopedia("Topic", "wiki snippet")],
        );

        let prompt = format_verification_prompt("content", "question?", &bundle, 500);

        let web_pos = prompt.find("web excerpt").unwrap();
        let wiki_pos = prompt.find("wiki snippet").unwrap();
        assert!(web_pos < wiki_pos);
        assert!(prompt.contains("(Source: https://a.com)"));
        assert!(prompt.contains("Topic: wiki snippet"));
    }

    #[test]
    fn empty_evidence_renders_markers() {
        let prompt = format_verification_prompt("c", "q?", &EvidenceBundle::new(), 500);
        assert!(prompt.contains("No web results found."));
        assert!(prompt.contains("No encyclopedia results found."));
    }

    #[test]
    fn excerpts_are_bounded_on_char_boundaries() {
        let long = "é".repeat(600);
        let bundle =
            EvidenceBundle::from_parts(vec![EvidenceItem::web("https://a.com", long)], vec![]);

        let prompt = format_verification_prompt("c", "q?", &bundle, 500);
        let line = prompt
            .lines()
            .find(|l| l.starts_with("- é"))
            .expect("evidence line present");
        assert!(line.chars().count() < 600);
    }

    #[test]
    fn question_prompt_includes_count_and_content() {
        let prompt = format_question_prompt("The moon is cheese.", 3);
        assert!(prompt.contains("The moon is cheese."));
        assert!(prompt.contains("generate 3 specific"));
    }
}
