//! Free-text response parsing, the densest piece of the pipeline.
//!
//! The model's analysis is prose loosely following the requested section
//! order, not a machine-readable format. This parser is an explicit
//! line-scanner state machine: a recognized heading opens a section and
//! flushes the buffered body of the previous one; everything else feeds the
//! open section's buffer. Heading variants ("3. Supporting Evidence:",
//! "supporting evidence:", markdown-bolded forms), multi-line bodies,
//! inconsistent list markers, and missing sections all have to come out the
//! other side as a well-formed [`VerificationAnalysis`].
//!
//! Invariants on every path: `confidence` lands in [0.0, 1.0], `status` is a
//! closed enum value, `reasoning` is non-empty, and the function never
//! panics and never suspends; `parse` is pure and deterministic.

use std::collections::HashMap;

use crate::types::{
    ConfidencePolicy, ParserConfig, SourceEvaluation, SourceVerdict, VerificationAnalysis,
    VerificationStatus,
};

/// Sections of the structured analysis the verification prompt requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Status,
    Confidence,
    Supporting,
    Contradicting,
    Reasoning,
    Gaps,
    Recommendations,
    SourceEvaluation,
}

/// Heading names per section, longest alias first. Matched
/// case-insensitively after ordinal and markdown-glyph stripping.
const SECTION_ALIASES: &[(Section, &[&str])] = &[
    (Section::Status, &["verification status"]),
    (Section::Confidence, &["confidence score"]),
    (Section::Supporting, &["supporting evidence"]),
    (Section::Contradicting, &["contradicting evidence"]),
    (Section::Reasoning, &["reasoning"]),
    (Section::Gaps, &["evidence gaps"]),
    (Section::Recommendations, &["recommendations"]),
    (
        Section::SourceEvaluation,
        &["source evaluation", "source evaluations"],
    ),
];

/// Parse a raw model response into a structured analysis with default
/// config.
pub fn parse(raw_text: &str, question_text: &str) -> VerificationAnalysis {
    parse_with_config(raw_text, question_text, &ParserConfig::default())
}

/// Parse a raw model response into a structured analysis.
///
/// Pure function: identical input always yields identical output. The
/// `sources` field is left empty; assembling it from the evidence bundle is
/// the orchestrator's job.
pub fn parse_with_config(
    raw_text: &str,
    question_text: &str,
    config: &ParserConfig,
) -> VerificationAnalysis {
    if raw_text.trim().is_empty() {
        return VerificationAnalysis::error(format!(
            "Model returned an empty analysis for question: {question_text}"
        ));
    }

    let bodies = scan_sections(raw_text);

    if bodies.is_empty() {
        // Nothing recognizable: attribute the whole text to reasoning and
        // admit we could not verify.
        let mut analysis =
            VerificationAnalysis::new(VerificationStatus::UnableToVerify, 0.0);
        analysis.set_confidence(resolve_confidence(
            VerificationStatus::UnableToVerify,
            None,
            None,
            find_number(raw_text),
            &[],
            config.confidence_policy,
        ));
        analysis.reasoning = raw_text.trim().to_string();
        return analysis;
    }

    let status_text = bodies.get(&Section::Status).map(|lines| lines.join(" "));
    let (status, implied_confidence) = match status_text.as_deref() {
        Some(text) => resolve_status(text),
        None => (VerificationStatus::UnableToVerify, None),
    };

    let source_evaluations = bodies
        .get(&Section::SourceEvaluation)
        .map(|lines| parse_source_evaluations(lines))
        .unwrap_or_default();

    let explicit_confidence = bodies
        .get(&Section::Confidence)
        .and_then(|lines| find_number(&lines.join(" ")));

    // The fallback scan covers the section bodies, not the raw lines: the
    // numbered heading scaffolding ("1.", "2.") would otherwise always win
    // the "first number in the text" search.
    let confidence = resolve_confidence(
        status,
        explicit_confidence,
        implied_confidence,
        find_number(&body_text(&bodies)),
        &source_evaluations,
        config.confidence_policy,
    );

    let mut analysis = VerificationAnalysis::new(status, confidence);
    analysis.supporting_evidence = list_items(bodies.get(&Section::Supporting));
    analysis.contradicting_evidence = list_items(bodies.get(&Section::Contradicting));
    analysis.evidence_gaps = list_items(bodies.get(&Section::Gaps));
    analysis.recommendations = list_items(bodies.get(&Section::Recommendations));
    analysis.source_evaluations = source_evaluations;

    analysis.reasoning = bodies
        .get(&Section::Reasoning)
        .map(|lines| lines.join("\n"))
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "Based on the evidence, the claim is determined to be {}.",
                status.as_str()
            )
        });

    analysis
}

/// All recognized section bodies in a fixed order, for the whole-text
/// confidence fallback.
fn body_text(bodies: &HashMap<Section, Vec<String>>) -> String {
    SECTION_ALIASES
        .iter()
        .filter_map(|(section, _)| bodies.get(section))
        .flat_map(|lines| lines.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Segment the text into section bodies.
///
/// A heading flushes the previous section's buffer; a duplicate heading
/// restarts its section (last occurrence wins). Lines before the first
/// recognized heading are discarded.
fn scan_sections(text: &str) -> HashMap<Section, Vec<String>> {
    let mut bodies: HashMap<Section, Vec<String>> = HashMap::new();
    let mut current: Option<Section> = None;
    let mut buffer: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some((section, rest)) = match_heading(line) {
            if let Some(open) = current {
                bodies.insert(open, std::mem::take(&mut buffer));
            }
            current = Some(section);
            if !rest.is_empty() {
                buffer.push(rest.to_string());
            }
        } else if current.is_some() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                buffer.push(trimmed.to_string());
            }
        }
    }

    if let Some(open) = current {
        bodies.insert(open, buffer);
    }

    bodies
}

/// Match a line against the known headings.
///
/// Accepts a leading ordinal ("3." / "3)"), markdown glyphs, and either a
/// trailing colon or a bare heading line. Returns the section and whatever
/// content followed the colon on the same line.
fn match_heading(line: &str) -> Option<(Section, String)> {
    let stripped = line
        .trim()
        .trim_start_matches(['#', '*', '-', '>', ' ', '\t']);
    let unnumbered = strip_ordinal(stripped);

    for (section, aliases) in SECTION_ALIASES {
        for alias in *aliases {
            let Some(prefix) = unnumbered.get(..alias.len()) else {
                continue;
            };
            if !prefix.eq_ignore_ascii_case(alias) {
                continue;
            }

            let after = unnumbered[alias.len()..].trim_start_matches('*').trim_start();
            if let Some(rest) = after.strip_prefix(':') {
                let rest = rest.trim().trim_start_matches('*').trim_end_matches('*');
                return Some((*section, rest.trim().to_string()));
            }
            if after.is_empty() {
                return Some((*section, String::new()));
            }
        }
    }

    None
}

/// Strip a leading "12." / "12)" ordinal, if present.
fn strip_ordinal(text: &str) -> &str {
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits_end == 0 {
        return text;
    }

    let rest = &text[digits_end..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(after) => after.trim_start(),
        None => text,
    }
}

/// Split a section body into list items.
///
/// A line opening with a bullet glyph or numeric marker starts a new item;
/// other lines are space-joined onto the open item so multi-line points stay
/// one logical item. Markers are stripped from the item text.
fn split_list_items(lines: &[String]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match strip_item_marker(trimmed) {
            Some(item) => items.push(item.to_string()),
            None => match items.last_mut() {
                Some(open) => {
                    open.push(' ');
                    open.push_str(trimmed);
                }
                None => items.push(trimmed.to_string()),
            },
        }
    }

    items.retain(|item| !item.is_empty());
    items
}

fn list_items(lines: Option<&Vec<String>>) -> Vec<String> {
    lines.map(|l| split_list_items(l)).unwrap_or_default()
}

/// If the line begins a new list item, return its text with the marker
/// stripped.
fn strip_item_marker(line: &str) -> Option<&str> {
    if line.starts_with(['-', '*', '•']) {
        return Some(line.trim_start_matches(['-', '*', '•', ' ']));
    }

    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end > 0 {
        let rest = &line[digits_end..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(after.trim());
        }
    }

    None
}

/// Normalize raw status text into the closed enum.
///
/// Word synonyms win; a bare number is treated as an implied confidence and
/// thresholded into a status. The ordering below matters: negated and
/// partial forms ("incorrect", "untrue", "partially true") must be checked
/// before the positive words they contain.
fn resolve_status(raw: &str) -> (VerificationStatus, Option<f64>) {
    const SYNONYMS: &[(&[&str], VerificationStatus)] = &[
        (&["partially", "partly"], VerificationStatus::PartiallyTrue),
        (&["misleading"], VerificationStatus::Misleading),
        (
            &["unsubstantiated", "unsupported"],
            VerificationStatus::Unsubstantiated,
        ),
        (
            &[
                "unable",
                "insufficient",
                "unclear",
                "cannot verify",
                "uncertain",
                "unknown",
            ],
            VerificationStatus::UnableToVerify,
        ),
        (
            &["false", "incorrect", "untrue", "inaccurate", "fake"],
            VerificationStatus::False,
        ),
        (
            &["verified", "confirm", "true", "accurate", "correct"],
            VerificationStatus::Verified,
        ),
    ];

    let lower = raw.to_lowercase();
    for (terms, status) in SYNONYMS {
        if terms.iter().any(|term| lower.contains(term)) {
            return (*status, None);
        }
    }

    // The model sometimes conflates status and score and answers the status
    // line with a bare number. Threshold it.
    if let Some(value) = find_number(raw) {
        let status = if value >= 0.8 {
            VerificationStatus::Verified
        } else if value >= 0.6 {
            VerificationStatus::PartiallyTrue
        } else if value >= 0.4 {
            VerificationStatus::UnableToVerify
        } else if value >= 0.2 {
            VerificationStatus::Misleading
        } else {
            VerificationStatus::False
        };
        return (status, Some(value));
    }

    (VerificationStatus::UnableToVerify, None)
}

/// Find the first numeric token in the text and normalize it into [0, 1].
///
/// Values in (1, 100] are read as percentages: the prompt has asked for
/// both 0-100 and 0.0-1.0 scales over time and models answer in either.
/// Everything else clamps.
fn find_number(text: &str) -> Option<f64> {
    let mut token = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() || (c == '.' && !token.is_empty() && !token.contains('.')) {
            token.push(c);
        } else if !token.is_empty() {
            if let Some(value) = parse_token(&token) {
                return Some(value);
            }
            token.clear();
        }
    }

    parse_token(&token)
}

fn parse_token(token: &str) -> Option<f64> {
    let trimmed = token.trim_end_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    let normalized = if value > 1.0 && value <= 100.0 {
        value / 100.0
    } else {
        value
    };
    Some(normalized.clamp(0.0, 1.0))
}

/// Derive the final confidence through the tiered fallback.
///
/// Explicit-first order: stated score → number implied by a numeric status
/// → first number anywhere in the text → source-vote ratio → status-keyed
/// default. The votes-first policy moves the vote ratio to the front. The
/// result can never be absent: the final tier always produces a value.
fn resolve_confidence(
    status: VerificationStatus,
    explicit: Option<f64>,
    implied: Option<f64>,
    whole_text: Option<f64>,
    evaluations: &[SourceEvaluation],
    policy: ConfidencePolicy,
) -> f64 {
    let votes = vote_ratio(status, evaluations);
    let scored = explicit.or(implied).or(whole_text);

    let chosen = match policy {
        ConfidencePolicy::ExplicitFirst => scored.or(votes),
        ConfidencePolicy::VotesFirst => votes.or(scored),
    };

    chosen.unwrap_or_else(|| status.default_confidence())
}

/// Fraction of evaluated sources agreeing with the status's polarity.
fn vote_ratio(status: VerificationStatus, evaluations: &[SourceEvaluation]) -> Option<f64> {
    if evaluations.is_empty() {
        return None;
    }

    let agreeing = evaluations
        .iter()
        .filter(|eval| (eval.verdict == SourceVerdict::Yes) == status.agrees_with_yes())
        .count();

    Some(agreeing as f64 / evaluations.len() as f64)
}

/// Parse the optional per-source evaluation section.
///
/// Each item is expected to name a source and carry a standalone YES or NO,
/// e.g. `- reuters.com: YES - corroborates the date`. Items without a
/// recognizable verdict are dropped; the section degrades gracefully.
fn parse_source_evaluations(lines: &[String]) -> Vec<SourceEvaluation> {
    split_list_items(lines)
        .iter()
        .filter_map(|item| parse_source_evaluation(item))
        .collect()
}

fn parse_source_evaluation(item: &str) -> Option<SourceEvaluation> {
    let yes = find_word(item, "yes");
    let no = find_word(item, "no");

    let (position, len, verdict) = match (yes, no) {
        (Some(y), Some(n)) if y <= n => (y, 3, SourceVerdict::Yes),
        (Some(_), Some(n)) => (n, 2, SourceVerdict::No),
        (Some(y), None) => (y, 3, SourceVerdict::Yes),
        (None, Some(n)) => (n, 2, SourceVerdict::No),
        (None, None) => return None,
    };

    let source = item[..position]
        .trim_end_matches([':', '-', '–', ',', '(', ' '])
        .trim()
        .to_string();
    let reason = item[position + len..]
        .trim_start_matches([':', '-', '–', ',', ')', '.', ' '])
        .trim()
        .to_string();

    if source.is_empty() {
        return None;
    }

    Some(SourceEvaluation {
        source,
        verdict,
        reason,
    })
}

/// Case-insensitive standalone-word search; returns the byte offset of the
/// first match in the original string.
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let mut prev: Option<char> = None;

    for (i, c) in haystack.char_indices() {
        let matches = haystack
            .get(i..i + needle.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(needle));

        if matches {
            let before_ok = !prev.is_some_and(|p| p.is_alphanumeric());
            let after_ok = !haystack[i + needle.len()..]
                .chars()
                .next()
                .is_some_and(|n| n.is_alphanumeric());
            if before_ok && after_ok {
                return Some(i);
            }
        }

        prev = Some(c);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"Here is my assessment.

1. Verification Status: False
2. Confidence Score: 0.9
3. Supporting Evidence:
- None of the evidence places the tower in Berlin
4. Contradicting Evidence:
- The Eiffel Tower is located on the Champ de Mars in Paris
- Multiple sources confirm the Paris location
5. Reasoning: The evidence uniformly contradicts the claim.
All sources agree on the Paris location.
6. Evidence Gaps:
- None
7. Recommendations:
- No further checks needed
8. Source Evaluation:
- en.wikipedia.org: NO - places the tower in Paris
- tourisme.fr: NO - confirms the Paris address
"#;

    #[test]
    fn parses_a_well_formed_response() {
        let analysis = parse(FULL_RESPONSE, "Is the Eiffel Tower in Berlin?");

        assert_eq!(analysis.status, VerificationStatus::False);
        assert_eq!(analysis.confidence, 0.9);
        assert_eq!(analysis.supporting_evidence.len(), 1);
        assert_eq!(analysis.contradicting_evidence.len(), 2);
        assert!(analysis.reasoning.contains("uniformly contradicts"));
        assert!(analysis.reasoning.contains("Paris location"));
        assert_eq!(analysis.evidence_gaps, vec!["None"]);
        assert_eq!(analysis.source_evaluations.len(), 2);
        assert_eq!(analysis.source_evaluations[0].source, "en.wikipedia.org");
        assert_eq!(analysis.source_evaluations[0].verdict, SourceVerdict::No);
        assert_eq!(
            analysis.source_evaluations[0].reason,
            "places the tower in Paris"
        );
    }

    #[test]
    fn parse_is_deterministic() {
        let a = parse(FULL_RESPONSE, "q");
        let b = parse(FULL_RESPONSE, "q");
        assert_eq!(a, b);
    }

    #[test]
    fn bare_heading_forms_without_ordinals_match() {
        let text = "Verification Status: Verified\nConfidence Score: 0.8\nReasoning: solid.";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::Verified);
        assert_eq!(analysis.confidence, 0.8);
        assert_eq!(analysis.reasoning, "solid.");
    }

    #[test]
    fn markdown_bold_headings_match() {
        let text = "**3. Supporting Evidence:**\n- point A\n**5. Reasoning:** fine";
        let analysis = parse(text, "q");
        assert_eq!(analysis.supporting_evidence, vec!["point A"]);
        assert_eq!(analysis.reasoning, "fine");
    }

    #[test]
    fn multi_line_list_items_stay_one_item() {
        let text = "3. Supporting Evidence:\n- point A\n- point B\nmore on point B\n- point C";
        let analysis = parse(text, "q");
        assert_eq!(
            analysis.supporting_evidence,
            vec!["point A", "point B more on point B", "point C"]
        );
    }

    #[test]
    fn numbered_list_markers_are_stripped() {
        let text = "7. Recommendations:\n1. check the registry\n2) ask the archive";
        let analysis = parse(text, "q");
        assert_eq!(
            analysis.recommendations,
            vec!["check the registry", "ask the archive"]
        );
    }

    #[test]
    fn status_synonyms_map_to_the_closed_enum() {
        let cases = [
            ("The claim is CONFIRMED by multiple sources", VerificationStatus::Verified),
            ("Accurate according to the evidence", VerificationStatus::Verified),
            ("This is untrue", VerificationStatus::False),
            ("Incorrect", VerificationStatus::False),
            ("Partially true", VerificationStatus::PartiallyTrue),
            ("Misleading framing", VerificationStatus::Misleading),
            ("Unsupported by the evidence", VerificationStatus::Unsubstantiated),
            ("Unclear due to conflicting evidence", VerificationStatus::UnableToVerify),
            ("total gibberish here", VerificationStatus::UnableToVerify),
        ];

        for (status_line, expected) in cases {
            let text = format!("1. Verification Status: {status_line}\n5. Reasoning: r");
            let analysis = parse(&text, "q");
            assert_eq!(analysis.status, expected, "for {status_line:?}");
        }
    }

    #[test]
    fn numeric_status_seeds_confidence_and_thresholds_status() {
        let text = "1. Verification Status: 0.85";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::Verified);
        assert_eq!(analysis.confidence, 0.85);

        let text = "1. Verification Status: 0.25";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::Misleading);
        assert_eq!(analysis.confidence, 0.25);

        let text = "1. Verification Status: 0.05";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::False);
    }

    #[test]
    fn explicit_confidence_beats_implied_status_number() {
        let text = "1. Verification Status: 0.85\n2. Confidence Score: 0.6";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::Verified);
        assert_eq!(analysis.confidence, 0.6);
    }

    #[test]
    fn percentage_confidence_is_normalized() {
        let text = "1. Verification Status: Verified\n2. Confidence Score: 85";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 0.85);
    }

    #[test]
    fn out_of_range_confidence_clamps() {
        let text = "1. Verification Status: Verified\n2. Confidence Score: 250";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn missing_confidence_falls_back_to_vote_ratio() {
        let text = "1. Verification Status: Verified\n\
                    8. Source Evaluation:\n\
                    - a.com: YES - agrees\n\
                    - b.com: YES - agrees\n\
                    - c.com: NO - disputes the date\n\
                    - d.com: YES - agrees";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 0.75);
    }

    #[test]
    fn no_votes_agree_with_a_false_status() {
        let text = "1. Verification Status: False\n\
                    8. Source Evaluation:\n\
                    - a.com: NO - contradicts the claim\n\
                    - b.com: YES - supports the claim";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn votes_first_policy_prefers_the_ratio() {
        let text = "1. Verification Status: Verified\n\
                    2. Confidence Score: 0.9\n\
                    8. Source Evaluation:\n\
                    - a.com: YES - agrees\n\
                    - b.com: NO - disagrees";
        let config = ParserConfig {
            confidence_policy: ConfidencePolicy::VotesFirst,
        };
        let analysis = parse_with_config(text, "q", &config);
        assert_eq!(analysis.confidence, 0.5);

        let default = parse(text, "q");
        assert_eq!(default.confidence, 0.9);
    }

    #[test]
    fn status_default_confidence_is_the_last_resort() {
        let text = "1. Verification Status: Verified\n5. Reasoning: no numbers here at all";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 0.85);

        let text = "1. Verification Status: Unclear\n5. Reasoning: nothing numeric";
        let analysis = parse(text, "q");
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn reasoning_is_backfilled_when_missing() {
        let text = "1. Verification Status: Verified\n2. Confidence Score: 0.9";
        let analysis = parse(text, "q");
        assert_eq!(
            analysis.reasoning,
            "Based on the evidence, the claim is determined to be VERIFIED."
        );
    }

    #[test]
    fn empty_text_yields_error_analysis() {
        let analysis = parse("", "what happened?");
        assert_eq!(analysis.status, VerificationStatus::Error);
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.reasoning.contains("what happened?"));
    }

    #[test]
    fn heading_free_text_becomes_reasoning() {
        let text = "The model rambled about the topic without any structure.";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::UnableToVerify);
        assert_eq!(analysis.reasoning, text);
    }

    #[test]
    fn preamble_before_first_heading_is_discarded() {
        let text = "Sure, here's the analysis you asked for.\n\
                    1. Verification Status: Verified";
        let analysis = parse(text, "q");
        assert_eq!(analysis.status, VerificationStatus::Verified);
        assert!(!analysis.reasoning.contains("here's the analysis"));
    }

    #[test]
    fn duplicate_heading_restarts_the_section() {
        let text = "5. Reasoning: first attempt\n\
                    5. Reasoning: second attempt wins";
        let analysis = parse(text, "q");
        assert_eq!(analysis.reasoning, "second attempt wins");
    }

    #[test]
    fn source_evaluation_without_verdict_is_dropped() {
        let text = "8. Source Evaluation:\n\
                    - a.com: YES - fine\n\
                    - b.com: maybe, who knows";
        let analysis = parse(text, "q");
        assert_eq!(analysis.source_evaluations.len(), 1);
    }

    #[test]
    fn yes_inside_words_does_not_count_as_verdict() {
        let text = "8. Source Evaluation:\n- notes.com: the notes say nothing";
        let analysis = parse(text, "q");
        assert!(analysis.source_evaluations.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics_and_keeps_invariants(text in "\\PC{0,400}") {
                let analysis = parse(&text, "q");
                prop_assert!(analysis.confidence >= 0.0);
                prop_assert!(analysis.confidence <= 1.0);
                prop_assert!(!analysis.reasoning.is_empty());
            }

            #[test]
            fn idempotent_over_arbitrary_input(text in "\\PC{0,400}") {
                prop_assert_eq!(parse(&text, "q"), parse(&text, "q"));
            }

            #[test]
            fn confidence_section_always_clamps(value in -1000.0f64..1000.0) {
                let text = format!(
                    "1. Verification Status: Verified\n2. Confidence Score: {value}"
                );
                let analysis = parse(&text, "q");
                prop_assert!(analysis.confidence >= 0.0);
                prop_assert!(analysis.confidence <= 1.0);
            }
        }
    }
}
