//! Score line extraction.
//!
//! The model is asked to close its critique with one line of the form
//!
//! ```text
//! نمره مباحث: 80/100 | نمره کلی: 75/100 | نمره استانداردها: 40/100 | نمره سازه-معماری: 60/100
//! ```
//!
//! Models drift from that shape, so the last non-blank line is tried against
//! an ordered list of grammars. Earlier grammars are stricter; the first one
//! that matches wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{AnalysisResponse, Scores};

const TOPICS_LABEL: &str = "نمره مباحث";
const OVERALL_LABEL: &str = "نمره کلی";
const STANDARDS_LABEL: &str = "نمره استانداردها";
const STRUCTURAL_LABEL: &str = "نمره سازه-معماری";

/// One accepted score-line grammar.
struct ScoreLineGrammar {
    name: &'static str,
    pattern: Regex,
}

static GRAMMARS: Lazy<Vec<ScoreLineGrammar>> = Lazy::new(|| {
    vec![
        grammar(
            "colon",
            r"نمره مباحث\s*:\s*([0-9]{1,3})/100\s*\|\s*نمره کلی\s*:\s*([0-9]{1,3})/100\s*\|\s*نمره استانداردها\s*:\s*([0-9]{1,3})/100\s*\|\s*نمره سازه\s*-\s*معماری\s*:\s*([0-9]{1,3})/100",
        ),
        grammar(
            "bare",
            r"نمره مباحث\s*([0-9]{1,3})/100\s*\|\s*نمره کلی\s*([0-9]{1,3})/100\s*\|\s*نمره استانداردها\s*([0-9]{1,3})/100\s*\|\s*نمره سازه\s*-\s*معماری\s*([0-9]{1,3})/100",
        ),
        grammar(
            "bare_undashed",
            r"نمره مباحث\s*([0-9]{1,3})/100\s*\|\s*نمره کلی\s*([0-9]{1,3})/100\s*\|\s*نمره استانداردها\s*([0-9]{1,3})/100\s*\|\s*نمره سازه\s*معماری\s*([0-9]{1,3})/100",
        ),
    ]
});

fn grammar(name: &'static str, pattern: &str) -> ScoreLineGrammar {
    ScoreLineGrammar {
        name,
        pattern: Regex::new(pattern).expect("score line pattern is valid"),
    }
}

/// Split a model reply into critique body and optional scores.
///
/// When the last non-blank line matches a grammar, the body is the remaining
/// non-blank lines joined by `\n`. When nothing matches, the body is `text`
/// untouched and `scores` is `None`.
pub fn extract_scores(text: &str) -> AnalysisResponse {
    let lines: Vec<&str> = text
        .split_inclusive('\n')
        .map(|l| {
            l.strip_suffix("\r\n")
                .or_else(|| l.strip_suffix('\n'))
                .unwrap_or(l)
        })
        .filter(|l| !l.trim().is_empty())
        .collect();
    let candidate = lines.last().copied().unwrap_or("");

    match parse_score_line(candidate) {
        Some(scores) => AnalysisResponse {
            text: lines[..lines.len() - 1].join("\n"),
            scores: Some(scores),
        },
        None => AnalysisResponse {
            text: text.to_string(),
            scores: None,
        },
    }
}

/// Match a single line against the grammars in order.
pub fn parse_score_line(line: &str) -> Option<Scores> {
    GRAMMARS.iter().find_map(|g| {
        let caps = g.pattern.captures(line)?;
        let value = |i: usize| -> i64 {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(0)
        };
        tracing::trace!(grammar = g.name, "Score line matched");
        Some(Scores::clamped(value(1), value(2), value(3), value(4)))
    })
}

/// Render scores in the canonical wire format the prompt asks for.
pub fn format_score_line(scores: &Scores) -> String {
    format!(
        "{}: {}/100 | {}: {}/100 | {}: {}/100 | {}: {}/100",
        TOPICS_LABEL,
        scores.mabhas,
        OVERALL_LABEL,
        scores.overall,
        STANDARDS_LABEL,
        scores.standards,
        STRUCTURAL_LABEL,
        scores.structural
    )
}
