//! Keyword-based paragraph filtering to shrink documents before chunking.

use super::normalize::normalize;

/// Insurance-policy vocabulary used when no override is configured.
///
/// The list is a cheap, deterministic proxy for relevance; documents from other domains
/// are still served by the question-derived keywords and the prefix fallback.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "grace period",
    "premium",
    "waiting period",
    "maternity",
    "coverage",
    "cover",
    "claim",
    "hospital",
    "exclusion",
    "policy",
    "benefit",
    "sum insured",
    "deductible",
    "renewal",
    "pre-existing",
    "co-payment",
    "cashless",
    "treatment",
    "surgery",
    "ayush",
    "room rent",
    "organ donor",
    "health check",
];

/// Select the paragraphs of `text` likely to answer one of `questions`.
///
/// A paragraph survives when its lowercased form contains any vocabulary term or any
/// question token longer than three characters. Surviving paragraphs are concatenated
/// in original order. When the result is shorter than `min_len` characters the filter
/// is judged over-aggressive and a normalized prefix of the original text (capped at
/// `fallback_prefix_len` characters) is returned instead, so the pipeline never runs
/// on an empty selection.
pub fn filter_relevant(
    text: &str,
    questions: &[String],
    vocabulary: &[String],
    min_len: usize,
    fallback_prefix_len: usize,
) -> String {
    let keywords = build_keywords(questions, vocabulary);
    let selected: Vec<&str> = paragraphs(text)
        .into_iter()
        .filter(|paragraph| {
            let lowered = paragraph.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .collect();

    let filtered = selected.join("\n\n");
    if filtered.chars().count() >= min_len {
        tracing::debug!(
            paragraphs = selected.len(),
            chars = filtered.len(),
            "Relevance filter selected paragraphs"
        );
        filtered
    } else {
        tracing::debug!(
            filtered_chars = filtered.len(),
            min_len,
            "Relevance filter yielded too little text; falling back to document prefix"
        );
        normalize(text, Some(fallback_prefix_len))
    }
}

fn build_keywords(questions: &[String], vocabulary: &[String]) -> Vec<String> {
    let mut keywords: Vec<String> = vocabulary.iter().map(|term| term.to_lowercase()).collect();
    for question in questions {
        for token in question.split(|c: char| !c.is_alphanumeric()) {
            if token.chars().count() > 3 {
                let lowered = token.to_lowercase();
                if !keywords.contains(&lowered) {
                    keywords.push(lowered);
                }
            }
        }
    }
    keywords
}

/// Split text into paragraphs on blank-line boundaries.
fn paragraphs(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut cursor = 0;

    for line in text.split_inclusive('\n') {
        let line_start = cursor;
        cursor += line.len();
        if line.trim().is_empty() {
            if let Some(begin) = start.take() {
                result.push(text[begin..end].trim_end_matches('\n'));
            }
        } else {
            start.get_or_insert(line_start);
            end = cursor;
        }
    }
    if let Some(begin) = start {
        result.push(text[begin..end].trim_end_matches('\n'));
    }
    result
}
