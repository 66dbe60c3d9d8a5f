//! Cross-chunk reconciliation of per-question answers.

use super::types::ChunkAnswerSet;

/// Placeholder returned for a question no chunk could answer.
pub const SENTINEL_ANSWER: &str = "No information found in the document.";

/// Phrasings the model uses to decline a question for one chunk.
const NEGATIVE_MARKERS: &[&str] = &[
    "no information found",
    "no relevant information",
    "not mentioned in",
];

/// Reconcile per-chunk answer sets into one final answer per question.
///
/// For each question the chunks are scanned in document order and the first present,
/// non-empty answer that is not a negative marker wins; earlier chunks are favored
/// because the most relevant passages tend to surface earlier after filtering. When
/// every chunk declines, the slot is filled with [`SENTINEL_ANSWER`], so the result
/// always has exactly `question_count` entries.
pub fn aggregate(chunk_answers: &[ChunkAnswerSet], question_count: usize) -> Vec<String> {
    (0..question_count)
        .map(|question| {
            chunk_answers
                .iter()
                .filter_map(|answers| answers.get(question).and_then(Option::as_deref))
                .map(str::trim)
                .find(|answer| !answer.is_empty() && !is_negative(answer))
                .map(str::to_string)
                .unwrap_or_else(|| SENTINEL_ANSWER.to_string())
        })
        .collect()
}

fn is_negative(answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    NEGATIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_positive_answer_wins() {
        let chunk_answers = vec![
            vec![Some("No information found in this section.".to_string())],
            vec![Some("Grace period is 30 days.".to_string())],
            vec![Some("A later answer.".to_string())],
        ];
        let answers = aggregate(&chunk_answers, 1);
        assert_eq!(answers, vec!["Grace period is 30 days.".to_string()]);
    }

    #[test]
    fn sentinel_fills_unanswered_questions() {
        let chunk_answers = vec![
            vec![Some("NO INFORMATION FOUND in this section.".to_string()), None],
            vec![Some("   ".to_string()), None],
        ];
        let answers = aggregate(&chunk_answers, 2);
        assert_eq!(
            answers,
            vec![SENTINEL_ANSWER.to_string(), SENTINEL_ANSWER.to_string()]
        );
    }

    #[test]
    fn result_length_matches_question_count() {
        let answers = aggregate(&[], 4);
        assert_eq!(answers.len(), 4);
        assert!(answers.iter().all(|answer| answer == SENTINEL_ANSWER));
    }

    #[test]
    fn questions_are_reconciled_independently() {
        let chunk_answers = vec![
            vec![
                Some("Thirty days (Clause 4.2).".to_string()),
                Some("No relevant information here.".to_string()),
            ],
            vec![
                None,
                Some("Yes, after 24 months (Clause 6.1).".to_string()),
            ],
        ];
        let answers = aggregate(&chunk_answers, 2);
        assert_eq!(
            answers,
            vec![
                "Thirty days (Clause 4.2).".to_string(),
                "Yes, after 24 months (Clause 6.1).".to_string()
            ]
        );
    }

    #[test]
    fn short_answer_sets_do_not_panic() {
        // A chunk set may be shorter than the question count if a caller built it by hand.
        let chunk_answers = vec![vec![Some("A.".to_string())]];
        let answers = aggregate(&chunk_answers, 2);
        assert_eq!(answers, vec!["A.".to_string(), SENTINEL_ANSWER.to_string()]);
    }
}
