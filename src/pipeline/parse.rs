//! Parsing of numbered free-text responses into per-question answers.

use super::types::ChunkAnswerSet;

/// Convert a numbered free-text response into a sparse answer set of `question_count` slots.
///
/// Lines of the form `<n>. <text>` assign the trimmed text to slot `n - 1`; every other
/// line is ignored, as are numbers outside `1..=question_count`. When the same number
/// appears twice the later line wins. An unparsable response yields an all-`None` set
/// rather than an error.
pub fn parse_answers(response: &str, question_count: usize) -> ChunkAnswerSet {
    let mut answers: ChunkAnswerSet = vec![None; question_count];
    for line in response.lines() {
        if let Some((number, text)) = split_numbered_line(line) {
            if (1..=question_count).contains(&number) {
                answers[number - 1] = Some(text.to_string());
            }
        }
    }
    answers
}

/// Split `"<n>. <text>"` into its number and trimmed remainder.
fn split_numbered_line(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_start();
    let digits_end = line
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(offset, _)| offset)
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }
    let rest = line[digits_end..].strip_prefix('.')?;
    let number = line[..digits_end].parse().ok()?;
    Some((number, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_ordered_answers() {
        let answers = parse_answers("1. A\n2. B\n3. C", 3);
        assert_eq!(
            answers,
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                Some("C".to_string())
            ]
        );
    }

    #[test]
    fn ignores_lines_without_a_leading_number() {
        let response = "Here are the answers:\n1. Thirty days.\nNote: see clause 4.\n2. Yes.";
        let answers = parse_answers(response, 2);
        assert_eq!(
            answers,
            vec![Some("Thirty days.".to_string()), Some("Yes.".to_string())]
        );
    }

    #[test]
    fn extra_whitespace_does_not_corrupt_other_indices() {
        let answers = parse_answers("  1.   A  \n\n   2. B", 3);
        assert_eq!(
            answers,
            vec![Some("A".to_string()), Some("B".to_string()), None]
        );
    }

    #[test]
    fn out_of_range_numbers_are_dropped() {
        let answers = parse_answers("0. zero\n4. four\n2. two", 3);
        assert_eq!(answers, vec![None, Some("two".to_string()), None]);
    }

    #[test]
    fn later_duplicate_wins() {
        let answers = parse_answers("1. first\n1. second", 1);
        assert_eq!(answers, vec![Some("second".to_string())]);
    }

    #[test]
    fn unparsable_response_yields_empty_set() {
        let answers = parse_answers("The model refused to cooperate.", 2);
        assert_eq!(answers, vec![None, None]);
    }

    #[test]
    fn number_without_period_is_ignored() {
        let answers = parse_answers("1) parenthesis style\n2. kept", 2);
        assert_eq!(answers, vec![None, Some("kept".to_string())]);
    }
}
