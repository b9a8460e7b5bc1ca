use quiz_core::model::{QuestionRecord, QuestionSet};
use tracing::debug;

/// Separates the question from the answer on each line.
pub const DELIMITER: char = '|';

/// Result of parsing a questions file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestions {
    pub set: QuestionSet,
    /// Non-blank lines dropped for a missing delimiter or an empty part.
    pub skipped: usize,
}

/// Parse `question | answer` lines.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Each line splits on the first
/// delimiter only, so answers may contain `|`. Blank lines are ignored;
/// malformed lines are skipped and counted.
#[must_use]
pub fn parse_questions(text: &str) -> ParsedQuestions {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n");
    let mut records = Vec::new();
    let mut skipped = 0;

    for (idx, raw) in text.split(|c: char| c == '\n' || c == '\r').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((question, answer)) = line.split_once(DELIMITER) else {
            debug!(line = idx + 1, "skipping line without delimiter");
            skipped += 1;
            continue;
        };

        match QuestionRecord::new(question, answer) {
            Ok(record) => records.push(record),
            Err(err) => {
                debug!(line = idx + 1, %err, "skipping malformed line");
                skipped += 1;
            }
        }
    }

    ParsedQuestions {
        set: QuestionSet::from_records(records),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    #[test]
    fn parses_trimmed_pairs_in_order() {
        let parsed = parse_questions("  Capital of France? | Paris \nLargest planet?|Jupiter\n");
        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.set.pairs(),
            vec![
                ("Capital of France?".to_owned(), "Paris".to_owned()),
                ("Largest planet?".to_owned(), "Jupiter".to_owned()),
            ]
        );
    }

    #[test]
    fn splits_on_first_delimiter_only() {
        let parsed = parse_questions("Pipe symbol? | a | b");
        assert_eq!(parsed.set.records()[0].answer(), "a | b");
    }

    #[test]
    fn blank_lines_are_ignored_and_bad_lines_counted() {
        let text = "\n   \nno delimiter here\n | missing question\nmissing answer |  \nGood?|Yes\n";
        let parsed = parse_questions(text);
        assert_eq!(parsed.set.len(), 1);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn handles_crlf_and_bom() {
        let parsed = parse_questions("\u{feff}Q1|A1\r\nQ2|A2\r\n");
        assert_eq!(parsed.set.len(), 2);
        assert!(
            parsed
                .set
                .lookup(&QuestionId::for_question("Q1"))
                .is_some()
        );
        assert_eq!(parsed.set.records()[1].answer(), "A2");
    }

    #[test]
    fn lone_carriage_returns_end_lines() {
        let parsed = parse_questions("Q1|A1\rQ2|A2\r");
        assert_eq!(
            parsed.set.pairs(),
            vec![
                ("Q1".to_owned(), "A1".to_owned()),
                ("Q2".to_owned(), "A2".to_owned()),
            ]
        );
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn only_invalid_lines_yield_empty_set() {
        let parsed = parse_questions("nothing useful\n|\n");
        assert!(parsed.set.is_empty());
        assert_eq!(parsed.skipped, 2);
    }
}
