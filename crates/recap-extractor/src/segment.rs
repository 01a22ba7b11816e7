//! Sentence segmentation
//!
//! Splits raw extracted text into ordered sentences. Document-to-text
//! conversion leaves arbitrary whitespace and line breaks behind, so
//! line structure is treated as a boundary signal alongside terminal
//! punctuation. Every non-whitespace character of the input lands in
//! exactly one sentence; sentence text is the original substring, not
//! a normalized form.

use crate::Sentence;

/// Words after which a period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "e.g", "i.e", "b.tech",
    "m.tech", "b.e", "m.e", "b.sc", "m.sc", "b.a", "m.a", "ph.d", "no", "approx",
];

/// Split raw text into sentences in document order.
///
/// Empty or whitespace-only input yields an empty sequence, not an
/// error. Trailing text without terminal punctuation becomes the
/// final sentence.
pub fn segment(raw_text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for (i, c) in raw_text.char_indices() {
        let boundary = match c {
            '!' | '?' => Some(i + c.len_utf8()),
            '.' => {
                if ends_sentence(raw_text, i) {
                    Some(i + 1)
                } else {
                    None
                }
            }
            '\n' => {
                if breaks_at_newline(raw_text, i) {
                    Some(i)
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(end) = boundary {
            if end > start {
                push_sentence(&mut sentences, raw_text, start, end);
                start = end;
            }
        }
    }

    push_sentence(&mut sentences, raw_text, start, raw_text.len());
    sentences
}

/// Whether the period at `idx` terminates a sentence
fn ends_sentence(text: &str, idx: usize) -> bool {
    // Periods inside numbers (decimals, versions) never terminate
    let prev_digit = text[..idx].chars().next_back().is_some_and(|c| c.is_ascii_digit());
    let next = text[idx + 1..].chars().next();
    if prev_digit && next.is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    // A terminal period is followed by whitespace or end of input
    if let Some(c) = next {
        if !c.is_whitespace() {
            return false;
        }
    }

    !is_abbreviation(text, idx)
}

/// Whether the word ending at `period_idx` is a known abbreviation
fn is_abbreviation(text: &str, period_idx: usize) -> bool {
    let mut word_start = period_idx;
    for (i, c) in text[..period_idx].char_indices().rev() {
        if c.is_alphanumeric() || c == '.' {
            word_start = i;
        } else {
            break;
        }
    }

    let word = text[word_start..period_idx].trim_end_matches('.');
    if word.is_empty() {
        return false;
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Whether the newline at `idx` is a sentence boundary.
///
/// A newline breaks unless the following line continues mid-clause,
/// which is approximated by the next non-whitespace character being a
/// lowercase letter (converters wrap long sentences that way).
fn breaks_at_newline(text: &str, idx: usize) -> bool {
    match text[idx + 1..].chars().find(|c| !c.is_whitespace()) {
        Some(c) => !c.is_lowercase(),
        None => true,
    }
}

fn push_sentence(sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }

    let lead = raw.len() - raw.trim_start().len();
    let sentence_start = start + lead;
    sentences.push(Sentence {
        index: sentences.len(),
        text: trimmed.to_string(),
        start: sentence_start,
        end: sentence_start + trimmed.len(),
        entities: Vec::new(),
    });
}
