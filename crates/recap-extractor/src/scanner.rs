//! Field scanning
//!
//! Tries every field's trigger list against every sentence. Scanning
//! is position-independent: a field's informative sentence may be
//! anywhere in the document, so each field is scanned independently
//! and exhaustively in document order. When several sentences match
//! the same field, the first occurrence wins the value; the comment
//! follows the configured policy.

use recap_core::CommentPolicy;
use tracing::debug;

use crate::schema::{ExtractionRule, FieldSpec, KeywordIndex};
use crate::{Entity, Sentence};

/// Words that end a `pattern-after-trigger` value mid-sentence
const CONJUNCTIONS: &[&str] = &[" and ", " but ", " while ", " whereas "];

/// Link words skipped between a trigger and its value ("salary is X")
const LINK_WORDS: &[&str] = &["is", "was", "are", "of"];

// ============================================================================
// Hits
// ============================================================================

/// A candidate match of one field against one sentence
#[derive(Debug, Clone)]
pub struct Hit {
    /// Schema field name
    pub field: &'static str,
    /// Index of the sentence the value came from
    pub sentence_index: usize,
    /// Extracted value, exactly as written in the source
    pub value: String,
    /// The trigger that fired, as it appears in the sentence
    pub trigger: String,
    /// Justification text for the Comments column
    pub context: String,
}

/// Options controlling scanning behavior
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Comment construction when several sentences match one field
    pub comment_policy: CommentPolicy,
}

// ============================================================================
// Scanning
// ============================================================================

/// Scan all sentences against the keyword index.
///
/// Returns at most one [`Hit`] per field. The value always comes from
/// the first matching sentence in document order; under
/// [`CommentPolicy::ConcatAll`] the comment joins every matching
/// sentence instead of only the first.
pub fn scan(sentences: &[Sentence], index: &KeywordIndex, options: &ScanOptions) -> Vec<Hit> {
    let mut hits = Vec::new();

    for spec in index.fields() {
        let mut first: Option<Hit> = None;
        let mut contexts: Vec<&str> = Vec::new();

        for sentence in sentences {
            let Some((trigger, trigger_start)) = find_trigger(spec, sentence, index) else {
                continue;
            };

            // Required-entity gating: a trigger without a co-occurring
            // entity of the right type is not evidence.
            if let Some(required) = spec.required_entity {
                if !sentence.entities.iter().any(|e| e.entity_type == required) {
                    continue;
                }
            }

            let Some(value) = extract_value(spec, sentence, &trigger, trigger_start, index) else {
                continue;
            };

            if first.is_none() {
                debug!(
                    field = spec.name,
                    sentence = sentence.index,
                    trigger = %trigger,
                    "field hit"
                );
                first = Some(Hit {
                    field: spec.name,
                    sentence_index: sentence.index,
                    value,
                    trigger,
                    context: sentence.text.clone(),
                });
                if options.comment_policy == CommentPolicy::FirstMatch {
                    break;
                }
            }
            contexts.push(&sentence.text);
        }

        if let Some(mut hit) = first {
            if options.comment_policy == CommentPolicy::ConcatAll && contexts.len() > 1 {
                hit.context = contexts.join(" ");
            }
            hits.push(hit);
        }
    }

    hits
}

/// Find the first trigger of `spec` in the sentence.
///
/// Returns the trigger as it appears in the sentence (original
/// casing) and its byte offset. For trigger-less regex fields the
/// pattern match itself plays the trigger role.
fn find_trigger(
    spec: &FieldSpec,
    sentence: &Sentence,
    index: &KeywordIndex,
) -> Option<(String, usize)> {
    if spec.triggers.is_empty() {
        let regex = index.pattern_for(spec.name)?;
        let m = regex.find(&sentence.text)?;
        return Some((m.as_str().to_string(), m.start()));
    }

    for trigger in spec.triggers {
        if let Some(pos) = find_ci(&sentence.text, trigger) {
            let matched = &sentence.text[pos..pos + trigger.len()];
            return Some((matched.to_string(), pos));
        }
    }
    None
}

/// Case-insensitive substring search (ASCII triggers over UTF-8 text)
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

// ============================================================================
// Value extraction
// ============================================================================

/// Carve the field value out of a matching sentence per its rule.
///
/// `pattern-after-trigger` and `adjacent-entity` values are exact
/// substrings of the source; no reformatting is ever applied.
fn extract_value(
    spec: &FieldSpec,
    sentence: &Sentence,
    trigger: &str,
    trigger_start: usize,
    index: &KeywordIndex,
) -> Option<String> {
    match spec.rule {
        ExtractionRule::AdjacentEntity => {
            let required = spec.required_entity?;
            let trigger_end = trigger_start + trigger.len();
            nearest_entity(&sentence.entities, required, trigger_start, trigger_end)
                .map(|e| e.text.clone())
        }
        ExtractionRule::PatternAfterTrigger => {
            let after = &sentence.text[trigger_start + trigger.len()..];
            let value = value_after_trigger(after);
            (!value.is_empty()).then(|| value.to_string())
        }
        ExtractionRule::WholeSentence => {
            let value = sentence_minus_trigger(&sentence.text, trigger_start, trigger.len());
            (!value.is_empty()).then_some(value)
        }
        ExtractionRule::TriggerLiteral => Some(trigger.to_string()),
        ExtractionRule::RegexCapture => {
            let regex = index.pattern_for(spec.name)?;
            regex.find(&sentence.text).map(|m| m.as_str().to_string())
        }
    }
}

/// Nearest entity of `required` type to the trigger span, by byte gap
fn nearest_entity(
    entities: &[Entity],
    required: crate::EntityType,
    trigger_start: usize,
    trigger_end: usize,
) -> Option<&Entity> {
    entities
        .iter()
        .filter(|e| e.entity_type == required)
        .min_by_key(|e| {
            if e.end <= trigger_start {
                trigger_start - e.end
            } else if e.start >= trigger_end {
                e.start - trigger_end
            } else {
                0 // overlapping spans count as adjacent
            }
        })
}

/// Substring after the trigger, up to the next in-sentence delimiter.
///
/// Label punctuation and a single link word right after the trigger
/// are skipped; commas and periods between digits are part of the
/// value ("12,50,000" or "9.2" survive intact).
fn value_after_trigger(after: &str) -> &str {
    let mut rest = after.trim_start_matches([' ', '\t', ':', '-', '=']);

    for word in LINK_WORDS {
        if let Some(stripped) = rest.strip_prefix(word) {
            if stripped.starts_with(char::is_whitespace) {
                rest = stripped.trim_start();
                break;
            }
        }
    }

    let cut = delimiter_position(rest).unwrap_or(rest.len());
    rest[..cut].trim_end()
}

/// Position of the first delimiter in `text`, if any
fn delimiter_position(text: &str) -> Option<usize> {
    for (i, c) in text.char_indices() {
        match c {
            ',' | ';' | '.' => {
                let prev_digit = text[..i]
                    .chars()
                    .next_back()
                    .is_some_and(|p| p.is_ascii_digit());
                let next_digit = text[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(|n| n.is_ascii_digit());
                if !(prev_digit && next_digit) {
                    return Some(i);
                }
            }
            '\n' => return Some(i),
            ' ' => {
                let tail = &text[i..];
                if CONJUNCTIONS.iter().any(|conj| {
                    tail.len() >= conj.len()
                        && tail.as_bytes()[..conj.len()].eq_ignore_ascii_case(conj.as_bytes())
                }) {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// The sentence with the matched trigger phrase removed
fn sentence_minus_trigger(text: &str, trigger_start: usize, trigger_len: usize) -> String {
    let left = text[..trigger_start].trim_end();
    let right = text[trigger_start + trigger_len..].trim_start_matches([' ', '\t', ':', '-', '=']);

    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (true, false) => right.to_string(),
        (false, true) => left.to_string(),
        (false, false) => format!("{left} {right}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{segment, EntityTagger, KeywordIndex, RuleBasedTagger};

    fn tagged(text: &str) -> Vec<Sentence> {
        let tagger = RuleBasedTagger::new();
        let mut sentences = segment(text);
        for sentence in &mut sentences {
            sentence.entities = tagger.tag(&sentence.text).unwrap();
        }
        sentences
    }

    fn scan_text(text: &str) -> Vec<Hit> {
        let index = KeywordIndex::standard();
        scan(&tagged(text), &index, &ScanOptions::default())
    }

    fn hit<'a>(hits: &'a [Hit], field: &str) -> Option<&'a Hit> {
        hits.iter().find(|h| h.field == field)
    }

    #[test]
    fn test_value_after_trigger_fidelity() {
        assert_eq!(value_after_trigger(": 12,50,000 INR per annum."), "12,50,000 INR per annum");
        assert_eq!(value_after_trigger(" is 30 days."), "30 days");
        assert_eq!(value_after_trigger(" on 5th May 1990 in Pune."), "on 5th May 1990 in Pune");
    }

    #[test]
    fn test_delimiter_respects_digit_commas() {
        assert_eq!(delimiter_position("12,50,000 INR, negotiable"), Some(13));
        assert_eq!(delimiter_position("9.2 out of 10"), None);
    }

    #[test]
    fn test_conjunction_ends_value() {
        assert_eq!(value_after_trigger(" is 30 days and negotiable."), "30 days");
    }

    #[test]
    fn test_salary_as_is() {
        let hits = scan_text("Salary: 12,50,000 INR per annum.");
        let hit = hit(&hits, "Current Salary").unwrap();
        assert_eq!(hit.value, "12,50,000 INR per annum");
        assert_eq!(hit.context, "Salary: 12,50,000 INR per annum.");
    }

    #[test]
    fn test_entity_gating_blocks_bare_trigger() {
        // "company" with no organization entity in the sentence
        let hits = scan_text("I want to grow with a good company someday.");
        assert!(hit(&hits, "Current Company").is_none());
    }

    #[test]
    fn test_adjacent_entity_value() {
        let hits = scan_text("I am working at Infosys Technologies in Pune.");
        assert_eq!(hit(&hits, "Current Company").unwrap().value, "Infosys Technologies");
    }

    #[test]
    fn test_first_match_wins() {
        let hits = scan_text("Born in 1990. He was born on 5th May 1990 in Pune.");
        let hit = hit(&hits, "Date of Birth").unwrap();
        assert_eq!(hit.sentence_index, 0);
        assert_eq!(hit.value, "in 1990");
        assert_eq!(hit.context, "Born in 1990.");
    }

    #[test]
    fn test_concat_all_keeps_first_value() {
        let index = KeywordIndex::standard();
        let sentences = tagged("Born in 1990. He was born on 5th May 1990 in Pune.");
        let options = ScanOptions {
            comment_policy: recap_core::CommentPolicy::ConcatAll,
        };

        let hits = scan(&sentences, &index, &options);
        let hit = hit(&hits, "Date of Birth").unwrap();
        assert_eq!(hit.value, "in 1990");
        assert_eq!(
            hit.context,
            "Born in 1990. He was born on 5th May 1990 in Pune."
        );
    }

    #[test]
    fn test_multi_field_single_sentence() {
        let hits = scan_text("Completed B.Tech from XYZ Institute in 2012.");

        let degree = hit(&hits, "Highest Degree").unwrap();
        let institution = hit(&hits, "Institution").unwrap();
        assert_eq!(degree.value, "B.Tech");
        assert_eq!(institution.value, "XYZ Institute");
        assert_eq!(degree.context, institution.context);
    }

    #[test]
    fn test_whole_sentence_minus_trigger() {
        let hits = scan_text("Hobbies: reading, cricket and trekking.");
        assert_eq!(
            hit(&hits, "Hobbies").unwrap().value,
            "reading, cricket and trekking."
        );
    }

    #[test]
    fn test_regex_field_without_trigger() {
        let hits = scan_text("Reach me at rahul.sharma@example.com anytime.");
        assert_eq!(hit(&hits, "Email").unwrap().value, "rahul.sharma@example.com");
    }

    #[test]
    fn test_at_most_one_hit_per_field() {
        let hits = scan_text("Salary: 10,00,000 INR. Salary: 12,00,000 INR.");
        assert_eq!(hits.iter().filter(|h| h.field == "Current Salary").count(), 1);
    }
}
