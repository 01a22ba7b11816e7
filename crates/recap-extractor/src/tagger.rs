//! Rule-based entity tagging
//!
//! Default implementation of the [`EntityTagger`] capability using
//! regex patterns and a dictionary of well-known organizations.
//! Output is deterministic: patterns run in a fixed order and overlap
//! resolution is stable, so re-tagging the same sentence always
//! yields the same spans.

use regex::Regex;

use crate::{Entity, EntityTagger, EntityType};
use recap_core::Result;

/// Rule-based tagger for organization and person spans
pub struct RuleBasedTagger {
    /// Whole-match patterns (regex, type, confidence)
    patterns: Vec<(Regex, EntityType, f32)>,
    /// Patterns where capture group 1 is the entity span
    capture_patterns: Vec<(Regex, EntityType, f32)>,
    /// Known organization names, exact word-bounded matches
    organizations: Vec<&'static str>,
}

impl RuleBasedTagger {
    /// Create a tagger with the default profile-domain rules
    pub fn new() -> Self {
        let mut tagger = Self {
            patterns: Vec::new(),
            capture_patterns: Vec::new(),
            organizations: Vec::new(),
        };

        tagger.init_patterns();
        tagger.init_dictionary();
        tagger
    }

    fn init_patterns(&mut self) {
        // Organizations: capitalized run ending in an institutional suffix
        self.add_pattern(
            r"(?:[A-Z][\w&.]*\s+)+(?:Institute|University|College|School|Academy|Technologies|Technology|Solutions|Systems|Software|Infotech|Consultancy|Services|Labs|Limited|Ltd\.?|Inc\.?|Corporation|Corp\.?|Group|Bank)",
            EntityType::Organization,
            0.95,
        );

        // "Institute of Technology" style, suffix in the middle
        self.add_pattern(
            r"(?:[A-Z][\w&.]*\s+)*(?:Institute|University|College|School)(?:\s+of\s+[A-Z][\w]*)+",
            EntityType::Organization,
            0.95,
        );

        // Persons: honorific followed by capitalized names
        self.add_pattern(
            r"(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3}",
            EntityType::Person,
            0.9,
        );

        // Persons introduced by a name label or self-introduction
        self.add_capture_pattern(
            r"[Nn]ame\s*(?:is|:|-)\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})",
            EntityType::Person,
            0.85,
        );
        self.add_capture_pattern(
            r"(?:I am|I'm)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
            EntityType::Person,
            0.7,
        );
        self.add_capture_pattern(
            r"[Rr]eferred\s+by\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})",
            EntityType::Person,
            0.8,
        );
    }

    fn init_dictionary(&mut self) {
        // Employers common enough to appear without an org suffix.
        // Kept sorted so scanning order is fixed.
        self.organizations = vec![
            "Accenture",
            "Amazon",
            "Capgemini",
            "Cognizant",
            "Deloitte",
            "Flipkart",
            "Google",
            "HCL",
            "IBM",
            "Infosys",
            "Microsoft",
            "Oracle",
            "SAP",
            "TCS",
            "Tech Mahindra",
            "Wipro",
        ];
    }

    fn add_pattern(&mut self, pattern: &str, entity_type: EntityType, confidence: f32) {
        if let Ok(regex) = Regex::new(pattern) {
            self.patterns.push((regex, entity_type, confidence));
        }
    }

    fn add_capture_pattern(&mut self, pattern: &str, entity_type: EntityType, confidence: f32) {
        if let Ok(regex) = Regex::new(pattern) {
            self.capture_patterns.push((regex, entity_type, confidence));
        }
    }

    /// Extract entities using the whole-match and capture patterns
    fn extract_by_patterns(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for (regex, entity_type, confidence) in &self.patterns {
            for mat in regex.find_iter(text) {
                entities.push(Entity {
                    text: mat.as_str().to_string(),
                    entity_type: *entity_type,
                    start: mat.start(),
                    end: mat.end(),
                    confidence: *confidence,
                });
            }
        }

        for (regex, entity_type, confidence) in &self.capture_patterns {
            for caps in regex.captures_iter(text) {
                if let Some(group) = caps.get(1) {
                    entities.push(Entity {
                        text: group.as_str().to_string(),
                        entity_type: *entity_type,
                        start: group.start(),
                        end: group.end(),
                        confidence: *confidence,
                    });
                }
            }
        }

        entities
    }

    /// Extract entities by dictionary lookup, word-bounded
    fn extract_by_dictionary(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let bytes = text.as_bytes();

        for name in &self.organizations {
            for (start, matched) in text.match_indices(name) {
                let end = start + matched.len();
                let bounded_left =
                    start == 0 || !(bytes[start - 1] as char).is_ascii_alphanumeric();
                let bounded_right =
                    end == text.len() || !(bytes[end] as char).is_ascii_alphanumeric();

                if bounded_left && bounded_right {
                    entities.push(Entity {
                        text: matched.to_string(),
                        entity_type: EntityType::Organization,
                        start,
                        end,
                        confidence: 0.9,
                    });
                }
            }
        }

        entities
    }

    /// Resolve overlapping spans, keeping the highest-confidence
    /// (then longest) span at each position
    fn deduplicate(&self, mut entities: Vec<Entity>) -> Vec<Entity> {
        entities.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.confidence.total_cmp(&a.confidence))
                .then(b.end.cmp(&a.end))
        });

        let mut result: Vec<Entity> = Vec::new();
        for entity in entities {
            let overlaps = result
                .iter()
                .any(|kept| entity.start < kept.end && kept.start < entity.end);
            if !overlaps {
                result.push(entity);
            }
        }

        result.sort_by_key(|e| e.start);
        result
    }
}

impl Default for RuleBasedTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTagger for RuleBasedTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities = self.extract_by_patterns(text);
        entities.extend(self.extract_by_dictionary(text));

        Ok(self.deduplicate(entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_suffix_pattern() {
        let tagger = RuleBasedTagger::new();
        let entities = tagger.tag("Completed B.Tech from XYZ Institute in 2012.").unwrap();

        let org = entities
            .iter()
            .find(|e| e.entity_type == EntityType::Organization)
            .unwrap();
        assert_eq!(org.text, "XYZ Institute");
    }

    #[test]
    fn test_org_of_pattern() {
        let tagger = RuleBasedTagger::new();
        let entities = tagger
            .tag("Studied at the Indian Institute of Technology for four years.")
            .unwrap();

        assert!(entities
            .iter()
            .any(|e| e.entity_type == EntityType::Organization
                && e.text.contains("Institute of Technology")));
    }

    #[test]
    fn test_dictionary_word_bounded() {
        let tagger = RuleBasedTagger::new();

        let entities = tagger.tag("Worked at TCS for three years.").unwrap();
        assert!(entities.iter().any(|e| e.text == "TCS"));

        // "SAP" inside another word must not match
        let entities = tagger.tag("Removed the SAPling from the garden.").unwrap();
        assert!(entities.is_empty());
    }

    #[test]
    fn test_honorific_person() {
        let tagger = RuleBasedTagger::new();
        let entities = tagger.tag("Referred by Mr. Anil Kumar.").unwrap();

        let person = entities
            .iter()
            .find(|e| e.entity_type == EntityType::Person)
            .unwrap();
        assert!(person.text.contains("Anil Kumar"));
    }

    #[test]
    fn test_name_label_person() {
        let tagger = RuleBasedTagger::new();
        let entities = tagger.tag("My name is Rahul Sharma.").unwrap();

        let person = entities
            .iter()
            .find(|e| e.entity_type == EntityType::Person)
            .unwrap();
        assert_eq!(person.text, "Rahul Sharma");
    }

    #[test]
    fn test_longer_span_wins_overlap() {
        let tagger = RuleBasedTagger::new();
        let entities = tagger.tag("Joined Infosys Technologies in 2019.").unwrap();

        let orgs: Vec<&Entity> = entities
            .iter()
            .filter(|e| e.entity_type == EntityType::Organization)
            .collect();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].text, "Infosys Technologies");
    }

    #[test]
    fn test_deterministic_output() {
        let tagger = RuleBasedTagger::new();
        let text = "My name is Rahul Sharma and I work at Infosys Technologies in Pune.";

        let first = tagger.tag(text).unwrap();
        let second = tagger.tag(text).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.start, b.start);
        }
    }
}
