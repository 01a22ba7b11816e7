//! Field schema and keyword index
//!
//! The fixed 37-field candidate-profile schema: for each field, the
//! trigger terms that signal it, an optional required entity type,
//! and the rule for carving the value out of a matching sentence.
//! The index is built once at startup and passed by reference into
//! the scanner; it is never mutated afterwards.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::EntityType;

/// Number of fields in the output schema
pub const FIELD_COUNT: usize = 37;

// ============================================================================
// Extraction Rules
// ============================================================================

/// How a field's value is carved out of a matching sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionRule {
    /// Nearest entity of the required type in the same sentence
    AdjacentEntity,
    /// Substring after the trigger, up to the next sentence-internal
    /// delimiter; kept exactly as written in the source
    PatternAfterTrigger,
    /// The sentence itself minus the matched trigger phrase
    WholeSentence,
    /// The matched trigger as it appears in the sentence (degrees:
    /// the trigger term is itself the value)
    TriggerLiteral,
    /// First match of a field-specific pattern in the sentence
    RegexCapture,
}

impl ExtractionRule {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdjacentEntity => "adjacent-entity",
            Self::PatternAfterTrigger => "pattern-after-trigger",
            Self::WholeSentence => "whole-sentence",
            Self::TriggerLiteral => "trigger-literal",
            Self::RegexCapture => "regex-capture",
        }
    }
}

impl std::fmt::Display for ExtractionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Field Specs
// ============================================================================

/// One field of the output schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, as it appears in the output record
    pub name: &'static str,
    /// Trigger terms, tried in order, matched case-insensitively.
    /// Empty for fields where the value pattern is itself the trigger.
    pub triggers: &'static [&'static str],
    /// Entity type that must co-occur in the sentence for a hit
    pub required_entity: Option<EntityType>,
    pub rule: ExtractionRule,
    /// Pattern source for `RegexCapture` fields
    pub pattern: Option<&'static str>,
}

// ============================================================================
// Keyword Index
// ============================================================================

/// The immutable field→trigger configuration table.
///
/// Construct once with [`KeywordIndex::standard`] and share by
/// reference; versioned together with the 37-field schema it encodes.
pub struct KeywordIndex {
    fields: Vec<FieldSpec>,
    patterns: HashMap<&'static str, Regex>,
}

impl KeywordIndex {
    /// Build the standard 37-field schema
    pub fn standard() -> Self {
        let mut index = Self {
            fields: Vec::new(),
            patterns: HashMap::new(),
        };

        use ExtractionRule::*;

        // Identity and contact
        index.add(
            "Full Name",
            &["name"],
            Some(EntityType::Person),
            AdjacentEntity,
            None,
        );
        index.add(
            "Email",
            &[],
            None,
            RegexCapture,
            Some(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"),
        );
        index.add(
            "Phone",
            &[],
            None,
            RegexCapture,
            Some(r"(?:\+?\d{1,3}[-.\s]?)?(?:\d{5}[-.\s]\d{5}|\(?\d{3,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{4})"),
        );
        index.add(
            "Date of Birth",
            &["date of birth", "born", "dob"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add("Gender", &["gender"], None, PatternAfterTrigger, None);
        index.add(
            "Marital Status",
            &["marital status"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Nationality",
            &["nationality", "citizen of"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Languages Known",
            &["languages known", "languages", "fluent in"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Address",
            &["address", "residing at", "resident of"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "City",
            &["city", "based in", "located in", "lives in"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Pin Code",
            &["pin code", "pincode", "postal code"],
            None,
            PatternAfterTrigger,
            None,
        );

        // Profile
        index.add(
            "Career Objective",
            &["objective", "seeking", "aspiring to"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Profile Summary",
            &["summary", "professional with", "experienced in"],
            None,
            WholeSentence,
            None,
        );

        // Employment
        index.add(
            "Current Designation",
            &["designation", "working as", "employed as", "job title"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Current Company",
            &["working at", "working in", "employed at", "employed with", "currently with", "company"],
            Some(EntityType::Organization),
            AdjacentEntity,
            None,
        );
        index.add(
            "Previous Company",
            &["previously worked", "previously employed", "former employer", "earlier worked"],
            Some(EntityType::Organization),
            AdjacentEntity,
            None,
        );
        index.add(
            "Total Experience",
            &["total experience", "years of experience", "experience of"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Notice Period",
            &["notice period"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Current Salary",
            &["current salary", "current ctc", "drawing a salary of", "salary"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Expected Salary",
            &["expected salary", "expected ctc", "salary expectation"],
            None,
            PatternAfterTrigger,
            None,
        );

        // Education
        index.add(
            "Highest Degree",
            &[
                "b.tech", "m.tech", "b.e.", "m.e.", "b.sc", "m.sc", "b.a.", "m.a.", "bca", "mca",
                "mba", "ph.d", "diploma",
            ],
            None,
            TriggerLiteral,
            None,
        );
        index.add(
            "Specialization",
            &["specialization in", "specialized in", "majored in", "stream of"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Institution",
            &["institute", "college", "school"],
            Some(EntityType::Organization),
            AdjacentEntity,
            None,
        );
        index.add(
            "University",
            &["university"],
            Some(EntityType::Organization),
            AdjacentEntity,
            None,
        );
        index.add(
            "Year of Passing",
            &["year of passing", "passed out in", "graduated in", "batch of"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Tenth Percentage",
            &["10th", "ssc", "matriculation"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "Twelfth Percentage",
            &["12th", "hsc", "intermediate"],
            None,
            PatternAfterTrigger,
            None,
        );
        index.add(
            "CGPA",
            &["cgpa", "gpa of", "grade point"],
            None,
            PatternAfterTrigger,
            None,
        );

        // Extras
        index.add(
            "Certifications",
            &["certified in", "certification", "certificate in"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Technical Skills",
            &["skills", "proficient in", "skilled in", "technologies known"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Projects",
            &["project on", "worked on a project", "developed a"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Achievements",
            &["achieved", "awarded", "won the"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "Hobbies",
            &["hobbies", "interests include"],
            None,
            WholeSentence,
            None,
        );
        index.add(
            "LinkedIn",
            &["linkedin"],
            None,
            RegexCapture,
            Some(r"(?:https?://)?(?:www\.)?linkedin\.com/[A-Za-z0-9_/.-]+"),
        );
        index.add(
            "GitHub",
            &["github"],
            None,
            RegexCapture,
            Some(r"(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_/.-]+"),
        );
        index.add(
            "References",
            &["reference", "referred by"],
            Some(EntityType::Person),
            AdjacentEntity,
            None,
        );
        index.add(
            "Availability",
            &["available from", "can join", "date of joining"],
            None,
            PatternAfterTrigger,
            None,
        );

        debug_assert_eq!(index.fields.len(), FIELD_COUNT);
        index
    }

    fn add(
        &mut self,
        name: &'static str,
        triggers: &'static [&'static str],
        required_entity: Option<EntityType>,
        rule: ExtractionRule,
        pattern: Option<&'static str>,
    ) {
        if let Some(source) = pattern {
            // Schema patterns are static; a failure here is a defect
            // in the table itself, caught by the schema tests.
            if let Ok(regex) = Regex::new(source) {
                self.patterns.insert(name, regex);
            }
        }

        self.fields.push(FieldSpec {
            name,
            triggers,
            required_entity,
            rule,
            pattern,
        });
    }

    /// All field specs, in schema (output) order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Compiled pattern for a `RegexCapture` field
    pub fn pattern_for(&self, field: &str) -> Option<&Regex> {
        self.patterns.get(field)
    }
}
