//! Recap Extractor - candidate-profile field extraction pipeline
//!
//! Converts free-form text extracted from a profile document into a
//! fixed 37-field record, each field annotated with the sentence that
//! justified its value:
//! - Sentence segmentation
//! - Named-entity tagging (organizations, person names)
//! - Keyword-triggered field scanning, position-independent
//! - Record assembly with a Comments value per field

pub mod record;
pub mod scanner;
pub mod schema;
pub mod segment;
pub mod tagger;

pub use record::{Record, RecordField};
pub use scanner::{scan, Hit, ScanOptions};
pub use schema::{ExtractionRule, FieldSpec, KeywordIndex, FIELD_COUNT};
pub use segment::segment;
pub use tagger::RuleBasedTagger;

use recap_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ============================================================================
// Entity Types
// ============================================================================

/// Entity types produced by the tagging capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Organization,
    Person,
}

impl EntityType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Person => "Person",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An entity span tagged within a single sentence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// The span text, exactly as written in the sentence
    pub text: String,
    pub entity_type: EntityType,
    /// Byte offset of the span start, relative to the sentence text
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
    /// Tagger-internal score, used only for overlap resolution
    pub confidence: f32,
}

// ============================================================================
// Sentences
// ============================================================================

/// One sentence of the source document with its cached entity tags
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Position in document order, used for tie-breaking only
    pub index: usize,
    /// Original substring of the source, whitespace-trimmed at the ends
    pub text: String,
    /// Byte offset range of `text` within the source document
    pub start: usize,
    pub end: usize,
    /// Entity tags, populated once after segmentation and read-only after
    pub entities: Vec<Entity>,
}

// ============================================================================
// Tagger capability
// ============================================================================

/// Trait for entity taggers.
///
/// The pipeline treats tagging as a black-box capability over sentence
/// text so the concrete technology can be swapped without touching the
/// scanning logic. Implementations must be deterministic.
pub trait EntityTagger: Send + Sync {
    /// Tag organization and person spans in one sentence
    fn tag(&self, text: &str) -> Result<Vec<Entity>>;
}

// ============================================================================
// Pipeline
// ============================================================================

/// The end-to-end extraction pipeline for one document.
///
/// Holds the tagger capability and the immutable keyword index; both
/// are shared across documents and never mutated at run time.
pub struct ExtractionPipeline {
    tagger: Box<dyn EntityTagger>,
    index: KeywordIndex,
    options: ScanOptions,
}

impl ExtractionPipeline {
    /// Create a pipeline from a tagger and a keyword index
    pub fn new(tagger: Box<dyn EntityTagger>, index: KeywordIndex) -> Self {
        Self {
            tagger,
            index,
            options: ScanOptions::default(),
        }
    }

    /// Create a pipeline with the rule-based tagger and standard schema
    pub fn standard() -> Self {
        Self::new(Box::new(RuleBasedTagger::new()), KeywordIndex::standard())
    }

    /// Set scanning options
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// The keyword index this pipeline scans with
    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Run the pipeline over one document's extracted text.
    ///
    /// Never fails: empty input yields a record with all fields empty,
    /// and a tagger error on a sentence degrades that sentence to an
    /// empty entity set instead of aborting the document.
    pub fn run(&self, raw_text: &str) -> Record {
        let mut sentences = segment::segment(raw_text);

        // Tag each sentence once; scanning re-reads the cached tags.
        // Tagging is independent per sentence, so this loop could be
        // parallelized without affecting the result.
        for sentence in &mut sentences {
            match self.tagger.tag(&sentence.text) {
                Ok(entities) => sentence.entities = entities,
                Err(e) => {
                    warn!(
                        sentence = sentence.index,
                        error = %e,
                        "entity tagging failed, continuing without tags"
                    );
                }
            }
        }

        let hits = scanner::scan(&sentences, &self.index, &self.options);
        info!(
            sentences = sentences.len(),
            fields_matched = hits.len(),
            "document scanned"
        );

        record::build(&hits, &self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingTagger;

    impl EntityTagger for FailingTagger {
        fn tag(&self, _text: &str) -> Result<Vec<Entity>> {
            Err(recap_core::RecapError::TaggerError(
                "model unavailable".to_string(),
            ))
        }
    }

    #[test]
    fn test_pipeline_empty_input() {
        let pipeline = ExtractionPipeline::standard();
        let record = pipeline.run("");

        assert_eq!(record.fields().len(), FIELD_COUNT);
        assert!(record.fields().iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_pipeline_tagger_failure_degrades() {
        let pipeline =
            ExtractionPipeline::new(Box::new(FailingTagger), KeywordIndex::standard());
        let record = pipeline.run("I have been working at Infosys Technologies since 2019.");

        // Entity-gated fields get nothing, but the document still
        // produces a complete record and ungated fields still work.
        assert_eq!(record.fields().len(), FIELD_COUNT);
        assert_eq!(record.get("Current Company").unwrap().value, "");
    }

    #[test]
    fn test_pipeline_basic_extraction() {
        let pipeline = ExtractionPipeline::standard();
        let record = pipeline.run(
            "My name is Rahul Sharma. I am currently working at Infosys Technologies. \
             Current salary is 12,50,000 INR per annum.",
        );

        assert_eq!(record.get("Full Name").unwrap().value, "Rahul Sharma");
        assert_eq!(
            record.get("Current Company").unwrap().value,
            "Infosys Technologies"
        );
        assert_eq!(
            record.get("Current Salary").unwrap().value,
            "12,50,000 INR per annum"
        );
    }
}
