//! End-to-end screening of one uploaded document.

use std::time::Instant;

use tracing::{debug, info};

use crate::classify::{Classifier, FeatureTransformer, ModelBundle, resolve_category};
use crate::document::{Document, DocumentReader};
use crate::error::Result;
use crate::extract::{ContactExtractor, TextNormalizer};
use crate::models::config::ReaderConfig;
use crate::models::result::ScreeningResult;

/// Reads a document, extracts contacts and predicts its job category.
///
/// Holds the loaded artifacts read-only, so one screener can serve any number
/// of requests from any number of threads.
pub struct ResumeScreener<V: FeatureTransformer, C: Classifier> {
    reader: DocumentReader,
    contacts: ContactExtractor,
    normalizer: TextNormalizer,
    vectorizer: V,
    classifier: C,
}

impl<V: FeatureTransformer, C: Classifier> ResumeScreener<V, C> {
    /// Create a screener with the default reader configuration.
    pub fn new(vectorizer: V, classifier: C) -> Self {
        Self::with_reader_config(vectorizer, classifier, ReaderConfig::default())
    }

    pub fn with_reader_config(vectorizer: V, classifier: C, reader: ReaderConfig) -> Self {
        Self {
            reader: DocumentReader::new(reader),
            contacts: ContactExtractor::new(),
            normalizer: TextNormalizer::new(),
            vectorizer,
            classifier,
        }
    }

    pub fn vectorizer(&self) -> &V {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Screen one uploaded document.
    ///
    /// Unsupported or unreadable documents fail before any classification.
    pub fn screen(&self, document: &Document) -> Result<ScreeningResult> {
        let start = Instant::now();

        let text = self.reader.read(document)?;
        let mut result = self.screen_text(&text)?;

        result.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Screened {} document as '{}' in {}ms",
            document.kind, result.category, result.processing_time_ms
        );

        Ok(result)
    }

    /// Screen text that has already been read from a document.
    pub fn screen_text(&self, text: &str) -> Result<ScreeningResult> {
        let start = Instant::now();

        // Contacts come from the raw text; normalization would strip '@' and '.'
        let contact = self.contacts.extract(text);
        debug!(
            "Contacts: name={}, email={}, phone={}",
            contact.has_name(),
            contact.has_email(),
            contact.has_phone()
        );

        let category_id = self.classify_text(text)?;

        Ok(ScreeningResult {
            contact,
            category_id,
            category: resolve_category(category_id).to_string(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Normalize, vectorize and classify raw text, returning the category id.
    pub fn classify_text(&self, text: &str) -> Result<i64> {
        let cleaned = self.normalizer.normalize(text);
        let features = self.vectorizer.vectorize(&cleaned)?;
        debug!(
            "Feature vector: {} columns, {} non-zero",
            features.dimension(),
            features.nnz()
        );

        let id = self.classifier.classify(&features)?;
        debug!("Classifier returned id {}", id);
        Ok(id)
    }
}

impl ResumeScreener<crate::classify::TfidfVectorizer, crate::classify::LoadedClassifier> {
    /// Build a screener from artifacts loaded at startup.
    pub fn from_bundle(bundle: ModelBundle, reader: ReaderConfig) -> Self {
        Self::with_reader_config(bundle.vectorizer, bundle.classifier, reader)
    }
}
