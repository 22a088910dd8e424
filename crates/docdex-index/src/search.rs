//! Search engine: metadata and vector query modes.

use docdex_core::{
    DocumentMatch, DocumentStore, Fingerprint, MediaType, QueryInput, SearchConfig, SearchError,
    SearchRequest,
};
use docdex_extract::Extractor;
use docdex_vector::{cosine_similarity, Vectorizer};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Answers search requests against a document store.
///
/// Query fingerprints go through the same extractor and vectorizer as
/// indexed documents, so a query and a stored document derived from the
/// same bytes always land in the same class.
pub struct SearchEngine {
    store: Arc<dyn DocumentStore>,
    extractor: Extractor,
    vectorizer: Vectorizer,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create a search engine over the given store.
    pub fn new(store: Arc<dyn DocumentStore>, vectorizer: Vectorizer, config: SearchConfig) -> Self {
        Self {
            store,
            extractor: Extractor::new(),
            vectorizer,
            config,
        }
    }

    /// Execute a search request.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<DocumentMatch>, SearchError> {
        match request {
            SearchRequest::Metadata { query } => self.metadata_search(&query).await,
            SearchRequest::Vector { input } => self.vector_search(&input).await,
        }
    }

    /// Substring match over filename and media type.
    ///
    /// An empty (or whitespace-only) query is rejected rather than
    /// silently matching nothing.
    async fn metadata_search(&self, query: &str) -> Result<Vec<DocumentMatch>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        debug!("metadata search for {query:?}");
        let docs = self.store.find_metadata(query).await?;
        Ok(docs
            .into_iter()
            .map(|doc| DocumentMatch::from_document(doc, None))
            .collect())
    }

    /// Nearest-neighbor ranking of stored fingerprints against the query.
    ///
    /// Documents of a different fingerprint class are skipped, scores at
    /// or below the relevance threshold are discarded, and survivors are
    /// ordered by descending score with ascending id breaking ties.
    async fn vector_search(&self, input: &QueryInput) -> Result<Vec<DocumentMatch>, SearchError> {
        let query_fp = self.query_fingerprint(input);
        let Some(query_class) = query_fp.class() else {
            return Err(SearchError::EmptyQueryFingerprint);
        };

        debug!(
            "vector search with {query_class:?} query fingerprint, threshold {}",
            self.config.relevance_threshold
        );

        let docs = self.store.all().await?;
        let mut matches: Vec<DocumentMatch> = docs
            .into_iter()
            .filter(|doc| doc.fingerprint.class() == Some(query_class))
            .filter_map(|doc| {
                let score = cosine_similarity(&query_fp, &doc.fingerprint);
                (score > self.config.relevance_threshold)
                    .then(|| DocumentMatch::from_document(doc, Some(score)))
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!("vector search matched {} document(s)", matches.len());
        Ok(matches)
    }

    /// Derive the query fingerprint from text or image bytes.
    fn query_fingerprint(&self, input: &QueryInput) -> Fingerprint {
        match input {
            QueryInput::Text(text) => self.vectorizer.vectorize_text(text),
            QueryInput::ImageBytes(bytes) => {
                let extraction = self.extractor.extract(bytes, MediaType::Image);
                self.vectorizer.vectorize(&extraction.content)
            }
        }
    }
}
