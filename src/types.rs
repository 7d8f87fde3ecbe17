//! View-models for the `/search` JSON payload.
//!
//! These are transient: each submission deserializes a fresh
//! [`SearchResponse`] that fully replaces the previous render, and nothing
//! is mutated after receipt. Field names follow the server contract
//! exactly, so the structs double as documentation of the wire format.
//!
//! Unknown fields are ignored and every field the server may omit carries
//! `#[serde(default)]`: an error payload can be as small as
//! `{"error": "..."}` and must still deserialize.
//!
//! # Trust boundary
//!
//! `snippet` and `semantic_info.highlighted_snippet` are pre-rendered HTML
//! produced upstream (the server escapes and `<mark>`-highlights them) and
//! are interpolated verbatim. Every other string field is untrusted and is
//! escaped by the render layer.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Everything the `/search` endpoint returns for one query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_found: u64,
    #[serde(default)]
    pub results: Vec<SearchHit>,
    /// Logical failure reported despite a 2xx status, e.g. "index
    /// unavailable". When present, nothing else in the payload renders.
    #[serde(default)]
    pub error: Option<String>,
    /// Semantic query expansion, present when the server ran it.
    #[serde(default)]
    pub expansion_result: Option<ExpansionInfo>,
    /// Per-stage pipeline counters, present when the server collected them.
    #[serde(default)]
    pub selection_stats: Option<SelectionStats>,
}

/// One result card.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub doc_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub date_created: String,
    /// Server-computed score, 0-100.
    #[serde(default)]
    pub relevance: f64,
    /// Pre-rendered HTML fragment (trusted, not escaped).
    #[serde(default)]
    pub snippet: String,
    /// Query terms the server found in this document, shown as tags.
    #[serde(default)]
    pub query_terms_in_doc: Vec<String>,
    #[serde(default)]
    pub semantic_info: Option<SemanticInfo>,
}

/// Embedding-based similarity attached to a hit by the semantic enhancer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticInfo {
    /// 0-1 float, displayed as a percentage.
    #[serde(default)]
    pub semantic_score: f64,
    /// Snippet re-highlighted with expanded terms; replaces the plain
    /// snippet when present. Trusted HTML like `snippet`.
    #[serde(default)]
    pub highlighted_snippet: Option<String>,
}

/// A near-synonym found in the corpus, arriving as a `["term", score]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredTerm(pub String, pub f64);

impl ScoredTerm {
    pub fn term(&self) -> &str {
        &self.0
    }

    pub fn score(&self) -> f64 {
        self.1
    }
}

/// Server-side query broadening: original terms mapped to scored
/// near-synonyms. The panel renders in `original_terms` order; a `BTreeMap`
/// keeps the fallback for unlisted terms deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpansionInfo {
    #[serde(default)]
    pub original_terms: Vec<String>,
    #[serde(default)]
    pub similar_terms: BTreeMap<String, Vec<ScoredTerm>>,
}

/// Counters describing how the server narrowed and re-ranked candidates.
///
/// Each stage is either absent, `{"skipped": true}`, or a counter set.
/// Absent and skipped stages are hidden rather than rendered empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionStats {
    #[serde(default)]
    pub pre_selection: Option<PreSelectionStats>,
    #[serde(default)]
    pub ranking_enhancement: Option<RankingEnhancementStats>,
    #[serde(default)]
    pub semantic_enhancement: Option<SemanticEnhancementStats>,
}

/// Rule-based pre-filtering: document counts before and after.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreSelectionStats {
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub initial_documents: Option<u64>,
    #[serde(default)]
    pub after_filtering: Option<u64>,
}

impl PreSelectionStats {
    /// Share of documents surviving the filter, as a percentage.
    /// `None` when counts are missing or the initial set was empty.
    pub fn efficiency_percent(&self) -> Option<f64> {
        match (self.initial_documents, self.after_filtering) {
            (Some(initial), Some(after)) if initial > 0 => {
                Some(after as f64 / initial as f64 * 100.0)
            }
            _ => None,
        }
    }
}

/// Freshness/length/coverage re-ranking of the result list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingEnhancementStats {
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub enhanced_results: Option<u64>,
    #[serde(default)]
    pub average_enhancement: Option<f64>,
}

/// Embedding-based scoring and query expansion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticEnhancementStats {
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub semantically_enhanced: Option<u64>,
    #[serde(default)]
    pub avg_semantic_score: Option<f64>,
    #[serde(default)]
    pub query_expansion_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_error_payload_deserializes() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"error": "index unavailable"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("index unavailable"));
        assert!(response.results.is_empty());
        assert_eq!(response.total_found, 0);
    }

    #[test]
    fn full_hit_deserializes_with_semantic_info() {
        let json = r#"{
            "query": "cat",
            "total_found": 1,
            "results": [{
                "doc_id": 7,
                "title": "Cats",
                "file_type": "txt",
                "file_path": "/docs/cats.txt",
                "date_created": "2024-01-02 12:00:00",
                "relevance": 73.4,
                "snippet": "about <mark>cat</mark>s",
                "query_terms_in_doc": ["cat"],
                "semantic_info": {
                    "semantic_score": 0.87,
                    "highlighted_snippet": "about <mark>cat</mark>s and felines"
                }
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let hit = &response.results[0];
        assert_eq!(hit.doc_id, 7);
        assert_eq!(hit.relevance, 73.4);
        let info = hit.semantic_info.as_ref().unwrap();
        assert_eq!(info.semantic_score, 0.87);
        assert!(info
            .highlighted_snippet
            .as_deref()
            .unwrap()
            .contains("felines"));
    }

    #[test]
    fn similar_terms_deserialize_from_pair_arrays() {
        let json = r#"{
            "original_terms": ["cat"],
            "similar_terms": {"cat": [["feline", 0.91], ["kitten", 0.83]]}
        }"#;
        let info: ExpansionInfo = serde_json::from_str(json).unwrap();
        let similars = &info.similar_terms["cat"];
        assert_eq!(similars[0], ScoredTerm("feline".to_string(), 0.91));
        assert_eq!(similars[1].term(), "kitten");
    }

    #[test]
    fn skipped_stage_deserializes_without_counters() {
        let stats: SelectionStats = serde_json::from_str(
            r#"{"pre_selection": {"skipped": true}, "ranking_enhancement": null}"#,
        )
        .unwrap();
        let pre = stats.pre_selection.unwrap();
        assert!(pre.skipped);
        assert_eq!(pre.initial_documents, None);
        assert!(stats.ranking_enhancement.is_none());
        assert!(stats.semantic_enhancement.is_none());
    }

    #[test]
    fn efficiency_percent_derivation() {
        let pre = PreSelectionStats {
            skipped: false,
            initial_documents: Some(100),
            after_filtering: Some(25),
        };
        assert_eq!(pre.efficiency_percent(), Some(25.0));

        let empty = PreSelectionStats {
            initial_documents: Some(0),
            after_filtering: Some(0),
            ..Default::default()
        };
        assert_eq!(empty.efficiency_percent(), None);
    }
}
