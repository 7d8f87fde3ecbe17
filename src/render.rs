//! Pure HTML templating for search responses.
//!
//! Turns a decoded [`SearchResponse`] into the fragments the DOM layer
//! assigns to the page's panels. Everything here is plain string work with
//! no browser types, so the whole render path tests natively.
//!
//! CSS class names are part of the page contract (the stylesheet and HTML
//! templates are owned elsewhere) and must stay stable.
//!
//! Formatting conventions, matching what the server-side pipeline reports:
//!
//! - relevance: shown as sent (the server already rounds it)
//! - semantic score: 0-1 float shown as a percentage with one decimal
//! - expansion term scores: two decimals
//! - pre-selection efficiency: one decimal

use crate::html::SafeHtml;
use crate::types::{ExpansionInfo, ScoredTerm, SearchHit, SearchResponse, SelectionStats};

/// Shown instead of the results list when nothing matched.
pub const NO_RESULTS_MESSAGE: &str = "Nothing matched your query.";
/// Second line of the no-results placeholder.
pub const NO_RESULTS_HINT: &str = "Try different keywords or a broader query.";

/// One fragment per DOM panel. `None` means the panel should be hidden,
/// never rendered empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub results: SafeHtml,
    pub expansion: Option<SafeHtml>,
    pub stats: Option<SafeHtml>,
}

/// Render a successful response into per-panel fragments.
///
/// Always emits the query echo and total-found count; the optional panels
/// come back `Some` only when they have something to show.
pub fn render_response(response: &SearchResponse) -> RenderedPage {
    let mut results = SafeHtml::new();

    results.push_raw("<div class=\"search-info\"><p>Query: \"<strong>");
    results.push_text(&response.query);
    results.push_raw("</strong>\"</p><p>Documents found: <strong>");
    results.push_text(&response.total_found.to_string());
    results.push_raw("</strong></p></div>");

    if response.results.is_empty() {
        results.push_raw("<div class=\"no-results\"><p>");
        results.push_text(NO_RESULTS_MESSAGE);
        results.push_raw("</p><p>");
        results.push_text(NO_RESULTS_HINT);
        results.push_raw("</p></div>");
    } else {
        results.push_raw("<div class=\"results-list\">");
        for hit in &response.results {
            results.push(&render_hit(hit));
        }
        results.push_raw("</div>");
    }

    RenderedPage {
        results,
        expansion: response.expansion_result.as_ref().and_then(render_expansion),
        stats: response.selection_stats.as_ref().and_then(render_stats),
    }
}

/// One result card: header, metadata line, snippet, term tags.
fn render_hit(hit: &SearchHit) -> SafeHtml {
    let mut out = SafeHtml::new();

    out.push_raw("<div class=\"result-item\"><div class=\"result-header\">");
    out.push_raw("<h3 class=\"result-title\">\u{1F4C4} ");
    out.push_text(&hit.title);
    out.push_raw(" <span class=\"file-type\">(");
    out.push_text(&hit.file_type);
    out.push_raw(")</span></h3><div class=\"relevance-badge\">Relevance: ");
    out.push_text(&hit.relevance.to_string());
    out.push_raw("%</div></div>");

    out.push_raw("<div class=\"result-meta\"><span class=\"doc-id\">ID: ");
    out.push_text(&hit.doc_id.to_string());
    out.push_raw("</span> <span class=\"date\">Created: ");
    out.push_text(&hit.date_created);
    out.push_raw("</span> <span class=\"file-path\">Path: ");
    out.push_text(&hit.file_path);
    out.push_raw("</span></div>");

    // The snippet is trusted, pre-highlighted HTML from the server; the
    // semantic enhancer's re-highlighted version wins when present.
    let snippet = hit
        .semantic_info
        .as_ref()
        .and_then(|info| info.highlighted_snippet.as_deref())
        .unwrap_or(&hit.snippet);
    out.push_raw("<div class=\"result-snippet\">");
    out.push(&SafeHtml::trusted(snippet));
    out.push_raw("</div>");

    if !hit.query_terms_in_doc.is_empty() || hit.semantic_info.is_some() {
        out.push_raw("<div class=\"query-terms\">");
        if !hit.query_terms_in_doc.is_empty() {
            out.push_raw("<strong>Matched terms:</strong> ");
            for term in &hit.query_terms_in_doc {
                out.push_raw("<span class=\"term-tag\">");
                out.push_text(term);
                out.push_raw("</span>");
            }
        }
        if let Some(info) = &hit.semantic_info {
            out.push_raw("<span class=\"semantic-tag\">Semantic: ");
            out.push_text(&format!("{:.1}", info.semantic_score * 100.0));
            out.push_raw("%</span>");
        }
        out.push_raw("</div>");
    }

    out.push_raw("</div>");
    out
}

/// Expansion panel: each original term with its scored near-synonyms, in
/// the order the terms appeared in the query. Terms the map carries beyond
/// `original_terms` follow afterwards so nothing the server sent is lost.
/// Returns `None` when there is nothing to expand.
fn render_expansion(info: &ExpansionInfo) -> Option<SafeHtml> {
    let mut out = SafeHtml::new();

    for term in &info.original_terms {
        if let Some(similars) = info.similar_terms.get(term) {
            out.push(&render_expansion_term(term, similars));
        }
    }
    for (term, similars) in &info.similar_terms {
        if !info.original_terms.contains(term) {
            out.push(&render_expansion_term(term, similars));
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn render_expansion_term(term: &str, similars: &[ScoredTerm]) -> SafeHtml {
    let mut out = SafeHtml::new();
    if similars.is_empty() {
        return out;
    }
    out.push_raw("<div class=\"expansion-term\"><strong>");
    out.push_text(term);
    out.push_raw("</strong>: ");
    for similar in similars {
        out.push_raw("<span class=\"similar-term\">");
        out.push_text(similar.term());
        out.push_raw(" (");
        out.push_text(&format!("{:.2}", similar.score()));
        out.push_raw(")</span>");
    }
    out.push_raw("</div>");
    out
}

/// Stats panel: one block per pipeline stage that ran. Skipped or absent
/// stages contribute nothing; an all-skipped payload hides the panel.
fn render_stats(stats: &SelectionStats) -> Option<SafeHtml> {
    let mut out = SafeHtml::new();

    if let Some(pre) = stats.pre_selection.as_ref().filter(|s| !s.skipped) {
        if let (Some(initial), Some(after)) = (pre.initial_documents, pre.after_filtering) {
            out.push_raw("<div class=\"stats-stage pre-selection\"><h4>Pre-selection</h4><p>Documents: ");
            out.push_text(&initial.to_string());
            out.push_raw(" \u{2192} ");
            out.push_text(&after.to_string());
            if let Some(efficiency) = pre.efficiency_percent() {
                out.push_raw(" (efficiency ");
                out.push_text(&format!("{:.1}", efficiency));
                out.push_raw("%)");
            }
            out.push_raw("</p></div>");
        }
    }

    if let Some(ranking) = stats.ranking_enhancement.as_ref().filter(|s| !s.skipped) {
        let mut stage = SafeHtml::new();
        if let Some(count) = ranking.enhanced_results {
            stage.push_raw("<p>Results re-ranked: ");
            stage.push_text(&count.to_string());
            stage.push_raw("</p>");
        }
        if let Some(avg) = ranking.average_enhancement {
            stage.push_raw("<p>Average enhancement: ");
            stage.push_text(&format!("{:.2}", avg));
            stage.push_raw("</p>");
        }
        if !stage.is_empty() {
            out.push_raw("<div class=\"stats-stage ranking-enhancement\"><h4>Ranking enhancement</h4>");
            out.push(&stage);
            out.push_raw("</div>");
        }
    }

    if let Some(semantic) = stats.semantic_enhancement.as_ref().filter(|s| !s.skipped) {
        let mut stage = SafeHtml::new();
        if let Some(count) = semantic.semantically_enhanced {
            stage.push_raw("<p>Results scored: ");
            stage.push_text(&count.to_string());
            stage.push_raw("</p>");
        }
        if let Some(avg) = semantic.avg_semantic_score {
            stage.push_raw("<p>Average semantic score: ");
            stage.push_text(&format!("{:.2}", avg));
            stage.push_raw("</p>");
        }
        if let Some(ratio) = semantic.query_expansion_ratio {
            stage.push_raw("<p>Query expansion ratio: ");
            stage.push_text(&format!("{:.2}", ratio));
            stage.push_raw("x</p>");
        }
        if !stage.is_empty() {
            out.push_raw("<div class=\"stats-stage semantic-enhancement\"><h4>Semantic enhancement</h4>");
            out.push(&stage);
            out.push_raw("</div>");
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        PreSelectionStats, RankingEnhancementStats, ScoredTerm, SemanticEnhancementStats,
        SemanticInfo,
    };
    use std::collections::BTreeMap;

    fn hit(title: &str) -> SearchHit {
        SearchHit {
            doc_id: 1,
            title: title.to_string(),
            file_type: "txt".to_string(),
            file_path: "/docs/a.txt".to_string(),
            date_created: "2024-01-02 12:00:00".to_string(),
            relevance: 73.4,
            snippet: "plain <mark>cat</mark> snippet".to_string(),
            query_terms_in_doc: vec![],
            semantic_info: None,
        }
    }

    #[test]
    fn empty_results_render_placeholder() {
        let response = SearchResponse {
            query: "cat".to_string(),
            total_found: 0,
            ..Default::default()
        };
        let page = render_response(&response);
        let html = page.results.as_str();
        assert!(html.contains("class=\"no-results\""));
        assert!(html.contains(NO_RESULTS_MESSAGE));
        assert!(!html.contains("results-list"));
        assert!(page.expansion.is_none());
        assert!(page.stats.is_none());
    }

    #[test]
    fn query_echo_is_escaped() {
        let response = SearchResponse {
            query: "<script>".to_string(),
            ..Default::default()
        };
        let html = render_response(&response).results.into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn term_tags_render_escaped_terms() {
        let response = SearchResponse {
            query: "cat".to_string(),
            total_found: 1,
            results: vec![SearchHit {
                query_terms_in_doc: vec!["cat".to_string(), "feline".to_string()],
                ..hit("Cats")
            }],
            ..Default::default()
        };
        let html = render_response(&response).results.into_string();
        assert_eq!(html.matches("class=\"term-tag\"").count(), 2);
        assert!(html.contains("<span class=\"term-tag\">cat</span>"));
        assert!(html.contains("<span class=\"term-tag\">feline</span>"));
    }

    #[test]
    fn card_escapes_title_but_trusts_snippet() {
        let response = SearchResponse {
            query: "cat".to_string(),
            total_found: 1,
            results: vec![SearchHit {
                title: "A <b>bold</b> title".to_string(),
                ..hit("ignored")
            }],
            ..Default::default()
        };
        let html = render_response(&response).results.into_string();
        assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; title"));
        assert!(html.contains("plain <mark>cat</mark> snippet"));
    }

    #[test]
    fn relevance_renders_like_the_server_sent_it() {
        let mut one = hit("A");
        one.relevance = 73.4;
        let mut two = hit("B");
        two.relevance = 50.0;
        let response = SearchResponse {
            query: "q".to_string(),
            total_found: 2,
            results: vec![one, two],
            ..Default::default()
        };
        let html = render_response(&response).results.into_string();
        assert!(html.contains("Relevance: 73.4%"));
        assert!(html.contains("Relevance: 50%"));
    }

    #[test]
    fn semantic_info_adds_tag_and_swaps_snippet() {
        let response = SearchResponse {
            query: "cat".to_string(),
            total_found: 1,
            results: vec![SearchHit {
                semantic_info: Some(SemanticInfo {
                    semantic_score: 0.875,
                    highlighted_snippet: Some("rich <mark>feline</mark> snippet".to_string()),
                }),
                ..hit("Cats")
            }],
            ..Default::default()
        };
        let html = render_response(&response).results.into_string();
        assert!(html.contains("Semantic: 87.5%"));
        assert!(html.contains("rich <mark>feline</mark> snippet"));
        assert!(!html.contains("plain <mark>cat</mark> snippet"));
    }

    #[test]
    fn expansion_scores_format_to_two_decimals() {
        let mut similar = BTreeMap::new();
        similar.insert(
            "cat".to_string(),
            vec![
                ScoredTerm("feline".to_string(), 0.912),
                ScoredTerm("kitten".to_string(), 0.8),
            ],
        );
        let response = SearchResponse {
            query: "cat".to_string(),
            expansion_result: Some(ExpansionInfo {
                original_terms: vec!["cat".to_string()],
                similar_terms: similar,
            }),
            ..Default::default()
        };
        let panel = render_response(&response).expansion.unwrap().into_string();
        assert!(panel.contains("feline (0.91)"));
        assert!(panel.contains("kitten (0.80)"));
    }

    #[test]
    fn expansion_terms_follow_query_order_not_map_order() {
        let mut similar = BTreeMap::new();
        similar.insert(
            "whiskers".to_string(),
            vec![ScoredTerm("vibrissae".to_string(), 0.7)],
        );
        similar.insert(
            "cat".to_string(),
            vec![ScoredTerm("feline".to_string(), 0.9)],
        );
        let response = SearchResponse {
            query: "whiskers cat".to_string(),
            expansion_result: Some(ExpansionInfo {
                original_terms: vec!["whiskers".to_string(), "cat".to_string()],
                similar_terms: similar,
            }),
            ..Default::default()
        };
        let panel = render_response(&response).expansion.unwrap().into_string();
        let whiskers_at = panel.find("whiskers").unwrap();
        let cat_at = panel.find("<strong>cat</strong>").unwrap();
        assert!(whiskers_at < cat_at);
    }

    #[test]
    fn expansion_keeps_terms_missing_from_original_terms() {
        let mut similar = BTreeMap::new();
        similar.insert(
            "cat".to_string(),
            vec![ScoredTerm("feline".to_string(), 0.9)],
        );
        let response = SearchResponse {
            query: "cat".to_string(),
            expansion_result: Some(ExpansionInfo {
                original_terms: vec![],
                similar_terms: similar,
            }),
            ..Default::default()
        };
        let panel = render_response(&response).expansion.unwrap().into_string();
        assert!(panel.contains("feline (0.90)"));
    }

    #[test]
    fn empty_expansion_hides_panel() {
        let response = SearchResponse {
            query: "cat".to_string(),
            expansion_result: Some(ExpansionInfo::default()),
            ..Default::default()
        };
        assert!(render_response(&response).expansion.is_none());
    }

    #[test]
    fn pre_selection_stats_show_efficiency() {
        let response = SearchResponse {
            query: "cat".to_string(),
            selection_stats: Some(SelectionStats {
                pre_selection: Some(PreSelectionStats {
                    skipped: false,
                    initial_documents: Some(100),
                    after_filtering: Some(25),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let panel = render_response(&response).stats.unwrap().into_string();
        assert!(panel.contains("25.0%"));
        assert!(panel.contains("Documents: 100"));
    }

    #[test]
    fn skipped_stages_are_hidden() {
        let response = SearchResponse {
            query: "cat".to_string(),
            selection_stats: Some(SelectionStats {
                pre_selection: Some(PreSelectionStats {
                    skipped: true,
                    ..Default::default()
                }),
                ranking_enhancement: Some(RankingEnhancementStats {
                    skipped: true,
                    ..Default::default()
                }),
                semantic_enhancement: None,
            }),
            ..Default::default()
        };
        assert!(render_response(&response).stats.is_none());
    }

    #[test]
    fn all_three_stages_render_when_present() {
        let response = SearchResponse {
            query: "cat".to_string(),
            selection_stats: Some(SelectionStats {
                pre_selection: Some(PreSelectionStats {
                    skipped: false,
                    initial_documents: Some(40),
                    after_filtering: Some(10),
                }),
                ranking_enhancement: Some(RankingEnhancementStats {
                    skipped: false,
                    enhanced_results: Some(10),
                    average_enhancement: Some(1.234),
                }),
                semantic_enhancement: Some(SemanticEnhancementStats {
                    skipped: false,
                    semantically_enhanced: Some(10),
                    avg_semantic_score: Some(0.6),
                    query_expansion_ratio: Some(1.5),
                }),
            }),
            ..Default::default()
        };
        let panel = render_response(&response).stats.unwrap().into_string();
        assert!(panel.contains("Pre-selection"));
        assert!(panel.contains("efficiency 25.0%"));
        assert!(panel.contains("Average enhancement: 1.23"));
        assert!(panel.contains("Query expansion ratio: 1.50x"));
    }
}
