//! Browser-side controller for a document search page.
//!
//! This crate collects a query from a form, submits it to a server's
//! `/search` endpoint, and renders the returned results (titles, snippets,
//! relevance scores, semantic-expansion metadata, selection statistics)
//! into the page. There is no search engine here: ranking, semantic
//! expansion and snippet highlighting all happen server-side; this is the
//! glue that makes the page responsive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│  render.rs   │────▶│   wasm.rs    │
//! │ (response   │     │ (HTML        │     │ (DOM wiring, │
//! │ view-models)│     │  fragments)  │     │  fetch)      │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │              html.rs / request.rs / error.rs        │
//! │  (SafeHtml vs escaped text, body encoding, response │
//! │   classification, failure taxonomy)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except `wasm.rs` is plain Rust with no browser types, so the
//! full submit→decode→render path is covered by native tests. The `wasm`
//! cargo feature adds the `wasm-bindgen` boundary: element lookups, the
//! submit listener and the actual `fetch`.
//!
//! # State model
//!
//! Each submission renders exactly one of three states: loading, results,
//! or a single error message. A fresh response fully replaces the previous
//! render; overlapping submissions are resolved by a sequence token so the
//! last-submitted query always wins the page (see `request::RequestSequence`).

mod error;
mod html;
mod render;
mod request;
mod types;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{UiError, EMPTY_QUERY_MESSAGE, NETWORK_ERROR_PREFIX};
pub use html::{escape, escape_opt, SafeHtml};
pub use render::{render_response, RenderedPage, NO_RESULTS_HINT, NO_RESULTS_MESSAGE};
pub use request::{
    decode_response, encode_search_body, RequestSequence, FORM_CONTENT_TYPE, SEARCH_ENDPOINT,
};
pub use types::{
    ExpansionInfo, PreSelectionStats, RankingEnhancementStats, ScoredTerm, SearchHit,
    SearchResponse, SelectionStats, SemanticEnhancementStats, SemanticInfo,
};

#[cfg(feature = "wasm")]
pub use wasm::init_search_ui;
