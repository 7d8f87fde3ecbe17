//! WebAssembly bindings: DOM wiring for the search page.
//!
//! This is the browser-facing layer. It looks up the page's elements once,
//! intercepts form submission, performs the `/search` fetch and writes the
//! fragments produced by [`crate::render`] into the page. All decisions
//! about *what* to render live in the pure modules; this file only moves
//! strings across the JS boundary.
//!
//! # Usage
//!
//! ```js
//! import init, { init_search_ui } from "./searchdeck.js";
//! await init();
//! init_search_ui();
//! ```
//!
//! # Page contract
//!
//! Required element ids: `search-form`, `query`, `top_k`, `loading`,
//! `results-section`, `results-container`, `error-message`. Optional
//! panels (older templates lack them): `expansion-info`/`expansion-content`
//! and `selection-stats`/`stats-content`. A missing optional panel logs a
//! console diagnostic and that render step is skipped; a missing required
//! element fails `init_search_ui`.

use crate::error::UiError;
use crate::render::{render_response, RenderedPage};
use crate::request::{
    decode_response, encode_search_body, RequestSequence, FORM_CONTENT_TYPE, SEARCH_ENDPOINT,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, Document, Element, Event, HtmlInputElement, Request, RequestInit, Response};

/// Class toggled on panels to show/hide them; defined by the stylesheet.
const HIDDEN_CLASS: &str = "hidden";

/// A panel the page may or may not have: an outer element that gets
/// shown/hidden and an inner element that receives the rendered fragment.
struct OptionalPanel {
    root: Element,
    content: Element,
}

/// DOM handles for the search page, looked up once at init and shared by
/// the submit handler and the in-flight futures it spawns.
struct SearchUi {
    query_input: HtmlInputElement,
    top_k_input: HtmlInputElement,
    loading: Element,
    results_section: Element,
    results_container: Element,
    error_message: Element,
    expansion_panel: Option<OptionalPanel>,
    stats_panel: Option<OptionalPanel>,
    sequence: RequestSequence,
}

/// Bind the controller to the current document and attach the submit
/// handler. Call once after the module is loaded.
#[wasm_bindgen]
pub fn init_search_ui() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document to bind to"))?;

    let form = require_element(&document, "search-form")?;
    let ui = Rc::new(SearchUi::bind(&document)?);

    let handler = {
        let ui = Rc::clone(&ui);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            ui.submit();
        })
    };
    form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
    // The listener lives as long as the page; leak it.
    handler.forget();

    if !ui.query_input.disabled() {
        let _ = ui.query_input.focus();
    }

    Ok(())
}

impl SearchUi {
    fn bind(document: &Document) -> Result<Self, JsValue> {
        Ok(SearchUi {
            query_input: require_input(document, "query")?,
            top_k_input: require_input(document, "top_k")?,
            loading: require_element(document, "loading")?,
            results_section: require_element(document, "results-section")?,
            results_container: require_element(document, "results-container")?,
            error_message: require_element(document, "error-message")?,
            expansion_panel: optional_panel(document, "expansion-info", "expansion-content"),
            stats_panel: optional_panel(document, "selection-stats", "stats-content"),
            sequence: RequestSequence::new(),
        })
    }

    /// Handle one form submission: validate, then kick off the async search.
    fn submit(self: &Rc<Self>) {
        let query = self.query_input.value().trim().to_string();
        let top_k = self.top_k_input.value();

        if query.is_empty() {
            self.show_error(&UiError::EmptyQuery.user_message());
            return;
        }

        let token = self.sequence.begin();
        let ui = Rc::clone(self);
        spawn_local(async move {
            ui.show_loading();
            ui.hide_results();
            ui.hide_error();

            let outcome = ui.perform_search(&query, &top_k).await;

            if !ui.sequence.is_current(token) {
                // A newer submission owns the panels now, including the
                // loading indicator.
                console::warn_1(&"discarding stale search response".into());
                return;
            }

            ui.hide_loading();
            match outcome {
                Ok(page) => ui.show_results(&page),
                Err(err) => ui.show_error(&err.user_message()),
            }
        });
    }

    /// One POST to `/search`, decoded and rendered. Every failure maps into
    /// the [`UiError`] taxonomy; nothing is retried.
    async fn perform_search(&self, query: &str, top_k: &str) -> Result<RenderedPage, UiError> {
        let response = fetch_search(query, top_k).await.map_err(|err| UiError::Transport {
            detail: js_error_text(&err),
        })?;

        let status = response.status();
        let body_promise = response.text().map_err(|err| UiError::Transport {
            detail: js_error_text(&err),
        })?;
        let body = JsFuture::from(body_promise)
            .await
            .map_err(|err| UiError::Transport {
                detail: js_error_text(&err),
            })?
            .as_string()
            .unwrap_or_default();

        let decoded = decode_response(status, &body)?;
        Ok(render_response(&decoded))
    }

    fn show_results(&self, page: &RenderedPage) {
        self.results_container.set_inner_html(page.results.as_str());
        set_panel(&self.expansion_panel, page.expansion.as_ref());
        set_panel(&self.stats_panel, page.stats.as_ref());
        show(&self.results_section);
    }

    fn show_error(&self, message: &str) {
        self.error_message.set_text_content(Some(message));
        show(&self.error_message);
    }

    fn hide_error(&self) {
        hide(&self.error_message);
    }

    fn show_loading(&self) {
        show(&self.loading);
    }

    fn hide_loading(&self) {
        hide(&self.loading);
    }

    fn hide_results(&self) {
        hide(&self.results_section);
        if let Some(panel) = &self.expansion_panel {
            hide(&panel.root);
        }
        if let Some(panel) = &self.stats_panel {
            hide(&panel.root);
        }
    }
}

/// Issue the POST with a form-encoded body, mirroring what the HTML form
/// itself would send.
async fn fetch_search(query: &str, top_k: &str) -> Result<Response, JsValue> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&encode_search_body(query, top_k)));

    let request = Request::new_with_str_and_init(SEARCH_ENDPOINT, &init)?;
    request.headers().set("Content-Type", FORM_CONTENT_TYPE)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    response
        .dyn_into::<Response>()
        .map_err(|_| JsValue::from_str("fetch returned a non-Response value"))
}

fn require_element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing required element #{}", id)))
}

fn require_input(document: &Document, id: &str) -> Result<HtmlInputElement, JsValue> {
    require_element(document, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an <input>", id)))
}

/// Look up an optional panel pair; absence is diagnostic, not an error.
fn optional_panel(document: &Document, root_id: &str, content_id: &str) -> Option<OptionalPanel> {
    match (
        document.get_element_by_id(root_id),
        document.get_element_by_id(content_id),
    ) {
        (Some(root), Some(content)) => Some(OptionalPanel { root, content }),
        _ => {
            console::warn_1(
                &format!("#{} not present, panel rendering disabled", root_id).into(),
            );
            None
        }
    }
}

/// Fill and show a panel, or hide it when there is nothing to display.
/// Pages without the panel skip the step entirely.
fn set_panel(panel: &Option<OptionalPanel>, fragment: Option<&crate::html::SafeHtml>) {
    let Some(panel) = panel else { return };
    match fragment {
        Some(html) => {
            panel.content.set_inner_html(html.as_str());
            show(&panel.root);
        }
        None => hide(&panel.root),
    }
}

fn show(element: &Element) {
    let _ = element.class_list().remove_1(HIDDEN_CLASS);
}

fn hide(element: &Element) {
    let _ = element.class_list().add_1(HIDDEN_CLASS);
}

fn js_error_text(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "request failed".to_string())
}
