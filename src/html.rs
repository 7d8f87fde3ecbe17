//! Trusted vs untrusted markup.
//!
//! Every string interpolated into the page goes through this module.
//! [`SafeHtml`] is the only type the render layer produces and the only
//! thing the DOM layer assigns to `innerHTML`, so the type system decides
//! what gets escaped instead of each call site remembering on its own.
//!
//! Two ways into a [`SafeHtml`]:
//!
//! - [`escape`] for untrusted fields (titles, paths, dates, query terms).
//! - [`SafeHtml::trusted`] for fragments the server documents as
//!   pre-rendered HTML (snippets with `<mark>` highlighting). These must
//!   NOT be escaped; double-escaping would show literal `&lt;mark&gt;`.
//!
//! # Invariants
//!
//! - `escape(x)` never contains raw `<`, `>`, `"`, `'`, and every `&` in
//!   its output starts an entity this module wrote.
//! - Absent values escape to the empty string (see [`escape_opt`]).

/// An HTML fragment that is safe to assign to `innerHTML`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// An empty fragment, ready for appending.
    pub fn new() -> Self {
        SafeHtml(String::new())
    }

    /// Admit a server-supplied, pre-rendered fragment without escaping.
    ///
    /// The snippet fields are the only intended callers; everything else
    /// must go through [`escape`].
    pub fn trusted(fragment: impl Into<String>) -> Self {
        SafeHtml(fragment.into())
    }

    /// Append literal template text. The caller vouches that `fragment`
    /// contains no interpolated user data.
    pub fn push_raw(&mut self, fragment: &str) {
        self.0.push_str(fragment);
    }

    /// Append another fragment.
    pub fn push(&mut self, other: &SafeHtml) {
        self.0.push_str(&other.0);
    }

    /// Append untrusted text, escaping it first.
    pub fn push_text(&mut self, text: &str) {
        self.push(&escape(text));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Escape the five HTML-significant characters: `& < > " '`.
///
/// The single pass treats `&` like any other character, so already-escaped
/// input is escaped again (`&amp;` becomes `&amp;amp;`). Escaping happens
/// exactly once, at the point a value enters markup.
pub fn escape(text: &str) -> SafeHtml {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    SafeHtml(out)
}

/// Escape an optional field; absent values render as the empty string.
///
/// Mirrors the page contract where a null/undefined field interpolates as
/// `""` rather than the string "null".
pub fn escape_opt(text: Option<&str>) -> SafeHtml {
    text.map(escape).unwrap_or_default()
}
