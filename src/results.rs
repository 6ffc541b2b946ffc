// results.rs — Pluggable shaping of raw backend results.
//
// Search result shaping is a named, selectable strategy: which stored fields
// to fetch, how matched text is highlighted, and how a raw backend response
// is transformed for the caller. Orthogonal to query planning; the planner
// and these strategies only share the notion of a named pluggable policy.

use serde_json::{json, Value};

use crate::config;

/// A result-shaping strategy, selected by the caller per search kind.
pub trait ResultsType {
    /// Stored fields to retrieve from the backend.
    fn fields(&self) -> &'static [&'static str];

    /// Highlighting configuration for the backend request, if this result
    /// kind highlights at all.
    fn highlight_config(&self) -> Option<Value>;

    /// Shapes one raw backend response into the caller-facing value.
    fn transform(&self, raw: &Value) -> Value;
}

/// Title-only results: completion and prefix search. No highlighting; the
/// payload is just the matched titles.
pub struct TitleResultsType;

impl ResultsType for TitleResultsType {
    fn fields(&self) -> &'static [&'static str] {
        &["namespace", "title"]
    }

    fn highlight_config(&self) -> Option<Value> {
        None
    }

    fn transform(&self, raw: &Value) -> Value {
        let titles: Vec<Value> = hits(raw)
            .iter()
            .filter_map(|hit| hit.pointer("/_source/title"))
            .cloned()
            .collect();
        Value::Array(titles)
    }
}

/// Full-text results with highlighted snippets.
pub struct FullTextResultsType;

impl ResultsType for FullTextResultsType {
    fn fields(&self) -> &'static [&'static str] {
        &["id", "title", "namespace", "redirect", "text_bytes", "text_words"]
    }

    /// Don't fragment the title because it is small. Get just one fragment
    /// from the text because that is all we will display. Redirect titles
    /// and headings get one plain-type fragment each or else they won't be
    /// sorted by score.
    fn highlight_config(&self) -> Option<Value> {
        let entire_value = json!({
            "number_of_fragments": 0,
        });
        let entire_value_in_list_field = json!({
            "number_of_fragments": 1,
            "fragment_size": config::highlight::LIST_FIELD_FRAGMENT_SIZE,
            "type": "plain",
        });
        let text = json!({
            "number_of_fragments": 1,
            "fragment_size": config::highlight::TEXT_FRAGMENT_SIZE,
        });

        // Each field is highlighted in both its analyzed and .plain form.
        Some(json!({
            "order": "score",
            "pre_tags": [config::highlight::PRE_TAG],
            "post_tags": [config::highlight::POST_TAG],
            "fields": {
                "title": entire_value.clone(),
                "text": text.clone(),
                "redirect.title": entire_value_in_list_field.clone(),
                "heading": entire_value_in_list_field.clone(),
                "title.plain": entire_value,
                "text.plain": text,
                "redirect.title.plain": entire_value_in_list_field.clone(),
                "heading.plain": entire_value_in_list_field,
            },
        }))
    }

    /// Result-set assembly (pagination, interwiki decoration) is the host's
    /// concern; hand the hit list through untouched.
    fn transform(&self, raw: &Value) -> Value {
        Value::Array(hits(raw).to_vec())
    }
}

fn hits(raw: &Value) -> &[Value] {
    raw.pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
