//! Multi-value field renderers.
//!
//! Row values holding lists (alternative labels, related concepts, trails)
//! are rendered as a separator-joined string or an HTML list. All text is
//! HTML-escaped; link targets are attribute-escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use skosview_core::defaults::LIST_SEPARATOR;
use skosview_core::ConceptRef;

use crate::rows::ResultRow;

/// How a list of items is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ListDisplay {
    Separator { separator: String },
    #[serde(rename = "ul")]
    Unordered,
    #[serde(rename = "ol")]
    Ordered,
}

impl Default for ListDisplay {
    fn default() -> Self {
        ListDisplay::Separator {
            separator: LIST_SEPARATOR.to_string(),
        }
    }
}

impl ListDisplay {
    /// Join already-rendered items.
    pub fn render(&self, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        match self {
            ListDisplay::Separator { separator } => items.join(&*encode_text(separator)),
            ListDisplay::Unordered => wrap_list("ul", items),
            ListDisplay::Ordered => wrap_list("ol", items),
        }
    }
}

fn wrap_list(tag: &str, items: &[String]) -> String {
    let mut out = format!("<{}>", tag);
    for item in items {
        out.push_str("<li>");
        out.push_str(item);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{}>", tag));
    out
}

/// Renders lists of `{uri, label}` values, optionally linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelListField {
    pub id: String,
    pub link_to_uri: bool,
    pub display: ListDisplay,
}

impl LabelListField {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_to_uri: true,
            display: ListDisplay::default(),
        }
    }

    pub fn with_link_to_uri(mut self, link: bool) -> Self {
        self.link_to_uri = link;
        self
    }

    pub fn with_display(mut self, display: ListDisplay) -> Self {
        self.display = display;
        self
    }

    /// Items of this field in `row`; values that are not `{uri, label}`
    /// objects are skipped.
    pub fn items(&self, row: &ResultRow) -> Vec<ConceptRef> {
        match row.get(&self.id) {
            Some(JsonValue::Array(values)) => values
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect(),
            Some(value @ JsonValue::Object(_)) => serde_json::from_value(value.clone())
                .map(|item| vec![item])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn render_item(&self, item: &ConceptRef) -> String {
        let label = encode_text(&item.label);
        if self.link_to_uri {
            format!(
                "<a href=\"{}\">{}</a>",
                encode_double_quoted_attribute(&item.uri),
                label
            )
        } else {
            label.into_owned()
        }
    }

    pub fn render_items(&self, items: &[ConceptRef]) -> String {
        let rendered: Vec<String> = items.iter().map(|i| self.render_item(i)).collect();
        self.display.render(&rendered)
    }

    pub fn render(&self, row: &ResultRow) -> String {
        self.render_items(&self.items(row))
    }

    /// Replacement tokens documented for this field.
    pub fn token_names(&self) -> [String; 2] {
        [
            format!("{{{{ {}__label }}}}", self.id),
            format!("{{{{ {}__uri }}}}", self.id),
        ]
    }

    /// Token values for one item.
    pub fn tokens(&self, item: &ConceptRef) -> Vec<(String, String)> {
        let [label, uri] = self.token_names();
        vec![(label, item.label.clone()), (uri, item.uri.clone())]
    }
}

/// Renders lists of plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListField {
    pub id: String,
    pub display: ListDisplay,
}

impl ListField {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: ListDisplay::default(),
        }
    }

    pub fn with_display(mut self, display: ListDisplay) -> Self {
        self.display = display;
        self
    }

    /// Scalar entries of this field as strings; a scalar field is a list of one.
    pub fn items(&self, row: &ResultRow) -> Vec<String> {
        match row.get(&self.id) {
            Some(JsonValue::Array(values)) => values.iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn render(&self, row: &ResultRow) -> String {
        let rendered: Vec<String> = self
            .items(row)
            .iter()
            .map(|v| encode_text(v).into_owned())
            .collect();
        self.display.render(&rendered)
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
