//! Query parameter translation.
//!
//! The listing framework hands us loosely typed predicates. Each API operation
//! declares a fixed, ordered template of argument slots; predicates overwrite
//! slot defaults by name, and the filled template is flattened back into
//! declaration order before it is turned into a typed request. Type checks
//! happen once, in [`FromPositional`].

use serde_json::Value as JsonValue;
use tracing::debug;

use skosview_core::defaults::LANGUAGE_INTERFACE_SENTINEL;
use skosview_core::{
    BroaderTransitiveRequest, ConceptRequest, Error, Result, SearchRequest, VocabulariesRequest,
    WhereClause,
};

/// Default value of a template slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDefault {
    Null,
    EmptyString,
}

impl SlotDefault {
    fn value(self) -> JsonValue {
        match self {
            SlotDefault::Null => JsonValue::Null,
            SlotDefault::EmptyString => JsonValue::String(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub default: SlotDefault,
}

impl Slot {
    pub const fn null(name: &'static str) -> Self {
        Self {
            name,
            default: SlotDefault::Null,
        }
    }

    pub const fn empty_string(name: &'static str) -> Self {
        Self {
            name,
            default: SlotDefault::EmptyString,
        }
    }
}

/// Ordered argument slots of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentTemplate {
    slots: &'static [Slot],
}

impl ArgumentTemplate {
    pub const fn new(slots: &'static [Slot]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    pub fn has(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name)
    }
}

pub const CONCEPT_TEMPLATE: ArgumentTemplate = ArgumentTemplate::new(&[
    Slot::null("vocid"),
    Slot::null("format"),
    Slot::null("uri"),
    Slot::null("lang"),
]);

pub const BROADER_TRANSITIVE_TEMPLATE: ArgumentTemplate =
    ArgumentTemplate::new(&[Slot::null("vocid"), Slot::null("uri"), Slot::null("lang")]);

pub const SEARCH_TEMPLATE: ArgumentTemplate = ArgumentTemplate::new(&[
    Slot::empty_string("query"),
    Slot::null("lang"),
    Slot::null("labellang"),
    Slot::null("vocid"),
    Slot::null("type"),
    Slot::null("parent"),
    Slot::null("group"),
    Slot::null("maxhits"),
    Slot::null("offset"),
    Slot::null("fields"),
    Slot::null("unique"),
]);

pub const VOCABULARIES_TEMPLATE: ArgumentTemplate = ArgumentTemplate::new(&[Slot::null("lang")]);

/// A template filled with values, still in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryArguments {
    values: Vec<(&'static str, JsonValue)>,
}

impl QueryArguments {
    pub fn from_template(template: &ArgumentTemplate) -> Self {
        Self {
            values: template
                .slots()
                .iter()
                .map(|s| (s.name, s.default.value()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, v)| v)
    }

    /// Overwrite a slot. Returns false when the template has no such slot.
    pub fn set(&mut self, name: &str, value: JsonValue) -> bool {
        match self.values.iter_mut().find(|(slot, _)| *slot == name) {
            Some((_, v)) => {
                *v = value;
                true
            }
            None => false,
        }
    }

    /// True when the slot is missing or holds no usable value
    /// (null, empty or `"0"` string, zero, false, empty array).
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, is_blank_value)
    }

    /// Set `maxhits`/`offset` for a data call. Zero values and templates
    /// without those slots are left alone.
    pub fn set_pagination(&mut self, limit: u64, offset: u64) {
        if limit > 0 {
            self.set("maxhits", JsonValue::from(limit));
        }
        if offset > 0 {
            self.set("offset", JsonValue::from(offset));
        }
    }

    /// Copy without pagination, for a count call.
    pub fn without_pagination(&self) -> Self {
        let mut count = self.clone();
        count.set("maxhits", JsonValue::Null);
        count.set("offset", JsonValue::Null);
        count
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(name, _)| *name)
    }

    /// Values in template declaration order.
    pub fn into_positional(self) -> Vec<JsonValue> {
        self.values.into_iter().map(|(_, v)| v).collect()
    }
}

fn is_blank_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty() || s == "0",
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
    }
}

/// Fill `template` from the predicates in `clause`.
///
/// `interface_language` replaces the language sentinel on the `lang` field.
pub fn translate(
    clause: &WhereClause,
    template: &ArgumentTemplate,
    interface_language: &str,
) -> QueryArguments {
    let mut args = QueryArguments::from_template(template);

    for predicate in clause.predicates() {
        let field = predicate.field_name();
        let value = if field == "lang" {
            match predicate.first_value() {
                Some(JsonValue::String(s)) if s == LANGUAGE_INTERFACE_SENTINEL => {
                    JsonValue::String(interface_language.to_string())
                }
                Some(v) => v.clone(),
                None => JsonValue::Null,
            }
        } else {
            predicate.value.clone()
        };

        if !args.set(field, value) {
            debug!(subsystem = "views", field, "Ignoring predicate on field unknown to the operation");
        }
    }

    args
}

// =============================================================================
// POSITIONAL -> TYPED
// =============================================================================

/// Typed request built from a positional argument list.
pub trait FromPositional: Sized {
    const TEMPLATE: ArgumentTemplate;

    fn from_positional(values: Vec<JsonValue>) -> Result<Self>;

    fn from_arguments(args: QueryArguments) -> Result<Self> {
        Self::from_positional(args.into_positional())
    }
}

struct Positional {
    values: std::vec::IntoIter<JsonValue>,
    template: ArgumentTemplate,
    index: usize,
}

impl Positional {
    fn new(template: ArgumentTemplate, values: Vec<JsonValue>) -> Result<Self> {
        if values.len() != template.slots().len() {
            return Err(Error::InvalidInput(format!(
                "Expected {} positional arguments, got {}",
                template.slots().len(),
                values.len()
            )));
        }
        Ok(Self {
            values: values.into_iter(),
            template,
            index: 0,
        })
    }

    fn next(&mut self) -> (&'static str, JsonValue) {
        let name = self.template.slots()[self.index].name;
        self.index += 1;
        (name, self.values.next().unwrap_or(JsonValue::Null))
    }

    fn string(&mut self) -> Result<Option<String>> {
        let (name, value) = self.next();
        scalar_string(name, value)
    }

    fn required_string(&mut self) -> Result<String> {
        let (name, value) = self.next();
        scalar_string(name, value)?
            .ok_or_else(|| Error::InvalidInput(format!("Missing required argument {}", name)))
    }

    fn list(&mut self) -> Result<Vec<String>> {
        let (name, value) = self.next();
        match value {
            JsonValue::Array(items) => items
                .into_iter()
                .filter_map(|item| scalar_string(name, item).transpose())
                .collect(),
            other => Ok(scalar_string(name, other)?.into_iter().collect()),
        }
    }

    fn number(&mut self) -> Result<Option<u64>> {
        let (name, value) = self.next();
        match unwrap_single(name, value)? {
            JsonValue::Null => Ok(None),
            JsonValue::Number(n) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| invalid(name, &n.to_string())),
            JsonValue::String(s) if s.trim().is_empty() => Ok(None),
            JsonValue::String(s) => s.trim().parse().map(Some).map_err(|_| invalid(name, &s)),
            other => Err(invalid(name, &other.to_string())),
        }
    }

    fn flag(&mut self) -> Result<Option<bool>> {
        let (name, value) = self.next();
        match unwrap_single(name, value)? {
            JsonValue::Null => Ok(None),
            JsonValue::Bool(b) => Ok(Some(b)),
            JsonValue::Number(n) => Ok(Some(n.as_f64() != Some(0.0))),
            JsonValue::String(s) => match s.trim() {
                "" => Ok(None),
                "1" | "true" => Ok(Some(true)),
                "0" | "false" => Ok(Some(false)),
                _ => Err(invalid(name, &s)),
            },
            other => Err(invalid(name, &other.to_string())),
        }
    }
}

fn invalid(name: &str, value: &str) -> Error {
    Error::InvalidInput(format!("Invalid value for argument {}: {}", name, value))
}

/// Scalar slots accept a one-element array, as sent by most filters.
fn unwrap_single(name: &str, value: JsonValue) -> Result<JsonValue> {
    match value {
        JsonValue::Array(mut items) if items.len() <= 1 => {
            Ok(items.pop().unwrap_or(JsonValue::Null))
        }
        JsonValue::Array(_) => Err(Error::InvalidInput(format!(
            "Argument {} takes a single value",
            name
        ))),
        other => Ok(other),
    }
}

fn scalar_string(name: &str, value: JsonValue) -> Result<Option<String>> {
    match unwrap_single(name, value)? {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.is_empty() => Ok(None),
        JsonValue::String(s) => Ok(Some(s)),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(invalid(name, &other.to_string())),
    }
}

impl FromPositional for ConceptRequest {
    const TEMPLATE: ArgumentTemplate = CONCEPT_TEMPLATE;

    fn from_positional(values: Vec<JsonValue>) -> Result<Self> {
        let mut p = Positional::new(Self::TEMPLATE, values)?;
        Ok(Self {
            vocid: p.required_string()?,
            format: p.string()?,
            uri: p.string()?,
            lang: p.string()?,
        })
    }
}

impl FromPositional for BroaderTransitiveRequest {
    const TEMPLATE: ArgumentTemplate = BROADER_TRANSITIVE_TEMPLATE;

    fn from_positional(values: Vec<JsonValue>) -> Result<Self> {
        let mut p = Positional::new(Self::TEMPLATE, values)?;
        Ok(Self {
            vocid: p.required_string()?,
            uri: p.required_string()?,
            lang: p.string()?,
        })
    }
}

impl FromPositional for SearchRequest {
    const TEMPLATE: ArgumentTemplate = SEARCH_TEMPLATE;

    fn from_positional(values: Vec<JsonValue>) -> Result<Self> {
        let mut p = Positional::new(Self::TEMPLATE, values)?;
        Ok(Self {
            query: p.string()?.unwrap_or_default(),
            lang: p.string()?,
            labellang: p.string()?,
            vocab: p.string()?,
            types: p.list()?,
            parent: p.string()?,
            group: p.string()?,
            maxhits: p.number()?,
            offset: p.number()?,
            fields: p.list()?,
            unique: p.flag()?,
        })
    }
}

impl FromPositional for VocabulariesRequest {
    const TEMPLATE: ArgumentTemplate = VOCABULARIES_TEMPLATE;

    fn from_positional(values: Vec<JsonValue>) -> Result<Self> {
        let mut p = Positional::new(Self::TEMPLATE, values)?;
        Ok(Self {
            lang: p.required_string()?,
        })
    }
}
