//! Graph term <-> editing-API JSON value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::{PrimarySourcesError, Result};
use crate::model::{is_language_tag, GraphTerm};
use crate::term::{is_valid_term, item_numeric_id, TermKind};
use crate::vocab;

use super::value::{canonical_amount, degrees_lexical, Coordinate, Timestamp, Value};

/// Precision emitted for every time value in this direction.
pub const DAY_PRECISION: u8 = 11;

/// `{"entity-type":"item","numeric-id":5921}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemValue {
    #[serde(rename = "entity-type")]
    pub entity_type: String,
    #[serde(rename = "numeric-id")]
    pub numeric_id: u64,
}

/// `{"language":"en","text":"hello"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonolingualValue {
    pub language: String,
    pub text: String,
}

/// A globe coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeValue {
    pub latitude: f64,
    pub longitude: f64,
    pub precision: Option<f64>,
    #[serde(default = "default_globe")]
    pub globe: String,
    #[serde(default)]
    pub altitude: Option<f64>,
}

fn default_globe() -> String {
    vocab::EARTH.to_string()
}

/// A point in time with Gregorian calendar model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    pub time: String,
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub before: u32,
    #[serde(default)]
    pub after: u32,
    pub precision: u8,
    #[serde(default = "default_calendar")]
    pub calendarmodel: String,
}

fn default_calendar() -> String {
    vocab::GREGORIAN_CALENDAR.to_string()
}

/// `{"amount":"+12.5","unit":"1"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityValue {
    pub amount: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    vocab::DIMENSIONLESS_UNIT.to_string()
}

/// A datavalue as the editing API exchanges it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiValue {
    Item(ItemValue),
    Monolingual(MonolingualValue),
    Globe(GlobeValue),
    Time(TimeValue),
    Quantity(QuantityValue),
    /// A string that parses as a URL. Serializes like [`ApiValue::String`].
    Url(String),
    String(String),
}

/// Keys whose presence identifies a value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Item,
    Monolingual,
    Globe,
    Time,
    Quantity,
}

impl Shape {
    fn detect(object: &Map<String, Json>) -> Vec<Shape> {
        let mut shapes = Vec::new();
        if object.contains_key("numeric-id") {
            shapes.push(Shape::Item);
        }
        if object.contains_key("language") {
            shapes.push(Shape::Monolingual);
        }
        if object.contains_key("globe") || object.contains_key("latitude") {
            shapes.push(Shape::Globe);
        }
        if object.contains_key("time") {
            shapes.push(Shape::Time);
        }
        if object.contains_key("amount") {
            shapes.push(Shape::Quantity);
        }
        shapes
    }
}

impl ApiValue {
    /// Classify a JSON value; exactly one shape key set must be present.
    ///
    /// A full datavalue wrapper (`{"value": …, "type": …}`) is unwrapped first.
    pub fn from_json(json: &Json) -> Result<Self> {
        let raw = || PrimarySourcesError::ambiguous(json.to_string());
        match json {
            Json::String(s) => Ok(match Value::from_string(s) {
                Value::Link(url) => ApiValue::Url(url),
                _ => ApiValue::String(s.clone()),
            }),
            Json::Object(object) => {
                let shapes = Shape::detect(object);
                match shapes.as_slice() {
                    [] => match (object.get("value"), object.get("type")) {
                        (Some(inner), Some(_)) => Self::from_json(inner),
                        _ => Err(raw()),
                    },
                    [Shape::Item] => Ok(ApiValue::Item(decode(json)?)),
                    [Shape::Monolingual] => Ok(ApiValue::Monolingual(decode(json)?)),
                    [Shape::Globe] => Ok(ApiValue::Globe(decode(json)?)),
                    [Shape::Time] => Ok(ApiValue::Time(decode(json)?)),
                    [Shape::Quantity] => Ok(ApiValue::Quantity(decode(json)?)),
                    _ => Err(raw()),
                }
            }
            _ => Err(raw()),
        }
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> Result<Json> {
        Ok(serde_json::to_value(self)?)
    }
}

fn decode<T: for<'de> Deserialize<'de>>(json: &Json) -> Result<T> {
    serde_json::from_value(json.clone()).map_err(|_| PrimarySourcesError::ambiguous(json.to_string()))
}

impl TryFrom<&Value> for ApiValue {
    type Error = PrimarySourcesError;

    /// Fails only for item ids whose number does not fit the API's integer.
    fn try_from(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Item(id) => ApiValue::Item(ItemValue {
                entity_type: "item".to_string(),
                numeric_id: item_numeric_id(id).ok_or_else(|| PrimarySourcesError::ambiguous(id.as_str()))?,
            }),
            Value::Link(url) => ApiValue::Url(url.clone()),
            Value::Text(text) => ApiValue::String(text.clone()),
            Value::Monolingual { text, lang } => ApiValue::Monolingual(MonolingualValue {
                language: lang.clone(),
                text: text.clone(),
            }),
            Value::Time(ts) => ApiValue::Time(TimeValue {
                time: ts.signed(),
                timezone: 0,
                before: 0,
                after: 0,
                precision: DAY_PRECISION,
                calendarmodel: vocab::GREGORIAN_CALENDAR.to_string(),
            }),
            Value::Coordinate(coord) => ApiValue::Globe(GlobeValue {
                latitude: degrees(&coord.latitude)?,
                longitude: degrees(&coord.longitude)?,
                precision: Some(coord.precision()),
                globe: coord.globe_iri().to_string(),
                altitude: None,
            }),
            Value::Quantity(amount) => ApiValue::Quantity(QuantityValue {
                amount: if amount.starts_with(['+', '-']) {
                    amount.clone()
                } else {
                    format!("+{}", amount)
                },
                unit: vocab::DIMENSIONLESS_UNIT.to_string(),
            }),
        })
    }
}

fn degrees(lexical: &str) -> Result<f64> {
    lexical.parse().map_err(|_| PrimarySourcesError::ambiguous(lexical))
}

impl TryFrom<ApiValue> for Value {
    type Error = PrimarySourcesError;

    fn try_from(api: ApiValue) -> Result<Self> {
        match api {
            ApiValue::Item(item) => {
                let id = format!("Q{}", item.numeric_id);
                if item.entity_type != "item" || !is_valid_term(&id, TermKind::Item) {
                    return Err(PrimarySourcesError::ambiguous(format!(
                        "{} {}",
                        item.entity_type, item.numeric_id
                    )));
                }
                Ok(Value::Item(id))
            }
            ApiValue::Url(url) => Ok(Value::Link(url)),
            ApiValue::String(text) => Ok(Value::Text(text)),
            ApiValue::Monolingual(mono) => {
                if !is_language_tag(&mono.language) {
                    return Err(PrimarySourcesError::ambiguous(mono.language));
                }
                Ok(Value::Monolingual {
                    text: mono.text,
                    lang: mono.language,
                })
            }
            ApiValue::Time(time) => Ok(Value::Time(Timestamp::parse(&time.time)?)),
            ApiValue::Globe(globe) => {
                let coord = Coordinate::new(
                    &degrees_lexical(globe.latitude),
                    &degrees_lexical(globe.longitude),
                )?;
                Ok(Value::Coordinate(coord.on_globe(&globe.globe)?))
            }
            ApiValue::Quantity(quantity) => {
                let amount = canonical_amount(&quantity.amount)?;
                if quantity.unit != vocab::DIMENSIONLESS_UNIT {
                    tracing::debug!(unit = %quantity.unit, "quantity unit has no graph encoding, dropped");
                }
                Ok(Value::Quantity(amount))
            }
        }
    }
}

/// Render a graph term as an editing-API value.
///
/// Time values always carry day precision here, whatever their granularity.
pub fn graph_term_to_api_json(term: &GraphTerm) -> Result<ApiValue> {
    ApiValue::try_from(&Value::from_term(term)?)
}

/// Resolve an editing-API JSON value to a graph term.
pub fn api_json_to_graph_term(json: &Json) -> Result<GraphTerm> {
    let value = Value::try_from(ApiValue::from_json(json)?)?;
    Ok(value.into_term())
}

/// Resolve a reference JSON body (`{"snaks": {"P854": [snak]}}`) to its
/// property id and value.
///
/// Only the first property key and the first snak under it are read.
pub fn api_reference_to_graph_term(json: &Json) -> Result<(String, GraphTerm)> {
    let missing = |what: &str| PrimarySourcesError::ambiguous(format!("reference without {}: {}", what, json));

    let snaks = json
        .get("snaks")
        .and_then(Json::as_object)
        .ok_or_else(|| missing("snaks"))?;
    let (property, list) = snaks.iter().next().ok_or_else(|| missing("a property"))?;
    if !is_valid_term(property, TermKind::Property) {
        return Err(PrimarySourcesError::ambiguous(property.as_str()));
    }
    let snak = list
        .as_array()
        .and_then(|list| list.first())
        .ok_or_else(|| missing("a snak"))?;
    let value = snak
        .get("datavalue")
        .and_then(|datavalue| datavalue.get("value"))
        .ok_or_else(|| missing("a datavalue"))?;

    Ok((property.clone(), api_json_to_graph_term(value)?))
}
