//! The intermediate value model shared by every codec direction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PrimarySourcesError, Result};
use crate::model::GraphTerm;
use crate::term::{is_valid_term, TermKind};
use crate::vocab::{self, Namespace};

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?)(\d+)-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})Z$").unwrap()
});

static WKT_POINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:<([^>\s]+)>\s+)?(?i:point)\(\s*([+-]?\d+(?:\.\d+)?)\s+([+-]?\d+(?:\.\d+)?)\s*\)$",
    )
    .unwrap()
});

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?$").unwrap());

/// URL schemes a quoted string must carry to be read as a link.
///
/// Any absolute IRI would also admit `en:hello` or `note:x`, which
/// curators write as text.
const LINK_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Literal datatypes with a value encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    DateTime,
    Decimal,
    Geo,
    String,
}

impl Datatype {
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            vocab::XSD_DATE_TIME => Some(Datatype::DateTime),
            vocab::XSD_DECIMAL => Some(Datatype::Decimal),
            vocab::GEO_WKT_LITERAL => Some(Datatype::Geo),
            vocab::XSD_STRING => Some(Datatype::String),
            _ => None,
        }
    }

    pub fn iri(&self) -> &'static str {
        match self {
            Datatype::DateTime => vocab::XSD_DATE_TIME,
            Datatype::Decimal => vocab::XSD_DECIMAL,
            Datatype::Geo => vocab::GEO_WKT_LITERAL,
            Datatype::String => vocab::XSD_STRING,
        }
    }
}

/// Whether a string is an absolute IRI with an `http`, `https` or `ftp`
/// scheme.
///
/// This is narrower than "parses as an absolute IRI": other schemes stay
/// plain strings, so `urn:isbn:0451450523` or `en:hello` round-trip as text.
pub fn looks_like_link(candidate: &str) -> bool {
    match oxiri::Iri::parse(candidate) {
        Ok(iri) => LINK_SCHEMES
            .iter()
            .any(|scheme| iri.scheme().eq_ignore_ascii_case(scheme)),
        Err(_) => false,
    }
}

/// A point in time as an ISO-8601 UTC timestamp.
///
/// The canonical lexical form has no leading `+`; a `+` on input is
/// dropped, a `-` kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    negative: bool,
    lexical: String,
    month: u32,
    day: u32,
}

impl Timestamp {
    /// Parse `[+-]YYYY-MM-DDThh:mm:ssZ`.
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = TIMESTAMP
            .captures(raw)
            .ok_or_else(|| PrimarySourcesError::ambiguous(raw))?;
        let negative = &caps[1] == "-";
        let month: u32 = caps[3].parse().map_err(|_| PrimarySourcesError::ambiguous(raw))?;
        let day: u32 = caps[4].parse().map_err(|_| PrimarySourcesError::ambiguous(raw))?;
        let lexical = raw.strip_prefix('+').unwrap_or(raw).to_string();
        Ok(Self {
            negative,
            lexical,
            month,
            day,
        })
    }

    /// Lexical form as stored in the graph (`1889-10-18T00:00:00Z`).
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Lexical form with an explicit sign (`+1889-10-18T00:00:00Z`).
    pub fn signed(&self) -> String {
        if self.lexical.starts_with(['+', '-']) {
            self.lexical.clone()
        } else {
            format!("+{}", self.lexical)
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Precision implied by which fields differ from `01`.
    ///
    /// Upstream normalizes absent day and month fields to `01`, so a first
    /// of the month reads as month precision and a first of January as year
    /// precision.
    pub fn inferred_precision(&self) -> u8 {
        if self.day > 1 {
            11
        } else if self.month > 1 {
            10
        } else {
            9
        }
    }
}

/// A WKT point.
///
/// Latitude and longitude are held in the shortest form that reads back as
/// the same double (`10.0` becomes `10`, `51.50` becomes `51.5`), which is
/// also the form the editing API's numbers produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
    /// Globe IRI; `None` means Earth.
    pub globe: Option<String>,
}

/// Shortest round-trippable form of a decimal coordinate component.
fn canonical_degrees(raw: &str) -> Result<String> {
    if !is_decimal(raw) {
        return Err(PrimarySourcesError::ambiguous(raw));
    }
    let degrees: f64 = raw.parse().map_err(|_| PrimarySourcesError::ambiguous(raw))?;
    Ok(degrees_lexical(degrees))
}

/// `f64` display never uses an exponent, so the result is a plain decimal.
pub(crate) fn degrees_lexical(degrees: f64) -> String {
    degrees.to_string()
}

impl Coordinate {
    /// A point on Earth from decimal lexical forms.
    pub fn new(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self {
            latitude: canonical_degrees(latitude)?,
            longitude: canonical_degrees(longitude)?,
            globe: None,
        })
    }

    /// Place the point on another globe; Earth is kept implicit.
    pub fn on_globe(mut self, globe: &str) -> Result<Self> {
        if oxiri::Iri::parse(globe).is_err() {
            return Err(PrimarySourcesError::ambiguous(globe));
        }
        self.globe = (globe != vocab::EARTH).then(|| globe.to_string());
        Ok(self)
    }

    /// Parse `[<globe>] Point(lon lat)`.
    pub fn parse_wkt(lexical: &str) -> Result<Self> {
        let caps = WKT_POINT
            .captures(lexical.trim())
            .ok_or_else(|| PrimarySourcesError::ambiguous(lexical))?;
        let coord = Self::new(&caps[3], &caps[2])?;
        match caps.get(1) {
            Some(globe) => coord.on_globe(globe.as_str()),
            None => Ok(coord),
        }
    }

    /// WKT lexical form; Earth is left implicit.
    pub fn to_wkt(&self) -> String {
        match &self.globe {
            Some(globe) => format!("<{}> Point({} {})", globe, self.longitude, self.latitude),
            None => format!("Point({} {})", self.longitude, self.latitude),
        }
    }

    pub fn globe_iri(&self) -> &str {
        self.globe.as_deref().unwrap_or(vocab::EARTH)
    }

    /// `min(10^-digits(lat), 10^-digits(lon))`.
    pub fn precision(&self) -> f64 {
        let digits = decimal_digits(&self.latitude).max(decimal_digits(&self.longitude));
        1.0 / 10f64.powi(digits as i32)
    }
}

fn decimal_digits(number: &str) -> usize {
    number
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

/// Check a decimal lexical form.
pub(crate) fn is_decimal(lexical: &str) -> bool {
    DECIMAL.is_match(lexical)
}

/// Canonical decimal amount: digits as given, without a leading `+`.
pub(crate) fn canonical_amount(lexical: &str) -> Result<String> {
    if !is_decimal(lexical) {
        return Err(PrimarySourcesError::ambiguous(lexical));
    }
    Ok(lexical.strip_prefix('+').unwrap_or(lexical).to_string())
}

/// A statement value in one of the six supported datatypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Item id, e.g. `Q5921`.
    Item(String),
    /// Absolute URL.
    Link(String),
    /// Plain string.
    Text(String),
    /// Language-tagged text.
    Monolingual { text: String, lang: String },
    Time(Timestamp),
    Coordinate(Coordinate),
    /// Decimal amount without a leading `+`.
    Quantity(String),
}

impl Value {
    /// Decode a graph term.
    pub fn from_term(term: &GraphTerm) -> Result<Self> {
        match term {
            GraphTerm::Iri(iri) => match Namespace::resolve(iri) {
                Some((Namespace::Entity, local)) if is_valid_term(local, TermKind::Item) => {
                    Ok(Value::Item(local.to_string()))
                }
                _ => Ok(Value::Link(iri.clone())),
            },
            GraphTerm::PlainLiteral(text) => Ok(Value::Text(text.clone())),
            GraphTerm::LangLiteral { text, lang } => Ok(Value::Monolingual {
                text: text.clone(),
                lang: lang.clone(),
            }),
            GraphTerm::TypedLiteral { lexical, datatype } => match Datatype::from_iri(datatype) {
                Some(Datatype::DateTime) => Ok(Value::Time(Timestamp::parse(lexical)?)),
                Some(Datatype::Geo) => Ok(Value::Coordinate(Coordinate::parse_wkt(lexical)?)),
                Some(Datatype::Decimal) => Ok(Value::Quantity(canonical_amount(lexical)?)),
                Some(Datatype::String) => Ok(Value::Text(lexical.clone())),
                None => Err(PrimarySourcesError::UnsupportedDatatype {
                    iri: datatype.clone(),
                }),
            },
            GraphTerm::Blank(_) => Err(PrimarySourcesError::ambiguous(term.to_string())),
        }
    }

    /// Encode as a graph term.
    pub fn into_term(self) -> GraphTerm {
        match self {
            Value::Item(id) => GraphTerm::Iri(Namespace::Entity.expand(&id)),
            Value::Link(url) => GraphTerm::Iri(url),
            Value::Text(text) => GraphTerm::PlainLiteral(text),
            Value::Monolingual { text, lang } => GraphTerm::LangLiteral { text, lang },
            Value::Time(ts) => GraphTerm::typed(ts.lexical, Datatype::DateTime.iri()),
            Value::Coordinate(coord) => GraphTerm::typed(coord.to_wkt(), Datatype::Geo.iri()),
            Value::Quantity(amount) => GraphTerm::typed(amount, Datatype::Decimal.iri()),
        }
    }

    /// Classify a bare string as a link or plain text.
    pub fn from_string(raw: &str) -> Self {
        if looks_like_link(raw) {
            Value::Link(raw.to_string())
        } else {
            Value::Text(raw.to_string())
        }
    }
}

/// The form every codec direction produces for `term`.
///
/// Typed literals with a value encoding are rewritten to their canonical
/// lexical form; everything else is returned unchanged.
pub fn canonical_term(term: &GraphTerm) -> GraphTerm {
    match term {
        GraphTerm::TypedLiteral { .. } => Value::from_term(term)
            .map(Value::into_term)
            .unwrap_or_else(|_| term.clone()),
        _ => term.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_precision() {
        let day = Timestamp::parse("1889-10-18T00:00:00Z").unwrap();
        let month = Timestamp::parse("1889-10-01T00:00:00Z").unwrap();
        let year = Timestamp::parse("1889-01-01T00:00:00Z").unwrap();
        assert_eq!(day.inferred_precision(), 11);
        assert_eq!(month.inferred_precision(), 10);
        assert_eq!(year.inferred_precision(), 9);
    }

    #[test]
    fn test_timestamp_sign() {
        let ts = Timestamp::parse("+1889-10-18T00:00:00Z").unwrap();
        assert_eq!(ts.lexical(), "1889-10-18T00:00:00Z");
        assert_eq!(ts.signed(), "+1889-10-18T00:00:00Z");
        assert_eq!(ts, Timestamp::parse("1889-10-18T00:00:00Z").unwrap());

        let bc = Timestamp::parse("-0500-01-01T00:00:00Z").unwrap();
        assert!(bc.is_negative());
        assert_eq!(bc.lexical(), "-0500-01-01T00:00:00Z");
        assert_eq!(bc.signed(), "-0500-01-01T00:00:00Z");
    }

    #[test]
    fn test_signed_literals_canonicalise() {
        let amount = GraphTerm::typed("+12.50", vocab::XSD_DECIMAL);
        assert_eq!(canonical_term(&amount), GraphTerm::typed("12.50", vocab::XSD_DECIMAL));

        let time = GraphTerm::typed("+1889-10-18T00:00:00Z", vocab::XSD_DATE_TIME);
        assert_eq!(
            canonical_term(&time),
            GraphTerm::typed("1889-10-18T00:00:00Z", vocab::XSD_DATE_TIME)
        );

        let canonical = GraphTerm::typed("-12.5", vocab::XSD_DECIMAL);
        assert_eq!(canonical_term(&canonical), canonical);
        assert_eq!(canonical_term(&GraphTerm::plain("+1")), GraphTerm::plain("+1"));
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::parse("18 October 1889").is_err());
    }

    #[test]
    fn test_wkt_point() {
        let coord = Coordinate::parse_wkt("Point(-0.12 51.5)").unwrap();
        assert_eq!(coord.latitude, "51.5");
        assert_eq!(coord.longitude, "-0.12");
        assert_eq!(coord.globe, None);
        assert_eq!(coord.precision(), 0.01);
        assert_eq!(coord.to_wkt(), "Point(-0.12 51.5)");
    }

    #[test]
    fn test_wkt_with_globe() {
        let moon = "<http://www.wikidata.org/entity/Q405> Point(10.5 20.25)";
        let coord = Coordinate::parse_wkt(moon).unwrap();
        assert_eq!(coord.globe_iri(), "http://www.wikidata.org/entity/Q405");
        assert_eq!(coord.to_wkt(), moon);

        let earth = "<http://www.wikidata.org/entity/Q2> Point(1 2)";
        assert_eq!(Coordinate::parse_wkt(earth).unwrap().globe, None);
    }

    #[test]
    fn test_wkt_trailing_zeros_canonicalise() {
        let coord = Coordinate::parse_wkt("Point(10.0 51.50)").unwrap();
        assert_eq!(coord.longitude, "10");
        assert_eq!(coord.latitude, "51.5");
        assert_eq!(coord.to_wkt(), "Point(10 51.5)");
        assert_eq!(Coordinate::parse_wkt("Point(+10.000 -0.120)").unwrap().to_wkt(), "Point(10 -0.12)");

        let term = GraphTerm::typed("Point(10.0 51.50)", vocab::GEO_WKT_LITERAL);
        assert_eq!(canonical_term(&term), GraphTerm::typed("Point(10 51.5)", vocab::GEO_WKT_LITERAL));
    }

    #[test]
    fn test_links() {
        assert!(looks_like_link("http://example.org/image.jpg"));
        assert!(looks_like_link("HTTPS://example.org"));
        assert!(!looks_like_link("en:hello"));
        assert!(!looks_like_link("Maybelline"));
        assert!(!looks_like_link("http://exa mple.org"));
        assert!(!looks_like_link("urn:isbn:0451450523"));
        assert!(!looks_like_link("mailto:someone@example.org"));
        assert_eq!(Value::from_string("urn:isbn:0451450523"), Value::Text("urn:isbn:0451450523".to_string()));
    }

    #[test]
    fn test_unsupported_datatype() {
        let term = GraphTerm::typed("true", "http://www.w3.org/2001/XMLSchema#boolean");
        assert!(matches!(
            Value::from_term(&term),
            Err(PrimarySourcesError::UnsupportedDatatype { .. })
        ));
    }

    #[test]
    fn test_item_iri() {
        let term = GraphTerm::iri("http://www.wikidata.org/entity/Q5921");
        assert_eq!(Value::from_term(&term).unwrap(), Value::Item("Q5921".to_string()));

        let property = GraphTerm::iri("http://www.wikidata.org/entity/P31");
        assert!(matches!(Value::from_term(&property).unwrap(), Value::Link(_)));
    }
}
