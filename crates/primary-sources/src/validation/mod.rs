//! Structural validation of contributed graphs.
//!
//! A contributed graph must consist of triples in exactly five shapes:
//!
//! ```text
//! wd:Q42      p:P18        wds:Q42-<uuid>      item
//! wds:Q42-…   ps:P18       <value>             statement
//! wds:Q42-…   prov:wasDerivedFrom  wdref:<sha1>   reference
//! wds:Q42-…   pq:P2096     <value>             qualifier
//! wdref:<sha1> pr:P854     <value>             reference value
//! ```
//!
//! Anything else is dropped and reported; nothing is ever repaired.

mod patterns;
mod syntax;
mod validator;
mod violation;

pub use patterns::{
    classify, ItemPatternValidator, PatternValidator, QualifierPatternValidator,
    ReferencePatternValidator, ReferenceValuePatternValidator, StatementPatternValidator, TripleKind,
};
pub use syntax::{check_syntax, RdfFormat};
pub use validator::{DataModelValidator, ValidationOutcome, ValidatorConfig};
pub use violation::{ExpectedKind, InvalidComponentReport, StructuralViolation};
