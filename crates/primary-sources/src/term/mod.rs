//! Identifier grammars and namespace typo detection.
//!
//! Every identifier in a contributed statement belongs to one of four
//! grammars: items (`Q42`), properties (`P31`), statement nodes
//! (`Q42-<uuid>`) and reference nodes (a SHA-1 hex digest). The typo
//! heuristic compares the namespace portion of a resource against the one
//! it was probably meant to be in; it only ever flags, never corrects.

mod distance;
mod grammar;

pub use distance::{classify_namespace, levenshtein, namespace_edit_distance, namespace_of, NamespaceMatch};
pub use grammar::{is_valid_resource, is_valid_term, item_numeric_id, statement_subject, TermKind};
