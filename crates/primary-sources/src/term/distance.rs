//! Levenshtein distance and namespace typo classification.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q\d+$").unwrap());

/// How a resource's namespace relates to the namespace it was expected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceMatch {
    /// Same namespace.
    Exact,
    /// Close enough to be a likely misspelling.
    Typo { distance: usize },
    /// Unrelated namespace, presumably on purpose.
    Foreign { distance: usize },
}

impl NamespaceMatch {
    /// Whether the heuristic flags the resource.
    pub fn is_typo(&self) -> bool {
        matches!(self, NamespaceMatch::Typo { .. })
    }
}

/// Levenshtein edit distance between two strings, by characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Namespace portion of a resource.
///
/// The part preceding a trailing item id when there is one, otherwise
/// everything up to and including the last `/` or `#`.
pub fn namespace_of(iri: &str) -> &str {
    if let Some(m) = TRAILING_ITEM.find(iri) {
        return &iri[..m.start()];
    }
    match iri.rfind(['/', '#']) {
        Some(idx) => &iri[..=idx],
        None => iri,
    }
}

/// Edit distance between an actual and an expected namespace.
pub fn namespace_edit_distance(actual_namespace: &str, expected_namespace: &str) -> usize {
    levenshtein(actual_namespace, expected_namespace)
}

/// Classify the namespace of `iri` against `expected_namespace`.
pub fn classify_namespace(iri: &str, expected_namespace: &str, threshold: usize) -> NamespaceMatch {
    let distance = namespace_edit_distance(namespace_of(iri), expected_namespace);
    if distance == 0 {
        NamespaceMatch::Exact
    } else if distance <= threshold {
        NamespaceMatch::Typo { distance }
    } else {
        NamespaceMatch::Foreign { distance }
    }
}
