//! Parameterised graph updates.
//!
//! Update text is never assembled by string substitution. A template is a
//! small syntax tree whose variable parts are [`Slot`]s; binding replaces each
//! slot by identity with a typed term and rendering happens only on the bound
//! tree.

use std::collections::HashMap;
use std::fmt;

use crate::error::{PrimarySourcesError, Result};
use crate::model::{GraphTerm, Triple};

/// A named parameter position in an update template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Item IRI of the statement subject.
    Subject,
    /// `p:` form of the main property.
    ClaimProperty,
    /// `ps:` form of the main property.
    StatementProperty,
    /// `pq:` form of the targeted qualifier property.
    QualifierProperty,
    /// `pr:` form of the targeted reference property.
    ReferenceProperty,
    /// The decided value. The only slot that accepts literals.
    Value,
    SourceGraph,
    TargetGraph,
    MetadataGraph,
    /// IRI prefix shared by every state graph of the dataset.
    DatasetBase,
    Curator,
    ActivityPredicate,
}

impl Slot {
    /// Whether `term` may be bound to this slot. Terms that would not
    /// render as a single well-formed token are refused everywhere.
    pub fn accepts(&self, term: &GraphTerm) -> bool {
        let shape = match self {
            Slot::Value => !matches!(term, GraphTerm::Blank(_)),
            _ => term.is_iri(),
        };
        shape && term.is_well_formed()
    }

    fn name(&self) -> &'static str {
        match self {
            Slot::Subject => "subject",
            Slot::ClaimProperty => "claimProperty",
            Slot::StatementProperty => "statementProperty",
            Slot::QualifierProperty => "qualifierProperty",
            Slot::ReferenceProperty => "referenceProperty",
            Slot::Value => "value",
            Slot::SourceGraph => "sourceGraph",
            Slot::TargetGraph => "targetGraph",
            Slot::MetadataGraph => "metadataGraph",
            Slot::DatasetBase => "datasetBase",
            Slot::Curator => "curator",
            Slot::ActivityPredicate => "activityPredicate",
        }
    }
}

/// A query variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub &'static str);

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// A term in a bound pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternTerm {
    Var(Var),
    Term(GraphTerm),
}

impl PatternTerm {
    pub fn iri(iri: impl Into<String>) -> Self {
        PatternTerm::Term(GraphTerm::iri(iri))
    }
}

impl From<Var> for PatternTerm {
    fn from(var: Var) -> Self {
        PatternTerm::Var(var)
    }
}

impl From<GraphTerm> for PatternTerm {
    fn from(term: GraphTerm) -> Self {
        PatternTerm::Term(term)
    }
}

impl fmt::Display for PatternTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTerm::Var(var) => var.fmt(f),
            PatternTerm::Term(term) => term.fmt(f),
        }
    }
}

/// A term in an unbound template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateTerm {
    Fixed(PatternTerm),
    Slot(Slot),
}

impl TemplateTerm {
    pub fn iri(iri: impl Into<String>) -> Self {
        TemplateTerm::Fixed(PatternTerm::iri(iri))
    }

    fn bind(&self, bindings: &Bindings) -> Result<PatternTerm> {
        match self {
            TemplateTerm::Fixed(term) => Ok(term.clone()),
            TemplateTerm::Slot(slot) => Ok(PatternTerm::Term(bindings.get(*slot)?.clone())),
        }
    }
}

impl From<Slot> for TemplateTerm {
    fn from(slot: Slot) -> Self {
        TemplateTerm::Slot(slot)
    }
}

impl From<Var> for TemplateTerm {
    fn from(var: Var) -> Self {
        TemplateTerm::Fixed(PatternTerm::Var(var))
    }
}

impl fmt::Display for TemplateTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateTerm::Fixed(term) => term.fmt(f),
            TemplateTerm::Slot(slot) => write!(f, "${}", slot.name()),
        }
    }
}

/// Values for the slots of a template.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<Slot, GraphTerm>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot, rejecting terms the slot cannot hold.
    pub fn bind(mut self, slot: Slot, term: GraphTerm) -> Result<Self> {
        if !slot.accepts(&term) {
            return Err(PrimarySourcesError::InvalidLocator(format!(
                "{:?} cannot hold {}",
                slot, term
            )));
        }
        self.values.insert(slot, term);
        Ok(self)
    }

    pub fn bind_iri(self, slot: Slot, iri: impl Into<String>) -> Result<Self> {
        self.bind(slot, GraphTerm::iri(iri))
    }

    pub fn get(&self, slot: Slot) -> Result<&GraphTerm> {
        self.values.get(&slot).ok_or(PrimarySourcesError::UnboundParameter(slot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern<T> {
    pub subject: T,
    pub predicate: T,
    pub object: T,
}

impl<T> TriplePattern<T> {
    pub fn new(subject: impl Into<T>, predicate: impl Into<T>, object: impl Into<T>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    fn try_map<U>(&self, f: &impl Fn(&T) -> Result<U>) -> Result<TriplePattern<U>> {
        Ok(TriplePattern {
            subject: f(&self.subject)?,
            predicate: f(&self.predicate)?,
            object: f(&self.object)?,
        })
    }
}

impl From<&Triple> for TriplePattern<PatternTerm> {
    fn from(triple: &Triple) -> Self {
        TriplePattern {
            subject: PatternTerm::Term(triple.subject.clone()),
            predicate: PatternTerm::iri(triple.predicate.clone()),
            object: PatternTerm::Term(triple.object.clone()),
        }
    }
}

/// Triple patterns scoped to one named graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBlock<T> {
    pub graph: T,
    pub triples: Vec<TriplePattern<T>>,
}

impl<T> GraphBlock<T> {
    pub fn new(graph: impl Into<T>, triples: Vec<TriplePattern<T>>) -> Self {
        Self {
            graph: graph.into(),
            triples,
        }
    }

    fn try_map<U>(&self, f: &impl Fn(&T) -> Result<U>) -> Result<GraphBlock<U>> {
        Ok(GraphBlock {
            graph: f(&self.graph)?,
            triples: self
                .triples
                .iter()
                .map(|triple| triple.try_map(f))
                .collect::<Result<_>>()?,
        })
    }
}

impl<T: fmt::Display> GraphBlock<T> {
    fn render(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        out.push_str(&format!("{}GRAPH {} {{\n", pad, self.graph));
        for triple in &self.triples {
            out.push_str(&format!(
                "{}  {} {} {} .\n",
                pad, triple.subject, triple.predicate, triple.object
            ));
        }
        out.push_str(&format!("{}}}\n", pad));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    /// `STRSTARTS(STR(?var), "prefix")`
    StrStarts { var: Var, prefix: String },
    /// `STRSTARTS(STR(?var), STR(base))`: the variable names an IRI under `base`.
    Under { var: Var, base: T },
}

impl<T> Filter<T> {
    fn try_map<U>(&self, f: &impl Fn(&T) -> Result<U>) -> Result<Filter<U>> {
        Ok(match self {
            Filter::StrStarts { var, prefix } => Filter::StrStarts {
                var: *var,
                prefix: prefix.clone(),
            },
            Filter::Under { var, base } => Filter::Under {
                var: *var,
                base: f(base)?,
            },
        })
    }
}

/// An element of a WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupPattern<T> {
    Graph(GraphBlock<T>),
    Optional(Vec<GroupPattern<T>>),
    Filter(Filter<T>),
    /// Binds `into` to `from + 1`, treating an unbound `from` as zero.
    Increment { from: Var, into: Var },
}

impl<T> GroupPattern<T> {
    fn try_map<U>(&self, f: &impl Fn(&T) -> Result<U>) -> Result<GroupPattern<U>> {
        Ok(match self {
            GroupPattern::Graph(block) => GroupPattern::Graph(block.try_map(f)?),
            GroupPattern::Optional(group) => GroupPattern::Optional(
                group
                    .iter()
                    .map(|element| element.try_map(f))
                    .collect::<Result<_>>()?,
            ),
            GroupPattern::Filter(filter) => GroupPattern::Filter(filter.try_map(f)?),
            GroupPattern::Increment { from, into } => GroupPattern::Increment {
                from: *from,
                into: *into,
            },
        })
    }
}

impl<T: fmt::Display> GroupPattern<T> {
    fn render(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        match self {
            GroupPattern::Graph(block) => block.render(out, depth),
            GroupPattern::Optional(group) => {
                out.push_str(&format!("{}OPTIONAL {{\n", pad));
                for element in group {
                    element.render(out, depth + 1);
                }
                out.push_str(&format!("{}}}\n", pad));
            }
            GroupPattern::Filter(Filter::StrStarts { var, prefix }) => {
                out.push_str(&format!(
                    "{}FILTER(STRSTARTS(STR({}), \"{}\"))\n",
                    pad, var, prefix
                ));
            }
            GroupPattern::Filter(Filter::Under { var, base }) => {
                out.push_str(&format!("{}FILTER(STRSTARTS(STR({}), STR({})))\n", pad, var, base));
            }
            GroupPattern::Increment { from, into } => {
                out.push_str(&format!(
                    "{}BIND((COALESCE({}, 0) + 1) AS {})\n",
                    pad, from, into
                ));
            }
        }
    }
}

/// A delete/insert/where update over terms of type `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation<T> {
    delete: Vec<GraphBlock<T>>,
    insert: Vec<GraphBlock<T>>,
    pattern: Vec<GroupPattern<T>>,
}

/// An update with unbound slots.
pub type UpdateTemplate = Operation<TemplateTerm>;

/// A fully bound update, ready to send to a store.
pub type Update = Operation<PatternTerm>;

impl<T> Default for Operation<T> {
    fn default() -> Self {
        Self {
            delete: Vec::new(),
            insert: Vec::new(),
            pattern: Vec::new(),
        }
    }
}

impl<T> Operation<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete(mut self, block: GraphBlock<T>) -> Self {
        self.delete.push(block);
        self
    }

    pub fn insert(mut self, block: GraphBlock<T>) -> Self {
        self.insert.push(block);
        self
    }

    pub fn pattern(mut self, element: GroupPattern<T>) -> Self {
        self.pattern.push(element);
        self
    }

    pub fn deletes(&self) -> &[GraphBlock<T>] {
        &self.delete
    }

    pub fn inserts(&self) -> &[GraphBlock<T>] {
        &self.insert
    }

    pub fn patterns(&self) -> &[GroupPattern<T>] {
        &self.pattern
    }

    /// Ground data with nothing to match or delete.
    pub fn is_data(&self) -> bool {
        self.delete.is_empty() && self.pattern.is_empty()
    }

    fn try_map<U>(&self, f: &impl Fn(&T) -> Result<U>) -> Result<Operation<U>> {
        let blocks = |blocks: &[GraphBlock<T>]| {
            blocks
                .iter()
                .map(|block| block.try_map(f))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Operation {
            delete: blocks(&self.delete)?,
            insert: blocks(&self.insert)?,
            pattern: self
                .pattern
                .iter()
                .map(|element| element.try_map(f))
                .collect::<Result<_>>()?,
        })
    }
}

impl UpdateTemplate {
    /// Replace every slot with its bound term.
    pub fn bind(&self, bindings: &Bindings) -> Result<Update> {
        self.try_map(&|term: &TemplateTerm| term.bind(bindings))
    }
}

impl Update {
    /// An `INSERT DATA` of ground triples into one graph.
    pub fn insert_data<'a>(graph: &str, triples: impl IntoIterator<Item = &'a Triple>) -> Self {
        Update::new().insert(GraphBlock {
            graph: PatternTerm::iri(graph),
            triples: triples.into_iter().map(TriplePattern::from).collect(),
        })
    }

    /// Number of ground triples in the insert clause.
    pub fn inserted_triples(&self) -> usize {
        self.insert.iter().map(|block| block.triples.len()).sum()
    }
}

impl<T: fmt::Display> Operation<T> {
    pub fn delete_clause(&self) -> String {
        render_blocks("DELETE", &self.delete)
    }

    pub fn insert_clause(&self) -> String {
        let keyword = if self.is_data() { "INSERT DATA" } else { "INSERT" };
        render_blocks(keyword, &self.insert)
    }

    pub fn where_clause(&self) -> String {
        let mut out = String::from("WHERE {\n");
        for element in &self.pattern {
            element.render(&mut out, 1);
        }
        out.push_str("}\n");
        out
    }
}

fn render_blocks<T: fmt::Display>(keyword: &str, blocks: &[GraphBlock<T>]) -> String {
    if blocks.is_empty() {
        return String::new();
    }
    let mut out = format!("{} {{\n", keyword);
    for block in blocks {
        block.render(&mut out, 1);
    }
    out.push_str("}\n");
    out
}

impl<T: fmt::Display> fmt::Display for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_data() {
            return f.write_str(&self.insert_clause());
        }
        write!(f, "{}{}{}", self.delete_clause(), self.insert_clause(), self.where_clause())
    }
}
