//! Turning a curator decision into a single atomic graph update.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::config::PrimarySourcesConfig;
use crate::error::{PrimarySourcesError, Result};
use crate::vocab::{self, Namespace};

use super::locator::{StatementKind, StatementLocator};
use super::state::{dataset_base, dataset_graph, CurationState};
use super::template::{
    Bindings, Filter, GraphBlock, GroupPattern, Slot, TemplateTerm, TriplePattern, Update,
    UpdateTemplate, Var,
};

const STATEMENT: Var = Var("statement");
const MAIN_VALUE: Var = Var("mainValue");
const QUALIFIER_PROPERTY: Var = Var("qualifierProperty");
const QUALIFIER_VALUE: Var = Var("qualifierValue");
const REFERENCE: Var = Var("reference");
const REFERENCE_PROPERTY: Var = Var("referenceProperty");
const REFERENCE_VALUE: Var = Var("referenceValue");
const CLAIM_GRAPH: Var = Var("claimGraph");
const PROVENANCE_GRAPH: Var = Var("provenanceGraph");
const OLD_COUNT: Var = Var("oldCount");
const NEW_COUNT: Var = Var("newCount");

/// Which triples a decision moves out of the `new` graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepScope {
    /// Claim edge, main value and qualifiers. References stay pending.
    ClaimApproval,
    /// The whole statement subtree, references included.
    ClaimRemoval,
    /// One qualifier triple.
    Qualifier,
    /// One reference value triple.
    Reference,
}

impl SweepScope {
    pub fn for_decision(kind: StatementKind, state: CurationState) -> Self {
        match (kind, state) {
            (StatementKind::Claim, CurationState::Approved) => SweepScope::ClaimApproval,
            (StatementKind::Claim, _) => SweepScope::ClaimRemoval,
            (StatementKind::Qualifier, _) => SweepScope::Qualifier,
            (StatementKind::Reference, _) => SweepScope::Reference,
        }
    }

    pub fn template(&self) -> &'static UpdateTemplate {
        match self {
            SweepScope::ClaimApproval => &CLAIM_APPROVAL,
            SweepScope::ClaimRemoval => &CLAIM_REMOVAL,
            SweepScope::Qualifier => &QUALIFIER,
            SweepScope::Reference => &REFERENCE_VALUE_SWEEP,
        }
    }
}

fn iri(iri: &str) -> TemplateTerm {
    TemplateTerm::iri(iri)
}

fn claim_edge() -> TriplePattern<TemplateTerm> {
    TriplePattern::new(Slot::Subject, Slot::ClaimProperty, STATEMENT)
}

fn main_value(value: impl Into<TemplateTerm>) -> TriplePattern<TemplateTerm> {
    TriplePattern::new(STATEMENT, Slot::StatementProperty, value)
}

fn provenance_edge() -> TriplePattern<TemplateTerm> {
    TriplePattern::new(STATEMENT, iri(vocab::DERIVED_FROM), REFERENCE)
}

fn source(triples: Vec<TriplePattern<TemplateTerm>>) -> GroupPattern<TemplateTerm> {
    GroupPattern::Graph(GraphBlock::new(Slot::SourceGraph, triples))
}

/// Match `triples` in whichever state graph of the dataset holds them.
/// Claim edges leave `new` once the claim is decided, while its
/// qualifiers and references may still be pending.
fn anchored(graph: Var, triples: Vec<TriplePattern<TemplateTerm>>) -> Vec<GroupPattern<TemplateTerm>> {
    vec![
        GroupPattern::Graph(GraphBlock::new(graph, triples)),
        GroupPattern::Filter(Filter::Under {
            var: graph,
            base: Slot::DatasetBase.into(),
        }),
    ]
}

fn activity(count: Var) -> GraphBlock<TemplateTerm> {
    GraphBlock::new(
        Slot::MetadataGraph,
        vec![TriplePattern::new(Slot::Curator, Slot::ActivityPredicate, count)],
    )
}

/// Wrap the statement-specific parts with the activity counter bump.
///
/// Both the statement match and the counter lookup are optional, so the
/// counter moves even when nothing matches in the `new` graph.
fn with_activity(
    moved_out: Vec<TriplePattern<TemplateTerm>>,
    moved_in: Vec<TriplePattern<TemplateTerm>>,
    matched: Vec<GroupPattern<TemplateTerm>>,
) -> UpdateTemplate {
    UpdateTemplate::new()
        .delete(GraphBlock::new(Slot::SourceGraph, moved_out))
        .delete(activity(OLD_COUNT))
        .insert(GraphBlock::new(Slot::TargetGraph, moved_in))
        .insert(activity(NEW_COUNT))
        .pattern(GroupPattern::Optional(matched))
        .pattern(GroupPattern::Optional(vec![GroupPattern::Graph(activity(OLD_COUNT))]))
        .pattern(GroupPattern::Increment {
            from: OLD_COUNT,
            into: NEW_COUNT,
        })
}

fn qualifiers() -> GroupPattern<TemplateTerm> {
    GroupPattern::Optional(vec![
        source(vec![TriplePattern::new(STATEMENT, QUALIFIER_PROPERTY, QUALIFIER_VALUE)]),
        GroupPattern::Filter(Filter::StrStarts {
            var: QUALIFIER_PROPERTY,
            prefix: vocab::QUALIFIER_PROPERTY.to_string(),
        }),
    ])
}

fn claim_triples() -> Vec<TriplePattern<TemplateTerm>> {
    vec![
        claim_edge(),
        main_value(Slot::Value),
        TriplePattern::new(STATEMENT, QUALIFIER_PROPERTY, QUALIFIER_VALUE),
    ]
}

static CLAIM_APPROVAL: Lazy<UpdateTemplate> = Lazy::new(|| {
    with_activity(
        claim_triples(),
        claim_triples(),
        vec![source(vec![claim_edge(), main_value(Slot::Value)]), qualifiers()],
    )
});

static CLAIM_REMOVAL: Lazy<UpdateTemplate> = Lazy::new(|| {
    let mut triples = claim_triples();
    triples.push(provenance_edge());
    triples.push(TriplePattern::new(REFERENCE, REFERENCE_PROPERTY, REFERENCE_VALUE));

    let references = GroupPattern::Optional(vec![
        source(vec![provenance_edge()]),
        GroupPattern::Optional(vec![source(vec![TriplePattern::new(
            REFERENCE,
            REFERENCE_PROPERTY,
            REFERENCE_VALUE,
        )])]),
    ]);

    with_activity(
        triples.clone(),
        triples,
        vec![
            source(vec![claim_edge(), main_value(Slot::Value)]),
            qualifiers(),
            references,
        ],
    )
});

static QUALIFIER: Lazy<UpdateTemplate> = Lazy::new(|| {
    let qualifier = TriplePattern::new(STATEMENT, Slot::QualifierProperty, Slot::Value);
    with_activity(
        vec![qualifier.clone()],
        vec![claim_edge(), main_value(MAIN_VALUE), qualifier.clone()],
        [
            anchored(CLAIM_GRAPH, vec![claim_edge(), main_value(MAIN_VALUE)]),
            vec![source(vec![qualifier])],
        ]
        .concat(),
    )
});

static REFERENCE_VALUE_SWEEP: Lazy<UpdateTemplate> = Lazy::new(|| {
    let reference = TriplePattern::new(REFERENCE, Slot::ReferenceProperty, Slot::Value);
    let moved_in = vec![claim_edge(), main_value(MAIN_VALUE), provenance_edge(), reference.clone()];
    let matched = [
        anchored(CLAIM_GRAPH, vec![claim_edge(), main_value(MAIN_VALUE)]),
        anchored(PROVENANCE_GRAPH, vec![provenance_edge()]),
        vec![source(vec![reference.clone()])],
    ]
    .concat();

    with_activity(vec![reference], moved_in, matched)
});

/// A bound update together with what it decides.
#[derive(Debug, Clone)]
pub struct CurationPlan {
    pub locator: StatementLocator,
    pub state: CurationState,
    pub scope: SweepScope,
    pub source_graph: String,
    pub target_graph: String,
    pub update: Update,
}

/// Plans curation decisions against a dataset's state graphs.
#[derive(Debug, Clone, Default)]
pub struct CurationStateMachine {
    config: PrimarySourcesConfig,
}

impl CurationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PrimarySourcesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrimarySourcesConfig {
        &self.config
    }

    /// Build the update that moves `locator` from `<dataset>/new` to
    /// `<dataset>/<target>` on behalf of `user`.
    ///
    /// Only the transitions out of `new` exist; any other target fails with
    /// [`PrimarySourcesError::InvalidTransition`].
    pub fn plan(
        &self,
        locator: &StatementLocator,
        target: CurationState,
        user: &str,
        dataset: &str,
    ) -> Result<CurationPlan> {
        let state = CurationState::New.transition_to(target)?;
        if user.trim().is_empty() {
            return Err(PrimarySourcesError::InvalidLocator("empty user name".to_string()));
        }
        if dataset.trim().is_empty() {
            return Err(PrimarySourcesError::InvalidLocator("empty dataset".to_string()));
        }

        let scope = SweepScope::for_decision(locator.kind, state);
        let source_graph = dataset_graph(dataset, CurationState::New);
        let target_graph = dataset_graph(dataset, state);

        let mut bindings = Bindings::new()
            .bind_iri(Slot::Subject, Namespace::Entity.expand(&locator.subject_id))?
            .bind_iri(Slot::ClaimProperty, Namespace::ClaimProperty.expand(&locator.main_property_id))?
            .bind_iri(
                Slot::StatementProperty,
                Namespace::StatementProperty.expand(&locator.main_property_id),
            )?
            .bind(Slot::Value, locator.value.clone())?
            .bind_iri(Slot::SourceGraph, source_graph.as_str())?
            .bind_iri(Slot::TargetGraph, target_graph.as_str())?
            .bind_iri(Slot::DatasetBase, dataset_base(dataset))?
            .bind_iri(Slot::MetadataGraph, self.config.metadata_graph.as_str())?
            .bind_iri(Slot::Curator, self.config.user_iri(user))?
            .bind_iri(Slot::ActivityPredicate, self.config.activity_predicate.as_str())?;

        bindings = match locator.kind {
            StatementKind::Claim => bindings,
            StatementKind::Qualifier => bindings.bind_iri(
                Slot::QualifierProperty,
                Namespace::QualifierProperty.expand(&locator.property_id),
            )?,
            StatementKind::Reference => bindings.bind_iri(
                Slot::ReferenceProperty,
                Namespace::ReferenceProperty.expand(&locator.property_id),
            )?,
        };

        let update = scope.template().bind(&bindings)?;
        debug!(
            subject = %locator.subject_id,
            property = %locator.property_id,
            kind = %locator.kind,
            ?scope,
            target = %target_graph,
            "Planned curation update"
        );

        Ok(CurationPlan {
            locator: locator.clone(),
            state,
            scope,
            source_graph,
            target_graph,
            update,
        })
    }
}
