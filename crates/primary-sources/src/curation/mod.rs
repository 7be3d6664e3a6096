//! Curation workflow: moving statements out of a dataset's `new` graph.
//!
//! A curator decision becomes one atomic delete/insert/where update that
//! moves the decided statement (and the satellites its kind sweeps along)
//! from `<dataset>/new` to `<dataset>/<state>` and bumps the curator's
//! activity counter in the metadata graph.
//!
//! # Usage
//!
//! ```
//! use primary_sources::curation::{CurationState, CurationStateMachine, StatementLocator};
//! use primary_sources::model::GraphTerm;
//!
//! let locator = StatementLocator::claim("Q5921", "P999", GraphTerm::plain("Maybelline")).unwrap();
//! let plan = CurationStateMachine::new()
//!     .plan(&locator, CurationState::Approved, "Hjfocs", "http://example.org/cosmetics")
//!     .unwrap();
//!
//! assert_eq!(plan.target_graph, "http://example.org/cosmetics/approved");
//! println!("{}", plan.update);
//! ```

mod curator;
mod locator;
mod machine;
mod request;
mod state;
mod template;

pub use curator::{CurationOutcome, Curator};
pub use locator::{StatementKind, StatementLocator};
pub use machine::{CurationPlan, CurationStateMachine, SweepScope};
pub use request::CurationRequest;
pub use state::{dataset_base, dataset_graph, split_dataset_graph, CurationState};
pub use template::{
    Bindings, Filter, GraphBlock, GroupPattern, Operation, PatternTerm, Slot, TemplateTerm,
    TriplePattern, Update, UpdateTemplate, Var,
};
