//! @acp:module "Domain"
//! @acp:summary "Domain specification loading and the immutable domain model"
//! @acp:domain grammar
//! @acp:layer model

pub mod lexicon;
pub mod model;
pub mod spec;

pub use lexicon::{normalize_phrase, Trend, KEYWORDS};
pub use model::{DomainModel, Relation, Variable};
pub use spec::{DomainSpec, Polarity, RelationSpec, VariableSpec};
