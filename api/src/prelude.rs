//! General-use types and traits from the quadmodel API.

pub use crate::bridge::{CardinalityEstimator, Evaluator, PatternSource, TermNormalizer};
pub use crate::error::{ModelError, ModelResult};
pub use crate::model::{MutableQuadModel, QuadIter, QuadModel};
pub use crate::pattern::QuadPattern;
pub use crate::quad::{Position, Quad};
pub use crate::term_set::{ContextSet, TermSet};
pub use crate::view::{Subset, View};

pub use quadmodel_term::{GraphName, Term, TermKind};
