//! The API of a mutable, fully indexed in-memory [RDF] quad store.
//!
//! This crate defines what every quad model offers, independently of its implementation:
//! * [quads](quad) and [quad patterns](pattern),
//! * the [`QuadModel`](model::QuadModel) and [`MutableQuadModel`](model::MutableQuadModel) traits,
//!   implemented for standard collections of [`Quad`](quad::Quad)s,
//! * [views](view) and [term sets](term_set) over any model,
//! * the [bridge](bridge) used by external query evaluators.
//!
//! The terms themselves are defined in [`quadmodel_term`], re-exported here as [`term`].
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/

pub mod bridge;
pub mod error;
pub mod model;
pub mod pattern;
pub mod prelude;
pub mod quad;
pub mod term_set;
pub mod view;

pub use quadmodel_term as term;
