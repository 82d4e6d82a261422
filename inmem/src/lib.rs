//! This crate is part of [quadmodel],
//! an embeddable, mutable, fully indexed in-memory store of RDF quads.
//!
//! It provides the storage engine, [`QuadStore`],
//! which implements [`QuadModel`](quadmodel_api::model::QuadModel)
//! and [`MutableQuadModel`](quadmodel_api::model::MutableQuadModel).
//!
//! ```
//! use quadmodel_api::prelude::*;
//! use quadmodel_inmem::QuadStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alice = Term::iri("http://example.org/alice")?;
//! let knows = Term::iri("http://xmlns.com/foaf/0.1/knows")?;
//! let bob = Term::iri("http://example.org/bob")?;
//!
//! let mut store = QuadStore::new();
//! store.insert(&alice, &knows, &bob, None)?;
//! store.insert(&bob, &knows, &alice, Some(&alice))?;
//!
//! let pattern = QuadPattern::any().with_predicate(knows.clone()).in_default_graph();
//! assert_eq!(store.count_matching(&pattern), 1);
//! assert_eq!(store.plan(&pattern).roots, vec![Some(Position::Context)]);
//! # Ok(())
//! # }
//! ```
//!
//! [quadmodel]: https://docs.rs/quadmodel/latest/quadmodel/

pub mod index;
pub mod store;
mod table;

pub use index::TermId;
pub use store::QuadStore;
