//! An embeddable, mutable, fully indexed in-memory store of [RDF] quads.
//!
//! This crate gathers the other crates of the toolkit:
//! * [`term`]: the RDF term model ([`quadmodel_term`]);
//! * [`api`]: quads, patterns, the model traits, views and the query bridge ([`quadmodel_api`]);
//! * [`inmem`]: the storage engine ([`quadmodel_inmem`]).
//!
//! # Getting Started
//!
//! ```
//! use quadmodel::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alice = Term::iri("http://example.org/alice")?;
//! let name = Term::iri("http://xmlns.com/foaf/0.1/name")?;
//! let graph = Term::iri("http://example.org/people")?;
//!
//! let mut store = QuadStore::new();
//! store.insert(&alice, &name, &Term::simple_literal("Alice"), Some(&graph))?;
//! store.insert(&alice, &name, &Term::lang_literal("Alicia", "es")?, None)?;
//!
//! // a view over the named graph only
//! let people = View::filtered(&store, QuadPattern::any().with_context(Some(graph.clone())));
//! assert_eq!(people.len(), 1);
//! assert_eq!(people.object_string()?, Some("Alice".to_string()));
//!
//! // views can not be written through when read-only
//! let mut frozen = View::unmodifiable(&mut store);
//! assert!(frozen.remove(&alice, &name, &Term::simple_literal("Alice"), Some(&graph)).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/

pub use quadmodel_api as api;
pub use quadmodel_inmem as inmem;
pub use quadmodel_term as term;

pub mod prelude {
    //! General-use types and traits.
    pub use quadmodel_api::prelude::*;
    pub use quadmodel_inmem::QuadStore;
}
