//! This crate is part of [quadmodel],
//! an embeddable, mutable, fully indexed in-memory store of RDF quads.
//!
//! It defines the RDF term model shared by the other crates:
//! [`Iri`], [`BlankNode`], [`Literal`] (with its [`LanguageTag`]),
//! the [`Term`] enum, and [`GraphName`].
//!
//! All these types are immutable and share their textual storage,
//! so cloning them is cheap.
//! Two clones of the same term are [`same_as`](Term::same_as) each other,
//! which is how stores expose the identity of interned terms.
//!
//! ```
//! use quadmodel_term::{Term, TermKind};
//!
//! let alice = Term::iri("http://example.org/alice")?;
//! let name = Term::lang_literal("Alice", "EN")?;
//! assert_eq!(alice.kind(), TermKind::Iri);
//! assert!(alice.is_resource());
//! assert_eq!(name.to_string(), "\"Alice\"@en");
//! # Ok::<(), quadmodel_term::TermError>(())
//! ```
//!
//! [quadmodel]: https://docs.rs/quadmodel/latest/quadmodel/
#![deny(missing_docs)]

// rexport is necessary to ensure that the namespace macro works.
#[doc(hidden)]
pub use lazy_static;

#[macro_use]
mod _macro;

mod _error;
pub use _error::*;
mod _term;
pub use _term::*;

pub mod blank_node;
pub use blank_node::BlankNode;
pub mod iri;
pub use iri::Iri;
pub mod language_tag;
pub use language_tag::LanguageTag;
pub mod literal;
pub use literal::Literal;
pub mod ns;
