//! Standard namespaces, generated with the [`namespace`](crate::namespace) macro.
//!
//! # Example use
//! ```
//! use quadmodel_term::{ns::{rdf, xsd}, Literal};
//!
//! let lit = Literal::new_typed("42", xsd::integer.clone());
//! assert_eq!(lit.datatype(), *xsd::integer);
//! assert_eq!(rdf::type_.as_str(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
//! ```

/// The standard `rdf:` namespace.
///
/// NB: since `type` is a reserved keyword in Rust,
/// the term `rdf:type` spells `rdf::type_` (with a trailing underscore).
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        // classes
        Alt,
        Bag,
        List,
        PlainLiteral,
        Property,
        Seq,
        Statement,
        // datatypes
        HTML,
        JSON,
        langString,
        XMLLiteral,
        // properties
        first,
        object,
        predicate,
        rest,
        subject,
        value,
        // individuals
        nil;
        type_, "type"
    );
}

/// The standard `xsd:` namespace.
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        anyURI,
        boolean,
        byte,
        date,
        dateTime,
        decimal,
        double,
        duration,
        float,
        int,
        integer,
        language,
        long,
        negativeInteger,
        nonNegativeInteger,
        nonPositiveInteger,
        normalizedString,
        positiveInteger,
        short,
        string,
        time,
        token,
        unsignedByte,
        unsignedInt,
        unsignedLong,
        unsignedShort
    );
}
