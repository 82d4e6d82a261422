/// Create a "namespace module"
/// defining a set of IRIs within a given IRI space.
///
/// Each IRI is a lazily initialized [`Iri`](crate::Iri) static,
/// so all uses of e.g. `xsd::string` share the same storage.
///
/// # Tests
/// This macro also create a test module to check that all created IRIs are valid.
#[macro_export]
macro_rules! namespace {
    ($iri_prefix:literal, $($suffix:ident),*; $($r_id:ident, $r_sf:literal),*) => {
        /// Prefix used in this namespace.
        pub static PREFIX: &str = $iri_prefix;
        $crate::lazy_static::lazy_static! {
            $(
                /// Generated IRI.
                #[allow(non_upper_case_globals)]
                pub static ref $suffix: $crate::Iri = $crate::Iri::new_unchecked(concat!($iri_prefix, stringify!($suffix)));
            )*
            $(
                /// Generated IRI.
                #[allow(non_upper_case_globals)]
                pub static ref $r_id: $crate::Iri = $crate::Iri::new_unchecked(concat!($iri_prefix, $r_sf));
            )*
        }

    };
    ($iri_prefix:literal, $($suffix:ident),*) => {
        $crate::namespace!($iri_prefix, $($suffix),*;);
    };
}
