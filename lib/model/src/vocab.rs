//! Vocabulary constants used by the catalogue.

pub use oxrdf::vocab::{rdf, xsd};

/// [SEDIMARK ontology](https://w3id.org/sedimark/ontology) terms.
pub mod sedimark {
    use oxrdf::NamedNodeRef;

    /// Namespace of the SEDIMARK ontology.
    pub const NS: &str = "https://w3id.org/sedimark/ontology#";

    /// A data-marketplace listing.
    pub const OFFERING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/sedimark/ontology#Offering");

    /// An asset made available through an offering.
    pub const ASSET: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/sedimark/ontology#Asset");

    /// The public listing page of an offering.
    pub const SELF_LISTING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/sedimark/ontology#Self-Listing");

    /// Links an offering to an asset it offers.
    pub const OFFERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/sedimark/ontology#offers");

    /// Links an offering to its self-listing.
    pub const HAS_SELF_LISTING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/sedimark/ontology#hasSelfListing");
}

#[cfg(test)]
mod tests {
    use super::sedimark;

    #[test]
    fn terms_are_in_namespace() {
        for term in [
            sedimark::OFFERING,
            sedimark::ASSET,
            sedimark::SELF_LISTING,
            sedimark::OFFERS,
            sedimark::HAS_SELF_LISTING,
        ] {
            assert!(term.as_str().starts_with(sedimark::NS));
        }
    }
}
