//! Content negotiation for the catalogue endpoints.

use crate::error::CatalogueServerError;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use headers::HeaderMapExt;
use headers_accept::Accept;
use mediatype::names::{APPLICATION, JSON, N3, N_TRIPLES, TEXT, TRIG, TURTLE, XML};
use mediatype::{MediaType, Name};
use oxrdfio::RdfFormat;

/// Serialization selected for a response carrying a stored graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferingFormat {
    /// Expanded JSON-LD, the default when the client states no usable
    /// preference.
    JsonLd,
    /// One of the serializations the RDF I/O layer writes natively.
    Rdf(RdfFormat),
}

impl OfferingFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            OfferingFormat::JsonLd => "application/ld+json",
            OfferingFormat::Rdf(format) => format.media_type(),
        }
    }
}

/// Negotiates the response serialization from the `Accept` header.
///
/// An absent header, `*/*`, or a header matching none of the offered types
/// all fall back to JSON-LD rather than failing with 406.
impl FromRequestParts<AppState> for OfferingFormat {
    type Rejection = CatalogueServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        static MEDIA_TYPES: [MediaType<'_>; 8] = [
            MediaType::new(APPLICATION, Name::new_unchecked("ld+json")),
            MediaType::new(APPLICATION, JSON),
            MediaType::new(TEXT, TURTLE),
            MediaType::new(APPLICATION, Name::new_unchecked("rdf+xml")),
            MediaType::new(APPLICATION, XML),
            MediaType::new(APPLICATION, N_TRIPLES),
            MediaType::new(TEXT, N3),
            MediaType::new(APPLICATION, TRIG),
        ];

        let Some(accept) = parts.headers.typed_get::<Accept>() else {
            return Ok(OfferingFormat::JsonLd);
        };
        let Some(negotiated) = accept.negotiate(&MEDIA_TYPES) else {
            return Ok(OfferingFormat::JsonLd);
        };

        let essence = negotiated.essence().to_string();
        Ok(match essence.as_str() {
            "application/ld+json" | "application/json" => OfferingFormat::JsonLd,
            other => RdfFormat::from_media_type(other)
                .map(OfferingFormat::Rdf)
                .unwrap_or(OfferingFormat::JsonLd),
        })
    }
}

/// Maps the request `Content-Type` to a parseable RDF format.
pub fn input_format(headers: &axum::http::HeaderMap) -> Result<RdfFormat, CatalogueServerError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            CatalogueServerError::UnsupportedMediaType(
                "missing Content-Type header".to_owned(),
            )
        })?;

    RdfFormat::from_media_type(content_type).ok_or_else(|| {
        CatalogueServerError::UnsupportedMediaType(content_type.to_owned())
    })
}
