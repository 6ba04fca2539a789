//! The `/catalogue/graphs` listing endpoint.

use crate::error::CatalogueServerError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedOffering {
    uri: String,
    self_listing: String,
    assets: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    status: &'static str,
    message: &'static str,
    total_count: usize,
    offerings: Vec<ListedOffering>,
    timestamp: String,
}

pub async fn handle_listing_get(
    State(state): State<AppState>,
) -> Result<Json<ListingResponse>, CatalogueServerError> {
    let offerings: Vec<ListedOffering> = state
        .catalogue
        .list_offerings()?
        .into_iter()
        .map(|summary| ListedOffering {
            uri: summary.uri.into_string(),
            self_listing: summary.self_listing.into_string(),
            assets: summary.assets,
        })
        .collect();
    debug!(count = offerings.len(), "listing offerings");

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| CatalogueServerError::Internal(e.into()))?;
    Ok(Json(ListingResponse {
        status: "success",
        message: "Offerings retrieved successfully",
        total_count: offerings.len(),
        offerings,
        timestamp,
    }))
}
