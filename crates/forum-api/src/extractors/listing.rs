//! Question listing query extractor
//!
//! Parses `?q=&tags=a,b&sort=&page=` into a `ListingQuery`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use forum_core::ListingQuery;
use forum_service::dto::ListQuestionsParams;

use crate::response::ApiError;

/// Parsed listing query
#[derive(Debug, Clone)]
pub struct Listing(pub ListingQuery);

#[async_trait]
impl<S> FromRequestParts<S> for Listing
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListQuestionsParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Listing(params.into_listing_query()?))
    }
}
