use axum::extract::State;
use axum::Json;

use shelfmark_authz::Identity;
use shelfmark_http::error::AppError;

use super::aggregator::ProfileAggregator;
use super::models::Profile;

pub async fn get_profile(
    State(aggregator): State<ProfileAggregator>,
    identity: Identity,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(aggregator.build(&identity)?))
}
