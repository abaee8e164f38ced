//! Community Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    CommunityNameRequest, IncludeCreatorQuery, ListCommunitiesQuery,
};
use crate::application::dto::response::{CommunityResponse, ListResponse};
use crate::domain::validators::CommunityValidator;
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery, RequestingUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List communities, optionally filtered by a name substring
pub async fn list_communities(
    State(state): State<AppState>,
    RequestingUser(_user): RequestingUser,
    AppQuery(query): AppQuery<ListCommunitiesQuery>,
) -> Result<Json<ListResponse<CommunityResponse>>, AppError> {
    let filter = CommunityValidator::new().validate_filter(
        query.name.as_deref(),
        query.limit,
        query.offset,
    )?;

    let communities = state
        .services
        .communities
        .list_communities(filter, query.include_creator)
        .await?;
    Ok(Json(communities.into()))
}

/// Create a community; the creator joins it
pub async fn create_community(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppJson(body): AppJson<CommunityNameRequest>,
) -> Result<(StatusCode, Json<CommunityResponse>), AppError> {
    let name = CommunityValidator::new().validate_community_name(body.name.as_deref())?;

    let community = state
        .services
        .communities
        .create_community(&user, name)
        .await?;
    Ok((StatusCode::CREATED, Json(community.into())))
}

/// Get a community by id or name
pub async fn get_community(
    State(state): State<AppState>,
    RequestingUser(_user): RequestingUser,
    AppPath(id_or_name): AppPath<String>,
    AppQuery(query): AppQuery<IncludeCreatorQuery>,
) -> Result<Json<CommunityResponse>, AppError> {
    let id_or_name = CommunityValidator::new().validate_id_or_name(&id_or_name)?;

    let community = state
        .services
        .communities
        .get_community(id_or_name, query.include_creator)
        .await?;
    Ok(Json(community.into()))
}

/// Rename a community
pub async fn update_community(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id_or_name): AppPath<String>,
    AppJson(body): AppJson<CommunityNameRequest>,
) -> Result<Json<CommunityResponse>, AppError> {
    let validator = CommunityValidator::new();
    let id_or_name = validator.validate_id_or_name(&id_or_name)?;
    let name = validator.validate_community_name(body.name.as_deref())?;

    let community = state
        .services
        .communities
        .update_community(&user, id_or_name, name)
        .await?;
    Ok(Json(community.into()))
}

/// Delete a community with its posts and memberships
pub async fn delete_community(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id_or_name): AppPath<String>,
) -> Result<StatusCode, AppError> {
    let id_or_name = CommunityValidator::new().validate_id_or_name(&id_or_name)?;

    state
        .services
        .communities
        .delete_community(&user, id_or_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
