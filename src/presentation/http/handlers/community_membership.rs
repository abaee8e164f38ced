//! Community Membership Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateCommunityMembershipRequest, MembershipIncludeQuery};
use crate::application::dto::response::{CommunityMembershipResponse, ListResponse};
use crate::domain::validators::{validate_id, CommunityValidator};
use crate::domain::CommunityMembershipId;
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery, RequestingUser};
use crate::shared::error::{AppError, FieldName};
use crate::shared::validation::validate_field_is_not_missing;
use crate::startup::AppState;

/// List the requesting user's memberships
pub async fn list_memberships(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppQuery(query): AppQuery<MembershipIncludeQuery>,
) -> Result<Json<ListResponse<CommunityMembershipResponse>>, AppError> {
    let memberships = state
        .services
        .community_memberships
        .list_memberships(&user, query.into())
        .await?;
    Ok(Json(memberships.into()))
}

/// Join a community
pub async fn create_membership(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppJson(body): AppJson<CreateCommunityMembershipRequest>,
) -> Result<(StatusCode, Json<CommunityMembershipResponse>), AppError> {
    let raw = validate_field_is_not_missing(
        body.community_id_or_name.as_deref(),
        FieldName::CommunityName,
    )?;
    let community = CommunityValidator::new().validate_id_or_name(raw)?;

    let membership = state
        .services
        .community_memberships
        .create_membership(&user, community)
        .await?;
    Ok((StatusCode::CREATED, Json(membership.into())))
}

/// Get one of the requesting user's memberships
pub async fn get_membership(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppQuery(query): AppQuery<MembershipIncludeQuery>,
) -> Result<Json<CommunityMembershipResponse>, AppError> {
    let id = validate_id::<CommunityMembershipId>(&id)?;

    let membership = state
        .services
        .community_memberships
        .get_membership(&user, id, query.into())
        .await?;
    Ok(Json(membership.into()))
}

/// Leave a community
pub async fn delete_membership(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode, AppError> {
    let id = validate_id::<CommunityMembershipId>(&id)?;

    state
        .services
        .community_memberships
        .delete_membership(&user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
