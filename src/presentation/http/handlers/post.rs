//! Post Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    ListPostsQuery, PostContentRequest, PostIncludeQuery, VotePostRequest,
};
use crate::application::dto::response::{ListResponse, PostResponse};
use crate::domain::validators::{validate_id, CommunityValidator, PostValidator};
use crate::domain::{CommunityId, PostFilter, PostId, UserId};
use crate::presentation::http::extractors::{AppJson, AppPath, AppQuery, RequestingUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn post_filter(
    query: &ListPostsQuery,
    community_id: Option<CommunityId>,
) -> Result<PostFilter, AppError> {
    let author_id = query
        .author
        .as_deref()
        .map(validate_id::<UserId>)
        .transpose()?;

    PostValidator::new().validate_filter(
        community_id,
        author_id,
        query.search.as_deref(),
        query.limit,
        query.offset,
    )
}

/// List posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    RequestingUser(_user): RequestingUser,
    AppQuery(query): AppQuery<ListPostsQuery>,
) -> Result<Json<ListResponse<PostResponse>>, AppError> {
    let community_id = query
        .community
        .as_deref()
        .map(validate_id::<CommunityId>)
        .transpose()?;
    let filter = post_filter(&query, community_id)?;

    let posts = state
        .services
        .posts
        .list_posts(filter, query.include())
        .await?;
    Ok(Json(posts.into()))
}

/// List the posts of one community
pub async fn list_community_posts(
    State(state): State<AppState>,
    RequestingUser(_user): RequestingUser,
    AppPath(id_or_name): AppPath<String>,
    AppQuery(query): AppQuery<ListPostsQuery>,
) -> Result<Json<ListResponse<PostResponse>>, AppError> {
    let id_or_name = CommunityValidator::new().validate_id_or_name(&id_or_name)?;
    let community = state
        .services
        .communities
        .get_community(id_or_name, false)
        .await?;
    let filter = post_filter(&query, Some(community.id))?;

    let posts = state
        .services
        .posts
        .list_posts(filter, query.include())
        .await?;
    Ok(Json(posts.into()))
}

/// Post in a community the requesting user belongs to
pub async fn create_community_post(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id_or_name): AppPath<String>,
    AppJson(body): AppJson<PostContentRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let community = CommunityValidator::new().validate_id_or_name(&id_or_name)?;
    let content = PostValidator::new().validate_content(body.content.as_deref())?;

    let post = state
        .services
        .posts
        .create_post(&user, community, content)
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Get a post by id
pub async fn get_post(
    State(state): State<AppState>,
    RequestingUser(_user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppQuery(query): AppQuery<PostIncludeQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let id = validate_id::<PostId>(&id)?;

    let post = state.services.posts.get_post(id, query.into()).await?;
    Ok(Json(post.into()))
}

/// Edit a post's content
pub async fn update_post(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<PostContentRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let id = validate_id::<PostId>(&id)?;
    let content = PostValidator::new().validate_content(body.content.as_deref())?;

    let post = state
        .services
        .posts
        .update_post_content(&user, id, content)
        .await?;
    Ok(Json(post.into()))
}

/// Up or down vote a post
pub async fn vote_post(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
    AppJson(body): AppJson<VotePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let id = validate_id::<PostId>(&id)?;

    let post = state
        .services
        .posts
        .vote_post(&user, id, body.is_up)
        .await?;
    Ok(Json(post.into()))
}

/// Delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    RequestingUser(user): RequestingUser,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode, AppError> {
    let id = validate_id::<PostId>(&id)?;

    state.services.posts.delete_post(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
