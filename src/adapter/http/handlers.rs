//! HTTP handlers. Each one parses path ids, calls a single service
//! operation, and returns its result as JSON.

use super::error::ApiError;
use super::extract::{ApiJson, ApiQuery, Requester};
use super::state::AppState;
use crate::application::service::{AdminView, MemberView};
use crate::domain::model::{
    Article, ArticleDraft, ArticleState, Group, GroupId, MembershipState, NewGroup, User, UserId,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    name: String,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUserRequest {
    user_id: String,
}

#[derive(Deserialize)]
pub struct RulesRequest {
    rules: Vec<String>,
}

#[derive(Deserialize)]
pub struct ModerationRequest {
    state: ArticleState,
}

#[derive(Deserialize)]
pub struct MemberQuery {
    state: Option<MembershipState>,
}

#[derive(Serialize)]
pub struct RemovedResponse {
    removed: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ====== Users ======

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.user_service.create(body.name, body.avatar).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<User> {
    let user = state.user_service.get(user_id.parse()?).await?;
    Ok(Json(user))
}

// ====== Groups ======

pub async fn create_group(
    State(state): State<AppState>,
    Requester(owner): Requester,
    ApiJson(body): ApiJson<NewGroup>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = state.group_service.create_group(owner, body).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(state.group_service.get_group(group_id.parse()?).await?))
}

pub async fn update_rules(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<RulesRequest>,
) -> ApiResult<Group> {
    let group = state
        .group_service
        .update_rules(group_id.parse()?, requester, body.rules)
        .await?;
    Ok(Json(group))
}

// ====== Membership ======

pub async fn request_join(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(state.group_service.request_join(group_id.parse()?, user).await?))
}

pub async fn revoke_join_request(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(
        state
            .group_service
            .revoke_join_request(group_id.parse()?, user)
            .await?,
    ))
}

pub async fn leave_group(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(state.group_service.leave_group(group_id.parse()?, user).await?))
}

pub async fn list_members(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiQuery(query): ApiQuery<MemberQuery>,
) -> ApiResult<Vec<MemberView>> {
    let members = state
        .group_service
        .list_members(group_id.parse()?, query.state)
        .await?;
    Ok(Json(members))
}

pub async fn invite_member(
    State(state): State<AppState>,
    Requester(inviter): Requester,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<TargetUserRequest>,
) -> ApiResult<Group> {
    let group = state
        .group_service
        .invite_member(group_id.parse()?, inviter, body.user_id.parse()?)
        .await?;
    Ok(Json(group))
}

pub async fn accept_invite(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(state.group_service.accept_invite(group_id.parse()?, user).await?))
}

pub async fn reject_invite(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(state.group_service.reject_invite(group_id.parse()?, user).await?))
}

pub async fn remove_member(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path((group_id, user_id)): Path<(String, String)>,
) -> ApiResult<Group> {
    let group = state
        .group_service
        .remove_member(group_id.parse()?, requester, user_id.parse()?)
        .await?;
    Ok(Json(group))
}

// ====== Administrators ======

pub async fn list_administrators(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Vec<AdminView>> {
    Ok(Json(
        state
            .group_service
            .list_administrators(group_id.parse()?)
            .await?,
    ))
}

pub async fn invite_admin(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<TargetUserRequest>,
) -> ApiResult<Group> {
    let group = state
        .group_service
        .invite_admin(group_id.parse()?, requester, body.user_id.parse()?)
        .await?;
    Ok(Json(group))
}

pub async fn accept_admin_invite(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(
        state
            .group_service
            .accept_admin_invite(group_id.parse()?, user)
            .await?,
    ))
}

pub async fn reject_admin_invite(
    State(state): State<AppState>,
    Requester(user): Requester,
    Path(group_id): Path<String>,
) -> ApiResult<Group> {
    Ok(Json(
        state
            .group_service
            .reject_admin_invite(group_id.parse()?, user)
            .await?,
    ))
}

pub async fn cancel_admin_invite(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path((group_id, user_id)): Path<(String, String)>,
) -> ApiResult<Group> {
    let group = state
        .group_service
        .cancel_admin_invite(group_id.parse()?, requester, user_id.parse()?)
        .await?;
    Ok(Json(group))
}

pub async fn revoke_admin(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path((group_id, user_id)): Path<(String, String)>,
) -> ApiResult<RemovedResponse> {
    let target: UserId = user_id.parse()?;
    let removed = state
        .group_service
        .revoke_admin(group_id.parse()?, requester, target)
        .await?;
    Ok(Json(RemovedResponse { removed }))
}

// ====== Articles ======

pub async fn submit_article(
    State(state): State<AppState>,
    Requester(author): Requester,
    Path(group_id): Path<String>,
    ApiJson(draft): ApiJson<ArticleDraft>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = state
        .group_service
        .submit_article(group_id.parse()?, author, draft)
        .await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn pending_articles(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Vec<Article>> {
    let group: GroupId = group_id.parse()?;
    Ok(Json(state.group_service.pending_articles(group).await?))
}

pub async fn processed_articles(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<Vec<Article>> {
    let group: GroupId = group_id.parse()?;
    Ok(Json(state.group_service.processed_articles(group).await?))
}

pub async fn moderate_article(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Path((group_id, article_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<ModerationRequest>,
) -> ApiResult<Article> {
    let article = state
        .group_service
        .moderate_article(group_id.parse()?, requester, article_id.parse()?, body.state)
        .await?;
    Ok(Json(article))
}
