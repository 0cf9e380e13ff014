//! User collection handlers: create, list and delete.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        OriginalUri, Query, State,
    },
    http::StatusCode,
    Json,
};

use contactbook_core::contact::{
    CreateUserRequest, CreatedUserResponse, DeleteUserRequest, ListUsersQuery, UserListItem,
};
use contactbook_core::pagination::{Page, PageLinks, PageNumber, PageWindow};

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

/// Create a user with its contact items (POST /users/).
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), AppError> {
    let Json(payload) = payload.map_err(RequestError::from)?;
    let new_user = payload.validate()?;

    let user = state.user_repo.create_user(&new_user).await?;

    tracing::info!(
        user_id = user.id,
        emails = user.emails.len(),
        phonenumbers = user.phonenumbers.len(),
        "Created user"
    );

    Ok((StatusCode::CREATED, Json(CreatedUserResponse::from(&user))))
}

/// List users one page at a time (GET /users/).
///
/// Filters on `id` and `firstname` are exact matches. Page links keep every
/// other query parameter of the request.
pub async fn list_users(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<Page<UserListItem>>, AppError> {
    let Query(query) = query.map_err(RequestError::from)?;
    let filter = query.filter()?;
    let per_page = state.pagination.per_page(query.per_page.as_deref());
    let page = PageNumber::parse(query.page.as_deref())?;

    let total = state.user_repo.count_users(&filter).await?;
    let window = PageWindow::resolve(page, per_page, total)?;

    tracing::debug!(
        total,
        page = window.page,
        per_page = window.per_page,
        "Listing users"
    );

    let users = state
        .user_repo
        .list_users(&filter, window.offset(), window.limit())
        .await?;

    let links = PageLinks::from_query_string(uri.path(), uri.query());
    let data = users.iter().map(UserListItem::from).collect();

    Ok(Json(Page::new(window, total, data, &links)))
}

/// Delete the user named in the body (DELETE /users/).
///
/// Email and phone number rows of the user are kept.
pub async fn delete_user(
    State(state): State<AppState>,
    payload: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload.map_err(RequestError::from)?;
    let id = payload.validate()?;

    state.user_repo.delete_user(id).await?;

    tracing::info!(user_id = id, "Deleted user");

    Ok(StatusCode::NO_CONTENT)
}
