//! Contact information handlers for a single user.
//!
//! Path ids that are not integers answer 404, as if the route did not exist.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use contactbook_core::contact::{
    AddContactRequest, ContactInfoResponse, ContactListsResponse, EmailResponse,
    PhoneNumberResponse, ReplaceContactRequest, User,
};
use contactbook_core::storage::RepositoryError;

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

fn path_or_not_found<T>(path: Result<Path<T>, PathRejection>) -> Result<T, RequestError> {
    path.map(|Path(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unmatched path segment");
        RequestError::NotFound
    })
}

async fn existing_user(state: &AppState, id: i64) -> Result<User, AppError> {
    state
        .user_repo
        .get_user(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("User", id).into())
}

/// Get a user with every contact item keyed by id (GET /users/{id}/contact/).
pub async fn get_contact_info(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ContactInfoResponse>, AppError> {
    let id = path_or_not_found(path)?;
    let user = existing_user(&state, id).await?;

    Ok(Json(ContactInfoResponse::from(&user)))
}

/// Append one email and one phone number (POST /users/{id}/contact/).
///
/// The user is looked up before the body is inspected, so an unknown user is
/// reported as 404 whatever the payload.
pub async fn add_contact(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactListsResponse>), AppError> {
    let id = path_or_not_found(path)?;
    existing_user(&state, id).await?;

    let Json(payload) = payload.map_err(RequestError::from)?;
    let contact = payload.validate()?;

    let user = state.contact_repo.add_contact(id, &contact).await?;

    tracing::info!(user_id = id, "Added contact information");

    Ok((StatusCode::CREATED, Json(ContactListsResponse::from(&user))))
}

/// Overwrite every contact item of a user (PUT /users/{id}/contact/).
pub async fn replace_contacts(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReplaceContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactListsResponse>), AppError> {
    let id = path_or_not_found(path)?;
    existing_user(&state, id).await?;

    let Json(payload) = payload.map_err(RequestError::from)?;
    let contacts = payload.validate()?;

    let user = state.contact_repo.replace_contacts(id, &contacts).await?;

    tracing::info!(
        user_id = id,
        emails = user.emails.len(),
        phonenumbers = user.phonenumbers.len(),
        "Replaced contact information"
    );

    Ok((StatusCode::CREATED, Json(ContactListsResponse::from(&user))))
}

/// GET /users/{id}/contact/email/{pk}
pub async fn get_email(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<EmailResponse>, AppError> {
    let (user_id, email_id) = path_or_not_found(path)?;

    let email = state
        .contact_repo
        .get_user_email(user_id, email_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Email", email_id))?;

    Ok(Json(EmailResponse::from(&email)))
}

/// GET /users/{id}/contact/phone-number/{pk}
pub async fn get_phone_number(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<PhoneNumberResponse>, AppError> {
    let (user_id, phone_id) = path_or_not_found(path)?;

    let phone_number = state
        .contact_repo
        .get_user_phone_number(user_id, phone_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("PhoneNumber", phone_id))?;

    Ok(Json(PhoneNumberResponse::from(&phone_number)))
}
