//! CRUD handlers over the stored user documents.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{user_id}
//! PUT    /api/v1/users
//! DELETE /api/v1/users/{user_id}
//! DELETE /api/v1/users
//! ```

use actix_web::{delete, get, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::DocumentRepositoryError;
use crate::domain::{Address, Company, DomainError, PostDocument, User, UserDocument};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Request payload for creating a user document.
///
/// Mandatory fields arrive as options so their absence maps to a structured
/// 400 instead of a deserialisation failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Natural key for the new document.
    pub id: Option<i64>,
    /// Full display name.
    pub name: Option<String>,
    /// Unique handle.
    pub username: Option<String>,
    /// Contact email, unique across the store.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<Address>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional website.
    pub website: Option<String>,
    /// Optional company block.
    pub company: Option<Company>,
    /// Optional pre-nested posts; defaults to an empty list.
    #[serde(default)]
    pub posts: Vec<PostDocument>,
}

/// Response payload for bulk deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    /// Number of documents removed.
    pub deleted: u64,
}

fn missing_field_error(field: &str) -> ApiError {
    ApiError::from_domain(
        DomainError::invalid_request(format!("missing required field: {field}"))
            .with_details(json!({ "field": field })),
    )
}

fn map_repository_error(error: DocumentRepositoryError) -> ApiError {
    match error {
        DocumentRepositoryError::Duplicate { message } => {
            ApiError::from_domain(DomainError::conflict(message))
        }
        other => {
            error!(error = %other, "document store operation failed");
            ApiError::from_domain(DomainError::internal(other.to_string()))
        }
    }
}

fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        ApiError::from_domain(
            DomainError::invalid_request("user id must be a decimal integer")
                .with_details(json!({ "userId": raw })),
        )
    })
}

fn build_document(payload: CreateUserRequest) -> Result<UserDocument, ApiError> {
    let id = payload.id.ok_or_else(|| missing_field_error("id"))?;
    let name = payload.name.ok_or_else(|| missing_field_error("name"))?;
    let username = payload
        .username
        .ok_or_else(|| missing_field_error("username"))?;
    let email = payload.email.ok_or_else(|| missing_field_error("email"))?;

    let user = User {
        id,
        name,
        username,
        email,
        address: payload.address,
        phone: payload.phone,
        website: payload.website,
        company: payload.company,
    }
    .validated()
    .map_err(|validation| {
        ApiError::from_domain(DomainError::invalid_request(validation.to_string()))
    })?;

    Ok(UserDocument {
        user,
        posts: payload.posts,
    })
}

/// List every stored user document.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Stored user documents", body = [UserDocument]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserDocument>>> {
    let documents = state.documents.list().await.map_err(map_repository_error)?;
    Ok(web::Json(documents))
}

/// Fetch one user document by natural id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "Natural user id")),
    responses(
        (status = 200, description = "Stored user document", body = UserDocument),
        (status = 400, description = "Invalid user id", body = ApiError),
        (status = 404, description = "No document for this id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDocument>> {
    let user_id = parse_user_id(&path)?;
    let document = state
        .documents
        .find_by_user_id(user_id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| {
            ApiError::from_domain(DomainError::not_found(format!("no user with id {user_id}")))
        })?;
    Ok(web::Json(document))
}

/// Create a user document.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Document created", body = UserDocument),
        (status = 400, description = "Missing or invalid field", body = ApiError),
        (status = 409, description = "A document with this id or email exists", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[put("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let document = build_document(payload.into_inner())?;
    state
        .documents
        .insert(document.clone())
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Created().json(document))
}

/// Delete one user document by natural id.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "Natural user id")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 400, description = "Invalid user id", body = ApiError),
        (status = 404, description = "No document for this id", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    let removed = state
        .documents
        .delete_by_user_id(user_id)
        .await
        .map_err(map_repository_error)?;
    if !removed {
        return Err(ApiError::from_domain(DomainError::not_found(format!(
            "no user with id {user_id}"
        ))));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every stored user document.
#[utoipa::path(
    delete,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Documents deleted", body = DeletedResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "deleteAllUsers"
)]
#[delete("/users")]
pub async fn delete_all_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let deleted = state
        .documents
        .delete_all()
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(DeletedResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    fn complete_request() -> CreateUserRequest {
        CreateUserRequest {
            id: Some(11),
            name: Some("Nicholas".into()),
            username: Some("nick".into()),
            email: Some("nick@example.net".into()),
            address: None,
            phone: None,
            website: None,
            company: None,
            posts: vec![],
        }
    }

    #[test]
    fn build_document_accepts_a_complete_payload() {
        let document = build_document(complete_request()).expect("valid payload");
        assert_eq!(document.user_id(), 11);
        assert!(document.posts.is_empty());
    }

    #[test]
    fn build_document_reports_the_missing_field() {
        let mut payload = complete_request();
        payload.email = None;
        let error = build_document(payload).expect_err("email is mandatory");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
        assert_eq!(
            error.details.as_ref().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
            Some("email")
        );
    }

    #[test]
    fn build_document_rejects_invalid_id() {
        let mut payload = complete_request();
        payload.id = Some(0);
        let error = build_document(payload).expect_err("zero id is invalid");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn parse_user_id_rejects_non_numeric_input() {
        let error = parse_user_id("abc").expect_err("letters are not an id");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
        assert!(parse_user_id("42").is_ok());
    }

    #[test]
    fn duplicate_maps_to_conflict_and_the_rest_to_internal() {
        let conflict = map_repository_error(DocumentRepositoryError::duplicate("user 1"));
        assert_eq!(conflict.code, ErrorCode::Conflict);

        let internal = map_repository_error(DocumentRepositoryError::query("boom"));
        assert_eq!(internal.code, ErrorCode::InternalError);
    }
}
