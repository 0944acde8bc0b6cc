//! OpenAPI documentation configuration.
//!
//! Generates the specification for the REST API, registering the handler
//! paths from the inbound layer and the schemas they reference. The
//! document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    Address, Comment, Company, ErrorCode, Geo, Post, PostDocument, User, UserDocument,
};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::refresh::RefreshResponse;
use crate::inbound::http::users::{CreateUserRequest, DeletedResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Placeholder mirror API",
        description = "Mirrors a JSONPlaceholder-shaped API into per-user documents and serves CRUD endpoints over them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::refresh::run_refresh,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::delete_all_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        User,
        Address,
        Geo,
        Company,
        Post,
        Comment,
        PostDocument,
        UserDocument,
        CreateUserRequest,
        DeletedResponse,
        RefreshResponse,
    )),
    tags(
        (name = "refresh", description = "Upstream mirror refresh"),
        (name = "users", description = "Stored user documents"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/refresh",
            "/api/v1/users",
            "/api/v1/users/{user_id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
