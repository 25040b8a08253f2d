//! OpenAPI description of the user endpoints, served at `/api-docs/openapi.json`
//! with Swagger UI at `/docs`.
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dtos::user::{CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse};
use crate::handlers::user as handlers;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "1.0.0",
        description = "REST API for managing user records.",
        license(name = "Licensed Under MIT", url = "https://spdx.org/licenses/MIT.html"),
    ),
    servers((url = "http://localhost:3478", description = "Development server")),
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(CreateUserRequest, UpdateUserRequest, UserResponse, MessageResponse)),
    tags((name = "users", description = "User records"))
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
