use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Volunteer Service API",
        version = "1.0.0",
        description = "REST backend for the volunteer platform.\n\n**Authentication:** protected endpoints read a signed JWT from the `token` HTTP-only cookie, issued by `POST /jwt`.",
    ),
    paths(
        // Auth endpoints
        crate::api::auth::issue_jwt,
        crate::api::auth::logout,

        // Health
        crate::api::health::health_check,

        // Posts
        crate::api::posts::list_posts,
        crate::api::posts::search_posts,
        crate::api::posts::get_post,
    ),
    components(
        schemas(
            crate::services::auth_service::SessionRequest,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Session cookie issuance and logout. Identity is client-asserted; there is no credential verification."),
        (name = "Health", description = "Liveness and health check endpoints."),
        (name = "Posts", description = "Volunteer post listing, search and CRUD."),
    )
)]
pub struct ApiDoc;
