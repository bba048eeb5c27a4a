mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use middleware::AuthMiddleware;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Volunteer Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        // Credentialed CORS: the frontend holds the session in a cookie
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:5174")
            .allowed_origin("https://volunteer-link-f176e.web.app")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness & health
            .route("/", web::get().to(api::health::liveness))
            .route("/health", web::get().to(api::health::health_check))
            // Session cookie issuance
            .route("/jwt", web::post().to(api::auth::issue_jwt))
            .route("/logout", web::post().to(api::auth::logout))
            // Volunteer posts. Reads are public; every mutation requires the
            // session token.
            .route("/volunteers", web::get().to(api::posts::list_posts))
            .service(
                web::resource("/volunteer")
                    .route(web::get().to(api::posts::search_posts))
                    .route(web::post().to(api::posts::create_post).wrap(AuthMiddleware)),
            )
            .service(
                web::resource("/volunteer/{id}")
                    .route(web::get().to(api::posts::get_post))
                    .route(web::put().to(api::posts::update_post).wrap(AuthMiddleware))
                    .route(web::delete().to(api::posts::delete_post).wrap(AuthMiddleware)),
            )
            .service(
                web::resource("/requestUpdate/{id}").route(
                    web::patch()
                        .to(api::posts::decrement_volunteers)
                        .wrap(AuthMiddleware),
                ),
            )
            // Signup requests
            .service(
                web::resource("/beVolunteer").route(
                    web::post()
                        .to(api::signups::create_signup)
                        .wrap(AuthMiddleware),
                ),
            )
            .service(
                // GET takes an email, DELETE takes an id; same path shape
                web::resource("/beVolunteer/{key}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::signups::list_signups))
                    .route(web::delete().to(api::signups::delete_signup)),
            )
            // My posts
            .service(
                web::resource("/myPost/{email}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::posts::my_posts)),
            )
            // Users
            .service(
                web::resource("/user")
                    .route(web::get().to(api::users::list_users))
                    .route(web::post().to(api::users::create_user)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
