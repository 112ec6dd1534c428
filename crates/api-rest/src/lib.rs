//! # API REST
//!
//! HTTP front end for the recipe catalogue.
//!
//! Handles:
//! - HTML pages (index, recipe, create/edit form) rendered with maud
//! - JSON endpoints with their OpenAPI document
//! - HTTP concerns (CORS, request tracing, static assets)
//!
//! Uses `recipes-core` for storage and `api-shared` for the mutation gate.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod pages;

use std::path::PathBuf;

use api_shared::{HealthRes, MutationGate, PasswordReq};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, request::Parts, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use recipes_core::{Ingredient, Recipe, RecipeRepository};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub use error::ApiError;

/// Upper bound on a submitted recipe form.
const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub repository: RecipeRepository,
    pub gate: MutationGate,
    pub assets_dir: PathBuf,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::recipe_json,
        handlers::auth,
        handlers::delete_recipe,
    ),
    components(schemas(HealthRes, PasswordReq, Recipe, Ingredient))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the application router with all routes and middleware attached.
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/create", get(handlers::create_page))
        .route(
            "/recipe",
            post(handlers::submit_recipe).layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .route(
            "/recipe/:name",
            get(handlers::recipe_page).delete(handlers::delete_recipe),
        )
        .route("/api/recipe/:name", get(handlers::recipe_json))
        .route("/auth", post(handlers::auth))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service("/assets", assets)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for browser clients on any http(s) origin, with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| is_web_origin(origin),
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn is_web_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| origin.starts_with("http://") || origin.starts_with("https://"))
        .unwrap_or(false)
}
