//! Request handlers for the HTML pages and the JSON endpoints.
//!
//! Repository calls do blocking file I/O, so every one of them runs on the blocking pool.

use api_shared::{AuthError, HealthRes, HealthService, PasswordReq};
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use maud::Markup;
use recipes_core::{Recipe, RecipeForm, RecipeRepository};
use serde::Deserialize;

use crate::{error::ApiError, pages, AppState};

type ApiResult<T> = Result<T, ApiError>;

/// Runs a repository operation on the blocking pool.
async fn run_blocking<T, F>(repository: &RecipeRepository, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&RecipeRepository) -> recipes_core::RecipeResult<T> + Send + 'static,
{
    let repository = repository.clone();
    let result = tokio::task::spawn_blocking(move || op(&repository)).await?;
    Ok(result?)
}

fn password_from(
    body: Result<Json<PasswordReq>, JsonRejection>,
) -> ApiResult<String> {
    match body {
        Ok(Json(req)) => Ok(req.password),
        Err(rejection) => {
            tracing::warn!("rejected password body: {}", rejection.body_text());
            Err(ApiError::BadRequest(rejection.body_text()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitors and load balancers.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Plain-text liveness probe.
pub async fn ping() -> &'static str {
    HealthService::ping()
}

/// Index page listing every stored recipe.
pub async fn index(State(state): State<AppState>) -> ApiResult<Markup> {
    let recipes = run_blocking(&state.repository, |repo| repo.load_all()).await?;
    Ok(pages::index(&recipes))
}

/// Recipe page with highlighted instructions.
pub async fn recipe_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Markup> {
    let recipe = run_blocking(&state.repository, move |repo| repo.load(&name)).await?;
    Ok(pages::recipe(&recipe))
}

#[utoipa::path(
    get,
    path = "/api/recipe/{name}",
    params(
        ("name" = String, Path, description = "Recipe slug")
    ),
    responses(
        (status = 200, description = "The stored recipe", body = Recipe),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Returns one recipe as JSON.
pub async fn recipe_json(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Recipe>> {
    let recipe = run_blocking(&state.repository, move |repo| repo.load(&name)).await?;
    Ok(Json(recipe))
}

#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub edit: Option<String>,
}

/// Create form, pre-filled from an existing recipe when `?edit=<slug>` is given.
pub async fn create_page(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> ApiResult<Markup> {
    match query.edit.filter(|slug| !slug.is_empty()) {
        Some(slug) => {
            let recipe = run_blocking(&state.repository, move |repo| repo.load(&slug)).await?;
            Ok(pages::create(Some(&recipe)))
        }
        None => Ok(pages::create(None)),
    }
}

/// Creates or replaces a recipe from the multipart form, then redirects to its page.
///
/// # Errors
/// - `400` when the body is not a decodable multipart form or the name yields an empty slug.
/// - `401` when the password does not pass the gate.
/// - `409` when creating (not editing) a slug that already exists.
/// - `500` when the recipe cannot be written.
pub async fn submit_recipe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Redirect> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut pairs = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        pairs.push((name, value));
    }

    let form = RecipeForm::from_pairs(pairs);
    if let Err(err) = state.gate.require(&form.password) {
        tracing::warn!("rejected recipe submission for {:?}", form.name);
        return Err(err.into());
    }

    let edit = form.edit;
    let recipe = form.into_recipe();
    let location = format!("/recipe/{}", recipe.slug);
    run_blocking(&state.repository, move |repo| repo.submit(&recipe, edit)).await?;

    Ok(Redirect::to(&location))
}

#[utoipa::path(
    post,
    path = "/auth",
    request_body = PasswordReq,
    responses(
        (status = 200, description = "Password accepted"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Wrong password")
    )
)]
/// Checks a password against the gate without changing anything.
pub async fn auth(
    State(state): State<AppState>,
    body: Result<Json<PasswordReq>, JsonRejection>,
) -> ApiResult<Response> {
    let password = password_from(body)?;
    match state.gate.require(&password) {
        Ok(()) => Ok(StatusCode::OK.into_response()),
        Err(AuthError::Unauthorized) => {
            tracing::warn!("rejected credential check");
            Ok((StatusCode::UNAUTHORIZED, "wrong password").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/recipe/{name}",
    params(
        ("name" = String, Path, description = "Recipe slug")
    ),
    request_body = PasswordReq,
    responses(
        (status = 200, description = "Recipe deleted"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Deletes a recipe once the password passes the gate.
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<PasswordReq>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let password = password_from(body)?;
    if let Err(err) = state.gate.require(&password) {
        tracing::warn!("rejected delete of {:?}", name);
        return Err(err.into());
    }

    run_blocking(&state.repository, move |repo| repo.delete(&name)).await?;
    Ok(StatusCode::OK)
}
