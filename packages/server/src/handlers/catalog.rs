use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::input::{AppJson, AppPath, AppQuery};
use crate::models::catalog::*;
use crate::service::CatalogService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    operation_id = "listCategories",
    summary = "List asset categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_categories(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = CatalogService::new(&state.db).list_categories().await?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Catalog",
    operation_id = "getCategory",
    summary = "Get a category by ID",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_category(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = CatalogService::new(&state.db).get_category(id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    get,
    path = "/assets",
    tag = "Catalog",
    operation_id = "listAssets",
    summary = "List assets",
    description = "Returns assets ordered by id, optionally filtered by category and status.",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Matching assets", body = Vec<AssetResponse>),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_assets(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AssetListQuery>,
) -> Result<Json<Vec<AssetResponse>>, AppError> {
    let filter = parse_asset_filter(query)?;
    let assets = CatalogService::new(&state.db).list_assets(&filter).await?;
    Ok(Json(assets.into_iter().map(AssetResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "Catalog",
    operation_id = "getAsset",
    summary = "Get an asset by ID",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = AssetResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_asset(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<AssetResponse>, AppError> {
    let asset = CatalogService::new(&state.db).get_asset(id).await?;
    Ok(Json(asset.into()))
}

#[utoipa::path(
    post,
    path = "/assets/{id}/allocate",
    tag = "Catalog",
    operation_id = "allocateAsset",
    summary = "Allocate an available asset to a user",
    description = "Sets the asset to `Allocated` and records the holder. Only `Available` assets can be allocated. Requires the Admin or Procurement_Manager role.",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AllocateAssetRequest,
    responses(
        (status = 200, description = "Asset allocated", body = AssetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Asset or user not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Asset is not available (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = ?payload.user_id))]
pub async fn allocate_asset(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<AllocateAssetRequest>,
) -> Result<Json<AssetResponse>, AppError> {
    auth_user.require_manager()?;
    let user_id = validate_allocate_request(payload)?;

    let asset = CatalogService::new(&state.db)
        .allocate_asset(id, user_id)
        .await?;
    tracing::info!(asset_id = asset.id, user_id, "Asset allocated");
    Ok(Json(asset.into()))
}

#[utoipa::path(
    post,
    path = "/assets/{id}/release",
    tag = "Catalog",
    operation_id = "releaseAsset",
    summary = "Return an allocated asset to stock",
    description = "Sets the asset back to `Available` and clears the holder. Requires the Admin or Procurement_Manager role.",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset released", body = AssetResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Asset is not allocated (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn release_asset(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<AssetResponse>, AppError> {
    auth_user.require_manager()?;

    let asset = CatalogService::new(&state.db).release_asset(id).await?;
    tracing::info!(asset_id = asset.id, "Asset released");
    Ok(Json(asset.into()))
}
