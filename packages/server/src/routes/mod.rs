use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Everything served under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(request_routes())
}

/// Routes outside `/api`.
pub fn root_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::index::index))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::users::list_users))
        .routes(routes!(handlers::users::get_user))
        .routes(routes!(handlers::users::list_user_requests))
}

fn catalog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::catalog::list_categories))
        .routes(routes!(handlers::catalog::get_category))
        .routes(routes!(handlers::catalog::list_assets))
        .routes(routes!(handlers::catalog::get_asset))
        .routes(routes!(handlers::catalog::allocate_asset))
        .routes(routes!(handlers::catalog::release_asset))
}

fn request_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::requests::create_request,
            handlers::requests::list_requests
        ))
        .routes(routes!(
            handlers::requests::get_request,
            handlers::requests::update_request,
            handlers::requests::delete_request
        ))
        .routes(routes!(handlers::requests::get_request_history))
        .routes(routes!(handlers::requests::update_request_status))
}
