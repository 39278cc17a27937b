//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    activity::get_activity_page,
    analytics::get_analytics_series,
    endpoints,
    home::{get_home_page, set_duty_status},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HOME_VIEW, get(get_home_page))
        .route(endpoints::ACTIVITY_VIEW, get(get_activity_page))
        .route(endpoints::DUTY_API, post(set_duty_status))
        .route(endpoints::ANALYTICS_API, get(get_analytics_series))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the home page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::HOME_VIEW)
}
