//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, favorites, health, library, reviews};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.3.0",
        description = "Personal Library Bookkeeping REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::create_account,
        auth::login,
        auth::update_password,
        auth::delete_account,
        // Library
        library::get_library,
        library::add_book,
        library::delete_book,
        library::update_status,
        // Reviews
        reviews::add_review,
        reviews::get_reviews,
        reviews::delete_review,
        // Favorites
        favorites::add_favorite,
    ),
    components(
        schemas(
            // Auth
            auth::CreateAccountRequest,
            auth::LoginRequest,
            auth::UpdatePasswordRequest,
            auth::DeleteAccountRequest,
            // Library
            library::AddBookRequest,
            library::UpdateStatusRequest,
            library::AddBookResponse,
            library::AmbiguousMatchResponse,
            library::BookStatusResponse,
            crate::models::book::Book,
            crate::models::book::LibraryBook,
            crate::models::book::LibraryBuckets,
            crate::models::book::LibraryView,
            crate::models::book::CatalogBook,
            crate::models::book::ReadingStatus,
            // Reviews
            reviews::AddReviewRequest,
            reviews::AddReviewResponse,
            reviews::ReviewsResponse,
            crate::models::review::Review,
            crate::models::review::ReviewView,
            // Favorites
            favorites::AddFavoriteRequest,
            favorites::AddFavoriteResponse,
            // Users
            crate::models::user::User,
            // Health
            health::HealthResponse,
            // Common
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Account management"),
        (name = "library", description = "Personal library management"),
        (name = "reviews", description = "Book reviews"),
        (name = "favorites", description = "Favorite books")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
