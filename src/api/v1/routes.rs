/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /icons, /posts, /technologies を route/merge
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    icons::list_icons,
    posts::{create_post, list_posts},
    technologies::{delete_technology, get_technology, list_technologies, update_technology},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/icons", get(list_icons))
        .route("/posts", get(list_posts).post(create_post))
        .route("/technologies", get(list_technologies))
        .route(
            "/technologies/{tech_id}",
            get(get_technology)
                .patch(update_technology)
                .delete(delete_technology),
        )
}
