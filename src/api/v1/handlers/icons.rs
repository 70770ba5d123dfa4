/*
 * Responsibility
 * - GET /icons: 選択可能な devicon カタログと CDN URL を返す
 * - フロントはこれを並べて toggle する想定
 */
use axum::Json;
use serde::Serialize;

use crate::services::icon_catalog;

#[derive(Debug, Serialize)]
pub struct IconResponse {
    pub id: &'static str,
    pub url: String,
}

pub async fn list_icons() -> Json<Vec<IconResponse>> {
    let icons = icon_catalog::DEV_ICONS
        .iter()
        .copied()
        .map(|id| IconResponse {
            id,
            url: icon_catalog::cdn_url(id),
        })
        .collect();

    Json(icons)
}
