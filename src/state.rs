/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, id_codec: IdCodec, upload_dir
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::id_codec::IdCodec;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub id_codec: IdCodec,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, id_codec: IdCodec, upload_dir: PathBuf) -> Self {
        Self {
            db,
            id_codec,
            upload_dir: Arc::new(upload_dir),
        }
    }
}
