/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - unique 制約違反 (23505) は Conflict として区別する
 *   (posts.name の uniqueness チェックはレースし得るので DB 側が最後の砦)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict;
        }
        RepoError::Db(e)
    }
}
