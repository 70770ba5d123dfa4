/*
 * Responsibility
 * - posts テーブル向け SQLx 操作 (create / list / name_exists)
 * - tags は TEXT[] で保持 (正規化済みの配列をそのまま入れる)
 * - name の unique 制約違反は RepoError::Conflict で返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    #[sqlx(rename = "postId")]
    pub post_id: i64,

    #[sqlx(rename = "isPublished")]
    pub is_published: bool,

    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub content: String,

    #[sqlx(rename = "imagePath")]
    pub image_path: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

const POST_COLUMNS: &str = r#"
    "postId", "isPublished", name, description, tags, category, content,
    "imagePath", "createdAt", "updatedAt"
"#;

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<PostRow>, RepoError> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        ORDER BY "postId" DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &PgPool,
    is_published: bool,
    name: &str,
    description: &str,
    tags: &[String],
    category: &str,
    content: &str,
    image_path: &str,
) -> Result<PostRow, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(&format!(
        r#"
        INSERT INTO posts ("isPublished", name, description, tags, category, content, "imagePath")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(is_published)
    .bind(name)
    .bind(description)
    .bind(tags)
    .bind(category)
    .bind(content)
    .bind(image_path)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

/// name の uniqueness ルール用。insert 前の事前チェックであって保証ではない
/// (レースは create 側の Conflict で拾う)。
pub async fn name_exists(db: &PgPool, name: &str) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM posts WHERE name = $1)
        "#,
    )
    .bind(name)
    .fetch_one(db)
    .await?;

    Ok(exists)
}
