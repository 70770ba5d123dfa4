/*
 * Responsibility
 * - technologies テーブル向け SQLx 操作 (CRUD)
 * - 部分更新は COALESCE で「渡されたフィールドだけ」書き換える
 * - icons は TEXT[] (挿入順を保持したいので配列のまま)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct TechRow {
    #[sqlx(rename = "techId")]
    pub tech_id: i64,

    pub name: String,
    pub description: String,
    pub icons: Vec<String>,

    #[sqlx(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

const TECH_COLUMNS: &str = r#"
    "techId", name, description, icons, "createdAt", "updatedAt"
"#;

pub async fn list(db: &PgPool) -> Result<Vec<TechRow>, RepoError> {
    let rows = sqlx::query_as::<_, TechRow>(&format!(
        r#"
        SELECT {TECH_COLUMNS}
        FROM technologies
        ORDER BY "techId" ASC
        "#
    ))
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, tech_id: i64) -> Result<Option<TechRow>, RepoError> {
    let row = sqlx::query_as::<_, TechRow>(&format!(
        r#"
        SELECT {TECH_COLUMNS}
        FROM technologies
        WHERE "techId" = $1
        "#
    ))
    .bind(tech_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    tech_id: i64,
    name: Option<&str>,
    description: Option<&str>,
    icons: Option<&[String]>,
) -> Result<Option<TechRow>, RepoError> {
    let row = sqlx::query_as::<_, TechRow>(&format!(
        r#"
        UPDATE technologies
        SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            icons = COALESCE($4, icons),
            "updatedAt" = now()
        WHERE "techId" = $1
        RETURNING {TECH_COLUMNS}
        "#
    ))
    .bind(tech_id)
    .bind(name)
    .bind(description)
    .bind(icons)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, tech_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM technologies
        WHERE "techId" = $1
        "#,
    )
    .bind(tech_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
