/*
 * Responsibility
 * - /posts 系 handler
 * - POST /posts は multipart を読み、正規化 → ルール評価 (uniqueness / 画像寸法込み)
 * - どれか一つでも落ちたら 422 (field → messages)。通ったら画像を保存して insert
 */
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use uuid::Uuid;

use std::path::Path;

use crate::{
    api::v1::dto::posts::{ImageUpload, PostResponse, RawPostForm, apply_name_taken},
    error::AppError,
    repos::{error::RepoError, post_repo},
    services::validation::FieldErrors,
    state::AppState,
};

fn row_to_response(state: &AppState, row: post_repo::PostRow) -> Result<PostResponse, AppError> {
    let public_id = state.id_codec.encode(row.post_id)?;

    Ok(PostResponse {
        id: row.post_id,
        public_id,
        is_published: row.is_published,
        name: row.name,
        description: row.description,
        tags: row.tags,
        category: row.category,
        content: row.content,
        image_path: row.image_path,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = post_repo::list(&state.db, 50, 0).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

/// multipart を field 名で振り分けて生 payload に詰める。
/// 未知の field は無視 (Laravel の FormRequest と同じく余剰を咎めない)。
async fn read_post_form(multipart: &mut Multipart) -> Result<RawPostForm, AppError> {
    let mut form = RawPostForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request("INVALID_MULTIPART", e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request("INVALID_MULTIPART", e.to_string()))?;
            form.image = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::bad_request("INVALID_MULTIPART", e.to_string()))?;

        match name.as_str() {
            "is_published" => form.is_published = Some(text),
            "name" => form.name = Some(text),
            "description" => form.description = Some(text),
            "tags" => form.tags = Some(text),
            "category" => form.category = Some(text),
            "content" => form.content = Some(text),
            _ => {}
        }
    }

    Ok(form)
}

async fn store_image(upload_dir: &Path, image: &ImageUpload) -> Result<String, AppError> {
    let ext = image
        .file_name
        .as_deref()
        .and_then(|n| n.rsplit('.').next())
        .filter(|e| !e.is_empty() && e.len() <= 8)
        .unwrap_or("img");
    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);

    tokio::fs::create_dir_all(upload_dir).await.map_err(|e| {
        tracing::error!(error = %e, "failed to create upload dir");
        AppError::Internal
    })?;
    tokio::fs::write(upload_dir.join(&stored_name), &image.bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to write uploaded image");
            AppError::Internal
        })?;

    Ok(stored_name)
}

/// insert に失敗したとき、書き込み済みの画像を残さないための後始末 (ベストエフォート)。
async fn remove_stored_image(upload_dir: &Path, stored_name: &str) {
    if let Err(e) = tokio::fs::remove_file(upload_dir.join(stored_name)).await {
        tracing::warn!(error = %e, stored_name, "failed to remove orphaned upload");
    }
}

/// insert 時の repo エラーを API エラーへ。unique 制約違反は
/// 事前チェックとレースしたケースなので uniqueness の 422 に揃える。
fn create_error(e: RepoError) -> AppError {
    match e {
        RepoError::Conflict => {
            let mut errors = FieldErrors::new();
            apply_name_taken(&mut errors, true);
            AppError::Validation(errors)
        }
        other => other.into(),
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let form = read_post_form(&mut multipart).await?.normalize();
    let mut errors = form.validate();

    // uniqueness は他のルールと同列に扱い、全部評価してからまとめて 422 にする
    if !errors.contains("name")
        && let Some(name) = form.name.as_deref()
    {
        let taken = post_repo::name_exists(&state.db, name).await?;
        apply_name_taken(&mut errors, taken);
    }

    if !errors.is_empty() {
        return Err(errors.into());
    }

    // validate() が通った時点で required フィールドは全て Some
    let (Some(name), Some(description), Some(category), Some(content), Some(image)) = (
        form.name.as_deref(),
        form.description.as_deref(),
        form.category.as_deref(),
        form.content.as_deref(),
        form.image.as_ref(),
    ) else {
        return Err(AppError::Internal);
    };

    let image_path = store_image(&state.upload_dir, image).await?;

    let row = match post_repo::create(
        &state.db,
        form.is_published,
        name,
        description,
        &form.tags,
        category,
        content,
        &image_path,
    )
    .await
    {
        Ok(row) => row,
        Err(e) => {
            remove_stored_image(&state.upload_dir, &image_path).await;
            return Err(create_error(e));
        }
    };

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_conflict_maps_to_uniqueness_422() {
        match create_error(RepoError::Conflict) {
            AppError::Validation(errors) => {
                assert_eq!(
                    errors.messages("name"),
                    ["The name has already been taken."]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn db_error_stays_internal() {
        assert!(matches!(
            create_error(RepoError::Db(sqlx::Error::PoolClosed)),
            AppError::Internal
        ));
    }

    #[tokio::test]
    async fn failed_insert_leaves_no_orphaned_upload() {
        let upload_dir = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let image = ImageUpload {
            file_name: Some("cover.png".into()),
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        };

        let stored_name = store_image(&upload_dir, &image).await.unwrap();
        assert!(upload_dir.join(&stored_name).exists());

        remove_stored_image(&upload_dir, &stored_name).await;
        assert!(!upload_dir.join(&stored_name).exists());

        tokio::fs::remove_dir_all(&upload_dir).await.unwrap();
    }
}
