/*
 * Responsibility
 * - POST /posts (multipart) の request/response DTO
 * - ルール評価前の正規化: tags をカンマ分割、is_published は "1" との一致で bool 化
 * - 受理ルールの宣言 (validate() が field → messages を返す)
 * - uniqueness は DB を見るので handler 側で同じ FieldErrors に積む
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::validation::{FieldErrors, ImageRule};

/// image フィールドの寸法制約 (height 300-600, width <= 600)
pub const POST_IMAGE_RULE: ImageRule = ImageRule {
    min_height: 300,
    max_height: 600,
    max_width: 600,
};

/// multipart の image パート。bytes はメモリに載せ切る前提
/// (body limit は middleware 側で制御)。
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// multipart から読んだままの生 payload。全フィールド任意で、
/// 欠落の報告は normalize 後のルール評価に任せる。
#[derive(Debug, Default)]
pub struct RawPostForm {
    pub is_published: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub image: Option<ImageUpload>,
}

impl RawPostForm {
    /// ルール評価前の正規化。
    /// - tags: カンマ分割。入力が空 (または欠落) だと [""] になるが、
    ///   min 1 を通ってしまう。既知の抜け穴だが挙動として温存している
    /// - is_published: 文字列 "1" との literal 一致のみ true
    pub fn normalize(self) -> NewPostForm {
        let tags = split_tags(self.tags.as_deref().unwrap_or(""));
        let is_published = self.is_published.as_deref() == Some("1");

        NewPostForm {
            is_published,
            name: self.name,
            description: self.description,
            tags,
            category: self.category,
            content: self.content,
            image: self.image,
        }
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// name の uniqueness 判定を field → messages に合流させる。
/// 実際の照会は handler が repo を引いて行い、結果だけをここに渡す
/// (ルール本体を DB なしでテストできる形に保つ)。
pub fn apply_name_taken(errors: &mut FieldErrors, taken: bool) {
    if taken {
        errors.add("name", "The name has already been taken.");
    }
}

/// 正規化済みの payload。validate() が通れば persist に渡せる。
#[derive(Debug)]
pub struct NewPostForm {
    pub is_published: bool,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub image: Option<ImageUpload>,
}

impl NewPostForm {
    /// 同期ルールだけをここで評価する。name の uniqueness は handler が
    /// repo を引いて同じ map に追記する (どのみち全フィールド評価してから
    /// まとめて 422 にする)。
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        // is_published: required|boolean 相当。正規化で必ず bool になるので
        // ここで落ちることはない。
        errors
            .check_str("name", self.name.as_deref())
            .required()
            .min_chars(3)
            .max_chars(255);
        errors
            .check_str("description", self.description.as_deref())
            .required()
            .min_chars(30)
            .max_chars(80);
        errors.check_list("tags", &self.tags).required().min_items(1);
        errors
            .check_str("category", self.category.as_deref())
            .required();
        errors
            .check_str("content", self.content.as_deref())
            .required()
            .min_chars(30);

        POST_IMAGE_RULE.check(
            "image",
            self.image.as_ref().map(|i| i.bytes.as_slice()),
            &mut errors,
        );

        errors
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub public_id: String, // encoded
    pub is_published: bool,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub content: String,
    pub image_path: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
