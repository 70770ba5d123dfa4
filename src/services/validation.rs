/*
 * Responsibility
 * - フィールド単位の受理ルールと field → messages の収集 (FieldErrors)
 * - DTO の validate() から使う共通ルール (required / min / max / list / image)
 * - どれか一つでも落ちたらリクエスト全体を 422 で拒否する前提 (部分受理なし)
 *
 * validation crate を使わない理由:
 * - ルールは少なく、メッセージ形式 (field → Vec<String>) を自前で握りたいので
 */
use std::collections::BTreeMap;

use image::GenericImageView;
use serde::{Deserialize, Serialize};

/// field 名 → 人間向けメッセージ列。BTreeMap なのでレスポンスの順序が安定する。
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 文字列フィールドのルール評価を開始する。None は「フィールド欠落」。
    pub fn check_str<'a>(&'a mut self, field: &'static str, value: Option<&'a str>) -> StrRules<'a> {
        StrRules {
            errors: self,
            field,
            value,
            skip: false,
        }
    }

    /// リストフィールド (tags など) のルール評価を開始する。
    pub fn check_list<'a>(&'a mut self, field: &'static str, values: &'a [String]) -> ListRules<'a> {
        ListRules {
            errors: self,
            field,
            values,
            skip: false,
        }
    }
}

/// 文字列フィールドに対する fluent なルール列。
/// required が落ちたら後続ルールは評価しない (skip)。
pub struct StrRules<'a> {
    errors: &'a mut FieldErrors,
    field: &'static str,
    value: Option<&'a str>,
    skip: bool,
}

impl StrRules<'_> {
    pub fn required(mut self) -> Self {
        let present = self.value.map(|v| !v.trim().is_empty()).unwrap_or(false);
        if !present {
            self.errors
                .add(self.field, format!("The {} field is required.", self.field));
            self.skip = true;
        }
        self
    }

    pub fn min_chars(self, min: usize) -> Self {
        if self.skip {
            return self;
        }
        if let Some(v) = self.value
            && v.chars().count() < min
        {
            self.errors.add(
                self.field,
                format!("The {} field must be at least {} characters.", self.field, min),
            );
        }
        self
    }

    pub fn max_chars(self, max: usize) -> Self {
        if self.skip {
            return self;
        }
        if let Some(v) = self.value
            && v.chars().count() > max
        {
            self.errors.add(
                self.field,
                format!(
                    "The {} field must not be greater than {} characters.",
                    self.field, max
                ),
            );
        }
        self
    }
}

pub struct ListRules<'a> {
    errors: &'a mut FieldErrors,
    field: &'static str,
    values: &'a [String],
    skip: bool,
}

impl ListRules<'_> {
    pub fn required(mut self) -> Self {
        if self.values.is_empty() {
            self.errors
                .add(self.field, format!("The {} field is required.", self.field));
            self.skip = true;
        }
        self
    }

    pub fn min_items(self, min: usize) -> Self {
        if self.skip {
            return self;
        }
        if self.values.len() < min {
            self.errors.add(
                self.field,
                format!("The {} field must have at least {} items.", self.field, min),
            );
        }
        self
    }
}

/// アップロード画像の受理ルール (デコード可否 + 寸法)。
/// bytes が None/空なら required として落とす。
#[derive(Debug, Clone, Copy)]
pub struct ImageRule {
    pub min_height: u32,
    pub max_height: u32,
    pub max_width: u32,
}

impl ImageRule {
    pub fn check(&self, field: &'static str, bytes: Option<&[u8]>, errors: &mut FieldErrors) {
        let Some(bytes) = bytes.filter(|b| !b.is_empty()) else {
            errors.add(field, format!("The {} field is required.", field));
            return;
        };

        let img = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(_) => {
                errors.add(field, format!("The {} field must be an image.", field));
                return;
            }
        };

        let (width, height) = img.dimensions();
        if height < self.min_height || height > self.max_height || width > self.max_width {
            errors.add(
                field,
                format!("The {} field has invalid image dimensions.", field),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn required_reports_missing_and_blank_fields() {
        let mut errors = FieldErrors::new();
        errors.check_str("name", None).required();
        errors.check_str("category", Some("   ")).required();

        assert_eq!(errors.messages("name"), ["The name field is required."]);
        assert_eq!(
            errors.messages("category"),
            ["The category field is required."]
        );
    }

    #[test]
    fn required_failure_skips_length_rules() {
        let mut errors = FieldErrors::new();
        errors.check_str("name", Some("")).required().min_chars(3);

        assert_eq!(errors.messages("name").len(), 1);
    }

    #[test]
    fn length_rules_count_chars_not_bytes() {
        let mut errors = FieldErrors::new();
        errors
            .check_str("name", Some("技術"))
            .required()
            .min_chars(3)
            .max_chars(255);

        assert_eq!(
            errors.messages("name"),
            ["The name field must be at least 3 characters."]
        );
    }

    #[test]
    fn max_chars_rejects_long_values() {
        let long = "a".repeat(256);
        let mut errors = FieldErrors::new();
        errors
            .check_str("name", Some(&long))
            .required()
            .min_chars(3)
            .max_chars(255);

        assert_eq!(
            errors.messages("name"),
            ["The name field must not be greater than 255 characters."]
        );
    }

    #[test]
    fn list_rules_accept_single_empty_string() {
        // tags="" の正規化結果 [""] は min 1 を満たす (温存している挙動)
        let values = vec![String::new()];
        let mut errors = FieldErrors::new();
        errors.check_list("tags", &values).required().min_items(1);

        assert!(errors.is_empty());
    }

    #[test]
    fn list_rules_reject_empty_list() {
        let mut errors = FieldErrors::new();
        errors.check_list("tags", &[]).required().min_items(1);

        assert_eq!(errors.messages("tags"), ["The tags field is required."]);
    }

    #[test]
    fn image_rule_accepts_valid_dimensions() {
        let rule = ImageRule {
            min_height: 300,
            max_height: 600,
            max_width: 600,
        };
        let mut errors = FieldErrors::new();
        rule.check("image", Some(&png(500, 400)), &mut errors);

        assert!(errors.is_empty());
    }

    #[test]
    fn image_rule_rejects_out_of_range_dimensions() {
        let rule = ImageRule {
            min_height: 300,
            max_height: 600,
            max_width: 600,
        };

        for (w, h) in [(500u32, 299u32), (500, 601), (601, 400)] {
            let mut errors = FieldErrors::new();
            rule.check("image", Some(&png(w, h)), &mut errors);
            assert_eq!(
                errors.messages("image"),
                ["The image field has invalid image dimensions."],
                "{}x{}",
                w,
                h
            );
        }
    }

    #[test]
    fn image_rule_rejects_non_image_bytes() {
        let rule = ImageRule {
            min_height: 300,
            max_height: 600,
            max_width: 600,
        };
        let mut errors = FieldErrors::new();
        rule.check("image", Some(b"not an image"), &mut errors);

        assert_eq!(
            errors.messages("image"),
            ["The image field must be an image."]
        );
    }

    #[test]
    fn image_rule_requires_bytes() {
        let rule = ImageRule {
            min_height: 300,
            max_height: 600,
            max_width: 600,
        };
        let mut errors = FieldErrors::new();
        rule.check("image", None, &mut errors);

        assert_eq!(errors.messages("image"), ["The image field is required."]);
    }

    #[test]
    fn serializes_as_plain_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("name", "The name field must be at least 3 characters.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": [
                    "The name field is required.",
                    "The name field must be at least 3 characters."
                ]
            })
        );
    }
}
