/*
 * Responsibility
 * - 管理画面フォームの draft 状態と送信 glue (ブラウザ側ロジックの Rust 版)
 */
pub mod tech_form;

pub use tech_form::{SubmitStatus, TechnologyDraft, TechnologyEditor};
