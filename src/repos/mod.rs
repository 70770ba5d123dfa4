/*
 * Responsibility
 * - repo 層の公開インターフェース
 */
pub mod error;
pub mod post_repo;
pub mod tech_repo;
