/*
 * Responsibility
 * - API バージョンの公開 (現状 v1 のみ)
 */
pub mod v1;
