/*
 * Responsibility
 * - handler の公開
 */
pub mod health;
pub mod icons;
pub mod posts;
pub mod technologies;
