/*
 * Responsibility
 * - request/response DTO の公開
 */
pub mod posts;
pub mod technologies;
