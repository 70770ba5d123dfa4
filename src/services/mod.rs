/*
 * Responsibility
 * - service 層の公開インターフェース (re-export)
 */
pub mod icon_catalog;
pub mod id_codec;
pub mod validation;
