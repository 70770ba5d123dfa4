/*
 * Responsibility
 * - クレートの公開面 (bin と client 利用者の両方から使う)
 * - モジュール宣言はここに集約、main.rs には置かない
 */
pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
