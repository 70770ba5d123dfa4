/*
 * Responsibility
 * - technology 編集フォームの draft 状態 (name / description / icons)
 * - icon toggle: 無ければ末尾に追加、有れば最初の一致を削除 (list 表現の set 的挙動)
 * - PATCH /technologies/{id} への送信。送信中は二重送信させない
 * - 422 の field → messages は取り込み、transport エラーはログに流すだけ
 */
use serde::Deserialize;

use crate::api::v1::dto::technologies::{TechnologyResponse, UpdateTechnologyRequest};
use crate::services::validation::FieldErrors;

/// 編集中のローカル draft。サーバ確定値とは独立で、submit まで永続化されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyDraft {
    pub name: String,
    pub description: String,
    icons: Vec<String>,
}

impl TechnologyDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icons: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icons,
        }
    }

    pub fn from_technology(tech: &TechnologyResponse) -> Self {
        Self::new(tech.name.clone(), tech.description.clone(), tech.icons.clone())
    }

    /// 無ければ末尾に追加、有れば最初の一致位置を削除。
    /// 同じ icon を二回 toggle すると元のリストに戻る。
    pub fn toggle_icon(&mut self, icon: &str) {
        match self.icons.iter().position(|i| i == icon) {
            Some(index) => {
                self.icons.remove(index);
            }
            None => self.icons.push(icon.to_string()),
        }
    }

    /// 選択状態 = 現在の draft リストの membership そのもの。
    pub fn is_icon_selected(&self, icon: &str) -> bool {
        self.icons.iter().any(|i| i == icon)
    }

    /// 挿入順のまま返す (描画順が挿入順に依存するため)。
    pub fn icons(&self) -> &[String] {
        &self.icons
    }

    fn to_request(&self) -> UpdateTechnologyRequest {
        UpdateTechnologyRequest {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            icons: Some(self.icons.clone()),
        }
    }
}

/// submit の結果。Failed は transport / 非 422 エラー (ログ済み)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Saved,
    Invalid,
    Failed,
    /// 送信中に再度呼ばれた。ネットワークは叩いていない。
    InFlight,
}

/// draft と HTTP クライアントを束ね、1 レコード分の編集セッションを表す。
pub struct TechnologyEditor {
    http: reqwest::Client,
    base_url: String,
    tech_id: i64,
    pub draft: TechnologyDraft,
    processing: bool,
    errors: FieldErrors,
}

impl TechnologyEditor {
    pub fn new(base_url: impl Into<String>, tech_id: i64, draft: TechnologyDraft) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tech_id,
            draft,
            processing: false,
            errors: FieldErrors::new(),
        }
    }

    /// 送信中フラグ。UI 側は true の間 confirm を disabled にする想定。
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// 直近の 422 で返ってきた field → messages。
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// 現在の draft を PATCH で送る。
    /// 送信中の再呼び出しは InFlight を返すだけで、リクエストは発生しない。
    pub async fn submit(&mut self) -> SubmitStatus {
        if self.processing {
            return SubmitStatus::InFlight;
        }
        self.processing = true;
        let status = self.do_submit().await;
        self.processing = false;
        status
    }

    async fn do_submit(&mut self) -> SubmitStatus {
        let url = format!(
            "{}/api/v1/technologies/{}",
            self.base_url.trim_end_matches('/'),
            self.tech_id
        );

        let result = self
            .http
            .patch(&url)
            .json(&self.draft.to_request())
            .send()
            .await;

        match result {
            Ok(res) if res.status().is_success() => {
                self.errors = FieldErrors::new();
                SubmitStatus::Saved
            }
            Ok(res) if res.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                #[derive(Deserialize)]
                struct ValidationBody {
                    #[serde(default)]
                    errors: FieldErrors,
                }

                self.errors = res
                    .json::<ValidationBody>()
                    .await
                    .map(|b| b.errors)
                    .unwrap_or_default();
                tracing::warn!(errors = ?self.errors, "technology update rejected");
                SubmitStatus::Invalid
            }
            Ok(res) => {
                tracing::warn!(status = %res.status(), "technology update failed");
                SubmitStatus::Failed
            }
            // transport エラーはログに流すだけで UI には出さない
            Err(e) => {
                tracing::warn!(error = %e, "technology update request failed");
                SubmitStatus::Failed
            }
        }
    }

    #[cfg(test)]
    fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, extract::State, http::StatusCode, routing::patch};
    use serde_json::json;

    use super::*;

    fn draft() -> TechnologyDraft {
        TechnologyDraft::new(
            "Rust",
            "Systems language",
            vec!["rust".to_string(), "docker".to_string()],
        )
    }

    #[test]
    fn toggling_absent_icon_appends_at_end() {
        let mut draft = draft();
        draft.toggle_icon("react");
        assert_eq!(draft.icons(), ["rust", "docker", "react"]);
    }

    #[test]
    fn toggling_present_icon_removes_first_occurrence() {
        let mut draft = draft();
        draft.toggle_icon("rust");
        assert_eq!(draft.icons(), ["docker"]);
    }

    #[test]
    fn toggle_twice_round_trips() {
        let mut draft = draft();
        let original = draft.icons().to_vec();

        draft.toggle_icon("react");
        draft.toggle_icon("react");
        assert_eq!(draft.icons(), original.as_slice());

        // 既存 icon でも同様: 削除 → 末尾に再追加で membership は元どおり
        draft.toggle_icon("rust");
        draft.toggle_icon("rust");
        assert!(draft.is_icon_selected("rust"));
        assert_eq!(draft.icons(), ["docker", "rust"]);
    }

    #[test]
    fn selection_query_tracks_membership() {
        let mut draft = TechnologyDraft::new("t", "d", vec![]);
        assert!(!draft.is_icon_selected("go"));

        draft.toggle_icon("go");
        draft.toggle_icon("php");
        assert!(draft.is_icon_selected("go"));
        assert!(draft.is_icon_selected("php"));

        draft.toggle_icon("go");
        assert!(!draft.is_icon_selected("go"));
        assert!(draft.is_icon_selected("php"));
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn counting_router(hits: Arc<AtomicUsize>, status: StatusCode) -> Router {
        Router::new()
            .route(
                "/api/v1/technologies/{tech_id}",
                patch(
                    move |State(hits): State<Arc<AtomicUsize>>,
                     Json(req): Json<UpdateTechnologyRequest>| async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        if status == StatusCode::UNPROCESSABLE_ENTITY {
                            (
                                status,
                                Json(json!({
                                    "error": { "code": "VALIDATION_FAILED", "message": "The given data was invalid." },
                                    "errors": { "name": ["The name field is required."] }
                                })),
                            )
                        } else {
                            (
                                status,
                                Json(json!({
                                    "id": 1,
                                    "public_id": "aaaaaaaaaa",
                                    "name": req.name,
                                    "description": req.description,
                                    "icons": req.icons,
                                    "created_at": null,
                                    "updated_at": null
                                })),
                            )
                        }
                    },
                ),
            )
            .with_state(hits)
    }

    #[tokio::test]
    async fn submit_sends_one_patch_and_reports_saved() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn(counting_router(hits.clone(), StatusCode::OK)).await;

        let mut editor = TechnologyEditor::new(base, 1, draft());
        assert_eq!(editor.submit().await, SubmitStatus::Saved);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!editor.is_processing());
        assert!(editor.errors().is_empty());
    }

    #[tokio::test]
    async fn submit_while_processing_makes_no_network_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn(counting_router(hits.clone(), StatusCode::OK)).await;

        let mut editor = TechnologyEditor::new(base, 1, draft());
        editor.set_processing(true);

        assert_eq!(editor.submit().await, SubmitStatus::InFlight);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validation_failure_captures_field_errors() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn(counting_router(
            hits.clone(),
            StatusCode::UNPROCESSABLE_ENTITY,
        ))
        .await;

        let mut editor = TechnologyEditor::new(base, 1, draft());
        assert_eq!(editor.submit().await, SubmitStatus::Invalid);
        assert_eq!(
            editor.errors().messages("name"),
            ["The name field is required."]
        );
    }

    #[tokio::test]
    async fn transport_failure_is_swallowed() {
        // 何も listen していないポートへ。ログに流れるだけで Failed が返る
        let mut editor = TechnologyEditor::new("http://127.0.0.1:1", 1, draft());
        assert_eq!(editor.submit().await, SubmitStatus::Failed);
        assert!(!editor.is_processing());
    }
}
