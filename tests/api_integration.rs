//! Integration tests for the HTTP API.
//!
//! Each test spins up an Axum server on a random port and drives it with
//! reqwest, exercising the real REST contract.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

use ingredient_iq::app::build_app;
use ingredient_iq::config::SiteConfig;
use ingredient_iq::onboarding::{AnswerValue, ChannelCompletion, WizardSessions, WizardSnapshot};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

struct Server {
    base: String,
    sessions: Arc<WizardSessions>,
    completed: UnboundedReceiver<WizardSnapshot>,
    client: reqwest::Client,
}

/// Start the API on a random port with zero simulated delays.
async fn start_server() -> Server {
    let config = SiteConfig {
        analysis_delay: Duration::ZERO,
        auth_delay: Duration::ZERO,
        ..Default::default()
    };
    let (handler, completed) = ChannelCompletion::new();
    let app = build_app(&config, Arc::new(handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let router = app.router;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    Server {
        base: format!("http://127.0.0.1:{port}"),
        sessions: app.sessions,
        completed,
        client: reqwest::Client::new(),
    }
}

impl Server {
    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post_empty(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

// ── Onboarding ───────────────────────────────────────────────────────

#[tokio::test]
async fn full_onboarding_walk_hands_off_answers() {
    timeout(TEST_TIMEOUT, async {
        let mut server = start_server().await;

        let (status, view) = server.post_empty("/api/onboarding").await;
        assert_eq!(status, 201);
        let id = view["id"].as_str().unwrap().to_string();
        let base = format!("/api/onboarding/{id}");

        // allergies: one predefined option plus a custom item
        server
            .post(&format!("{base}/answers/allergies/toggle"), json!({"option": "Nuts"}))
            .await;
        server
            .put(&format!("{base}/custom/allergies/draft"), json!({"text": "Nickel"}))
            .await;
        let (_, view) = server.post_empty(&format!("{base}/custom/allergies/commit")).await;
        assert_eq!(view["custom_items"], json!(["Nickel"]));

        // avoiding: skipped
        let (_, view) = server.post_empty(&format!("{base}/next")).await;
        assert_eq!(view["question"]["id"], "avoiding");
        server.post_empty(&format!("{base}/skip")).await;

        // medications: free text
        let (status, _) = server
            .put(
                &format!("{base}/answers/medications"),
                json!({"type": "free_text", "value": "Ibuprofen"}),
            )
            .await;
        assert_eq!(status, 200);
        server.post_empty(&format!("{base}/next")).await;

        // skintype: single choice
        server
            .put(
                &format!("{base}/answers/skintype"),
                json!({"type": "single", "value": "Dry"}),
            )
            .await;
        server.post_empty(&format!("{base}/next")).await;
        server.post_empty(&format!("{base}/next")).await;

        // notifications: switches
        let (_, view) = server
            .post(
                &format!("{base}/answers/notifications/toggle"),
                json!({"option": "Product recalls"}),
            )
            .await;
        assert_eq!(view["is_last"], true);
        assert_eq!(view["progress"], 100);

        let (status, done) = server.post_empty(&format!("{base}/next")).await;
        assert_eq!(status, 200);
        assert_eq!(done["status"], "completed");
        assert_eq!(done["redirect"], "/analyzer");
        assert!(server.sessions.is_empty().await);

        let snapshot = server.completed.recv().await.unwrap();
        assert_eq!(snapshot.wizard_id.to_string(), id);
        assert_eq!(snapshot.selections("allergies"), ["Nuts", "Nickel"]);
        assert!(snapshot.answers.get_answer("avoiding").is_none());
        assert_eq!(
            snapshot.answers.get_answer("skintype"),
            Some(&AnswerValue::Single("Dry".into()))
        );
        assert!(server.completed.try_recv().is_err(), "handler fired more than once");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn completed_wizard_is_gone() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let (_, view) = server.post_empty("/api/onboarding").await;
        let id = view["id"].as_str().unwrap().to_string();

        for _ in 0..6 {
            server.post_empty(&format!("/api/onboarding/{id}/skip")).await;
        }

        let (status, json) = server.post_empty(&format!("/api/onboarding/{id}/next")).await;
        assert_eq!(status, 404);
        assert_eq!(json["error"], "Wizard not found");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unknown_option_is_rejected() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let (_, view) = server.post_empty("/api/onboarding").await;
        let id = view["id"].as_str().unwrap().to_string();

        let (status, json) = server
            .post(
                &format!("/api/onboarding/{id}/answers/allergies/toggle"),
                json!({"option": "Kryptonite"}),
            )
            .await;
        assert_eq!(status, 422);
        assert!(json["error"].as_str().unwrap().contains("Kryptonite"));
    })
    .await
    .expect("test timed out");
}

// ── Analyzer / Auth / Site ───────────────────────────────────────────

#[tokio::test]
async fn analyzer_returns_sample_report() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let (status, report) = server
            .post(
                "/api/analyze",
                json!({"method": "type", "ingredients": "Aqua, Glycerin, Parfum"}),
            )
            .await;
        assert_eq!(status, 200);
        assert_eq!(report["overall_score"], 75);
        assert_eq!(report["ingredients"].as_array().unwrap().len(), 5);
        assert_eq!(report["submitted"], json!(["Aqua", "Glycerin", "Parfum"]));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn sign_up_then_sign_in_redirects() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let (status, json) = server
            .post(
                "/api/auth/signup",
                json!({"email": "sam@example.com", "password": "pw", "name": "Sam"}),
            )
            .await;
        assert_eq!(status, 200);
        assert_eq!(json["redirect"], "/onboarding");

        let (_, json) = server
            .post("/api/auth/signin", json!({"email": "sam@example.com", "password": "pw"}))
            .await;
        assert_eq!(json["redirect"], "/analyzer");

        let (status, _) = server.post("/api/auth/signin", json!({"email": ""})).await;
        assert_eq!(status, 422);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_and_site_endpoints() {
    timeout(TEST_TIMEOUT, async {
        let server = start_server().await;
        let resp = reqwest::get(format!("{}/health", server.base)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["service"], "ingredient-iq");

        let json: Value = reqwest::get(format!("{}/api/site", server.base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["nav_items"][0]["href"], "#steps");
        assert!(json["quote"]["text"].is_string());
    })
    .await
    .expect("test timed out");
}
