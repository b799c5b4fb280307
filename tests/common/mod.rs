#![allow(dead_code)]

use axum::body::Bytes;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub route: &'static str,
    pub authorization: Option<String>,
    pub body: Value,
}

struct Reply {
    status: StatusCode,
    body: Value,
    delay: Duration,
}

#[derive(Default)]
struct State {
    requests: Vec<Recorded>,
    replies: HashMap<&'static str, VecDeque<Reply>>,
}

/// In-process stand-in for the playlist backend. Each route answers with
/// the replies queued for it, in order.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn reply(&self, route: &'static str, status: u16, body: Value) -> &Self {
        self.reply_after(route, status, body, Duration::ZERO)
    }

    pub fn reply_after(&self, route: &'static str, status: u16, body: Value, delay: Duration) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .entry(route)
            .or_default()
            .push_back(Reply {
                status: StatusCode::from_u16(status).unwrap(),
                body,
                delay,
            });
        self
    }

    pub fn requests(&self, route: &str) -> Vec<Recorded> {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.route == route)
            .cloned()
            .collect()
    }

    /// Bind to an ephemeral port and return the API base URL.
    pub async fn serve(&self) -> String {
        let handler = |route: &'static str| {
            let backend = self.clone();
            move |headers: HeaderMap, body: Bytes| {
                let backend = backend.clone();
                async move { backend.answer(route, headers, body).await }
            }
        };

        let app = Router::new()
            .route("/api/detect-emotion", post(handler("detect-emotion")))
            .route("/api/generate-songs", post(handler("generate-songs")))
            .route("/api/create-playlist", post(handler("create-playlist")))
            .route("/api/auth/spotify", get(handler("auth/spotify")))
            .route("/api/auth/callback", post(handler("auth/callback")));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    async fn answer(&self, route: &'static str, headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Value>) {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(Recorded {
                route,
                authorization: headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_slice(&body).unwrap_or(Value::Null),
            });
            state.replies.get_mut(route).and_then(VecDeque::pop_front)
        };

        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                (reply.status, Json(reply.body))
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("no reply queued for {}", route) })),
            ),
        }
    }
}

pub fn songs_json(ids: &[&str]) -> Value {
    let songs: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Song {}", id),
                "artist": "Artist",
                "uri": format!("spotify:track:{}", id),
            })
        })
        .collect();
    json!({ "songs": songs })
}
