//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use mograph_completion::{CompletionError, CompletionRequest, CompletionService};

/// A completion service that replays canned responses in order and
/// records every request it receives.
#[derive(Default)]
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        let fake = Self::new();
        fake.push_ok(text);
        fake
    }

    pub fn push_ok(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn push_err(&self, err: CompletionError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

/// Code the fake model returns for "Logo reveal with fade in", 3s, 9:16.
pub const LOGO_REVEAL_TSX: &str = r#"import React from 'react';
import { useCurrentFrame, useVideoConfig, interpolate, AbsoluteFill } from 'remotion';

export const compositionConfig = {
  id: 'LogoRevealWith',
  durationInSeconds: 3,
  fps: 30,
  width: 1080,
  height: 1920,
};

const LogoRevealWith: React.FC = () => {
  const frame = useCurrentFrame();
  const opacity = interpolate(frame, [0, 30], [0, 1], { extrapolateRight: 'clamp' });
  return <AbsoluteFill style={{ opacity, backgroundColor: '#1a1a2e' }} />;
};

export default LogoRevealWith;"#;

/// Wrap `code` the way chat models usually answer.
pub fn fenced(code: &str) -> String {
    format!("Here is your component:\n\n```tsx\n{code}\n```\n\nLet me know if you want changes.")
}

/// Serve `router` on an ephemeral port and return the render URL.
pub async fn spawn_render_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}/render")
}
