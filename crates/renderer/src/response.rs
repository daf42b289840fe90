//! Interpretation of render backend response bodies.

use serde::Deserialize;
use serde_json::Value;

use mograph_core::outcome::RenderOutcome;

/// Body of a 200 response. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RenderResponseBody {
    pub video_path: Option<String>,
    pub filename: Option<String>,
    pub render_time_seconds: Option<f64>,
    pub file_size_mb: Option<f64>,
    pub message: Option<String>,
}

impl RenderResponseBody {
    /// Convert into a success outcome, applying defaults for absent fields.
    pub fn into_outcome(self, default_filename: String) -> RenderOutcome {
        RenderOutcome::Success {
            video_path: self.video_path,
            filename: self.filename.unwrap_or(default_filename),
            render_time_seconds: self.render_time_seconds.unwrap_or(0.0),
            file_size_mb: self.file_size_mb.unwrap_or(0.0),
            message: self.message.unwrap_or_default(),
        }
    }
}

/// Parse a 200 body. An empty body counts as `{}`.
pub fn parse_success_body(body: &str) -> Result<RenderResponseBody, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(RenderResponseBody::default());
    }
    serde_json::from_str(body)
}

/// Derive the failure message for a non-200 response.
///
/// 1. the `error` field of a JSON body
/// 2. the raw body
/// 3. `HTTP <status>` when the body is empty
pub fn backend_error_message(status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        return format!("HTTP {status}");
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("error") {
            Some(Value::String(error)) => error.clone(),
            Some(Value::Null) | None => body.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- success bodies --

    #[test]
    fn full_body_maps_every_field() {
        let body = parse_success_body(
            r#"{"video_path":"/renders/a.mp4","filename":"a.mp4","render_time_seconds":41.2,"file_size_mb":3.75,"message":"done"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_outcome("fallback.mp4".to_string()),
            RenderOutcome::Success {
                video_path: Some("/renders/a.mp4".to_string()),
                filename: "a.mp4".to_string(),
                render_time_seconds: 41.2,
                file_size_mb: 3.75,
                message: "done".to_string(),
            }
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let body = parse_success_body("{}").unwrap();
        assert_eq!(
            body.into_outcome("intro.mp4".to_string()),
            RenderOutcome::Success {
                video_path: None,
                filename: "intro.mp4".to_string(),
                render_time_seconds: 0.0,
                file_size_mb: 0.0,
                message: String::new(),
            }
        );
    }

    #[test]
    fn empty_success_body_is_treated_as_empty_object() {
        assert!(parse_success_body("").is_ok());
    }

    #[test]
    fn integer_numbers_accepted() {
        let body = parse_success_body(r#"{"render_time_seconds":12,"file_size_mb":2}"#).unwrap();
        assert_eq!(body.render_time_seconds, Some(12.0));
        assert_eq!(body.file_size_mb, Some(2.0));
    }

    #[test]
    fn malformed_success_body_is_an_error() {
        assert!(parse_success_body("<html>gateway</html>").is_err());
    }

    // -- error bodies --

    #[test]
    fn json_error_field_is_used() {
        assert_eq!(backend_error_message(500, r#"{"error":"boom"}"#), "boom");
    }

    #[test]
    fn empty_body_gives_http_status() {
        assert_eq!(backend_error_message(500, ""), "HTTP 500");
        assert_eq!(backend_error_message(502, "  \n"), "HTTP 502");
    }

    #[test]
    fn plain_text_body_is_preserved() {
        assert_eq!(
            backend_error_message(503, "Service Unavailable"),
            "Service Unavailable"
        );
    }

    #[test]
    fn json_without_error_field_falls_back_to_raw_body() {
        let body = r#"{"detail":"queue full"}"#;
        assert_eq!(backend_error_message(429, body), body);
    }

    #[test]
    fn structured_error_field_is_rendered_as_json() {
        assert_eq!(
            backend_error_message(400, r#"{"error":{"code":7}}"#),
            r#"{"code":7}"#
        );
    }
}
