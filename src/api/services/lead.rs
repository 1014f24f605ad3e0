//! Lead form endpoint
//!
//! `POST /api/lead`。限流在解析请求体之前执行，畸形请求同样计数。
//! 蜜罐字段在类型化解析之前检查，字段类型错误的机器人提交同样静默丢弃。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{error, trace, warn};

use crate::api::constants::{
    MSG_INVALID_JSON, MSG_LEAD_ACCEPTED, MSG_RATE_LIMITED, MSG_SAVE_FAILED,
};
use crate::errors::NestleadError;
use crate::services::{
    ClientContext, LeadOutcome, LeadService, LeadSubmission, RateDecision, honeypot_filled,
};
use crate::utils::ip::extract_client_ip;

/// `POST /api/lead` 响应体
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeadResponse {
    fn success(lead_id: Option<String>) -> Self {
        Self {
            ok: true,
            message: Some(MSG_LEAD_ACCEPTED.to_string()),
            lead_id,
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: None,
            lead_id: None,
            error: Some(error.into()),
        }
    }
}

fn client_context(req: &HttpRequest) -> ClientContext {
    ClientContext {
        ip: extract_client_ip(req),
        user_agent: req
            .headers()
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string()),
    }
}

/// 请求体必须是 JSON 对象
fn decode_object(body: &[u8]) -> Option<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.is_object().then_some(value)
}

fn decode_submission(value: serde_json::Value) -> Option<LeadSubmission> {
    serde_json::from_value(value).ok()
}

pub struct LeadApi;

impl LeadApi {
    pub async fn submit(
        req: HttpRequest,
        body: web::Bytes,
        service: web::Data<LeadService>,
    ) -> impl Responder {
        let client = client_context(&req);
        trace!(
            "Lead submission from {}",
            client.ip.as_deref().unwrap_or("unknown")
        );

        let decision = service.check_rate(&client);
        if let RateDecision::Limited { .. } = decision {
            let retry_after = decision.retry_after_secs().unwrap_or(1);
            return HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", retry_after.to_string()))
                .json(LeadResponse::failure(MSG_RATE_LIMITED));
        }

        let Some(value) = decode_object(&body) else {
            return HttpResponse::BadRequest().json(LeadResponse::failure(MSG_INVALID_JSON));
        };

        if honeypot_filled(&value) {
            service.discard(&client);
            return HttpResponse::Ok().json(LeadResponse::success(None));
        }

        let Some(submission) = decode_submission(value) else {
            return HttpResponse::BadRequest().json(LeadResponse::failure(MSG_INVALID_JSON));
        };

        match service.submit(submission, client).await {
            Ok(LeadOutcome::Accepted { lead_id }) => {
                HttpResponse::Ok().json(LeadResponse::success(Some(lead_id)))
            }
            Ok(LeadOutcome::Discarded) => HttpResponse::Ok().json(LeadResponse::success(None)),
            Err(NestleadError::Validation(msg)) => {
                warn!("Lead rejected: {}", msg);
                HttpResponse::BadRequest().json(LeadResponse::failure(msg))
            }
            Err(e) => {
                error!("{}", e.format_colored());
                let status = match e.http_status() {
                    StatusCode::TOO_MANY_REQUESTS => StatusCode::TOO_MANY_REQUESTS,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                HttpResponse::build(status).json(LeadResponse::failure(MSG_SAVE_FAILED))
            }
        }
    }
}

/// Lead 路由配置（挂载在 /api 下）
pub fn lead_routes() -> actix_web::Resource {
    web::resource("/lead").route(web::post().to(LeadApi::submit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_requires_object() {
        assert!(decode_object(br#"{"name":"x"}"#).is_some());
        assert!(decode_object(br#"["x"]"#).is_none());
        assert!(decode_object(b"null").is_none());
        assert!(decode_object(b"not json").is_none());
    }

    #[test]
    fn test_typed_decode_rejects_wrong_types() {
        let decode = |raw: &[u8]| decode_object(raw).and_then(decode_submission);
        assert!(decode(br#"{"name":"x","phone":9495550142}"#).is_some());
        assert!(decode(br#"{"consent":"yes"}"#).is_none());
        assert!(decode(br#"{"name":42}"#).is_none());
    }

    #[test]
    fn test_response_shape() {
        let ok = serde_json::to_value(LeadResponse::success(Some("abc".to_string()))).unwrap();
        assert_eq!(ok["ok"], true);
        assert_eq!(ok["lead_id"], "abc");
        assert!(ok.get("error").is_none());

        let honeypot = serde_json::to_value(LeadResponse::success(None)).unwrap();
        assert!(honeypot.get("lead_id").is_none());
        assert_eq!(honeypot["message"], MSG_LEAD_ACCEPTED);

        let err = serde_json::to_value(LeadResponse::failure("nope")).unwrap();
        assert_eq!(err["ok"], false);
        assert_eq!(err["error"], "nope");
    }
}
