//! HTTP helpers that drive the storefront like a browser would.
//!
//! The session cookie returned by each response replaces the stored one, so
//! successive requests carry the latest cart the same way a browser's cookie
//! jar does.

use actix_web::http::{Method, header};
use awc::Client;
use serde_json::Value;
use storefront::domain::TRACE_ID_HEADER;

use crate::harness::{SharedWorld, WorldFixture, with_world_async};

pub(crate) struct JsonRequest<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
}

impl<'a> JsonRequest<'a> {
    pub(crate) fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            payload: None,
        }
    }

    pub(crate) fn send(method: Method, path: &'a str, payload: Value) -> Self {
        Self {
            method,
            path,
            payload: Some(payload),
        }
    }

    pub(crate) fn bare(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            payload: None,
        }
    }
}

struct CapturedResponse {
    status: u16,
    cache_control: Option<String>,
    trace_id: Option<String>,
    set_cookie: Option<String>,
    body: Value,
}

fn header_value(headers: &header::HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn record_response(world: &SharedWorld, captured: CapturedResponse) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_cache_control = captured.cache_control;
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = Some(captured.body);
    if let Some(cookie) = captured.set_cookie {
        ctx.session_cookie = cookie.split(';').next().map(str::to_owned);
    }
}

pub(crate) fn perform_json_request(world: &WorldFixture, req: JsonRequest<'_>) {
    let shared = world.world();
    let cookie = shared.borrow().session_cookie.clone();
    let captured = with_world_async(&shared, |base_url| async move {
        let mut request =
            Client::default().request(req.method, format!("{base_url}{}", req.path));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match req.payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let headers = response.headers();
        let status = response.status().as_u16();
        let cache_control = header_value(headers, header::CACHE_CONTROL);
        let trace_id = header_value(headers, TRACE_ID_HEADER);
        let set_cookie = header_value(headers, header::SET_COOKIE);
        let body = response.body().await.expect("body");
        let json: Value = serde_json::from_slice(&body).expect("json body");
        CapturedResponse {
            status,
            cache_control,
            trace_id,
            set_cookie,
            body: json,
        }
    });

    record_response(&shared, captured);
}

/// Borrow the last response body.
pub(crate) fn with_last_body<R>(world: &WorldFixture, check: impl FnOnce(&Value) -> R) -> R {
    let shared = world.world();
    let ctx = shared.borrow();
    check(ctx.last_body.as_ref().expect("response body"))
}

pub(crate) fn last_status(world: &WorldFixture) -> Option<u16> {
    world.world().borrow().last_status
}
