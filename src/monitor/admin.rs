// SPDX-License-Identifier: MPL-2.0
//! Administrative endpoints of the status monitor.
//!
//! Paths are relative to wherever the host mounts the monitor:
//!
//! | Route | Method | Effect |
//! |---|---|---|
//! | `/status` | `GET`, `HEAD` | JSON [`MonitorStatus`](super::MonitorStatus) |
//! | `/act` | `POST` | with `no`: dismiss and go to `/manage`, else `/manage/modules/installed` |
//!
//! Any other method on a known route gets `405`; unknown routes get `404`.

use super::StatusMonitor;
use http::header::{ALLOW, CONTENT_TYPE, LOCATION};
use http::{Method, Request, Response, StatusCode};

pub const STATUS_ROUTE: &str = "/status";
pub const ACT_ROUTE: &str = "/act";

/// Redirect target after dismissing.
pub const MANAGE_PAGE: &str = "/manage";
/// Redirect target for inspecting the offending module.
pub const INSTALLED_MODULES_PAGE: &str = "/manage/modules/installed";

/// Parameter that asks for the advisory to be dismissed.
const DISMISS_PARAM: &str = "no";

impl StatusMonitor {
    /// Serves one administrative request.
    pub fn handle<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Response<Vec<u8>> {
        match request.uri().path() {
            STATUS_ROUTE => match request.method() {
                &Method::GET | &Method::HEAD => self.status_view(*request.method() == Method::HEAD),
                _ => method_not_allowed("GET, HEAD"),
            },
            ACT_ROUTE => match request.method() {
                &Method::POST => self.act(request),
                _ => method_not_allowed("POST"),
            },
            _ => plain(StatusCode::NOT_FOUND, "not found"),
        }
    }

    fn status_view(&self, head: bool) -> Response<Vec<u8>> {
        match serde_json::to_vec(&self.status()) {
            Ok(body) => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, "application/json")
                .body(if head { Vec::new() } else { body })
                .unwrap_or_else(|_| plain(StatusCode::INTERNAL_SERVER_ERROR, "")),
            Err(err) => {
                log::warn!("Failed to render monitor status: {err}");
                plain(StatusCode::INTERNAL_SERVER_ERROR, "status unavailable")
            }
        }
    }

    fn act<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Response<Vec<u8>> {
        if has_param(request, DISMISS_PARAM) {
            self.dismiss();
            redirect(&self.redirect_target(MANAGE_PAGE))
        } else {
            redirect(&self.redirect_target(INSTALLED_MODULES_PAGE))
        }
    }
}

/// Looks for `name` in the query string and in a form-encoded body.
fn has_param<B: AsRef<[u8]>>(request: &Request<B>, name: &str) -> bool {
    let in_query = request.uri().query().is_some_and(|query| {
        url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == name)
    });
    let in_body =
        || url::form_urlencoded::parse(request.body().as_ref()).any(|(key, _)| key == name);
    in_query || in_body()
}

fn redirect(location: &str) -> Response<Vec<u8>> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Vec::new())
        .unwrap_or_else(|_| plain(StatusCode::INTERNAL_SERVER_ERROR, "bad redirect target"))
}

fn method_not_allowed(allow: &'static str) -> Response<Vec<u8>> {
    let mut response = plain(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    response.headers_mut().insert(ALLOW, http::HeaderValue::from_static(allow));
    response
}

fn plain(status: StatusCode, message: &str) -> Response<Vec<u8>> {
    let mut response = Response::new(message.as_bytes().to_vec());
    *response.status_mut() = status;
    response
}
