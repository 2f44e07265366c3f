//! Fire-and-forget JSON GET requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages use this for beacon-style lookups: send a GET with optional basic
//! auth, parse a 200 response as JSON, and log the result. [`fetch_json`] is
//! the awaitable core; [`http_get`] spawns it on whatever executor the
//! target provides (tokio natively, the browser microtask queue on wasm).
//!
//! TRADE-OFFS
//! ==========
//! Only status 200 counts as success, so a 204 or a redirect that reqwest
//! does not follow is reported as "no JSON" rather than an error.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use crate::error::Result;

/// Basic-auth credentials for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(user: impl Into<String>, password: Option<String>) -> Self {
        Self { user: user.into(), password }
    }
}

/// `base?params`, joined verbatim.
#[must_use]
pub fn request_url(base: &str, params: &str) -> String {
    format!("{base}?{params}")
}

/// GET `base?params` and parse the body as JSON when the status is 200.
///
/// Returns `Ok(None)` for any other status. With credentials the request
/// carries basic auth and, in the browser, includes cookies cross-origin.
/// `body` is sent natively; in the browser it is dropped with a debug log,
/// since `fetch` rejects a GET that has one.
///
/// # Errors
///
/// Returns [`crate::Error::Http`] on transport failure or an unparseable
/// 200 body.
pub async fn fetch_json(
    base: &str,
    params: &str,
    body: Option<String>,
    credentials: Option<&Credentials>,
) -> Result<Option<Value>> {
    let url = request_url(base, params);
    let mut request = reqwest::Client::new().get(&url);
    if let Some(creds) = credentials {
        request = request.basic_auth(&creds.user, creds.password.as_deref());
        #[cfg(target_arch = "wasm32")]
        {
            request = request.fetch_credentials_include();
        }
    }
    request = with_body(request, body);

    let response = request.send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        log::warn!("GET {url} returned {status}");
        return Ok(None);
    }
    Ok(Some(response.json::<Value>().await?))
}

/// Spawn [`fetch_json`] and log its outcome. Nothing is returned to the caller.
///
/// # Errors
///
/// Returns [`crate::Error::Unavailable`] when called outside a tokio runtime
/// (native targets only).
pub fn http_get(base: &str, params: &str, body: Option<String>, credentials: Option<Credentials>) -> Result<()> {
    let base = base.to_owned();
    let params = params.to_owned();
    let task = async move {
        let outcome = fetch_json(&base, &params, body, credentials.as_ref()).await;
        report(&request_url(&base, &params), outcome);
    };
    spawn(task)
}

#[cfg(not(target_arch = "wasm32"))]
fn with_body(request: RequestBuilder, body: Option<String>) -> RequestBuilder {
    match body {
        Some(body) => request.body(body),
        None => request,
    }
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::needless_pass_by_value)]
fn with_body(request: RequestBuilder, body: Option<String>) -> RequestBuilder {
    if body.is_some() {
        log::debug!("dropping GET body; fetch does not send one");
    }
    request
}

fn report(url: &str, outcome: Result<Option<Value>>) {
    match outcome {
        Ok(Some(json)) => log::info!("GET {url}: {json}"),
        Ok(None) => {}
        Err(err) => log::error!("GET {url} failed: {err}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn<F>(task: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let handle =
        tokio::runtime::Handle::try_current().map_err(|_| crate::Error::Unavailable("async runtime"))?;
    drop(handle.spawn(task));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::unnecessary_wraps)]
fn spawn<F>(task: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task);
    Ok(())
}
