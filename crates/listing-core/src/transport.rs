//! Endpoint Client
//!
//! Retry, status and JSON handling on top of a pluggable [`Transport`]. The
//! transport owns the deadline (it is the only layer able to abort the
//! in-flight call); the client decides how many attempts a method gets and
//! keeps the busy indicator up for the whole call.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ListingConfig;
use crate::endpoint::{Endpoint, HttpRequest, Method, ReadQuery, WriteAction};
use crate::error::ApiError;
use crate::models::{Record, WriteAck};

/// Status and raw text of one HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One network attempt.
///
/// Implementations must cancel the underlying operation once `deadline`
/// elapses and report [`ApiError::Timeout`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &HttpRequest, deadline: Duration) -> Result<RawResponse, ApiError>;
}

/// Observer of in-flight calls (the loading overlay)
pub trait BusyIndicator {
    fn begin(&self);
    fn end(&self);
}

/// Ends the busy span when dropped, whichever way the call finishes.
pub struct BusyGuard<'a, B: BusyIndicator + ?Sized> {
    indicator: &'a B,
}

impl<'a, B: BusyIndicator + ?Sized> BusyGuard<'a, B> {
    pub fn new(indicator: &'a B) -> Self {
        indicator.begin();
        Self { indicator }
    }
}

impl<B: BusyIndicator + ?Sized> Drop for BusyGuard<'_, B> {
    fn drop(&mut self) {
        self.indicator.end();
    }
}

/// Plain in-flight counter; clones share the count.
#[derive(Debug, Clone, Default)]
pub struct BusyCounter {
    count: Rc<Cell<u32>>,
}

impl BusyCounter {
    pub fn in_flight(&self) -> u32 {
        self.count.get()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight() > 0
    }
}

impl BusyIndicator for BusyCounter {
    fn begin(&self) {
        self.count.set(self.count.get() + 1);
    }

    fn end(&self) {
        self.count.set(self.count.get().saturating_sub(1));
    }
}

/// Deadline and retry budget per method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub get_retries: u32,
    /// Writes are not idempotent; keep this at zero
    pub post_retries: u32,
}

impl RetryPolicy {
    pub fn from_config(config: &ListingConfig) -> Self {
        Self {
            timeout: config.timeout(),
            get_retries: config.get_retries,
            post_retries: config.post_retries,
        }
    }

    pub fn retries_for(&self, method: Method) -> u32 {
        match method {
            Method::Get => self.get_retries,
            Method::Post => self.post_retries,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ListingConfig::default())
    }
}

pub struct ApiClient<T, B> {
    endpoint: Endpoint,
    transport: T,
    busy: B,
    policy: RetryPolicy,
}

impl<T: Transport, B: BusyIndicator> ApiClient<T, B> {
    pub fn new(endpoint: Endpoint, transport: T, busy: B, policy: RetryPolicy) -> Self {
        Self { endpoint, transport, busy, policy }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Run `request` with the retry budget of its method.
    pub async fn execute(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        self.execute_with_retries(request, self.policy.retries_for(request.method)).await
    }

    pub async fn execute_with_retries(&self, request: &HttpRequest, retries: u32) -> Result<Value, ApiError> {
        let _busy = BusyGuard::new(&self.busy);
        let mut attempt = 0;
        loop {
            match self.attempt(request).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < retries => {
                    attempt += 1;
                    log::warn!("[API] {} {} failed ({}), retry {}/{}", request.method.as_str(), request.url, err, attempt, retries);
                }
                Err(err) => {
                    log::error!("[API] {} {} failed: {}", request.method.as_str(), request.url, err);
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        let response = self.transport.send(request, self.policy.timeout).await?;
        if !response.is_success() {
            return Err(ApiError::Http { status: response.status, body: response.body });
        }
        serde_json::from_str(&response.body).map_err(|_| ApiError::malformed(&response.body))
    }

    pub async fn get(&self, query: &ReadQuery) -> Result<Value, ApiError> {
        self.execute(&self.endpoint.read(query)).await
    }

    /// Read a list of spreadsheet rows.
    pub async fn get_records(&self, query: &ReadQuery) -> Result<Vec<Record>, ApiError> {
        let value = self.get(query).await?;
        records_from(value)
    }

    pub async fn post(&self, action: &WriteAction) -> Result<WriteAck, ApiError> {
        let request = self.endpoint.write(action)?;
        let value = self.execute(&request).await?;
        serde_json::from_value(value.clone()).map_err(|_| ApiError::malformed(&value.to_string()))
    }
}

/// Rows out of a read response. `null` reads as no rows; an `{error}` object is a rejection.
pub fn records_from(value: Value) -> Result<Vec<Record>, ApiError> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        Value::Object(obj) if obj.contains_key("error") => {
            let reason = match &obj["error"] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Err(ApiError::Rejected(reason))
        }
        other => Err(ApiError::malformed(&other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const BASE: &str = "https://example.test/exec";

    /// Replays scripted attempts and records what it was asked.
    struct ScriptedTransport {
        script: RefCell<VecDeque<Result<RawResponse, ApiError>>>,
        calls: RefCell<Vec<(HttpRequest, Duration)>>,
        busy: BusyCounter,
        busy_seen: RefCell<Vec<u32>>,
    }

    impl ScriptedTransport {
        fn new(busy: BusyCounter, script: Vec<Result<RawResponse, ApiError>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                calls: RefCell::new(Vec::new()),
                busy,
                busy_seen: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &HttpRequest, deadline: Duration) -> Result<RawResponse, ApiError> {
            self.calls.borrow_mut().push((request.clone(), deadline));
            self.busy_seen.borrow_mut().push(self.busy.in_flight());
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("script exhausted".into())))
        }
    }

    fn ok(body: &str) -> Result<RawResponse, ApiError> {
        Ok(RawResponse { status: 200, body: body.into() })
    }

    fn scripted_client(script: Vec<Result<RawResponse, ApiError>>) -> (ApiClient<ScriptedTransport, BusyCounter>, BusyCounter) {
        let busy = BusyCounter::default();
        let transport = ScriptedTransport::new(busy.clone(), script);
        let client = ApiClient::new(Endpoint::new(BASE), transport, busy.clone(), RetryPolicy::default());
        (client, busy)
    }

    #[tokio::test]
    async fn test_get_retries_once_after_timeout() {
        let (client, _) = scripted_client(vec![Err(ApiError::Timeout), ok(r#"[{"Project Name":"A"}]"#)]);
        let records = client.get_records(&ReadQuery::Projects).await.expect("retry should succeed");
        assert_eq!(records.len(), 1);
        assert_eq!(client.transport.call_count(), 2);
        for (_, deadline) in client.transport.calls.borrow().iter() {
            assert_eq!(*deadline, Duration::from_secs(12));
        }
    }

    #[tokio::test]
    async fn test_get_surfaces_retry_failure() {
        let (client, _) = scripted_client(vec![Err(ApiError::Timeout), Err(ApiError::Network("offline".into())), ok("[]")]);
        let err = client.get(&ReadQuery::Ping).await.unwrap_err();
        assert_eq!(err, ApiError::Network("offline".into()));
        assert_eq!(client.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_get_retries_on_status_and_bad_json() {
        let (client, _) = scripted_client(vec![
            Ok(RawResponse { status: 500, body: "oops".into() }),
            ok("[]"),
        ]);
        assert!(client.get(&ReadQuery::Ping).await.is_ok());

        let (client, _) = scripted_client(vec![ok("<html>"), ok("<html>again")]);
        let err = client.get(&ReadQuery::Ping).await.unwrap_err();
        assert_eq!(err, ApiError::MalformedResponse { snippet: "<html>again".into() });
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let failing = || Ok(RawResponse { status: 404, body: "missing".into() });
        let (client, _) = scripted_client(vec![failing(), failing()]);
        let err = client.get(&ReadQuery::Projects).await.unwrap_err();
        assert_eq!(err, ApiError::Http { status: 404, body: "missing".into() });
    }

    #[tokio::test]
    async fn test_post_never_retries() {
        let (client, _) = scripted_client(vec![Err(ApiError::Timeout), ok(r#"{"success":true}"#)]);
        let err = client.post(&WriteAction::DeleteProject { id: "A".into() }).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(client.transport.call_count(), 1);

        let calls = client.transport.calls.borrow();
        let (request, _) = &calls[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"id":"A"}"#));
    }

    #[tokio::test]
    async fn test_post_decodes_ack() {
        let (client, _) = scripted_client(vec![ok(r#"{"success":true,"blocked":true}"#)]);
        let ack = client.post(&WriteAction::DeleteProject { id: "A".into() }).await.unwrap();
        assert!(ack.is_success());
        assert!(ack.is_blocked());
    }

    #[tokio::test]
    async fn test_busy_counter_spans_the_call() {
        let (client, busy) = scripted_client(vec![Err(ApiError::Timeout), ok("[]")]);
        assert!(!busy.is_busy());
        client.get(&ReadQuery::Ping).await.unwrap();
        assert_eq!(*client.transport.busy_seen.borrow(), vec![1, 1]);
        assert_eq!(busy.in_flight(), 0);

        let (client, busy) = scripted_client(vec![Err(ApiError::Timeout)]);
        let _ = client.post(&WriteAction::DeleteProject { id: "A".into() }).await;
        assert_eq!(busy.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_ping_retries_once_like_any_read() {
        let (client, _) = scripted_client(vec![Err(ApiError::Network("cold start".into())), ok(r#"{"ok":true}"#)]);
        assert!(client.get(&ReadQuery::Ping).await.is_ok());
        assert_eq!(client.transport.call_count(), 2);
        assert!(client.transport.calls.borrow()[1].0.url.ends_with("?type=ping"));
    }

    /// Answers after a scripted delay and enforces the deadline with a timer,
    /// the way the browser transport aborts its fetch.
    struct DelayedTransport {
        delays: RefCell<VecDeque<Duration>>,
        attempts: Cell<u32>,
    }

    impl DelayedTransport {
        fn new(delays: Vec<Duration>) -> Self {
            Self { delays: RefCell::new(delays.into()), attempts: Cell::new(0) }
        }
    }

    #[async_trait(?Send)]
    impl Transport for DelayedTransport {
        async fn send(&self, _request: &HttpRequest, deadline: Duration) -> Result<RawResponse, ApiError> {
            self.attempts.set(self.attempts.get() + 1);
            let delay = self.delays.borrow_mut().pop_front().unwrap_or_default();
            let reply = async move {
                tokio::time::sleep(delay).await;
                RawResponse { status: 200, body: r#"{"success":true}"#.into() }
            };
            tokio::time::timeout(deadline, reply).await.map_err(|_| ApiError::Timeout)
        }
    }

    fn delayed_client(delays: Vec<Duration>) -> ApiClient<DelayedTransport, BusyCounter> {
        ApiClient::new(Endpoint::new(BASE), DelayedTransport::new(delays), BusyCounter::default(), RetryPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_missing_the_deadline_retries_and_returns_the_retry() {
        let client = delayed_client(vec![Duration::from_secs(30), Duration::from_secs(1)]);
        let started = tokio::time::Instant::now();
        let value = client.get(&ReadQuery::Ping).await.expect("second attempt answers in time");
        assert_eq!(value["success"], Value::Bool(true));
        assert_eq!(client.transport.attempts.get(), 2);
        // First attempt cut at the 12 s deadline, second answered after 1 s.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(13) && elapsed < Duration::from_secs(14), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_timing_out_twice_surfaces_timeout() {
        let client = delayed_client(vec![Duration::from_secs(13), Duration::from_secs(13)]);
        assert_eq!(client.get(&ReadQuery::Projects).await.unwrap_err(), ApiError::Timeout);
        assert_eq!(client.transport.attempts.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_missing_the_deadline_is_not_retried() {
        let client = delayed_client(vec![Duration::from_secs(13), Duration::ZERO]);
        let err = client.post(&WriteAction::DeleteProject { id: "A".into() }).await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(client.transport.attempts.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_inside_the_deadline_is_not_a_timeout() {
        let client = delayed_client(vec![Duration::from_millis(11_999)]);
        assert!(client.get(&ReadQuery::Ping).await.is_ok());
        assert_eq!(client.transport.attempts.get(), 1);
    }

    #[test]
    fn test_busy_counter_never_underflows() {
        let busy = BusyCounter::default();
        busy.end();
        assert_eq!(busy.in_flight(), 0);
        {
            let _a = BusyGuard::new(&busy);
            let _b = BusyGuard::new(&busy);
            assert_eq!(busy.in_flight(), 2);
        }
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_records_from_shapes() {
        let rows = records_from(serde_json::json!([{"a": 1}, 3, {"b": 2}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(records_from(Value::Null).unwrap().is_empty());
        assert_eq!(
            records_from(serde_json::json!({"error": "no sheet"})),
            Err(ApiError::Rejected("no sheet".into()))
        );
        assert!(matches!(records_from(serde_json::json!("x")), Err(ApiError::MalformedResponse { .. })));
    }
}
