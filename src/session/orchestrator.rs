//! Session orchestrator.
//!
//! [`FixClient`] owns the session slot and the HTTP seam. One `submit` call is
//! one session: it validates input, claims the slot, sends the request, feeds
//! the response through the line pipeline into a [`ProgressMachine`], and
//! always finishes by releasing the slot and calling `on_idle`.

use futures_util::StreamExt;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ClientConfig, ResponseMode};
use crate::sse::{
    event_lines, parse_legacy_body, EventRecord, LineOutcome, StreamItem, StreamWarning,
};
use crate::traits::{Headers, HttpClient, HttpError, RenderSink};

use super::progress::ProgressMachine;
use super::slot::{AbortSignal, SessionSlot};
use super::state::{FailureReason, SessionOutcome, SubmitError};

/// Request body sent to the fix service.
#[derive(Debug, Serialize)]
struct FixRequest<'a> {
    code: &'a str,
    error: &'a str,
}

/// Client for the fix service.
///
/// # Example
///
/// ```ignore
/// use fixstream::adapters::ReqwestHttpClient;
/// use fixstream::config::ClientConfig;
/// use fixstream::session::FixClient;
///
/// let config = ClientConfig::from_env();
/// let client = FixClient::new(ReqwestHttpClient::from_config(&config)?, config);
/// let outcome = client.submit(code, error_text, &mut sink).await?;
/// ```
#[derive(Debug)]
pub struct FixClient<C: HttpClient> {
    http: C,
    config: ClientConfig,
    slot: SessionSlot,
}

impl<C: HttpClient> FixClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            slot: SessionSlot::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a session currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    /// Cancel the active session, if any.
    ///
    /// The session's pending read is abandoned and it ends as
    /// `Failed(Cancelled)`; cleanup still runs. Returns whether a session was
    /// signalled.
    pub fn abort(&self) -> bool {
        let signalled = self.slot.abort();
        if signalled {
            tracing::info!("abort requested for active session");
        }
        signalled
    }

    /// Number of sessions that have finished and released the slot.
    pub fn sessions_released(&self) -> u64 {
        self.slot.released_count()
    }

    /// Submit `code` and its error context and drive the session to its end.
    ///
    /// Rejections (`EmptyCode`, `Busy`) happen before any network activity
    /// and leave the sink untouched. Every accepted submission returns an
    /// outcome in a terminal state, whatever the transport did.
    pub async fn submit(
        &self,
        code: &str,
        error_context: &str,
        sink: &mut dyn RenderSink,
    ) -> Result<SessionOutcome, SubmitError> {
        if code.trim().is_empty() {
            return Err(SubmitError::EmptyCode);
        }

        let guard = match self.slot.try_acquire() {
            Some(guard) => guard,
            None => {
                tracing::warn!("submission rejected: session already in progress");
                return Err(SubmitError::Busy);
            }
        };

        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("session", id = %session_id, mode = ?self.config.mode);
        let request = FixRequest {
            code,
            error: error_context,
        };

        let outcome = self
            .run(session_id, &request, guard.abort_signal(), &mut *sink)
            .instrument(span.clone())
            .await;

        drop(guard);
        sink.on_idle();
        span.in_scope(|| {
            tracing::info!(
                state = outcome.state.name(),
                dispatched = outcome.dispatched,
                warnings = outcome.warnings.len(),
                "session finished"
            );
        });

        Ok(outcome)
    }

    async fn run(
        &self,
        session_id: Uuid,
        request: &FixRequest<'_>,
        mut abort: AbortSignal,
        sink: &mut dyn RenderSink,
    ) -> SessionOutcome {
        let mut machine = ProgressMachine::new(sink);
        let mut warnings = Vec::new();
        machine.start();

        let cancelled = tokio::select! {
            biased;
            _ = abort.aborted() => true,
            _ = self.drive(request, &mut machine, &mut warnings) => false,
        };
        if cancelled {
            machine.fail(FailureReason::Cancelled);
        }

        let (state, progress, dispatched) = machine.finish();
        SessionOutcome {
            session_id,
            state,
            warnings,
            dispatched,
            progress,
        }
    }

    async fn drive(
        &self,
        request: &FixRequest<'_>,
        machine: &mut ProgressMachine<'_>,
        warnings: &mut Vec<StreamWarning>,
    ) {
        let body = match serde_json::to_string(request) {
            Ok(body) => body,
            Err(e) => {
                machine.fail(HttpError::Other(format!("failed to encode request: {}", e)).into());
                return;
            }
        };

        tracing::debug!(endpoint = %self.config.endpoint, bytes = body.len(), "sending request");
        match self.config.mode {
            ResponseMode::Streaming => self.drive_stream(&body, machine, warnings).await,
            ResponseMode::Legacy => self.drive_legacy(&body, machine).await,
        }
    }

    async fn drive_stream(
        &self,
        body: &str,
        machine: &mut ProgressMachine<'_>,
        warnings: &mut Vec<StreamWarning>,
    ) {
        let headers = request_headers(ResponseMode::Streaming);
        let chunks = match self
            .http
            .post_stream(&self.config.endpoint, body, &headers)
            .await
        {
            Ok(chunks) => chunks,
            Err(e) => {
                machine.fail(e.into());
                return;
            }
        };

        let mut items = event_lines(chunks);
        while let Some(item) = items.next().await {
            match item {
                Ok(StreamItem::Line { line, outcome }) => {
                    handle_line(line, outcome, machine, warnings);
                }
                Ok(StreamItem::Warning(warning)) => record_warning(warnings, warning),
                Err(e) => {
                    if machine.is_terminal() {
                        tracing::warn!(
                            code = e.error_code(),
                            "transport error after final result: {}",
                            e
                        );
                    } else {
                        machine.fail(e.into());
                    }
                    return;
                }
            }
        }

        machine.end_of_stream();
    }

    async fn drive_legacy(&self, body: &str, machine: &mut ProgressMachine<'_>) {
        let headers = request_headers(ResponseMode::Legacy);
        let response = match self.http.post(&self.config.endpoint, body, &headers).await {
            Ok(response) => response,
            Err(e) => {
                machine.fail(e.into());
                return;
            }
        };

        if !response.is_success() {
            let message = response.text().unwrap_or_default();
            machine.fail(
                HttpError::ServerError {
                    status: response.status,
                    message,
                }
                .into(),
            );
            return;
        }

        machine.line_received();
        match parse_legacy_body(&response.body) {
            Ok(result) => {
                machine.apply(EventRecord::Terminal(result));
            }
            Err(e) => {
                machine.fail(HttpError::InvalidBody(e.to_string()).into());
            }
        }
    }
}

fn request_headers(mode: ResponseMode) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    let accept = match mode {
        ResponseMode::Streaming => "text/event-stream",
        ResponseMode::Legacy => "application/json",
    };
    headers.insert("Accept".to_string(), accept.to_string());
    headers
}

/// Route one framed line through the state machine.
fn handle_line(
    line: String,
    outcome: LineOutcome,
    machine: &mut ProgressMachine<'_>,
    warnings: &mut Vec<StreamWarning>,
) {
    machine.line_received();

    match outcome {
        LineOutcome::Ignored => {}
        LineOutcome::Unrecognized => {
            tracing::debug!(line = %line, "unrecognized payload skipped");
        }
        LineOutcome::Rejected(warning) => record_warning(warnings, warning),
        LineOutcome::Records(records) => {
            for record in records {
                if machine.is_terminal() {
                    record_warning(warnings, StreamWarning::AfterTerminal { line });
                    return;
                }
                machine.apply(record);
            }
        }
    }
}

fn record_warning(warnings: &mut Vec<StreamWarning>, warning: StreamWarning) {
    tracing::warn!(code = warning.warning_code(), "{}", warning);
    warnings.push(warning);
}
