pub mod dispatch;
pub mod facts;
pub mod handlers;
pub mod input;
pub mod interceptors;
pub mod response;

use std::sync::Arc;
use std::time::Instant;

use plantfacts_core::{is_session_ended, LocaleTable, RequestEnvelope, ResponseEnvelope};
use plantfacts_observability::SkillMetrics;
use tracing::{info, instrument};

pub use dispatch::{Dispatcher, HandlerResult, Route, STANDARD_ROUTES};
pub use facts::{FactPicker, FixedFactPicker, RandomFactPicker};
pub use input::{HandlerInput, RequestAttributes, Translator};
pub use interceptors::{
    LocalizationInterceptor, LoggingRequestInterceptor, LoggingResponseInterceptor,
    RequestInterceptor, ResponseInterceptor,
};
pub use response::ResponseBuilder;

pub const DEFAULT_USER_AGENT_SUFFIX: &str = "sample/hello-world/v1.2";

/// The request pipeline: interceptors, dispatch, error handling.
/// Immutable once built and shared freely across threads.
pub struct Skill {
    table: Arc<LocaleTable>,
    dispatcher: Dispatcher,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    picker: Arc<dyn FactPicker>,
    metrics: Arc<SkillMetrics>,
    user_agent: String,
}

impl Skill {
    pub fn new(
        table: Arc<LocaleTable>,
        picker: Arc<dyn FactPicker>,
        metrics: Arc<SkillMetrics>,
    ) -> Self {
        Self {
            request_interceptors: vec![
                Box::new(LocalizationInterceptor::new(table.clone())),
                Box::new(LoggingRequestInterceptor),
            ],
            response_interceptors: vec![Box::new(LoggingResponseInterceptor)],
            table,
            dispatcher: Dispatcher::standard(),
            picker,
            metrics,
            user_agent: user_agent(DEFAULT_USER_AGENT_SUFFIX),
        }
    }

    /// Built-in locales, random facts, fresh counters.
    pub fn builtin() -> Self {
        Self::new(
            Arc::new(LocaleTable::builtin()),
            Arc::new(RandomFactPicker),
            SkillMetrics::shared(),
        )
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_user_agent_suffix(mut self, suffix: &str) -> Self {
        self.user_agent = user_agent(suffix);
        self
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    pub fn metrics(&self) -> &Arc<SkillMetrics> {
        &self.metrics
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Handles one envelope to completion. Handler failures never escape:
    /// they become the localized error response.
    #[instrument(
        skip(self, envelope),
        fields(
            request_type = %envelope.request.request_type(),
            request_id = envelope.request.request_id.as_deref().unwrap_or("-"),
        )
    )]
    pub fn invoke(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let started = Instant::now();
        self.metrics.inc_request();

        let mut input = HandlerInput::new(envelope, self.picker.as_ref());
        for interceptor in &self.request_interceptors {
            interceptor.process(&mut input);
        }

        let response = match self.dispatcher.dispatch(&input) {
            Ok(response) => response,
            Err(failure) => {
                self.metrics.inc_handler_error();
                handlers::error_response(&input, &failure, &self.table)
            }
        };

        let outgoing = ResponseEnvelope::new(response, &self.user_agent);
        for interceptor in &self.response_interceptors {
            interceptor.process(&input, &outgoing);
        }

        if is_session_ended(&envelope.request) {
            self.metrics.inc_session_ended();
        }
        self.metrics.observe_latency(started.elapsed());
        info!(
            locale = envelope.request.locale.as_deref().unwrap_or("-"),
            has_speech = outgoing.response.speech.is_some(),
            "request handled"
        );

        outgoing
    }
}

fn user_agent(suffix: &str) -> String {
    let base = format!("plantfacts-skill/{}", env!("CARGO_PKG_VERSION"));
    match suffix.trim() {
        "" => base,
        suffix => format!("{base} {suffix}"),
    }
}
