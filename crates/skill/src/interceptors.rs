use std::sync::Arc;

use plantfacts_core::{LocaleTable, ResponseEnvelope};
use tracing::info;

use crate::input::{HandlerInput, Translator};

/// Runs before dispatch. Interceptors only populate attributes or log; they
/// cannot stop the pipeline.
pub trait RequestInterceptor: Send + Sync {
    fn process<'a>(&'a self, input: &mut HandlerInput<'a>);
}

/// Runs after the response is assembled, including error responses.
pub trait ResponseInterceptor: Send + Sync {
    fn process(&self, input: &HandlerInput<'_>, response: &ResponseEnvelope);
}

/// Attaches the translator for the request locale.
#[derive(Debug, Clone)]
pub struct LocalizationInterceptor {
    table: Arc<LocaleTable>,
}

impl LocalizationInterceptor {
    pub fn new(table: Arc<LocaleTable>) -> Self {
        Self { table }
    }
}

impl RequestInterceptor for LocalizationInterceptor {
    fn process<'a>(&'a self, input: &mut HandlerInput<'a>) {
        let bundle = self.table.resolve(input.request().locale.as_deref());
        input.attributes.translator = Some(Translator::new(bundle));
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRequestInterceptor;

impl RequestInterceptor for LoggingRequestInterceptor {
    fn process<'a>(&'a self, input: &mut HandlerInput<'a>) {
        info!(
            request = %to_log_json(input.request()),
            "incoming request"
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingResponseInterceptor;

impl ResponseInterceptor for LoggingResponseInterceptor {
    fn process(&self, _input: &HandlerInput<'_>, response: &ResponseEnvelope) {
        info!(
            response = %to_log_json(response),
            "outgoing response"
        );
    }
}

pub(crate) fn to_log_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}
