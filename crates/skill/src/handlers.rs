//! One handler per request category. Every handler except the error handler
//! expects the localization interceptor to have attached a translator.

use plantfacts_core::{
    intent_name, LocaleTable, MessageKey, OutboundResponse, RequestKind, SkillError,
};
use tracing::{error, info};

use crate::dispatch::HandlerResult;
use crate::input::{HandlerInput, Translator};
use crate::interceptors::to_log_json;
use crate::response::ResponseBuilder;

pub fn launch(input: &HandlerInput<'_>) -> HandlerResult {
    let speech = input.translator()?.t(MessageKey::Welcome);
    Ok(ResponseBuilder::new()
        .speak(speech.clone())
        .reprompt(speech)
        .build())
}

pub fn hello_world(input: &HandlerInput<'_>) -> HandlerResult {
    speak_random_fact(input, "HelloWorldIntentHandler")
}

pub fn help(input: &HandlerInput<'_>) -> HandlerResult {
    let speech = input.translator()?.t(MessageKey::Help);
    Ok(ResponseBuilder::new()
        .speak(speech.clone())
        .reprompt(speech)
        .build())
}

pub fn cancel_and_stop(input: &HandlerInput<'_>) -> HandlerResult {
    let speech = input.translator()?.t(MessageKey::Goodbye);
    Ok(ResponseBuilder::new().speak(speech).build())
}

/// Utterances that map to no intent of the interaction model.
pub fn fallback(input: &HandlerInput<'_>) -> HandlerResult {
    let speech = input.translator()?.t(MessageKey::Fallback);
    Ok(ResponseBuilder::new()
        .speak(speech.clone())
        .reprompt(speech)
        .build())
}

/// No output is allowed once the session is over.
pub fn session_ended(input: &HandlerInput<'_>) -> HandlerResult {
    input.translator()?;

    let reason = match &input.request().kind {
        RequestKind::SessionEnded(details) => details.reason.as_deref(),
        _ => None,
    };
    info!(
        reason = reason.unwrap_or("unspecified"),
        envelope = %to_log_json(input.envelope),
        "session ended"
    );

    Ok(ResponseBuilder::new().build())
}

pub fn plant_fact(input: &HandlerInput<'_>) -> HandlerResult {
    speak_random_fact(input, "PlantFactIntentHandler")
}

/// Echoes the intent name for interaction-model debugging. Not localized.
pub fn intent_reflector(input: &HandlerInput<'_>) -> HandlerResult {
    input.translator()?;

    let name = intent_name(input.request()).ok_or_else(|| SkillError::Handler {
        handler: "IntentReflectorHandler",
        message: "request carries no intent".to_string(),
    })?;
    Ok(ResponseBuilder::new()
        .speak(format!("You just triggered {name}"))
        .build())
}

/// Converts any failure into the localized error message. Falls back to
/// resolving the locale itself when no translator was attached.
pub fn error_response(
    input: &HandlerInput<'_>,
    failure: &SkillError,
    table: &LocaleTable,
) -> OutboundResponse {
    let translator = input
        .translator()
        .unwrap_or_else(|_| Translator::new(table.resolve(input.request().locale.as_deref())));

    error!(
        error = %failure,
        handler_failure = failure.is_handler_failure(),
        locale = translator.locale(),
        request_type = input.request().request_type(),
        "error handled"
    );

    let speech = translator.t(MessageKey::Error);
    ResponseBuilder::new()
        .speak(speech.clone())
        .reprompt(speech)
        .build()
}

fn speak_random_fact(input: &HandlerInput<'_>, handler: &'static str) -> HandlerResult {
    let translator = input.translator()?;
    let fact = input
        .pick_fact(translator.facts())
        .ok_or_else(|| SkillError::Handler {
            handler,
            message: format!("locale `{}` has no plant facts", translator.locale()),
        })?;

    Ok(ResponseBuilder::new()
        .speak(translator.t_with(MessageKey::Fact, &[fact]))
        .build())
}
