use crate::models::{InboundRequest, RequestKind};

pub const HELLO_WORLD_INTENT: &str = "HelloWorldIntent";
pub const PLANT_FACT_INTENT: &str = "PlantFactIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

pub fn is_launch(request: &InboundRequest) -> bool {
    matches!(request.kind, RequestKind::Launch)
}

pub fn is_session_ended(request: &InboundRequest) -> bool {
    matches!(request.kind, RequestKind::SessionEnded(_))
}

/// Name of the triggered intent, or `None` for any other request type.
pub fn intent_name(request: &InboundRequest) -> Option<&str> {
    match &request.kind {
        RequestKind::Intent(intent) => Some(intent.name.as_str()),
        _ => None,
    }
}

pub fn is_intent(request: &InboundRequest, name: &str) -> bool {
    intent_name(request) == Some(name)
}

pub fn is_intent_in(request: &InboundRequest, names: &[&str]) -> bool {
    intent_name(request).is_some_and(|intent| contains_exact(names, intent))
}

fn contains_exact(names: &[&str], needle: &str) -> bool {
    names.iter().any(|name| *name == needle)
}
