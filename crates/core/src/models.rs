use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ENVELOPE_VERSION: &str = "1.0";

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// The platform's outer request wrapper. `session` and `context` are never
/// inspected and are passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub request: InboundRequest,
}

impl RequestEnvelope {
    pub fn new(request: InboundRequest) -> Self {
        Self {
            version: default_version(),
            session: None,
            context: None,
            request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRequest", into = "WireRequest")]
pub struct InboundRequest {
    pub kind: RequestKind,
    pub locale: Option<String>,
    pub request_id: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Launch,
    Intent(IntentPayload),
    SessionEnded(SessionEndedDetails),
    /// Any request type this skill has no handler for, kept by its wire name.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Value>,
}

impl IntentPayload {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confirmation_status: None,
            slots: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionEndedDetails {
    pub reason: Option<String>,
    pub error: Option<Value>,
}

impl InboundRequest {
    pub fn new(kind: RequestKind, locale: Option<&str>) -> Self {
        Self {
            kind,
            locale: locale.map(ToString::to_string),
            request_id: None,
            timestamp: None,
        }
    }

    pub fn launch(locale: &str) -> Self {
        Self::new(RequestKind::Launch, Some(locale))
    }

    pub fn intent(name: &str, locale: &str) -> Self {
        Self::new(RequestKind::Intent(IntentPayload::named(name)), Some(locale))
    }

    pub fn session_ended(locale: &str) -> Self {
        Self::new(
            RequestKind::SessionEnded(SessionEndedDetails::default()),
            Some(locale),
        )
    }

    /// The wire name of the request type, e.g. `IntentRequest`.
    pub fn request_type(&self) -> &str {
        match &self.kind {
            RequestKind::Launch => LAUNCH_REQUEST,
            RequestKind::Intent(_) => INTENT_REQUEST,
            RequestKind::SessionEnded(_) => SESSION_ENDED_REQUEST,
            RequestKind::Other(request_type) => request_type,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(rename = "type")]
    request_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<IntentPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl From<WireRequest> for InboundRequest {
    fn from(wire: WireRequest) -> Self {
        let WireRequest {
            request_type,
            request_id,
            timestamp,
            locale,
            intent,
            reason,
            error,
        } = wire;

        let kind = if request_type == LAUNCH_REQUEST {
            RequestKind::Launch
        } else if request_type == SESSION_ENDED_REQUEST {
            RequestKind::SessionEnded(SessionEndedDetails { reason, error })
        } else {
            match intent {
                Some(intent) if request_type == INTENT_REQUEST && !intent.name.is_empty() => {
                    RequestKind::Intent(intent)
                }
                // An intent request without an intent name cannot be routed.
                _ => RequestKind::Other(request_type),
            }
        };

        Self {
            kind,
            locale,
            request_id,
            timestamp,
        }
    }
}

impl From<InboundRequest> for WireRequest {
    fn from(request: InboundRequest) -> Self {
        let request_type = request.request_type().to_string();
        let (intent, reason, error) = match request.kind {
            RequestKind::Intent(intent) => (Some(intent), None, None),
            RequestKind::SessionEnded(details) => (None, details.reason, details.error),
            RequestKind::Launch | RequestKind::Other(_) => (None, None, None),
        };

        Self {
            request_type,
            request_id: request.request_id,
            timestamp: request.timestamp,
            locale: request.locale,
            intent,
            reason,
            error,
        }
    }
}

/// Spoken output for one request. Text is kept plain here and rendered as
/// SSML when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "WireResponse")]
pub struct OutboundResponse {
    pub speech: Option<String>,
    pub reprompt: Option<String>,
    pub should_end_session: Option<bool>,
}

impl OutboundResponse {
    pub fn is_empty(&self) -> bool {
        self.speech.is_none() && self.reprompt.is_none() && self.should_end_session.is_none()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reprompt: Option<WireReprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    should_end_session: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireReprompt {
    output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        Self {
            speech_type: "SSML",
            ssml: format!("<speak>{}</speak>", escape_ssml(text)),
        }
    }
}

impl From<OutboundResponse> for WireResponse {
    fn from(response: OutboundResponse) -> Self {
        Self {
            output_speech: response.speech.as_deref().map(OutputSpeech::ssml),
            reprompt: response.reprompt.as_deref().map(|text| WireReprompt {
                output_speech: OutputSpeech::ssml(text),
            }),
            should_end_session: response.should_end_session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub user_agent: String,
    pub response: OutboundResponse,
}

impl ResponseEnvelope {
    pub fn new(response: OutboundResponse, user_agent: &str) -> Self {
        Self {
            version: default_version(),
            session_attributes: Map::new(),
            user_agent: user_agent.to_string(),
            response,
        }
    }
}

pub fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn default_version() -> String {
    ENVELOPE_VERSION.to_string()
}
