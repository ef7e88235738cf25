use plantfacts_core::OutboundResponse;

/// Fluent builder over [`OutboundResponse`], following the platform's
/// response builder: adding a reprompt keeps the session open.
#[derive(Debug, Default, Clone)]
pub struct ResponseBuilder {
    response: OutboundResponse,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.response.speech = Some(text.into());
        self
    }

    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(text.into());
        self.response.should_end_session = Some(false);
        self
    }

    pub fn build(self) -> OutboundResponse {
        self.response
    }
}
