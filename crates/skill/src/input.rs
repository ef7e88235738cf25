use plantfacts_core::{InboundRequest, LocaleBundle, MessageKey, RequestEnvelope, SkillError};

use crate::facts::FactPicker;

/// Everything a handler sees for one request.
pub struct HandlerInput<'a> {
    pub envelope: &'a RequestEnvelope,
    pub attributes: RequestAttributes<'a>,
    picker: &'a dyn FactPicker,
}

/// Request-scoped values filled in by the request interceptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestAttributes<'a> {
    pub translator: Option<Translator<'a>>,
}

impl<'a> HandlerInput<'a> {
    pub fn new(envelope: &'a RequestEnvelope, picker: &'a dyn FactPicker) -> Self {
        Self {
            envelope,
            attributes: RequestAttributes::default(),
            picker,
        }
    }

    pub fn request(&self) -> &'a InboundRequest {
        &self.envelope.request
    }

    pub fn translator(&self) -> Result<Translator<'a>, SkillError> {
        self.attributes
            .translator
            .ok_or(SkillError::TranslatorMissing)
    }

    pub fn pick_fact<'f>(&self, facts: &'f [String]) -> Option<&'f str> {
        self.picker.pick(facts)
    }
}

/// Message lookup bound to the bundle resolved for the current request.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    bundle: &'a LocaleBundle,
}

impl<'a> Translator<'a> {
    pub fn new(bundle: &'a LocaleBundle) -> Self {
        Self { bundle }
    }

    pub fn locale(&self) -> &'a str {
        self.bundle.code()
    }

    pub fn t(&self, key: MessageKey) -> String {
        self.bundle.render(key, &[])
    }

    pub fn t_with(&self, key: MessageKey, args: &[&str]) -> String {
        self.bundle.render(key, args)
    }

    pub fn facts(&self) -> &'a [String] {
        self.bundle.facts()
    }
}
