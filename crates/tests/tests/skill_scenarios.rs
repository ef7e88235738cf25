use std::collections::BTreeSet;
use std::sync::Arc;

use plantfacts_core::{
    InboundRequest, LocaleTable, MessageKey, OutboundResponse, RequestEnvelope, RequestKind,
    SkillError,
};
use plantfacts_observability::SkillMetrics;
use plantfacts_skill::{Dispatcher, FixedFactPicker, Route, Skill, STANDARD_ROUTES};

fn invoke(skill: &Skill, request: InboundRequest) -> OutboundResponse {
    skill.invoke(&RequestEnvelope::new(request)).response
}

#[test]
fn launch_in_english_welcomes_vite() {
    let response = invoke(&Skill::builtin(), InboundRequest::launch("en"));

    let welcome = "Welcome Vite! Ask me for a plant fact.";
    assert_eq!(response.speech.as_deref(), Some(welcome));
    assert_eq!(response.reprompt.as_deref(), Some(welcome));
}

#[test]
fn help_in_spanish_is_localized() {
    let response = invoke(
        &Skill::builtin(),
        InboundRequest::intent("AMAZON.HelpIntent", "es"),
    );

    let help = "Vite, puedes pedirme un dato curioso sobre las plantas.";
    assert_eq!(response.speech.as_deref(), Some(help));
    assert_eq!(response.reprompt.as_deref(), Some(help));
}

#[test]
fn unknown_intent_is_reflected_without_reprompt() {
    let response = invoke(
        &Skill::builtin(),
        InboundRequest::intent("UnknownIntent", "en"),
    );

    assert_eq!(
        response.speech.as_deref(),
        Some("You just triggered UnknownIntent")
    );
    assert_eq!(response.reprompt, None);
}

#[test]
fn session_end_is_silent_in_every_locale() {
    let skill = Skill::builtin();
    for locale in ["en-US", "es-ES", "fr-FR"] {
        let response = invoke(&skill, InboundRequest::session_ended(locale));
        assert_eq!(response.speech, None);
        assert_eq!(response.reprompt, None);
    }
}

#[test]
fn fixed_text_dispatch_is_deterministic() {
    let skill = Skill::builtin();
    let table = LocaleTable::builtin();

    let cases = [
        ("AMAZON.CancelIntent", MessageKey::Goodbye),
        ("AMAZON.StopIntent", MessageKey::Goodbye),
        ("AMAZON.FallbackIntent", MessageKey::Fallback),
        ("AMAZON.HelpIntent", MessageKey::Help),
    ];

    for locale in ["en", "es"] {
        for (intent, key) in cases {
            let first = invoke(&skill, InboundRequest::intent(intent, locale));
            let second = invoke(&skill, InboundRequest::intent(intent, locale));
            assert_eq!(first, second);
            assert_eq!(
                first.speech.as_deref(),
                table.resolve(Some(locale)).message(key)
            );
        }
    }
}

#[test]
fn fact_intents_speak_a_fact_from_the_locale() {
    let skill = Skill::builtin();
    let table = LocaleTable::builtin();

    for locale in ["en-US", "es-ES"] {
        let bundle = table.resolve(Some(locale));
        let spoken = bundle
            .facts()
            .iter()
            .map(|fact| bundle.render(MessageKey::Fact, &[fact.as_str()]))
            .collect::<BTreeSet<_>>();

        for intent in ["HelloWorldIntent", "PlantFactIntent"] {
            for _ in 0..20 {
                let response = invoke(&skill, InboundRequest::intent(intent, locale));
                let speech = response.speech.expect("fact handlers always speak");
                assert!(spoken.contains(&speech), "unexpected fact speech: {speech}");
                assert_eq!(response.reprompt, None);
            }
        }
    }
}

#[test]
fn pinned_picker_selects_that_fact() {
    let skill = Skill::new(
        Arc::new(LocaleTable::builtin()),
        Arc::new(FixedFactPicker(0)),
        SkillMetrics::shared(),
    );

    let response = invoke(&skill, InboundRequest::intent("PlantFactIntent", "es-MX"));
    assert_eq!(
        response.speech.as_deref(),
        Some("Vite, aquí tienes un dato curioso sobre las plantas: Las plantas pueden comunicarse entre sí a través de señales químicas.")
    );
}

#[test]
fn handler_failure_speaks_localized_error() {
    let mut routes = vec![Route {
        name: "BrokenLaunchHandler",
        can_handle: |request| matches!(request.kind, RequestKind::Launch),
        handle: |_| {
            Err(SkillError::Handler {
                handler: "BrokenLaunchHandler",
                message: "resource unavailable".to_string(),
            })
        },
    }];
    routes.extend(STANDARD_ROUTES);
    let skill = Skill::builtin().with_dispatcher(Dispatcher::new(routes));

    for (locale, expected) in [
        ("en-GB", "Sorry, there was an error. Please try again Vite."),
        (
            "es-ES",
            "Lo siento, ha ocurrido un error. Por favor intenta de nuevo Vite.",
        ),
    ] {
        let response = invoke(&skill, InboundRequest::launch(locale));
        assert_eq!(response.speech.as_deref(), Some(expected));
        assert_eq!(response.reprompt.as_deref(), Some(expected));
        assert_eq!(response.should_end_session, Some(false));
    }

    // Routes after the broken one still serve their requests.
    let help = invoke(&skill, InboundRequest::intent("AMAZON.HelpIntent", "en"));
    assert_eq!(
        help.speech.as_deref(),
        Some("Vite, you can ask me for a plant fact.")
    );
}

#[test]
fn unsupported_locale_is_served_in_english() {
    let response = invoke(&Skill::builtin(), InboundRequest::launch("de-DE"));
    assert_eq!(
        response.speech.as_deref(),
        Some("Welcome Vite! Ask me for a plant fact.")
    );
}

#[test]
fn request_without_locale_is_served_in_english() {
    let request = InboundRequest::new(RequestKind::Launch, None);
    let response = invoke(&Skill::builtin(), request);
    assert_eq!(
        response.speech.as_deref(),
        Some("Welcome Vite! Ask me for a plant fact.")
    );
}
