use std::collections::BTreeMap;

use crate::locale::{LocaleBundle, MessageKey};

const EN_MESSAGES: [(MessageKey, &str); 6] = [
    (MessageKey::Welcome, "Welcome Vite! Ask me for a plant fact."),
    (MessageKey::Fact, "Vite, here is your plant fact: %s"),
    (MessageKey::Help, "Vite, you can ask me for a plant fact."),
    (MessageKey::Goodbye, "Goodbye Vite!"),
    (
        MessageKey::Fallback,
        "Sorry, I don't know about that. Please try again Vite.",
    ),
    (
        MessageKey::Error,
        "Sorry, there was an error. Please try again Vite.",
    ),
];

const EN_FACTS: [&str; 8] = [
    "Plants can communicate with each other through chemical signals.",
    "Some plants mimic the shape or smell of other plants or insects to attract specific pollinators or avoid being eaten.",
    "The oldest known plant is a Bristlecone pine in California, USA, which is over 5,000 years old.",
    "Plants not only produce oxygen during photosynthesis but can also absorb air pollutants.",
    "Plants can communicate through their root systems by sending chemical and electrical signals.",
    "Some plants, like cacti, are adapted to survive in arid environments by storing water in their tissues.",
    "Plants can show rapid responses to stimuli, such as the folding leaves of Mimosa pudica when touched.",
    "Mycorrhizae are symbiotic associations between fungi and plant roots that enhance nutrient and water absorption.",
];

const ES_MESSAGES: [(MessageKey, &str); 6] = [
    (
        MessageKey::Welcome,
        "¡Bienvenida Vite! Pídeme un dato curioso sobre las plantas.",
    ),
    (
        MessageKey::Fact,
        "Vite, aquí tienes un dato curioso sobre las plantas: %s",
    ),
    (
        MessageKey::Help,
        "Vite, puedes pedirme un dato curioso sobre las plantas.",
    ),
    (MessageKey::Goodbye, "¡Adiós Vite!"),
    (
        MessageKey::Fallback,
        "Lo siento, no sé sobre eso. Por favor intenta de nuevo Vite.",
    ),
    (
        MessageKey::Error,
        "Lo siento, ha ocurrido un error. Por favor intenta de nuevo Vite.",
    ),
];

const ES_FACTS: [&str; 8] = [
    "Las plantas pueden comunicarse entre sí a través de señales químicas.",
    "Algunas plantas imitan la forma o el olor de otras plantas o insectos para atraer polinizadores específicos o evitar ser comidas.",
    "La planta más antigua conocida es un pino Bristlecone en California, EE.UU., que tiene más de 5,000 años de edad.",
    "Las plantas no solo producen oxígeno durante la fotosíntesis, sino que también pueden absorber contaminantes del aire.",
    "Las plantas pueden comunicarse a través de sus sistemas de raíces, enviando señales químicas y eléctricas.",
    "Algunas plantas, como los cactus, están adaptadas para sobrevivir en entornos áridos acumulando agua en sus tejidos.",
    "Las plantas pueden mostrar respuestas rápidas a estímulos, como las hojas de Mimosa pudica que se pliegan al tocarlas.",
    "Las micorrizas son asociaciones simbióticas entre hongos y raíces de plantas que mejoran la absorción de nutrientes y agua.",
];

pub(crate) fn english() -> LocaleBundle {
    bundle("en", &EN_MESSAGES, &EN_FACTS)
}

/// Every built-in locale other than the `en` fallback.
pub(crate) fn translations() -> Vec<LocaleBundle> {
    vec![bundle("es", &ES_MESSAGES, &ES_FACTS)]
}

fn bundle(code: &str, messages: &[(MessageKey, &str)], facts: &[&str]) -> LocaleBundle {
    let messages = messages
        .iter()
        .map(|(key, template)| (*key, template.to_string()))
        .collect::<BTreeMap<_, _>>();
    let facts = facts.iter().map(|fact| fact.to_string()).collect();
    LocaleBundle::new(code, messages, facts)
}
