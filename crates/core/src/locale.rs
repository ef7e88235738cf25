use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SkillError;
use crate::resources;

pub const FALLBACK_LOCALE: &str = "en";

/// Resource key holding the ordered fact list of a locale.
pub const FACTS_KEY: &str = "PLANT_FACTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    Welcome,
    Fact,
    Help,
    Goodbye,
    Fallback,
    Error,
}

impl MessageKey {
    pub const ALL: [MessageKey; 6] = [
        Self::Welcome,
        Self::Fact,
        Self::Help,
        Self::Goodbye,
        Self::Fallback,
        Self::Error,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            Self::Welcome => "WELCOME_MESSAGE",
            Self::Fact => "FACT_MESSAGE",
            Self::Help => "HELP_MESSAGE",
            Self::Goodbye => "GOODBYE_MESSAGE",
            Self::Fallback => "FALLBACK_MESSAGE",
            Self::Error => "ERROR_MESSAGE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_key() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBundle {
    code: String,
    messages: BTreeMap<MessageKey, String>,
    facts: Vec<String>,
}

impl LocaleBundle {
    pub fn new(code: &str, messages: BTreeMap<MessageKey, String>, facts: Vec<String>) -> Self {
        Self {
            code: normalize_code(code),
            messages,
            facts,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self, key: MessageKey) -> Option<&str> {
        self.messages.get(&key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = MessageKey> + '_ {
        self.messages.keys().copied()
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    /// Renders the template for `key`, substituting `%s` placeholders in order.
    /// An undefined key renders as its own name.
    pub fn render(&self, key: MessageKey, args: &[&str]) -> String {
        match self.message(key) {
            Some(template) => render_template(template, args),
            None => key.as_key().to_string(),
        }
    }

    fn validate(&self) -> Result<(), SkillError> {
        let missing = MessageKey::ALL
            .into_iter()
            .filter(|key| !self.messages.contains_key(key))
            .map(MessageKey::as_key)
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(SkillError::MissingMessages {
                locale: self.code.clone(),
                missing: missing.join(", "),
            });
        }

        if self.facts.is_empty() {
            return Err(SkillError::EmptyFacts {
                locale: self.code.clone(),
            });
        }

        Ok(())
    }
}

/// Immutable set of locale bundles, always containing the `en` fallback.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    fallback: LocaleBundle,
    translations: BTreeMap<String, LocaleBundle>,
}

impl LocaleTable {
    /// Builds a table from arbitrary bundles. Every bundle must define all
    /// message keys and at least one fact, and an `en` bundle must exist.
    pub fn new(bundles: Vec<LocaleBundle>) -> Result<Self, SkillError> {
        let mut fallback = None;
        let mut translations = BTreeMap::new();

        for bundle in bundles {
            bundle.validate()?;
            let code = bundle.code.clone();
            let duplicate = if code == FALLBACK_LOCALE {
                fallback.replace(bundle).is_some()
            } else {
                translations.insert(code.clone(), bundle).is_some()
            };
            if duplicate {
                return Err(SkillError::DuplicateLocale(code));
            }
        }

        let fallback = fallback.ok_or(SkillError::MissingFallbackLocale)?;
        Ok(Self {
            fallback,
            translations,
        })
    }

    /// The resources compiled into the skill: English and Spanish.
    pub fn builtin() -> Self {
        let translations = resources::translations()
            .into_iter()
            .map(|bundle| (bundle.code.clone(), bundle))
            .collect();
        Self {
            fallback: resources::english(),
            translations,
        }
    }

    /// Parses resources laid out as
    /// `{ "<locale>": { "translation": { "<KEY>": "...", "PLANT_FACTS": [..] } } }`.
    pub fn from_json_str(raw: &str) -> Result<Self, SkillError> {
        let parsed: BTreeMap<String, ResourceEntry> = serde_json::from_str(raw)?;

        let mut bundles = Vec::with_capacity(parsed.len());
        for (code, entry) in parsed {
            let mut messages = BTreeMap::new();
            let mut facts = Vec::new();

            for (key, value) in entry.translation {
                if key == FACTS_KEY {
                    facts = match value {
                        ResourceValue::List(items) => items,
                        ResourceValue::Text(_) => {
                            return Err(shape_error(&code, &key, "list of strings"));
                        }
                    };
                } else if let Some(message_key) = MessageKey::parse(&key) {
                    match value {
                        ResourceValue::Text(template) => {
                            messages.insert(message_key, template);
                        }
                        ResourceValue::List(_) => {
                            return Err(shape_error(&code, &key, "string"));
                        }
                    }
                }
            }

            bundles.push(LocaleBundle::new(&code, messages, facts));
        }

        Self::new(bundles)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SkillError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SkillError::ResourceIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn fallback(&self) -> &LocaleBundle {
        &self.fallback
    }

    /// Picks the bundle for a request locale: the exact code, then its
    /// language subtag (`es-MX` -> `es`), then `en`. Never fails.
    pub fn resolve(&self, requested: Option<&str>) -> &LocaleBundle {
        let Some(requested) = requested.map(normalize_code).filter(|code| !code.is_empty())
        else {
            return &self.fallback;
        };

        self.lookup(&requested)
            .or_else(|| {
                requested
                    .split('-')
                    .next()
                    .and_then(|language| self.lookup(language))
            })
            .unwrap_or(&self.fallback)
    }

    /// Supported locale codes, fallback first.
    pub fn locales(&self) -> Vec<&str> {
        std::iter::once(self.fallback.code())
            .chain(self.translations.keys().map(String::as_str))
            .collect()
    }

    fn lookup(&self, code: &str) -> Option<&LocaleBundle> {
        if code == FALLBACK_LOCALE {
            Some(&self.fallback)
        } else {
            self.translations.get(code)
        }
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `sprintf`-style substitution limited to `%s` (positional, in order) and
/// `%%`. Placeholders without a matching argument are left in place.
pub fn render_template(template: &str, args: &[&str]) -> String {
    let extra = args.iter().map(|arg| arg.len()).sum::<usize>();
    let mut out = String::with_capacity(template.len() + extra);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '%' {
            match chars.peek() {
                Some(&'s') => {
                    chars.next();
                    out.push_str(args.next().copied().unwrap_or("%s"));
                    continue;
                }
                Some(&'%') => {
                    chars.next();
                    out.push('%');
                    continue;
                }
                _ => {}
            }
        }
        out.push(ch);
    }

    out
}

fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace('_', "-")
}

fn shape_error(locale: &str, key: &str, expected: &'static str) -> SkillError {
    SkillError::ResourceShape {
        locale: locale.to_string(),
        key: key.to_string(),
        expected,
    }
}

#[derive(Debug, Deserialize)]
struct ResourceEntry {
    translation: BTreeMap<String, ResourceValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceValue {
    Text(String),
    List(Vec<String>),
}
