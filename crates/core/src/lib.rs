pub mod error;
pub mod intent;
pub mod locale;
pub mod models;
mod resources;

pub use error::SkillError;
pub use intent::{intent_name, is_intent, is_intent_in, is_launch, is_session_ended};
pub use locale::{render_template, LocaleBundle, LocaleTable, MessageKey, FALLBACK_LOCALE};
pub use models::*;
