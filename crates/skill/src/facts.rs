use rand::rng;
use rand::seq::IndexedRandom;

/// Chooses which fact of a locale's list gets spoken.
pub trait FactPicker: Send + Sync {
    /// Returns `None` only for an empty list.
    fn pick<'f>(&self, facts: &'f [String]) -> Option<&'f str>;
}

/// Uniform pick from the thread-local generator; independent per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFactPicker;

impl FactPicker for RandomFactPicker {
    fn pick<'f>(&self, facts: &'f [String]) -> Option<&'f str> {
        facts.choose(&mut rng()).map(String::as_str)
    }
}

/// Always picks the same position, clamped to the list length.
#[derive(Debug, Clone, Copy)]
pub struct FixedFactPicker(pub usize);

impl FactPicker for FixedFactPicker {
    fn pick<'f>(&self, facts: &'f [String]) -> Option<&'f str> {
        facts
            .get(self.0.min(facts.len().saturating_sub(1)))
            .map(String::as_str)
    }
}
