//! Message templates with named placeholders
//!
//! A template such as `"Must be at least {min_length} characters long"` is
//! rendered once, when the field is declared, against the bounds bound to
//! that field. Bounds never change afterwards, so the rendered text is what
//! every failing evaluation reports.
//!
//! Only the names in [`PLACEHOLDERS`] are recognised. A template naming any
//! other placeholder, or one the field has no value for, is rejected at
//! definition time.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::errors::{DefinitionError, DefinitionResult};

/// Placeholder names a template may reference
pub const PLACEHOLDERS: [&str; 6] = [
    "min_value",
    "max_value",
    "min_length",
    "max_length",
    "min_date",
    "max_date",
];

static PLACEHOLDER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PLACEHOLDER_PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern compiles")
    })
}

/// Values available for substitution, keyed by placeholder name.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(&'static str, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to the display form of `value`. Binding the same name
    /// twice keeps the latest value.
    pub fn bind(&mut self, name: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders `template` against `bindings`.
pub fn render(template: &str, bindings: &Bindings) -> DefinitionResult<String> {
    for caps in pattern().captures_iter(template) {
        let name = &caps[1];
        if !PLACEHOLDERS.contains(&name) {
            return Err(DefinitionError::UnknownPlaceholder {
                placeholder: name.to_string(),
                template: template.to_string(),
            });
        }
        if bindings.get(name).is_none() {
            return Err(DefinitionError::UnboundPlaceholder {
                placeholder: name.to_string(),
                template: template.to_string(),
            });
        }
    }

    let rendered = pattern().replace_all(template, |caps: &Captures| {
        bindings.get(&caps[1]).unwrap_or_default().to_string()
    });
    Ok(rendered.into_owned())
}
