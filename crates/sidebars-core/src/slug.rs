//! GitHub-style slug generation.
//!
//! A [`Slugger`] remembers every slug it has produced and disambiguates
//! repeats with a numeric suffix, so one instance must be scoped to a
//! single sidebars load.

use std::collections::HashMap;

/// Stateful slug generator.
///
/// # Example
///
/// ```
/// use sidebars_core::Slugger;
///
/// let mut slugger = Slugger::new();
/// assert_eq!(slugger.slug("Getting Started"), "getting-started");
/// assert_eq!(slugger.slug("Getting Started"), "getting-started-1");
/// ```
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    /// Create a slugger with no recorded slugs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `value`, appending `-1`, `-2`, ... if the slug was seen before.
    pub fn slug(&mut self, value: &str) -> String {
        let original = slugify(value);
        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_default();
            *count += 1;
            result = format!("{original}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }
}

/// Lowercase, drop punctuation except `-` and `_`, replace spaces with `-`.
fn slugify(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}
