//! Number prefix parsing for file and directory names.
//!
//! Authors order autogenerated sidebars by prefixing names with a number
//! (`01-intro.md`, `2_guides/`). The prefix is stripped from ids and labels
//! and used as the default sort position.

use std::sync::LazyLock;

use regex::Regex;

static NUMBER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<number>\d+)\s*[-_.]+\s*(?P<rest>[^-_.\s].*)$").unwrap());

/// Names that start like dates (`2021-01-31-post`) or versions (`1.2-release`).
static IGNORED_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[-_.]+\d").unwrap());

/// A name split into its number prefix and the remaining name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPrefix<'a> {
    /// Parsed prefix, `None` when the name has none.
    pub number: Option<u32>,
    /// Name without the prefix.
    pub name: &'a str,
}

/// Split a number prefix off a file or directory name.
///
/// # Examples
///
/// ```
/// use sidebars_catalog::strip_number_prefix;
///
/// assert_eq!(strip_number_prefix("01-intro").number, Some(1));
/// assert_eq!(strip_number_prefix("01-intro").name, "intro");
/// assert_eq!(strip_number_prefix("2021-01-31-post").name, "2021-01-31-post");
/// ```
#[must_use]
pub fn strip_number_prefix(name: &str) -> NumberPrefix<'_> {
    let unprefixed = NumberPrefix { number: None, name };
    if IGNORED_PREFIX_RE.is_match(name) {
        return unprefixed;
    }
    let Some(caps) = NUMBER_PREFIX_RE.captures(name) else {
        return unprefixed;
    };
    let (Some(number), Some(rest)) = (caps.name("number"), caps.name("rest")) else {
        return unprefixed;
    };
    match number.as_str().parse() {
        Ok(number) => NumberPrefix {
            number: Some(number),
            name: &name[rest.start()..],
        },
        Err(_) => unprefixed,
    }
}
