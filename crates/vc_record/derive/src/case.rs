//! `rename_all` policies, resolved at expansion time.

use proc_macro2::Span;

/// A `rename_all` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Verbatim,
    LowerCamelCase,
    UpperCamelCase,
    SnakeCase,
    KebabCase,
    ScreamingSnakeCase,
}

impl RenameRule {
    pub(crate) fn parse(value: &str, span: Span) -> syn::Result<Self> {
        Ok(match value {
            "verbatim" => Self::Verbatim,
            "camelCase" | "lowerCamelCase" => Self::LowerCamelCase,
            "PascalCase" | "UpperCamelCase" => Self::UpperCamelCase,
            "snake_case" => Self::SnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            _ => {
                return Err(syn::Error::new(
                    span,
                    format!(
                        "unknown rename rule `{value}`, expected one of: verbatim, camelCase, \
                         PascalCase, snake_case, kebab-case, SCREAMING_SNAKE_CASE"
                    ),
                ));
            }
        })
    }

    /// The matching `NamingPolicy` variant.
    pub(crate) fn policy_variant(self) -> &'static str {
        match self {
            Self::Verbatim => "Verbatim",
            Self::LowerCamelCase => "LowerCamelCase",
            Self::UpperCamelCase => "UpperCamelCase",
            Self::SnakeCase => "SnakeCase",
            Self::KebabCase => "KebabCase",
            Self::ScreamingSnakeCase => "ScreamingSnakeCase",
        }
    }

    /// Renames an enum variant, written in `UpperCamelCase`.
    pub(crate) fn apply(self, name: &str) -> String {
        let words = split_words(name);
        let mut out = String::with_capacity(name.len() + words.len());
        match self {
            Self::Verbatim => out.push_str(name),
            Self::LowerCamelCase | Self::UpperCamelCase => {
                for (i, word) in words.iter().enumerate() {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        if i == 0 && self == Self::LowerCamelCase {
                            out.extend(first.to_lowercase());
                        } else {
                            out.extend(first.to_uppercase());
                        }
                        out.extend(chars.flat_map(char::to_lowercase));
                    }
                }
            }
            Self::SnakeCase | Self::KebabCase | Self::ScreamingSnakeCase => {
                let sep = if self == Self::KebabCase { '-' } else { '_' };
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        out.push(sep);
                    }
                    if self == Self::ScreamingSnakeCase {
                        out.extend(word.chars().flat_map(char::to_uppercase));
                    } else {
                        out.extend(word.chars().flat_map(char::to_lowercase));
                    }
                }
            }
        }
        out
    }
}

/// Splits at `_`, `-`, lower-to-upper and digit-to-upper transitions, and
/// before the last capital of an acronym followed by a lower-case letter.
fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &(at, c)) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if let Some(s) = start.take() {
                words.push(&name[s..at]);
            }
            continue;
        }
        if let Some(s) = start
            && c.is_uppercase()
            && i > 0
        {
            let prev = chars[i - 1].1;
            let next_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                words.push(&name[s..at]);
                start = Some(at);
                continue;
            }
        }
        if start.is_none() {
            start = Some(at);
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}
