use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// How a member's model name becomes its wire key.
///
/// Keys are computed once when the type model is built.
///
/// | policy | `user_id` becomes |
/// |---|---|
/// | `Verbatim` | `user_id` |
/// | `LowerCamelCase` | `userId` |
/// | `UpperCamelCase` | `UserId` |
/// | `SnakeCase` | `user_id` |
/// | `KebabCase` | `user-id` |
/// | `ScreamingSnakeCase` | `USER_ID` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
    #[default]
    Verbatim,
    LowerCamelCase,
    UpperCamelCase,
    SnakeCase,
    KebabCase,
    ScreamingSnakeCase,
}

impl NamingPolicy {
    /// Converts `name` into a key under this policy.
    ///
    /// Words are split on `_`, `-`, and lower-to-upper case transitions.
    /// An upper-case run followed by a lower-case letter ends one word
    /// early, so `HTTPServer` splits into `HTTP` and `Server`.
    pub fn apply(self, name: &str) -> String {
        if self == Self::Verbatim {
            return String::from(name);
        }
        let words = split_words(name);
        let mut out = String::with_capacity(name.len() + words.len());
        for (i, word) in words.iter().enumerate() {
            match self {
                Self::Verbatim => unreachable!(),
                Self::LowerCamelCase if i == 0 => out.extend(word.chars().flat_map(char::to_lowercase)),
                Self::LowerCamelCase | Self::UpperCamelCase => capitalize(word, &mut out),
                Self::SnakeCase | Self::KebabCase => {
                    if i > 0 {
                        out.push(if self == Self::SnakeCase { '_' } else { '-' });
                    }
                    out.extend(word.chars().flat_map(char::to_lowercase));
                }
                Self::ScreamingSnakeCase => {
                    if i > 0 {
                        out.push('_');
                    }
                    out.extend(word.chars().flat_map(char::to_uppercase));
                }
            }
        }
        out
    }
}

fn capitalize(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.extend(chars.flat_map(char::to_lowercase));
    }
}

fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut start = None::<usize>;
    for (i, &(at, c)) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if let Some(s) = start.take() {
                words.push(&name[s..at]);
            }
            continue;
        }
        let Some(s) = start else {
            start = Some(at);
            continue;
        };
        let prev = chars[i - 1].1;
        let next_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
        let boundary = c.is_uppercase()
            && (prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower));
        if boundary {
            words.push(&name[s..at]);
            start = Some(at);
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

/// An unrecognized policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(pub String);

impl fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown naming policy `{}`", self.0)
    }
}

impl core::error::Error for UnknownPolicy {}

impl FromStr for NamingPolicy {
    type Err = UnknownPolicy;

    /// Accepts the spellings used by `#[record(rename_all = "...")]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "verbatim" => Self::Verbatim,
            "camelCase" | "lowerCamelCase" => Self::LowerCamelCase,
            "PascalCase" | "UpperCamelCase" => Self::UpperCamelCase,
            "snake_case" => Self::SnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            _ => return Err(UnknownPolicy(String::from(s))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NamingPolicy;

    #[test]
    fn policies() {
        let name = "party_type";
        assert_eq!(NamingPolicy::Verbatim.apply(name), "party_type");
        assert_eq!(NamingPolicy::LowerCamelCase.apply(name), "partyType");
        assert_eq!(NamingPolicy::UpperCamelCase.apply(name), "PartyType");
        assert_eq!(NamingPolicy::KebabCase.apply(name), "party-type");
        assert_eq!(NamingPolicy::ScreamingSnakeCase.apply(name), "PARTY_TYPE");
    }

    #[test]
    fn camel_input_and_acronyms() {
        assert_eq!(NamingPolicy::SnakeCase.apply("HTTPServer"), "http_server");
        assert_eq!(NamingPolicy::KebabCase.apply("RightChild"), "right-child");
        assert_eq!(NamingPolicy::LowerCamelCase.apply("id"), "id");
        assert_eq!(NamingPolicy::SnakeCase.apply("v2Name"), "v2_name");
    }

    #[test]
    fn parse() {
        assert_eq!("camelCase".parse::<NamingPolicy>(), Ok(NamingPolicy::LowerCamelCase));
        assert!("Title Case".parse::<NamingPolicy>().is_err());
    }
}
