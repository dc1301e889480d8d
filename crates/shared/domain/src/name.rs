use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Shortest name the chain accepts, including label minimums.
pub const MIN_NAME_LENGTH: usize = 3;
/// Longest name the chain accepts.
pub const MAX_NAME_LENGTH: usize = 63;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Reasons an account name fails chain syntax validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("account name must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters, got {0}")]
    Length(usize),
    #[error("account name label '{0}' is shorter than {MIN_NAME_LENGTH} characters")]
    LabelTooShort(Cow<'static, str>),
    #[error("account name label '{0}' must start with a letter")]
    LabelStart(Cow<'static, str>),
    #[error("account name label '{0}' must end with a letter or digit")]
    LabelEnd(Cow<'static, str>),
    #[error("account name contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A syntactically valid chain account name.
///
/// Construction goes through [`AccountName::parse`], which enforces the
/// chain's naming grammar: 3..=63 characters, dot-separated labels, each
/// label at least 3 characters, starting with `[a-z]`, built from
/// `[a-z0-9-]`, and not ending in a dash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Validates `name` against the chain's account-name grammar.
    ///
    /// # Errors
    /// Returns a [`NameError`] describing the first violated rule.
    pub fn parse(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();

        if name.len() < MIN_NAME_LENGTH || name.len() > MAX_NAME_LENGTH {
            return Err(NameError::Length(name.len()));
        }

        if let Some(bad) =
            name.chars().find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '.'))
        {
            return Err(NameError::InvalidCharacter(bad));
        }

        for label in name.split('.') {
            validate_label(label)?;
        }

        Ok(Self(name))
    }

    /// Whether this name is premium under the chain's pricing rule.
    ///
    /// The chain sells "cheap" names at the base fee: names containing a
    /// digit or a dash, or names without any vowel. Everything else is a
    /// premium name and not eligible for sponsored registration.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        let mut has_vowel = false;
        for c in self.0.chars() {
            if c.is_ascii_digit() || c == '-' {
                return false;
            }
            if VOWELS.contains(&c) {
                has_vowel = true;
            }
        }
        has_vowel
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_label(label: &str) -> Result<(), NameError> {
    if label.len() < MIN_NAME_LENGTH {
        return Err(NameError::LabelTooShort(label.to_owned().into()));
    }

    // Safe: labels are non-empty ASCII at this point.
    let first = label.as_bytes()[0];
    let last = label.as_bytes()[label.len() - 1];

    if !first.is_ascii_lowercase() {
        return Err(NameError::LabelStart(label.to_owned().into()));
    }
    if !last.is_ascii_lowercase() && !last.is_ascii_digit() {
        return Err(NameError::LabelEnd(label.to_owned().into()));
    }

    Ok(())
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccountName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
