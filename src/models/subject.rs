//! Subject records and the categorical codes found in the subject table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Biological sex as recorded in the subject table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

/// Accepted sex tokens. The table carries both the numeric code and the text label.
pub const SEX_TOKENS: &[(&str, Sex)] = &[
    ("1", Sex::Female),
    ("2", Sex::Male),
    ("Female", Sex::Female),
    ("Male", Sex::Male),
];

impl Sex {
    /// Parse a sex field, returning `None` for tokens outside [`SEX_TOKENS`]
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        SEX_TOKENS
            .iter()
            .find(|(accepted, _)| *accepted == token)
            .map(|&(_, sex)| sex)
    }
}

/// Outcome recorded in the relapse flag column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelapseStatus {
    /// Flag `"0"`
    Abstained,
    /// Flag `"1"`
    Relapsed,
    /// Any other value, including empty
    Unknown,
}

impl From<&str> for RelapseStatus {
    fn from(s: &str) -> Self {
        match s {
            "0" => Self::Abstained,
            "1" => Self::Relapsed,
            _ => Self::Unknown,
        }
    }
}

/// One row of the subject table, borrowed from the CSV record
#[derive(Debug, Clone, Copy)]
pub struct SubjectRecord<'a> {
    /// Subject identifier
    pub id: &'a str,
    /// Raw relapse flag
    pub relapse_flag: &'a str,
    /// Raw age text
    pub age: &'a str,
    /// Raw sex token
    pub sex: &'a str,
}

impl SubjectRecord<'_> {
    /// Interpreted relapse flag
    #[must_use]
    pub fn relapse_status(&self) -> RelapseStatus {
        RelapseStatus::from(self.relapse_flag)
    }

    /// Interpreted sex token
    #[must_use]
    pub fn sex(&self) -> Option<Sex> {
        Sex::from_token(self.sex)
    }

    /// Age as a finite number, or `None` when it does not parse
    #[must_use]
    pub fn parsed_age(&self) -> Option<f64> {
        strip_digit_separators(self.age.trim())?
            .parse::<f64>()
            .ok()
            .filter(|age| age.is_finite())
    }
}

/// Remove `_` separators, each of which must sit between two digits
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }

    let bytes = text.as_bytes();
    let mut stripped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '_' {
            stripped.push(c);
            continue;
        }
        let after_digit = i > 0 && bytes[i - 1].is_ascii_digit();
        let before_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
        if !(after_digit && before_digit) {
            return None;
        }
    }
    Some(Cow::Owned(stripped))
}
