//! Field identifiers and the raw text record a submission carries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight checked input fields, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Factors,
    Levels,
    #[serde(rename = "msize")]
    OptionSetSize,
    #[serde(rename = "chsets")]
    ChoiceSets,
    #[serde(rename = "tmts")]
    Treatments,
    #[serde(rename = "gens")]
    Generators,
    #[serde(rename = "det")]
    Determinant,
    #[serde(rename = "twofis")]
    TwoFactorInteractions,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::Factors,
        FieldId::Levels,
        FieldId::OptionSetSize,
        FieldId::ChoiceSets,
        FieldId::Treatments,
        FieldId::Generators,
        FieldId::Determinant,
        FieldId::TwoFactorInteractions,
    ];

    /// Name used in submission files and on the wire
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldId::Factors => "factors",
            FieldId::Levels => "levels",
            FieldId::OptionSetSize => "msize",
            FieldId::ChoiceSets => "chsets",
            FieldId::Treatments => "tmts",
            FieldId::Generators => "gens",
            FieldId::Determinant => "det",
            FieldId::TwoFactorInteractions => "twofis",
        }
    }

    /// Form label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Factors => "Number of attributes",
            FieldId::Levels => "Levels for each attribute",
            FieldId::OptionSetSize => "Number of options in each choice set",
            FieldId::ChoiceSets => "Choice Sets",
            FieldId::Treatments => "Treatment combinations",
            FieldId::Generators => "Sets of generator",
            FieldId::Determinant => "Determinant",
            FieldId::TwoFactorInteractions => "2 pair factors",
        }
    }
}

/// Displays the quoted label, the form messages use
impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw, unprocessed text of every field as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFields {
    pub factors: String,
    pub levels: String,
    pub msize: String,
    pub chsets: String,
    pub tmts: String,
    pub gens: String,
    pub det: String,
    pub twofis: String,
}

impl RawFields {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Factors => &self.factors,
            FieldId::Levels => &self.levels,
            FieldId::OptionSetSize => &self.msize,
            FieldId::ChoiceSets => &self.chsets,
            FieldId::Treatments => &self.tmts,
            FieldId::Generators => &self.gens,
            FieldId::Determinant => &self.det,
            FieldId::TwoFactorInteractions => &self.twofis,
        }
    }

    pub fn get_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::Factors => &mut self.factors,
            FieldId::Levels => &mut self.levels,
            FieldId::OptionSetSize => &mut self.msize,
            FieldId::ChoiceSets => &mut self.chsets,
            FieldId::Treatments => &mut self.tmts,
            FieldId::Generators => &mut self.gens,
            FieldId::Determinant => &mut self.det,
            FieldId::TwoFactorInteractions => &mut self.twofis,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Builder form of `set`
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Copy with every field trimmed of leading and trailing non-word characters
    pub fn normalized(&self) -> RawFields {
        let mut normalized = RawFields::default();
        for field in FieldId::ALL {
            normalized.set(field, normalize(self.get(field)));
        }
        normalized
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Strip leading and trailing characters outside `[A-Za-z0-9_]`
pub fn normalize(text: &str) -> &str {
    text.trim_matches(|c: char| !is_word_char(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_quoted_in_display() {
        assert_eq!(FieldId::Factors.to_string(), "'Number of attributes'");
        assert_eq!(FieldId::TwoFactorInteractions.to_string(), "'2 pair factors'");
    }

    #[test]
    fn test_wire_names_round_trip() {
        for field in FieldId::ALL {
            assert_eq!(field.wire_name().parse::<FieldId>(), Ok(field));
        }
        assert!("chset".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_normalize_strips_non_word_edges() {
        assert_eq!(normalize("  4 3 3 3\n\n"), "4 3 3 3");
        assert_eq!(normalize("-5"), "5");
        assert_eq!(normalize("1/2."), "1/2");
        assert_eq!(normalize("1,2 3,4,"), "1,2 3,4");
        assert_eq!(normalize(" \t\n"), "");
    }

    #[test]
    fn test_normalized_record() {
        let raw = RawFields::default()
            .with(FieldId::Factors, " 4 ")
            .with(FieldId::ChoiceSets, "\n0 1\n1 0\n");
        let normalized = raw.normalized();
        assert_eq!(normalized.factors, "4");
        assert_eq!(normalized.chsets, "0 1\n1 0");
        assert_eq!(normalized.det, "");
    }

    #[test]
    fn test_fields_deserialize_with_defaults() {
        let fields: RawFields = toml::from_str("factors = \"3\"\nlevels = \"2 2 2\"\n").unwrap();
        assert_eq!(fields.factors, "3");
        assert_eq!(fields.levels, "2 2 2");
        assert!(fields.gens.is_empty());
    }
}
