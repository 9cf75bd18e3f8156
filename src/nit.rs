use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{NIT_SUFFIX_LEN, ParseError, prelude::*};

/// Colombian taxpayer identifier (NIT), kept as its decimal digits.
///
/// Only the last [`NIT_SUFFIX_LEN`] digits matter for PILA scheduling. A NIT
/// must be all ASCII digits and at least that long; shorter values are
/// rejected rather than zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{_0}")]
#[serde(into = "String")]
pub struct Nit(String);

/// The two trailing digits of a NIT, zero-padded (`"05"`, `"45"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{_0}")]
#[serde(into = "String")]
pub struct NitSuffix(String);

impl Nit {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn suffix(&self) -> NitSuffix {
        // Construction guarantees at least NIT_SUFFIX_LEN ASCII digits
        NitSuffix(self.0[self.0.len() - NIT_SUFFIX_LEN..].to_owned())
    }
}

impl FromStr for Nit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() < NIT_SUFFIX_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidNit(s.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<u64> for Nit {
    type Error = ParseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        value.to_string().parse()
    }
}

impl From<Nit> for String {
    fn from(nit: Nit) -> Self {
        nit.0
    }
}

impl NitSuffix {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NitSuffix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != NIT_SUFFIX_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidNit(s.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<u64> for NitSuffix {
    type Error = ParseError;

    /// Numeric dataset cells lose their leading zero, so they are padded back.
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        format!("{value:0width$}", width = NIT_SUFFIX_LEN).parse()
    }
}

impl From<NitSuffix> for String {
    fn from(suffix: NitSuffix) -> Self {
        suffix.0
    }
}

/// JSON cell that external datasets fill either as text or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextOrNumber {
    Text(String),
    Number(u64),
}

impl TextOrNumber {
    pub(crate) fn into_nit(self) -> Result<Nit, ParseError> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Number(number) => Nit::try_from(number),
        }
    }

    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }

    pub(crate) fn into_suffix(self) -> Result<NitSuffix, ParseError> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Number(number) => NitSuffix::try_from(number),
        }
    }
}

impl<'de> Deserialize<'de> for Nit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TextOrNumber::deserialize(deserializer)?
            .into_nit()
            .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for NitSuffix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TextOrNumber::deserialize(deserializer)?
            .into_suffix()
            .map_err(serde::de::Error::custom)
    }
}
