use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{BusinessDays, NitSuffix};

/// One row of the social-security limit dataset.
///
/// A row without a usable business-day count is kept: NITs with that suffix
/// are known but never reach a cut-off date. Blank, zero, out-of-range and
/// non-numeric counts all read as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityLimit {
    #[serde(rename = "DIGITOS_NIT")]
    pub suffix:                 NitSuffix,
    #[serde(rename = "DIAS_HABILES", default, deserialize_with = "lenient_business_days")]
    pub required_business_days: Option<BusinessDays>,
}

fn lenient_business_days<'de, D>(deserializer: D) -> Result<Option<BusinessDays>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = serde_json::Value::deserialize(deserializer)?;
    Ok(cell
        .as_u64()
        .and_then(|count| u8::try_from(count).ok())
        .and_then(|count| BusinessDays::new(count).ok()))
}

impl SocialSecurityLimit {
    pub const fn new(suffix: NitSuffix, required_business_days: BusinessDays) -> Self {
        Self {
            suffix,
            required_business_days: Some(required_business_days),
        }
    }
}

/// Limit rows indexed by NIT suffix. When a suffix is listed twice the first
/// row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitTable {
    by_suffix: HashMap<NitSuffix, SocialSecurityLimit>,
}

impl LimitTable {
    pub fn new(rows: impl IntoIterator<Item = SocialSecurityLimit>) -> Self {
        let mut by_suffix = HashMap::new();
        for row in rows {
            match by_suffix.entry(row.suffix.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(_) => {
                    tracing::debug!(suffix = %row.suffix, "duplicate limit row ignored");
                }
            }
        }
        Self { by_suffix }
    }

    pub fn get(&self, suffix: &NitSuffix) -> Option<&SocialSecurityLimit> {
        self.by_suffix.get(suffix)
    }

    pub fn len(&self) -> usize {
        self.by_suffix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_suffix.is_empty()
    }
}

impl FromIterator<SocialSecurityLimit> for LimitTable {
    fn from_iter<I: IntoIterator<Item = SocialSecurityLimit>>(iter: I) -> Self {
        Self::new(iter)
    }
}
