//! Field codecs for the persisted JSON layout.
//!
//! Older front-ends wrote an empty string wherever a field was unset, so every
//! optional field here reads `""`, `null` and a missing key all as `None`.
//! Writing always emits the value itself; `None` fields are skipped by the
//! containing struct.

use serde::{Deserialize, Deserializer, Serializer};

use crate::calendar::{format_date, parse_date};
use crate::id::EntityId;
use chrono::NaiveDate;

fn non_blank<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// `Option<String>` where blank means unset.
pub mod optional_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(v),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        non_blank(d)
    }
}

/// `Option<NaiveDate>` stored as `YYYY-MM-DD`.
pub mod optional_date {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_str(&format_date(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        non_blank(d)?
            .map(|raw| parse_date(&raw).map_err(D::Error::custom))
            .transpose()
    }
}

/// `Option<EntityId>` for the task -> project reference.
pub mod optional_id {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Option<EntityId>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => s.serialize_str(id.as_str()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<EntityId>, D::Error> {
        non_blank(d)?
            .map(|raw| EntityId::parse(&raw).map_err(D::Error::custom))
            .transpose()
    }
}
