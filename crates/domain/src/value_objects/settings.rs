//! Creator settings value object
//!
//! Settings are deserialized from the engine's configuration sources, so every
//! field carries a serde default and a partial file is always accepted.

use serde::{Deserialize, Serialize};

use super::names::DEFAULT_MAX_NAME_LENGTH;
use super::price::PriceFormat;
use crate::entities::StructureKind;

/// All configurable creator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatorSettings {
    /// How far (in blocks) outside the cuboid a rotation point may be placed
    #[serde(default = "default_rotation_point_range")]
    pub rotation_point_range: u16,

    /// Maximum length for structure names
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Price rendering in prompts and messages
    #[serde(default)]
    pub price_format: PriceFormat,

    /// Idle time after which an unfinished creator session is aborted
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Kind used when the host does not specify one
    #[serde(default = "default_kind")]
    pub default_kind: StructureKind,
}

fn default_rotation_point_range() -> u16 { 1 }
fn default_max_name_length() -> usize { DEFAULT_MAX_NAME_LENGTH }
fn default_session_timeout_secs() -> u64 { 120 }
fn default_kind() -> StructureKind { StructureKind::BigDoor }

impl Default for CreatorSettings {
    fn default() -> Self {
        Self {
            rotation_point_range: default_rotation_point_range(),
            max_name_length: default_max_name_length(),
            price_format: PriceFormat::default(),
            session_timeout_secs: default_session_timeout_secs(),
            default_kind: default_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: CreatorSettings =
            serde_json::from_str(r#"{"rotation_point_range": 2}"#).unwrap();
        assert_eq!(settings.rotation_point_range, 2);
        assert_eq!(settings.max_name_length, DEFAULT_MAX_NAME_LENGTH);
        assert_eq!(settings.price_format, PriceFormat::default());
        assert_eq!(settings.default_kind, StructureKind::BigDoor);
    }

    #[test]
    fn negative_rotation_range_is_rejected() {
        let result = serde_json::from_str::<CreatorSettings>(r#"{"rotation_point_range": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn kind_is_read_in_snake_case() {
        let settings: CreatorSettings =
            serde_json::from_str(r#"{"default_kind": "sliding_door"}"#).unwrap();
        assert_eq!(settings.default_kind, StructureKind::SlidingDoor);
    }
}
