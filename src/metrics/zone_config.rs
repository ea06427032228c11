//! Rules for turning a power zone into a single power target.
//!
//! Zones 1-6 interpolate between floor and ceiling with a weight in `[0, 1]`.
//! Zone 7 has no usable ceiling, so its floor is scaled by a multiplier
//! instead. All rules are validated when the configuration is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::zones::ZONE_COUNT;
use crate::storage::config::ConfigError;

/// Weight used for zones without an explicit one.
pub const DEFAULT_ZONE_WEIGHT: f64 = 0.5;

/// Default zone 7 floor multiplier.
pub const DEFAULT_ZONE7_MULTIPLIER: f64 = 1.1;

/// Per-zone settings as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSettings {
    /// Interpolation weight (zones 1-6)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Floor multiplier (zone 7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

/// The `power_zones` section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerZoneSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zone_weight: Option<f64>,
    #[serde(default)]
    pub zones: BTreeMap<u8, ZoneSettings>,
}

/// Validated weighting rules consumed by the power target calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerZoneConfiguration {
    default_weight: f64,
    weights: BTreeMap<u8, f64>,
    zone7_multiplier: f64,
}

impl Default for PowerZoneConfiguration {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_ZONE_WEIGHT,
            weights: BTreeMap::new(),
            zone7_multiplier: DEFAULT_ZONE7_MULTIPLIER,
        }
    }
}

impl PowerZoneConfiguration {
    /// Build a configuration, rejecting any invalid rule.
    pub fn new(
        default_weight: f64,
        weights: BTreeMap<u8, f64>,
        zone7_multiplier: f64,
    ) -> Result<Self, ConfigError> {
        validate_weight(None, default_weight)?;

        for (&zone, &weight) in &weights {
            if zone == ZONE_COUNT {
                return Err(ConfigError::Zone7Weight);
            }
            if !(1..ZONE_COUNT).contains(&zone) {
                return Err(ConfigError::UnknownZone(zone));
            }
            validate_weight(Some(zone), weight)?;
        }

        if zone7_multiplier.is_nan() || zone7_multiplier < 1.0 {
            return Err(ConfigError::InvalidMultiplier(zone7_multiplier));
        }

        Ok(Self {
            default_weight,
            weights,
            zone7_multiplier,
        })
    }

    /// Build a configuration from the file section.
    pub fn from_settings(settings: &PowerZoneSettings) -> Result<Self, ConfigError> {
        let mut weights = BTreeMap::new();
        let mut zone7_multiplier = DEFAULT_ZONE7_MULTIPLIER;

        for (&zone, zone_settings) in &settings.zones {
            if !(1..=ZONE_COUNT).contains(&zone) {
                return Err(ConfigError::UnknownZone(zone));
            }
            if let Some(weight) = zone_settings.weight {
                weights.insert(zone, weight);
            }
            if let Some(multiplier) = zone_settings.multiplier {
                if zone != ZONE_COUNT {
                    return Err(ConfigError::MultiplierNotAllowed(zone));
                }
                zone7_multiplier = multiplier;
            }
        }

        Self::new(
            settings.default_zone_weight.unwrap_or(DEFAULT_ZONE_WEIGHT),
            weights,
            zone7_multiplier,
        )
    }

    /// Weight for a zone, falling back to the default weight.
    pub fn zone_weight(&self, zone: u8) -> f64 {
        self.weights
            .get(&zone)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn zone7_multiplier(&self) -> f64 {
        self.zone7_multiplier
    }
}

fn validate_weight(zone: Option<u8>, weight: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight { zone, weight })
    }
}
