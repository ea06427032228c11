//! Power zones and the rules for deriving power targets from them.

pub mod zone_config;
pub mod zones;

pub use zone_config::{PowerZoneConfiguration, PowerZoneSettings, ZoneSettings};
pub use zones::{PowerZones, ZoneError, ZONE7_CEILING_RATIO};
