//! FTP-relative power zones.
//!
//! Zones are described by seven floor ratios of FTP. A zone's ceiling is the
//! next zone's floor; zone 7 is open-ended and uses [`ZONE7_CEILING_RATIO`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::integrations::garmin::dto::GarminPowerZones;

/// Number of power zones.
pub const ZONE_COUNT: u8 = 7;

/// Ceiling ratio of zone 7. Converting it to watts saturates at `u32::MAX`.
pub const ZONE7_CEILING_RATIO: f64 = f64::INFINITY;

/// Errors related to zone lookups.
#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("Zone must be between 1 and 7, got {0}")]
    OutOfRange(i64),
}

/// Seven power zones anchored on an FTP value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerZones {
    /// Functional Threshold Power in watts
    pub ftp: u32,
    /// Zone 1: Active Recovery
    pub z1_floor: f64,
    /// Zone 2: Endurance
    pub z2_floor: f64,
    /// Zone 3: Tempo
    pub z3_floor: f64,
    /// Zone 4: Threshold
    pub z4_floor: f64,
    /// Zone 5: VO2max
    pub z5_floor: f64,
    /// Zone 6: Anaerobic
    pub z6_floor: f64,
    /// Zone 7: Neuromuscular
    pub z7_floor: f64,
}

impl PowerZones {
    /// Coggan-style default floors for the given FTP.
    pub fn from_ftp(ftp: u32) -> Self {
        Self {
            ftp,
            z1_floor: 0.0,
            z2_floor: 0.55,
            z3_floor: 0.75,
            z4_floor: 0.90,
            z5_floor: 1.05,
            z6_floor: 1.20,
            z7_floor: 1.50,
        }
    }

    /// Convert Garmin's absolute watt floors into FTP ratios.
    pub fn from_garmin(garmin: &GarminPowerZones) -> Self {
        let ftp = garmin.functional_threshold_power;
        let ratio = |watts: f64| if ftp > 0.0 { watts / ftp } else { 0.0 };

        Self {
            ftp: ftp as u32,
            z1_floor: ratio(garmin.zone1_floor),
            z2_floor: ratio(garmin.zone2_floor),
            z3_floor: ratio(garmin.zone3_floor),
            z4_floor: ratio(garmin.zone4_floor),
            z5_floor: ratio(garmin.zone5_floor),
            z6_floor: ratio(garmin.zone6_floor),
            z7_floor: ratio(garmin.zone7_floor),
        }
    }

    /// All floors, zone 1 first.
    pub fn zone_floors(&self) -> [f64; 7] {
        [
            self.z1_floor,
            self.z2_floor,
            self.z3_floor,
            self.z4_floor,
            self.z5_floor,
            self.z6_floor,
            self.z7_floor,
        ]
    }

    /// `(floor, ceiling)` FTP ratios of a zone.
    pub fn get_zone(&self, zone: u8) -> Result<(f64, f64), ZoneError> {
        if !(1..=ZONE_COUNT).contains(&zone) {
            return Err(ZoneError::OutOfRange(zone as i64));
        }

        let floors = self.zone_floors();
        let idx = zone as usize - 1;
        let ceiling = floors.get(idx + 1).copied().unwrap_or(ZONE7_CEILING_RATIO);

        Ok((floors[idx], ceiling))
    }

    /// `(floor, ceiling)` of a zone in watts, truncated.
    pub fn get_absolute_zone(&self, zone: u8) -> Result<(u32, u32), ZoneError> {
        let (floor, ceiling) = self.get_zone(zone)?;
        let ftp = self.ftp as f64;

        Ok(((floor * ftp) as u32, (ceiling * ftp) as u32))
    }

    /// Zone containing an FTP ratio, or 0 below zone 1.
    pub fn get_zone_by_ftp_ratio(&self, ratio: f64) -> u8 {
        let floors = self.zone_floors();
        (1..=ZONE_COUNT)
            .rev()
            .find(|&zone| ratio >= floors[zone as usize - 1])
            .unwrap_or(0)
    }

    /// Zone containing a power value in watts, or 0 below zone 1.
    pub fn get_zone_by_power(&self, watts: f64) -> u8 {
        if self.ftp == 0 {
            return 0;
        }
        self.get_zone_by_ftp_ratio(watts / self.ftp as f64)
    }
}
