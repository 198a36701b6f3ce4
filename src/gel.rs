use crate::{digest::DigestResult, error::DigestError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Added to the log-range denominator so that a gel where every fragment
    /// has the same length does not divide by zero.
    pub epsilon: f64,
    /// Coordinate used for a lane holding exactly one fragment.
    pub single_fragment_coordinate: f64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            single_fragment_coordinate: 0.0,
        }
    }
}

/// Fragment lengths loaded into one well.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GelLane {
    pub name: String,
    pub lengths: Vec<usize>,
}

impl GelLane {
    pub fn new(name: &str, lengths: Vec<usize>) -> Self {
        Self {
            name: name.to_string(),
            lengths,
        }
    }

    /// Zero-length fragments (cuts at either end of the template) carry no
    /// DNA and are left out of the lane.
    pub fn from_digest(result: &DigestResult) -> Self {
        Self {
            name: result.target.name().to_string(),
            lengths: result
                .fragment_lengths()
                .into_iter()
                .filter(|len| *len > 0)
                .collect(),
        }
    }
}

/// One band: a fragment length and how far it travelled, from 0 (the
/// longest fragment on the gel) towards 1 (the shortest).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GelBand {
    pub length: usize,
    pub coordinate: f64,
    pub lane: String,
}

#[derive(Clone, Debug, Default)]
pub struct MigrationModel {
    config: MigrationConfig,
}

impl MigrationModel {
    pub fn new(config: MigrationConfig) -> Result<Self, DigestError> {
        if !(config.epsilon.is_finite() && config.epsilon > 0.0) {
            return Err(DigestError::InvalidMigrationConfig(format!(
                "epsilon must be a positive number, got {}",
                config.epsilon
            )));
        }
        if !config.single_fragment_coordinate.is_finite() {
            return Err(DigestError::InvalidMigrationConfig(format!(
                "single_fragment_coordinate must be finite, got {}",
                config.single_fragment_coordinate
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Shortest and longest fragment over all lanes together, so that every
    /// lane is placed on the same scale.
    pub fn reference_range(lanes: &[GelLane]) -> Result<(usize, usize), DigestError> {
        if lanes.is_empty() {
            return Err(DigestError::NoLanes);
        }
        let mut min_len = usize::MAX;
        let mut max_len = 0;
        for lane in lanes {
            if lane.lengths.is_empty() {
                return Err(DigestError::EmptyLane(lane.name.clone()));
            }
            for &len in &lane.lengths {
                if len == 0 {
                    return Err(DigestError::NonPositiveLength {
                        lane: lane.name.clone(),
                    });
                }
                min_len = min_len.min(len);
                max_len = max_len.max(len);
            }
        }
        Ok((min_len, max_len))
    }

    /// `(log10(max) - log10(len)) / (log10(max) - log10(min) + epsilon)`
    pub fn relative_migration(&self, length: usize, min_len: usize, max_len: usize) -> f64 {
        let log_max = (max_len as f64).log10();
        let log_min = (min_len as f64).log10();
        (log_max - (length as f64).log10()) / (log_max - log_min + self.config.epsilon)
    }

    /// Bands for every lane, lanes in input order and each lane from the
    /// longest fragment to the shortest.
    pub fn migrate(&self, lanes: &[GelLane]) -> Result<Vec<GelBand>, DigestError> {
        let (min_len, max_len) = Self::reference_range(lanes)?;
        debug!(lanes = lanes.len(), min_len, max_len, "gel reference range");

        let mut bands = vec![];
        for lane in lanes {
            let mut lengths = lane.lengths.clone();
            lengths.sort_by(|a, b| b.cmp(a));
            if let [length] = lengths[..] {
                bands.push(GelBand {
                    length,
                    coordinate: self.config.single_fragment_coordinate,
                    lane: lane.name.clone(),
                });
                continue;
            }
            bands.extend(lengths.into_iter().map(|length| GelBand {
                length,
                coordinate: self.relative_migration(length, min_len, max_len),
                lane: lane.name.clone(),
            }));
        }
        Ok(bands)
    }
}
