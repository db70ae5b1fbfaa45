//! Temperature range covered by a lookup table

use serde::{Deserialize, Serialize};

use crate::error::{ThermistorError, ThermistorResult};

/// Closed temperature interval in degrees Celsius
///
/// Always satisfies `min < max` with both bounds finite; construct it with
/// [`TempRange::new`] to keep that true.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TempRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for TempRange {
    type Error = ThermistorError;

    fn try_from(raw: RawRange) -> ThermistorResult<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl TempRange {
    pub fn new(min: f64, max: f64) -> ThermistorResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ThermistorError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds already known to be ordered and finite
    pub(crate) const fn from_bounds(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, celsius: f64) -> bool {
        celsius >= self.min && celsius <= self.max
    }

    /// Spacing between consecutive entries of a table with `datapoints` entries
    pub fn delta(&self, datapoints: usize) -> ThermistorResult<f64> {
        if datapoints < 2 {
            return Err(ThermistorError::TooFewDatapoints(datapoints));
        }
        Ok(self.span() / (datapoints - 1) as f64)
    }

    /// Clamp a temperature into the range
    pub fn clamp(&self, celsius: f64) -> f64 {
        celsius.clamp(self.min, self.max)
    }
}
