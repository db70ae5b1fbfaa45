//! Value transformations on the thermistor table to reflect circuitry
//!
//! A table built with [`Direct`] stores resistance. Wrapping the thermistor in
//! a measurement circuit turns each resistance into the value the firmware
//! actually reads, so lookups work on raw ADC counts.
//!
//! ```text
//!   supply ──┬── r1 ──┬── ADC input (impedance Z)
//!            │        │
//!                   thermistor
//!                     │
//!                    GND
//! ```

use crate::error::{ThermistorError, ThermistorResult};

/// Maps a thermistor resistance to the quantity stored in the table
pub trait Circuit {
    fn transform(&self, res: f64) -> f64;
}

impl<C: Circuit + ?Sized> Circuit for &C {
    fn transform(&self, res: f64) -> f64 {
        (**self).transform(res)
    }
}

impl<C: Circuit + ?Sized> Circuit for Box<C> {
    fn transform(&self, res: f64) -> f64 {
        (**self).transform(res)
    }
}

/// No circuitry, the table holds resistance in ohm
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Direct;

impl Circuit for Direct {
    fn transform(&self, res: f64) -> f64 {
        res
    }
}

/// Analog to digital converter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adc {
    resolution: u8,
    vref: f64,
    impedance: f64,
}

impl Adc {
    pub const MAX_RESOLUTION: u8 = 32;

    /// ADC with an ideal (infinite impedance) input
    pub fn new(resolution: u8, vref: f64) -> ThermistorResult<Self> {
        Self::with_impedance(resolution, vref, f64::INFINITY)
    }

    pub fn with_impedance(resolution: u8, vref: f64, impedance: f64) -> ThermistorResult<Self> {
        if resolution == 0 || resolution > Self::MAX_RESOLUTION {
            return Err(ThermistorError::InvalidParameter(format!(
                "adc resolution must be between 1 and {} bits, got {}",
                Self::MAX_RESOLUTION,
                resolution
            )));
        }
        if !vref.is_finite() || vref <= 0.0 {
            return Err(ThermistorError::InvalidParameter(
                "vref must be greater than zero".into(),
            ));
        }
        if impedance.is_nan() || impedance <= 0.0 {
            return Err(ThermistorError::InvalidParameter(
                "impedance must be greater than zero".into(),
            ));
        }

        Ok(Self {
            resolution,
            vref,
            impedance,
        })
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    pub fn vref(&self) -> f64 {
        self.vref
    }

    pub fn impedance(&self) -> f64 {
        self.impedance
    }

    /// Largest count the converter produces
    pub fn max_count(&self) -> u64 {
        (1u64 << self.resolution) - 1
    }

    /// Voltage to counts, saturating at both rails
    pub fn convert(&self, voltage: f64) -> f64 {
        let ratio = (voltage / self.vref).clamp(0.0, 1.0);
        (ratio * self.max_count() as f64).floor()
    }
}

/// Voltage divider with the thermistor connected to ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfBridge {
    adc: Adc,
    supply: f64,
    r1: f64,
}

impl HalfBridge {
    pub fn new(adc: Adc, supply: f64, r1: f64) -> ThermistorResult<Self> {
        if !supply.is_finite() || supply <= 0.0 {
            return Err(ThermistorError::InvalidParameter(
                "supply must be greater than zero".into(),
            ));
        }
        if !r1.is_finite() || r1 <= 0.0 {
            return Err(ThermistorError::InvalidParameter(
                "r1 must be greater than zero".into(),
            ));
        }
        Ok(Self { adc, supply, r1 })
    }

    pub fn adc(&self) -> &Adc {
        &self.adc
    }

    pub fn supply(&self) -> f64 {
        self.supply
    }

    pub fn r1(&self) -> f64 {
        self.r1
    }

    /// Voltage across the thermistor, ADC loading included
    pub fn voltage(&self, res: f64) -> f64 {
        let r2 = if self.adc.impedance.is_infinite() {
            res
        } else {
            (self.adc.impedance * res) / (self.adc.impedance + res)
        };

        (self.supply * r2) / (self.r1 + r2)
    }
}

impl Circuit for HalfBridge {
    fn transform(&self, res: f64) -> f64 {
        self.adc.convert(self.voltage(res))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_direct_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let value: f64 = rng.gen_range(0.0..f64::MAX);
            assert_eq!(Direct.transform(value), value);
        }
    }

    #[test]
    fn test_adc_defaults_to_infinite_impedance() {
        let adc = Adc::new(12, 5.0).unwrap();
        let loaded = Adc::with_impedance(16, 5.0, 10000.0).unwrap();

        assert_eq!(adc.impedance(), f64::INFINITY);
        assert_eq!(loaded.impedance(), 10000.0);
        assert_eq!(adc.max_count(), 4095);
        assert_eq!(loaded.max_count(), 65535);
    }

    #[test]
    fn test_adc_validation() {
        assert!(Adc::new(12, 0.0).is_err());
        assert!(Adc::new(12, -3.3).is_err());
        assert!(Adc::new(0, 3.3).is_err());
        assert!(Adc::new(33, 3.3).is_err());
        assert!(Adc::with_impedance(12, 3.3, 0.0).is_err());
        assert!(Adc::new(32, 3.3).is_ok());
    }

    #[test]
    fn test_adc_conversion() {
        let adc = Adc::new(12, 5.0).unwrap();
        assert_eq!(adc.convert(0.0), 0.0);
        assert_eq!(adc.convert(5.0), 4095.0);
        assert_eq!(adc.convert(2.5), 2047.0);
        // saturates at the rails
        assert_eq!(adc.convert(-1.0), 0.0);
        assert_eq!(adc.convert(7.0), 4095.0);
    }

    #[test]
    fn test_half_bridge_midpoint() {
        let adc = Adc::new(12, 3.3).unwrap();
        let bridge = HalfBridge::new(adc, 3.3, 3000.0).unwrap();

        assert!((bridge.voltage(3000.0) - 1.65).abs() < 1e-12);
        assert_eq!(bridge.transform(3000.0), 2047.0);
    }

    #[test]
    fn test_half_bridge_adc_loading() {
        let ideal = HalfBridge::new(Adc::new(12, 3.3).unwrap(), 3.3, 10000.0).unwrap();
        let loaded = HalfBridge::new(
            Adc::with_impedance(12, 3.3, 10000.0).unwrap(),
            3.3,
            10000.0,
        )
        .unwrap();

        // 10k in parallel with 10k is 5k, a third of the supply
        assert!((loaded.voltage(10000.0) - 1.1).abs() < 1e-12);
        assert!(loaded.voltage(10000.0) < ideal.voltage(10000.0));
    }

    #[test]
    fn test_half_bridge_rises_with_resistance() {
        let bridge = HalfBridge::new(Adc::new(12, 3.3).unwrap(), 3.3, 3000.0).unwrap();
        assert!(bridge.transform(17000.0) > bridge.transform(1100.0));
    }

    #[test]
    fn test_half_bridge_validation() {
        let adc = Adc::new(10, 3.3).unwrap();
        assert!(HalfBridge::new(adc, 0.0, 3000.0).is_err());
        assert!(HalfBridge::new(adc, 3.3, -1.0).is_err());
    }

    #[test]
    fn test_boxed_circuit() {
        let boxed: Box<dyn Circuit> = Box::new(Direct);
        assert_eq!(boxed.transform(42.0), 42.0);
    }
}
