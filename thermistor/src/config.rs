//! Thermistor description files (TOML)
//!
//! A description names the model, the temperature range, the number of table
//! entries, the storage type and optionally the measurement circuit:
//!
//! ```toml
//! name = "ntc-10k"
//! datapoints = 61
//! value_type = "u16"
//!
//! [range]
//! min = -10.0
//! max = 50.0
//!
//! [model]
//! kind = "beta"
//! nominal = { temp = 25.0, res = 10000.0 }
//! beta = 3950.0
//!
//! [circuit]
//! kind = "half-bridge"
//! supply = 3.3
//! r1 = 10000.0
//! adc = { resolution = 12, vref = 3.3 }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{Adc, Circuit, Direct, HalfBridge};
use crate::error::{ThermistorError, ThermistorResult};
use crate::ntc::Ntc;
use crate::range::TempRange;
use crate::steinhart::{BetaPoint, Datapoint, Steinhart};
use crate::value::TableValue;

/// Complete description of a thermistor and its lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermistorConfig {
    /// Identifier used for generated constants
    pub name: String,

    /// Number of table entries, endpoints included
    pub datapoints: usize,

    /// Storage type of table entries
    #[serde(default)]
    pub value_type: ValueType,

    pub range: TempRange,

    pub model: ModelConfig,

    #[serde(default)]
    pub circuit: CircuitConfig,
}

/// How the Steinhart-Hart curve is obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelConfig {
    /// Raw coefficients
    Steinhart { a: f64, b: f64, c: f64 },

    /// Nominal point and a single beta
    Beta { nominal: Datapoint, beta: f64 },

    /// Nominal point and one beta on each side of a split
    DoubleBeta {
        nominal: Datapoint,
        low: BetaPoint,
        high: BetaPoint,
    },

    /// Three measured points
    Datapoints { points: [Datapoint; 3] },
}

impl ModelConfig {
    pub fn equation(&self) -> ThermistorResult<Steinhart> {
        match self {
            Self::Steinhart { a, b, c } => Ok(Steinhart::new(*a, *b, *c)),
            Self::Beta { nominal, beta } => Steinhart::from_beta(nominal, *beta),
            Self::DoubleBeta { nominal, low, high } => Steinhart::from_betas(nominal, low, high),
            Self::Datapoints { points } => Steinhart::from_datapoints(points),
        }
    }
}

/// Measurement circuit between thermistor and firmware
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CircuitConfig {
    #[default]
    Direct,

    HalfBridge { supply: f64, r1: f64, adc: AdcConfig },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdcConfig {
    /// Bits
    pub resolution: u8,

    /// Reference voltage
    pub vref: f64,

    /// Input impedance in ohm, ideal when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impedance: Option<f64>,
}

impl AdcConfig {
    pub fn build(&self) -> ThermistorResult<Adc> {
        match self.impedance {
            Some(impedance) => Adc::with_impedance(self.resolution, self.vref, impedance),
            None => Adc::new(self.resolution, self.vref),
        }
    }
}

impl CircuitConfig {
    pub fn build(&self) -> ThermistorResult<Box<dyn Circuit>> {
        match self {
            Self::Direct => Ok(Box::new(Direct)),
            Self::HalfBridge { supply, r1, adc } => {
                Ok(Box::new(HalfBridge::new(adc.build()?, *supply, *r1)?))
            }
        }
    }

    /// Whether table values are ADC counts rather than ohms
    pub fn is_adc(&self) -> bool {
        !matches!(self, Self::Direct)
    }
}

/// Names of the supported [`TableValue`] types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    U8,
    U16,
    #[default]
    U32,
    U64,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    pub const ALL: [ValueType; 9] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => <u8 as TableValue>::TYPE_NAME,
            Self::U16 => <u16 as TableValue>::TYPE_NAME,
            Self::U32 => <u32 as TableValue>::TYPE_NAME,
            Self::U64 => <u64 as TableValue>::TYPE_NAME,
            Self::I16 => <i16 as TableValue>::TYPE_NAME,
            Self::I32 => <i32 as TableValue>::TYPE_NAME,
            Self::I64 => <i64 as TableValue>::TYPE_NAME,
            Self::F32 => <f32 as TableValue>::TYPE_NAME,
            Self::F64 => <f64 as TableValue>::TYPE_NAME,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ThermistorError;

    fn from_str(s: &str) -> ThermistorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ThermistorError::Config(format!("unknown value type '{}'", s)))
    }
}

impl ThermistorConfig {
    /// Parse a description from TOML
    pub fn from_toml_str(content: &str) -> ThermistorResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ThermistorError::Config(format!("Failed to parse description: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a description from a file
    pub fn from_file(path: &Path) -> ThermistorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize the description to TOML
    pub fn to_toml_string(&self) -> ThermistorResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ThermistorError::Config(format!("Failed to serialize description: {}", e)))
    }

    /// Check everything that does not need a table
    pub fn validate(&self) -> ThermistorResult<()> {
        if self.name.trim().is_empty() {
            return Err(ThermistorError::Config("name must not be empty".into()));
        }
        if self.datapoints < 2 {
            return Err(ThermistorError::TooFewDatapoints(self.datapoints));
        }
        self.model.equation()?;
        self.circuit.build()?;
        Ok(())
    }

    pub fn equation(&self) -> ThermistorResult<Steinhart> {
        self.model.equation()
    }

    pub fn range(&self) -> TempRange {
        self.range
    }

    pub fn circuit(&self) -> ThermistorResult<Box<dyn Circuit>> {
        self.circuit.build()
    }

    /// Build the lookup table with storage type `V`
    ///
    /// `V` is chosen by the caller; [`ValueType`] only records the preference
    /// of the description.
    pub fn build_table<V: TableValue>(&self) -> ThermistorResult<Ntc<V>> {
        let equation = self.equation()?;
        let circuit = self.circuit()?;
        Ntc::with_circuit(&equation, self.range, self.datapoints, &circuit)
    }
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            name: "ntc_10k".to_string(),
            datapoints: 61,
            value_type: ValueType::U16,
            range: TempRange::from_bounds(-10.0, 50.0),
            model: ModelConfig::Beta {
                nominal: Datapoint::new(25.0, 10000.0),
                beta: 3950.0,
            },
            circuit: CircuitConfig::HalfBridge {
                supply: 3.3,
                r1: 10000.0,
                adc: AdcConfig {
                    resolution: 12,
                    vref: 3.3,
                    impedance: None,
                },
            },
        }
    }
}
