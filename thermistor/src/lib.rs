//! # thermistor - NTC lookup tables
//!
//! Builds lookup tables for negative temperature coefficient thermistors and
//! turns raw readings back into temperature.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Steinhart   │──▶│   Circuit    │──▶│   Ntc<V>     │
//! │ (R at T)     │   │ (R → counts) │   │ (table of V) │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │ interpolate(reading)
//!                                              ▼
//!                                       ┌──────────────┐
//!                                       │ Interpolation│
//!                                       │ °C, saturated│
//!                                       └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use thermistor::{Adc, Datapoint, HalfBridge, Ntc, Steinhart, TempRange};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let equation = Steinhart::from_beta(&Datapoint::new(25.0, 10000.0), 3950.0)?;
//! let bridge = HalfBridge::new(Adc::new(12, 3.3)?, 3.3, 10000.0)?;
//! let lut: Ntc<u16> =
//!     Ntc::with_circuit(&equation, TempRange::new(-10.0, 50.0)?, 61, &bridge)?;
//!
//! let reading = lut.interpolate(2048);
//! assert!(!reading.saturated);
//! assert!((reading.celsius - 25.0).abs() < 0.1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`steinhart`] - Steinhart-Hart and beta models
//! - [`circuit`] - measurement circuits (ADC, half bridge)
//! - [`ntc`] - lookup table and interpolation
//! - [`config`] - TOML thermistor descriptions
//! - [`error`] - error handling

pub mod circuit;
pub mod config;
pub mod error;
pub mod ntc;
pub mod range;
pub mod steinhart;
pub mod util;
pub mod value;

pub use circuit::{Adc, Circuit, Direct, HalfBridge};
pub use config::{AdcConfig, CircuitConfig, ModelConfig, ThermistorConfig, ValueType};
pub use error::{ThermistorError, ThermistorResult};
pub use ntc::{Interpolation, Ntc};
pub use range::TempRange;
pub use steinhart::{BetaPoint, Datapoint, Steinhart, reverse_beta};
pub use util::{KELVIN, celsius, kelvin};
pub use value::TableValue;

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LICENSE: &str = env!("CARGO_PKG_LICENSE");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
