//! Steinhart-Hart thermistor model
//!
//! ```text
//! 1/T = a + b·ln(R) + c·ln(R)³        (T in kelvin, R in ohm)
//! ```
//!
//! The beta model is the special case `c = 0`. Coefficients can be given
//! directly, derived from a single beta, from two betas sharing a nominal
//! point, or solved from three measured datapoints.

use serde::{Deserialize, Serialize};

use crate::error::{ThermistorError, ThermistorResult};
use crate::util::{celsius, kelvin};

/// Below this ratio `c` is treated as zero and the beta inverse is used.
const NEGLIGIBLE_C: f64 = 1e-12;

/// A (temperature, resistance) pair, temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub temp: f64,
    pub res: f64,
}

impl Datapoint {
    pub const fn new(temp: f64, res: f64) -> Self {
        Self { temp, res }
    }
}

/// Beta value that holds between the nominal point and `temp` (Celsius)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPoint {
    pub temp: f64,
    pub beta: f64,
}

impl BetaPoint {
    pub const fn new(temp: f64, beta: f64) -> Self {
        Self { temp, beta }
    }
}

/// Resistance at `celsius` predicted by a beta value relative to `nominal`
pub fn reverse_beta(nominal: &Datapoint, beta: f64, celsius: f64) -> f64 {
    nominal.res * (beta * ((1.0 / kelvin(celsius)) - (1.0 / kelvin(nominal.temp)))).exp()
}

/// Steinhart-Hart coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steinhart {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Steinhart {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Single beta model anchored at `nominal`
    pub fn from_beta(nominal: &Datapoint, beta: f64) -> ThermistorResult<Self> {
        check_datapoint(nominal)?;
        check_beta(beta)?;

        Ok(Self {
            a: (1.0 / kelvin(nominal.temp)) - ((1.0 / beta) * nominal.res.ln()),
            b: 1.0 / beta,
            c: 0.0,
        })
    }

    /// Two betas sharing a nominal point
    ///
    /// Each beta yields one extra datapoint at its own temperature; the three
    /// points then fix a full Steinhart-Hart curve.
    pub fn from_betas(
        nominal: &Datapoint,
        low: &BetaPoint,
        high: &BetaPoint,
    ) -> ThermistorResult<Self> {
        check_datapoint(nominal)?;
        check_beta(low.beta)?;
        check_beta(high.beta)?;

        let first = Datapoint::new(low.temp, reverse_beta(nominal, low.beta, low.temp));
        let second = Datapoint::new(high.temp, reverse_beta(nominal, high.beta, high.temp));

        Self::from_datapoints(&[*nominal, first, second])
    }

    /// Solve the coefficients from three measured points
    pub fn from_datapoints(points: &[Datapoint; 3]) -> ThermistorResult<Self> {
        for point in points {
            check_datapoint(point)?;
        }
        for i in 0..3 {
            for j in (i + 1)..3 {
                if points[i].temp == points[j].temp || points[i].res == points[j].res {
                    return Err(ThermistorError::InvalidParameter(format!(
                        "datapoints {} and {} must differ in both temperature and resistance",
                        i, j
                    )));
                }
            }
        }

        let points = *points;
        let l = points.map(|p| p.res.ln());
        let y = points.map(|p| 1.0 / kelvin(p.temp));

        let gamma2 = (y[1] - y[0]) / (l[1] - l[0]);
        let gamma3 = (y[2] - y[0]) / (l[2] - l[0]);

        let c = ((gamma3 - gamma2) / (l[2] - l[1])) / (l[0] + l[1] + l[2]);
        let b = gamma2 - c * (l[0] * l[0] + l[0] * l[1] + l[1] * l[1]);
        let a = y[0] - (b + l[0] * l[0] * c) * l[0];

        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(ThermistorError::InvalidParameter(
                "datapoints do not determine a finite Steinhart-Hart curve".into(),
            ));
        }

        Ok(Self { a, b, c })
    }

    /// Absolute temperature at resistance `res`
    pub fn calculate_temp(&self, res: f64) -> f64 {
        let ln = res.ln();
        1.0 / (self.a + (self.b * ln) + (self.c * ln.powi(3)))
    }

    /// Resistance at absolute temperature `temp`
    pub fn calculate_res(&self, temp: f64) -> f64 {
        if self.is_beta() {
            return (((1.0 / temp) - self.a) / self.b).exp();
        }

        let y = (1.0 / (2.0 * self.c)) * (self.a - (1.0 / temp));
        let x = ((self.b / (3.0 * self.c)).powi(3) + y.powi(2)).sqrt();

        ((x - y).cbrt() - (x + y).cbrt()).exp()
    }

    pub fn calculate_celsius(&self, res: f64) -> f64 {
        celsius(self.calculate_temp(res))
    }

    pub fn calculate_res_celsius(&self, celsius: f64) -> f64 {
        self.calculate_res(kelvin(celsius))
    }

    /// Whether the cubic term is negligible
    pub fn is_beta(&self) -> bool {
        self.c == 0.0 || self.c.abs() <= self.b.abs() * NEGLIGIBLE_C
    }
}

fn check_datapoint(point: &Datapoint) -> ThermistorResult<()> {
    if !point.res.is_finite() || point.res <= 0.0 {
        return Err(ThermistorError::InvalidParameter(format!(
            "resistance must be positive, got {}",
            point.res
        )));
    }
    if !point.temp.is_finite() || kelvin(point.temp) <= 0.0 {
        return Err(ThermistorError::InvalidParameter(format!(
            "temperature must be above absolute zero, got {} C",
            point.temp
        )));
    }
    Ok(())
}

fn check_beta(beta: f64) -> ThermistorResult<()> {
    if !beta.is_finite() || beta <= 0.0 {
        return Err(ThermistorError::InvalidParameter(format!(
            "beta must be positive, got {}",
            beta
        )));
    }
    Ok(())
}
