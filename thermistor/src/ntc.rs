//! NTC thermistor lookup table
//!
//! The table samples a [`Steinhart`] model at evenly spaced temperatures,
//! runs each resistance through a [`Circuit`] and stores the result as a
//! [`TableValue`]. Entry `0` belongs to the coldest temperature, so an NTC
//! table is strictly descending. Readings are converted back to temperature
//! by linear interpolation between the two neighbouring entries.

use std::ops::Index;

use serde::Serialize;
use tracing::{debug, trace};

use crate::circuit::{Circuit, Direct};
use crate::error::{ThermistorError, ThermistorResult};
use crate::range::TempRange;
use crate::steinhart::Steinhart;
use crate::util;
use crate::value::TableValue;

/// Temperature recovered from a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpolation {
    /// Degrees Celsius, clamped to the table range
    pub celsius: f64,
    /// Reading fell outside the table and was clamped
    pub saturated: bool,
}

impl Interpolation {
    fn exact(celsius: f64) -> Self {
        Self {
            celsius,
            saturated: false,
        }
    }

    fn saturated(celsius: f64) -> Self {
        Self {
            celsius,
            saturated: true,
        }
    }

    /// Temperature only when the reading was inside the table
    pub fn in_range(&self) -> Option<f64> {
        (!self.saturated).then_some(self.celsius)
    }
}

/// Lookup table for a negative temperature coefficient thermistor
#[derive(Debug, Clone, PartialEq)]
pub struct Ntc<V: TableValue = u32> {
    range: TempRange,
    delta: f64,
    table: Vec<V>,
}

impl<V: TableValue> Ntc<V> {
    /// Table of raw resistances
    pub fn new(equation: &Steinhart, range: TempRange, datapoints: usize) -> ThermistorResult<Self> {
        Self::with_circuit(equation, range, datapoints, &Direct)
    }

    /// Table of whatever `circuit` reports for each resistance
    pub fn with_circuit<C: Circuit + ?Sized>(
        equation: &Steinhart,
        range: TempRange,
        datapoints: usize,
        circuit: &C,
    ) -> ThermistorResult<Self> {
        let delta = range.delta(datapoints)?;
        let mut table = Vec::with_capacity(datapoints);

        for index in 0..datapoints {
            let celsius = range.min() + index as f64 * delta;
            let sample = circuit.transform(equation.calculate_res_celsius(celsius));

            if !sample.is_finite() {
                return Err(ThermistorError::NonFiniteValue { index, celsius });
            }

            let value = V::from_sample(sample).ok_or(ThermistorError::ValueOutOfRange {
                index,
                value: sample,
                type_name: V::TYPE_NAME,
            })?;
            table.push(value);
        }

        check_descending(&table)?;

        debug!(
            datapoints,
            min = range.min(),
            max = range.max(),
            delta,
            value_type = V::TYPE_NAME,
            "built thermistor lookup table"
        );

        Ok(Self {
            range,
            delta,
            table,
        })
    }

    /// Adopt an existing table, e.g. one copied from a datasheet
    pub fn from_values(range: TempRange, values: Vec<V>) -> ThermistorResult<Self> {
        let delta = range.delta(values.len())?;

        if let Some(index) = values.iter().position(|value| !value.to_f64().is_finite()) {
            return Err(ThermistorError::NonFiniteValue {
                index,
                celsius: range.min() + index as f64 * delta,
            });
        }
        check_descending(&values)?;

        Ok(Self {
            range,
            delta,
            table: values,
        })
    }

    pub fn range(&self) -> TempRange {
        self.range
    }

    /// Temperature step between neighbouring entries
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false, a table holds at least its two endpoints
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<V> {
        self.table.get(index).copied()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.table
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.table.iter()
    }

    /// Temperature the entry at `index` was sampled at
    pub fn index_to_temp(&self, index: usize) -> f64 {
        if index + 1 == self.table.len() {
            self.range.max()
        } else {
            self.range.min() + index as f64 * self.delta
        }
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.table.len()).map(|index| self.index_to_temp(index))
    }

    /// `(celsius, value)` for every entry
    pub fn entries(&self) -> impl Iterator<Item = (f64, V)> + '_ {
        self.table
            .iter()
            .enumerate()
            .map(|(index, value)| (self.index_to_temp(index), *value))
    }

    /// Temperature for `reading` and whether it had to be saturated
    pub fn interpolate(&self, reading: V) -> Interpolation {
        let last = self.table.len() - 1;
        let hottest = self.table[last];
        let coldest = self.table[0];

        if reading.partial_cmp(&reading).is_none() {
            trace!(%reading, "unordered reading");
            return Interpolation::saturated(f64::NAN);
        }

        if reading > coldest {
            trace!(%reading, "reading saturated at minimum temperature");
            return Interpolation::saturated(self.range.min());
        }
        if reading == coldest {
            return Interpolation::exact(self.range.min());
        }
        if reading < hottest {
            trace!(%reading, "reading saturated at maximum temperature");
            return Interpolation::saturated(self.range.max());
        }
        if reading == hottest {
            return Interpolation::exact(self.range.max());
        }

        // coldest > reading > hottest, so 1 <= upper <= last
        let upper = self.table.partition_point(|value| *value >= reading);
        let lower = upper - 1;

        let x1 = self.index_to_temp(lower);
        let x2 = self.index_to_temp(upper);
        let y1 = self.table[lower].to_f64();
        let y2 = self.table[upper].to_f64();
        let res = reading.to_f64();

        Interpolation::exact(self.range.clamp(x1 + ((y1 - res) * (x2 - x1) / (y1 - y2))))
    }

    /// Mean squared difference against a reference table of equal length
    pub fn mean_squared_error(&self, reference: &[f64]) -> ThermistorResult<f64> {
        if reference.len() != self.table.len() {
            return Err(ThermistorError::SizeMismatch {
                expected: self.table.len(),
                actual: reference.len(),
            });
        }

        let acc: f64 = self
            .table
            .iter()
            .zip(reference)
            .map(|(value, expected)| {
                let err = expected - value.to_f64();
                err * err
            })
            .sum();

        Ok(acc / reference.len() as f64)
    }
}

impl<V: TableValue> Index<usize> for Ntc<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.table[index]
    }
}

impl<'a, V: TableValue> IntoIterator for &'a Ntc<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

fn check_descending<V: TableValue>(values: &[V]) -> ThermistorResult<()> {
    if util::strictly_descending(values) {
        return Ok(());
    }

    // a rise outranks a flat step anywhere in the table
    if !util::descending(values) {
        let offset = values.windows(2).position(|pair| pair[1] > pair[0]);
        return Err(ThermistorError::NotDescending {
            index: offset.map_or(0, |offset| offset + 1),
        });
    }

    let offset = values.windows(2).position(|pair| pair[1] == pair[0]);
    Err(ThermistorError::OverSampled {
        index: offset.map_or(0, |offset| offset + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steinhart::Datapoint;

    fn beta_10k() -> Steinhart {
        Steinhart::from_beta(&Datapoint::new(25.0, 10000.0), 3950.0).unwrap()
    }

    #[test]
    fn test_too_few_datapoints() {
        let range = TempRange::new(0.0, 10.0).unwrap();
        assert!(matches!(
            Ntc::<u32>::new(&beta_10k(), range, 1),
            Err(ThermistorError::TooFewDatapoints(1))
        ));
    }

    #[test]
    fn test_nominal_reading_is_exact() {
        let range = TempRange::new(-10.0, 50.0).unwrap();
        let lut = Ntc::<u32>::new(&beta_10k(), range, 61).unwrap();

        assert_eq!(lut.len(), 61);
        assert_eq!(lut.delta(), 1.0);
        assert_eq!(lut[35], 10000);

        let result = lut.interpolate(10000);
        assert!(!result.saturated);
        assert_eq!(result.celsius, 25.0);
    }

    #[test]
    fn test_endpoints_and_saturation() {
        let range = TempRange::new(0.0, 10.0).unwrap();
        let lut = Ntc::<u32>::new(&beta_10k(), range, 11).unwrap();

        let max = lut[0];
        let min = lut[10];

        assert_eq!(lut.interpolate(max), Interpolation::exact(0.0));
        assert_eq!(lut.interpolate(min), Interpolation::exact(10.0));
        assert_eq!(lut.interpolate(max + 10), Interpolation::saturated(0.0));
        assert_eq!(lut.interpolate(min - 10), Interpolation::saturated(10.0));
        assert_eq!(lut.interpolate(min - 10).in_range(), None);
    }

    #[test]
    fn test_interpolates_between_neighbours() {
        let range = TempRange::new(0.0, 2.0).unwrap();
        let lut = Ntc::from_values(range, vec![300.0f64, 200.0, 100.0]).unwrap();

        let result = lut.interpolate(250.0);
        assert!(!result.saturated);
        assert!((result.celsius - 0.5).abs() < 1e-12);

        let result = lut.interpolate(200.0);
        assert_eq!(result.celsius, 1.0);

        let result = lut.interpolate(125.0);
        assert!((result.celsius - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_nan_reading_is_saturated() {
        let range = TempRange::new(0.0, 2.0).unwrap();
        let lut = Ntc::from_values(range, vec![300.0f64, 200.0, 100.0]).unwrap();

        let result = lut.interpolate(f64::NAN);
        assert!(result.saturated);
        assert!(result.celsius.is_nan());
    }

    #[test]
    fn test_rejects_flat_and_rising_tables() {
        let range = TempRange::new(0.0, 3.0).unwrap();
        assert!(matches!(
            Ntc::from_values(range, vec![4u16, 3, 3, 1]),
            Err(ThermistorError::OverSampled { index: 2 })
        ));
        assert!(matches!(
            Ntc::from_values(range, vec![4u16, 3, 3, 5]),
            Err(ThermistorError::NotDescending { index: 3 })
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let range = TempRange::new(0.0, 2.0).unwrap();
        assert!(matches!(
            Ntc::from_values(range, vec![f64::INFINITY, 200.0, 100.0]),
            Err(ThermistorError::NonFiniteValue { index: 0, celsius }) if celsius == 0.0
        ));
        assert!(matches!(
            Ntc::from_values(range, vec![300.0f32, f32::NAN, 100.0]),
            Err(ThermistorError::NonFiniteValue { index: 1, celsius }) if celsius == 1.0
        ));
    }

    #[test]
    fn test_interpolation_serializes() {
        let range = TempRange::new(0.0, 2.0).unwrap();
        let lut = Ntc::from_values(range, vec![300.0f64, 200.0, 100.0]).unwrap();

        let value = serde_json::to_value(lut.interpolate(400.0)).unwrap();
        assert_eq!(value["celsius"], 0.0);
        assert_eq!(value["saturated"], true);
    }

    #[test]
    fn test_value_out_of_range() {
        // 100k at 25C reaches millions of ohm below -20C
        let eq = Steinhart::from_beta(&Datapoint::new(25.0, 100000.0), 3950.0).unwrap();
        let range = TempRange::new(-40.0, 0.0).unwrap();
        assert!(matches!(
            Ntc::<u16>::new(&eq, range, 41),
            Err(ThermistorError::ValueOutOfRange { index: 0, type_name: "u16", .. })
        ));
    }

    #[test]
    fn test_non_finite_model() {
        let eq = Steinhart::new(0.0, 0.0, 0.0);
        let range = TempRange::new(0.0, 10.0).unwrap();
        assert!(matches!(
            Ntc::<f64>::new(&eq, range, 11),
            Err(ThermistorError::NonFiniteValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_entries_follow_range() {
        let range = TempRange::new(-10.0, 10.0).unwrap();
        let lut = Ntc::<f64>::new(&beta_10k(), range, 5).unwrap();

        let temps: Vec<f64> = lut.entries().map(|(t, _)| t).collect();
        assert_eq!(temps, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(lut.temperatures().collect::<Vec<_>>(), temps);
        assert_eq!(lut.iter().count(), 5);
        assert_eq!((&lut).into_iter().count(), 5);
    }

    #[test]
    fn test_mean_squared_error() {
        let range = TempRange::new(0.0, 2.0).unwrap();
        let lut = Ntc::from_values(range, vec![300.0f64, 200.0, 100.0]).unwrap();

        assert_eq!(lut.mean_squared_error(&[300.0, 200.0, 100.0]).unwrap(), 0.0);
        assert_eq!(lut.mean_squared_error(&[303.0, 200.0, 100.0]).unwrap(), 3.0);
        assert!(matches!(
            lut.mean_squared_error(&[1.0]),
            Err(ThermistorError::SizeMismatch { expected: 3, actual: 1 })
        ));
    }
}
