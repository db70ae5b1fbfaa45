//! Unit conversions and ordering checks

/// Offset between Celsius and Kelvin
pub const KELVIN: f64 = 273.15;

/// Celsius to absolute temperature
#[inline]
pub fn kelvin(celsius: f64) -> f64 {
    celsius + KELVIN
}

/// Absolute temperature to Celsius
#[inline]
pub fn celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN
}

/// Checks every element against its predecessor with `pred(current, previous)`
pub fn all_pairs<T, F>(values: &[T], mut pred: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    values.windows(2).all(|pair| pred(&pair[1], &pair[0]))
}

/// Non-decreasing
pub fn ascending<T: PartialOrd>(values: &[T]) -> bool {
    all_pairs(values, |current, previous| current >= previous)
}

/// Non-increasing
pub fn descending<T: PartialOrd>(values: &[T]) -> bool {
    all_pairs(values, |current, previous| current <= previous)
}

pub fn strictly_descending<T: PartialOrd>(values: &[T]) -> bool {
    all_pairs(values, |current, previous| current < previous)
}
