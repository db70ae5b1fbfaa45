//! Storage types for lookup table entries

use std::fmt::{Debug, Display};

use num_traits::NumCast;

/// A type that can hold one lookup table entry
///
/// Floating point types keep the computed value as is. Integer types round to
/// the nearest integer, which is what an ADC reading is compared against.
pub trait TableValue: Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Name used in configuration files and error messages
    const TYPE_NAME: &'static str;

    /// Convert a computed sample, `None` when it does not fit
    fn from_sample(sample: f64) -> Option<Self>;

    fn to_f64(self) -> f64;
}

macro_rules! impl_float_value {
    ($($ty:ty),*) => {
        $(
            impl TableValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_sample(sample: f64) -> Option<Self> {
                    let value = <$ty as NumCast>::from(sample)?;
                    value.is_finite().then_some(value)
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_integer_value {
    ($($ty:ty),*) => {
        $(
            impl TableValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_sample(sample: f64) -> Option<Self> {
                    <$ty as NumCast>::from(sample.round())
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_float_value!(f32, f64);
impl_integer_value!(u8, u16, u32, u64, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_round_to_nearest() {
        assert_eq!(u32::from_sample(10030.217595116217), Some(10030));
        assert_eq!(u32::from_sample(17000.5), Some(17001));
        assert_eq!(i16::from_sample(-3.6), Some(-4));
    }

    #[test]
    fn test_integer_overflow_is_rejected() {
        assert_eq!(u16::from_sample(70000.0), None);
        assert_eq!(u8::from_sample(-1.0), None);
        assert_eq!(u32::from_sample(f64::NAN), None);
    }

    #[test]
    fn test_floats_keep_value() {
        assert_eq!(f64::from_sample(1103.5474105037119), Some(1103.5474105037119));
        assert_eq!(f32::from_sample(2.5), Some(2.5f32));
        assert_eq!(f64::from_sample(f64::INFINITY), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(<u16 as TableValue>::TYPE_NAME, "u16");
        assert_eq!(<f64 as TableValue>::TYPE_NAME, "f64");
    }
}
