use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Optional numeric setting with zero treated as unset.
///
/// `None`, `0` and `NaN` all read as "unset".
#[must_use]
pub fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::{decimal_to_f64, truthy};
    use rust_decimal::Decimal;

    #[test]
    fn decimal_conversion_keeps_value() {
        let value = decimal_to_f64(Decimal::new(1234, 2), "value").expect("convert");
        assert!((value - 12.34).abs() <= 1e-12);
    }

    #[test]
    fn zero_and_nan_are_not_truthy() {
        assert_eq!(truthy(None), None);
        assert_eq!(truthy(Some(0.0)), None);
        assert_eq!(truthy(Some(f64::NAN)), None);
        assert_eq!(truthy(Some(20.0)), Some(20.0));
    }
}
