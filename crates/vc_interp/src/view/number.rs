use alloc::format;
use core::fmt;

use serde_json::Number;

/// Writes `number` the way JavaScript's `String(number)` does.
///
/// Integers print plainly. Floats print in their shortest form, switching to
/// exponent notation (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
pub(super) fn write_js(number: &Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(value) = number.as_i64() {
        return write!(f, "{value}");
    }
    if let Some(value) = number.as_u64() {
        return write!(f, "{value}");
    }

    let Some(value) = number.as_f64() else {
        return write!(f, "{number}");
    };

    if value == 0.0 {
        return f.write_str("0");
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{value}");
    }

    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&text),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Number;

    use crate::Current;

    fn js(value: f64) -> String {
        Current::Number(Number::from_f64(value).unwrap()).to_string()
    }

    #[test]
    fn float_forms() {
        assert_eq!(js(3.0), "3");
        assert_eq!(js(-0.0), "0");
        assert_eq!(js(0.1), "0.1");
        assert_eq!(js(1e20), "100000000000000000000");
        assert_eq!(js(1e21), "1e+21");
        assert_eq!(js(2.5e-7), "2.5e-7");
        assert_eq!(js(0.000001), "0.000001");
    }
}
