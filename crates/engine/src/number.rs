//! Number parsing and `%g`-style formatting for cell contents.

/// Significant digits used by general formatting.
const GENERAL_PRECISION: i32 = 6;

/// Parse cell text as a number. Surrounding whitespace is ignored; empty text,
/// garbage and non-finite values (`inf`, `NaN`) are not numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Format a number the way C's `%g` does: six significant digits, trailing
/// zeros removed, scientific notation for very large or very small magnitudes.
pub fn format_general(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // Round to the target precision first; the exponent must come from the rounded value.
    let sci = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= GENERAL_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (GENERAL_PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number(" -1.5 "), Some(-1.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_format_integers() {
        assert_eq!(format_general(6.0), "6");
        assert_eq!(format_general(-3.0), "-3");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(100000.0), "100000");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_general(2.5), "2.5");
        assert_eq!(format_general(1.0 / 3.0), "0.333333");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(123.456789), "123.457");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_general(1000000.0), "1e+06");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(-0.000012345), "-1.2345e-05");
    }

    #[test]
    fn test_format_rounding_carries_into_exponent() {
        assert_eq!(format_general(999999.7), "1e+06");
        assert_eq!(format_general(9.9999996), "10");
    }
}
