//! Numeric mutation primitives
//!
//! Values travel as strings: the number of decimals in the text being
//! replaced decides how the replacement is formatted, so generated values
//! look like the template they came from. `"1.50"` scaled stays two
//! decimals; `"300"` stays an integer (truncated, not rounded).

use rand::Rng;

use crate::core::error::{Result, VariantError};

/// Count of digits after the decimal point; 0 if there is none
pub fn decimal_places(num: &str) -> usize {
    num.split('.').nth(1).map(str::len).unwrap_or(0)
}

/// Parse a config or catalog numeric string
pub fn parse_number(num: &str) -> Result<f64> {
    num.trim()
        .parse::<f64>()
        .map_err(|_| VariantError::invalid_number(num))
}

/// Format to `decimals` places; 0 decimals truncates toward zero
pub fn format_decimals(value: f64, decimals: usize) -> String {
    if decimals == 0 {
        format!("{}", value.trunc() as i64)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Uniform value in `[low*r, high*r]` with `r = rescale/100`
///
/// Precision is the larger decimal count of `low` and `high`.
pub fn range_sample<R: Rng + ?Sized>(
    rng: &mut R,
    low: &str,
    high: &str,
    rescale: Option<&str>,
) -> Result<String> {
    let low_f = parse_number(low)?;
    let high_f = parse_number(high)?;
    if high_f < low_f {
        return Err(VariantError::InvalidRange {
            low: low.to_string(),
            high: high.to_string(),
        });
    }

    let num_decimals = decimal_places(low).max(decimal_places(high));
    let rescale = match rescale {
        Some(r) => parse_number(r)? / 100.0,
        None => 1.0,
    };

    let use_low = low_f * rescale;
    let use_high = high_f * rescale;
    let sample = use_low + rng.gen::<f64>() * (use_high - use_low);

    Ok(format_decimals(sample, num_decimals))
}

/// Vary `value` by up to +/- `pct` percent, then apply `extra_multiplier`
///
/// A pct of 25 yields a factor in `[0.75, 1.25)`.
pub fn jitter_percent<R: Rng + ?Sized>(
    rng: &mut R,
    value: &str,
    pct: &str,
    decimals: usize,
    extra_multiplier: f64,
) -> Result<String> {
    let pct = parse_number(pct)?;
    let factor = 1.0 + ((rng.gen::<f64>() * pct * 2.0) - pct) / 100.0;
    let varied = parse_number(value)? * extra_multiplier * factor;
    Ok(format_decimals(varied, decimals))
}

/// Multiply `value` by `pct/100`, optionally clamped to `cap`
pub fn scale_by_percent(value: &str, pct: &str, decimals: usize, cap: Option<f64>) -> Result<String> {
    let mut scaled = parse_number(value)? * parse_number(pct)? / 100.0;
    if let Some(cap) = cap {
        scaled = scaled.min(cap);
    }
    Ok(format_decimals(scaled, decimals))
}
