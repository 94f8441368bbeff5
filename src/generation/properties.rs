//! Set-or-create property mutations
//!
//! Each routine rewrites every matching record in the entity subtree, or
//! appends one record built from the configured default.

use rand::Rng;

use crate::catalog::EntityClass;
use crate::core::error::Result;
use crate::numeric::{decimal_places, jitter_percent, range_sample, scale_by_percent};

/// Multiply by `pct` percent, keeping each value's own precision
pub fn scale_property(
    entity: &mut EntityClass,
    name: &str,
    pct: &str,
    default: &str,
    cap: Option<f64>,
) -> Result<bool> {
    entity.update_or_create(name, default, |value| {
        scale_by_percent(value, pct, decimal_places(value), cap)
    })
}

/// Vary by up to +/- `pct` percent around the current value
pub fn vary_around_base<R: Rng + ?Sized>(
    entity: &mut EntityClass,
    name: &str,
    pct: &str,
    default: &str,
    rng: &mut R,
) -> Result<bool> {
    entity.update_or_create(name, default, |value| {
        jitter_percent(rng, value, pct, decimal_places(value), 1.0)
    })
}

/// One fresh draw from `[low, high]`, set on every match
pub fn set_from_range<R: Rng + ?Sized>(
    entity: &mut EntityClass,
    name: &str,
    low: &str,
    high: &str,
    rng: &mut R,
) -> Result<bool> {
    let value = range_sample(rng, low, high, None)?;
    Ok(entity.set_property(name, &value))
}

/// A `"low,high"` pair: low drawn from `[low1, low2]`, high from `[high1, high2]`
#[allow(clippy::too_many_arguments)]
pub fn set_from_two_ranges<R: Rng + ?Sized>(
    entity: &mut EntityClass,
    name: &str,
    low1: &str,
    low2: &str,
    high1: &str,
    high2: &str,
    rescale: Option<&str>,
    rng: &mut R,
) -> Result<bool> {
    let low = range_sample(rng, low1, low2, rescale)?;
    let high = range_sample(rng, high1, high2, rescale)?;
    Ok(entity.set_property(name, &format!("{},{}", low, high)))
}
