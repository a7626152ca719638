// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and bar titles.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Number of decimals needed to distinguish values spaced `step` apart.
///
/// A step of `1` needs none, `0.05` needs two. Non-finite or non-positive steps yield `0`.
pub fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exp = step.log10().floor();
    if exp >= 0.0 {
        return 0;
    }
    let digits = (-exp).min(20.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and capped at 20 above"
    )]
    {
        digits as usize
    }
}

/// Formats `v` with fixed decimals derived from `step`, grouping thousands with `,`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return String::from("NaN");
    }
    let decimals = precision_for_step(step);
    // Avoid printing "-0".
    let v = if v == 0.0 { 0.0 } else { v };
    let raw = alloc::format!("{:.*}", decimals, v);
    let rounded_to_zero = raw.trim_start_matches('-').chars().all(|c| c == '0' || c == '.');
    let raw = if rounded_to_zero {
        String::from(raw.trim_start_matches('-'))
    } else {
        raw
    };
    group_thousands(&raw)
}

fn group_thousands(raw: &str) -> String {
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int, frac) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(raw.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(precision_for_step(1.0), 0);
        assert_eq!(precision_for_step(10.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.05), 2);
        assert_eq!(precision_for_step(0.0), 0);
        assert_eq!(precision_for_step(f64::NAN), 0);
    }

    #[test]
    fn formats_with_fixed_decimals_and_grouping() {
        assert_eq!(format_tick_with_step(3.0, 1.0), "3");
        assert_eq!(format_tick_with_step(5.0, 0.05), "5.00");
        assert_eq!(format_tick_with_step(1234567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_with_step(-1500.5, 0.5), "-1,500.5");
        assert_eq!(format_tick_with_step(-0.001, 0.1), "0.0");
    }
}
