use serde::{Deserialize, Serialize};

use super::flat_string;

/// A hospital review. `rating` is kept as entered (no numeric validation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "flat_string")]
    pub hospital: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub text: String,
}

impl Review {
    /// Numeric value of the rating, read the way the portal page reads it.
    ///
    /// Surrounding whitespace is ignored and an empty rating counts as zero.
    /// Anything else that does not parse is NaN, which propagates into the
    /// average rather than being dropped.
    pub fn rating_value(&self) -> f64 {
        page_number(&self.rating)
    }
}

/// Browser-style string to number conversion.
///
/// Accepts decimal literals (`4`, `+3.5`, `.5`, `1e1`), `Infinity` with an
/// optional sign, and unsigned `0x`/`0o`/`0b` integers. Rust-only spellings
/// such as `inf` or `nan` are NaN.
fn page_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match t.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &t[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let decimal_chars = t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}
