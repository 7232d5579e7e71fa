// Numeric parameter extraction for the contradiction and boundary strategies
use crate::patterns::{NUMERIC_PARAM_PATTERN, RANGE_PATTERN};

/// A number with its unit, as written in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericParam {
    pub value: String,
    pub unit: String,
}

impl NumericParam {
    /// Unit key used to group comparable values
    pub fn normalized_unit(&self) -> String {
        normalize_unit(&self.unit)
    }
}

/// Extracts every "<number> <unit>" occurrence in a line, left to right
pub fn extract_numeric_params(line: &str) -> Vec<NumericParam> {
    NUMERIC_PARAM_PATTERN
        .captures_iter(line)
        .filter_map(|cap| {
            let value = cap.get(1)?.as_str().to_string();
            let unit = cap.get(2)?.as_str().to_string();
            Some(NumericParam { value, unit })
        })
        .collect()
}

/// Extracts "between X and Y" / "from X to Y" bounds, left to right
pub fn extract_ranges(line: &str) -> Vec<(String, String)> {
    RANGE_PATTERN
        .captures_iter(line)
        .filter_map(|cap| {
            let low = cap.get(1)?.as_str().to_string();
            let high = cap.get(2)?.as_str().to_string();
            Some((low, high))
        })
        .collect()
}

/// Case-folds a unit, drops plural endings and merges "%" with "percent"
pub fn normalize_unit(unit: &str) -> String {
    let lower = unit
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if lower == "%" || lower == "percent" {
        return "percent".to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    lower.trim_end_matches('s').to_string()
}

/// Returns the 10x and 0.1x stress values for a parameter
pub fn scale_variants(value: f64) -> (f64, f64) {
    if value == 0.0 {
        (0.0, 0.0)
    } else {
        (value * 10.0, value / 10.0)
    }
}

/// Formats a value with at most six significant digits and no trailing zeros
pub fn format_compact(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(5 - magnitude);
    let rounded = (value * scale).round() / scale;
    format!("{}", rounded)
}
