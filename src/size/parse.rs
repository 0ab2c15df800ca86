//! Size-String Parser
//!
//! Converts human-readable size strings like "10MB" into byte counts.

use crate::error::{CacheError, Result};

// == Unit Multipliers ==
/// Bytes per kilobyte (binary multiple)
pub const KB: u64 = 1 << 10;
/// Bytes per megabyte
pub const MB: u64 = 1 << 20;
/// Bytes per gigabyte
pub const GB: u64 = 1 << 30;
/// Bytes per terabyte
pub const TB: u64 = 1 << 40;

// == Parse Size ==
/// Parses a size specification of the form `<digits><unit>`.
///
/// Units are case-insensitive: B, KB, MB, GB, TB, with binary multiples
/// (1 KB = 1024 bytes). Returns the byte count together with the canonical
/// label, e.g. `"10mb"` -> `(10_485_760, "10MB")`.
///
/// A malformed spec is an error and nothing else: there is no fallback
/// value, so callers keep whatever budget they already had.
pub fn parse_size(spec: &str) -> Result<(u64, String)> {
    let spec = spec.trim();

    // Split at the first non-digit character
    let unit_start = spec
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| CacheError::InvalidSizeSpec(format!("'{}' is missing a unit", spec)))?;
    let (digits, unit) = spec.split_at(unit_start);

    if digits.is_empty() {
        return Err(CacheError::InvalidSizeSpec(format!(
            "'{}' is missing a numeric value",
            spec
        )));
    }

    let count: u64 = digits
        .parse()
        .map_err(|_| CacheError::InvalidSizeSpec(format!("'{}' has an invalid number", spec)))?;

    let unit = unit.to_ascii_uppercase();
    let multiplier = match unit.as_str() {
        "B" => 1,
        "KB" => KB,
        "MB" => MB,
        "GB" => GB,
        "TB" => TB,
        other => {
            return Err(CacheError::InvalidSizeSpec(format!(
                "unrecognized unit '{}'",
                other
            )))
        }
    };

    let bytes = count
        .checked_mul(multiplier)
        .ok_or_else(|| CacheError::InvalidSizeSpec(format!("'{}' overflows u64", spec)))?;

    Ok((bytes, format!("{}{}", count, unit)))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes() {
        let (bytes, label) = parse_size("512B").unwrap();
        assert_eq!(bytes, 512);
        assert_eq!(label, "512B");
    }

    #[test]
    fn test_parse_megabytes() {
        let (bytes, label) = parse_size("10MB").unwrap();
        assert_eq!(bytes, 10 * 1024 * 1024);
        assert_eq!(label, "10MB");
    }

    #[test]
    fn test_parse_all_units() {
        assert_eq!(parse_size("1B").unwrap().0, 1);
        assert_eq!(parse_size("1KB").unwrap().0, 1024);
        assert_eq!(parse_size("1MB").unwrap().0, 1024 * 1024);
        assert_eq!(parse_size("1GB").unwrap().0, 1024 * 1024 * 1024);
        assert_eq!(parse_size("1TB").unwrap().0, 1024u64.pow(4));
    }

    #[test]
    fn test_parse_case_insensitive() {
        let (bytes, label) = parse_size("10mb").unwrap();
        assert_eq!(bytes, 10 * 1024 * 1024);
        assert_eq!(label, "10MB", "label should be canonicalized");

        assert_eq!(parse_size("2Gb").unwrap().0, 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_size(" 5KB ").unwrap().0, 5 * 1024);
    }

    #[test]
    fn test_parse_missing_unit() {
        let result = parse_size("100");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }

    #[test]
    fn test_parse_missing_digits() {
        let result = parse_size("MB");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }

    #[test]
    fn test_parse_unknown_unit() {
        let result = parse_size("10XB");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }

    #[test]
    fn test_parse_empty() {
        let result = parse_size("");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }

    #[test]
    fn test_parse_interior_space() {
        let result = parse_size("10 MB");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }

    #[test]
    fn test_parse_overflow() {
        let result = parse_size("99999999999TB");
        assert!(matches!(result, Err(CacheError::InvalidSizeSpec(_))));
    }
}
