//! Utility functions for the Tasador service.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{Error, Result, ResultExt};

/// Format a number with zero decimals and es-PE digit grouping
/// (`852720.4` → `"852,720"`).
///
/// Rounds half away from zero. Non-finite values are rendered as-is.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Read and deserialize a JSON data file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).context(format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(852720.0), "852,720");
        assert_eq!(format_grouped(784822.4), "784,822");
        assert_eq!(format_grouped(920937.6), "920,938");
        assert_eq!(format_grouped(1234567.5), "1,234,568");
    }

    #[test]
    fn test_format_grouped_negative_and_edge_values() {
        assert_eq!(format_grouped(-1500.0), "-1,500");
        assert_eq!(format_grouped(-0.4), "0");
        assert_eq!(format_grouped(f64::INFINITY), "inf");
    }

    #[test]
    fn test_read_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"a": 1.5, "b": 2.0}}"#).unwrap();

        let values: HashMap<String, f64> = read_json_file(file.path()).unwrap();
        assert_eq!(values["a"], 1.5);
    }

    #[test]
    fn test_read_json_file_missing() {
        let err = read_json_file::<serde_json::Value>(Path::new("/nonexistent/tasador.json"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_json_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();

        let err = read_json_file::<Vec<u32>>(file.path()).unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
