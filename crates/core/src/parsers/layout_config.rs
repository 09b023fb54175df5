use thiserror::Error;

use crate::layout::LayoutError;
use crate::model::LayoutConfig;

#[derive(Debug, Error)]
pub enum LayoutConfigParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LayoutError),
}

/// Parse a layout config file. Missing fields take their defaults; present
/// fields must be positive.
pub fn parse_layout_config(data: &[u8]) -> Result<LayoutConfig, LayoutConfigParseError> {
    let config: LayoutConfig = serde_json::from_slice(data)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = parse_layout_config(b"{}").expect("defaults");
        assert_eq!(cfg, LayoutConfig::default());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = parse_layout_config(br#"{ "visualGridIntervalMinutes": 0 }"#)
            .expect_err("zero interval");
        assert!(matches!(
            err,
            LayoutConfigParseError::Invalid(LayoutError::NonPositive {
                field: "visualGridIntervalMinutes",
                ..
            })
        ));
    }

    #[test]
    fn negative_minutes_fail_to_deserialize() {
        let err = parse_layout_config(br#"{ "eventCalcUnitMinutes": -15 }"#)
            .expect_err("negative");
        assert!(matches!(err, LayoutConfigParseError::Json(_)));
    }
}
