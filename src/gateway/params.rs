use serde::{Deserialize, Serialize};

/// Numeric settings handed to the converter.
///
/// Every field defaults on its own, so a request may set any subset of keys.
/// Values are not range-checked here; the converter decides what it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Resolution used to turn SVG user units into millimetres
    pub dpi: f64,
    /// Cutting feed rate (mm/min)
    pub feed_rate: f64,
    /// Travel rate for non-cutting moves (mm/min)
    pub seek_rate: f64,
    /// Depth below the work surface at the final pass (mm)
    pub cut_depth: f64,
    /// Height for travel moves (mm)
    pub safe_height: f64,
    /// Cutter diameter (mm); paths are cut on their centreline, without
    /// radius compensation
    pub tool_diameter: f64,
    /// Maximum deviation when approximating curves with lines (mm)
    pub tolerance: f64,
    /// Number of cutting passes over each path
    pub passes: f64,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            feed_rate: 1000.0,
            seek_rate: 3000.0,
            cut_depth: 1.0,
            safe_height: 3.0,
            tool_diameter: 0.1,
            tolerance: 0.1,
            passes: 1.0,
        }
    }
}

/// One request read from standard input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversionRequest {
    #[serde(alias = "svgContent")]
    pub svg_content: String,
    /// Absent and `null` both resolve to the defaults.
    #[serde(default, deserialize_with = "params_or_default")]
    pub params: ConversionParams,
}

impl ConversionRequest {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

fn params_or_default<'de, D>(deserializer: D) -> Result<ConversionParams, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ConversionParams>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let p = ConversionParams::default();
        assert_eq!(p.dpi, 96.0);
        assert_eq!(p.feed_rate, 1000.0);
        assert_eq!(p.seek_rate, 3000.0);
        assert_eq!(p.cut_depth, 1.0);
        assert_eq!(p.safe_height, 3.0);
        assert_eq!(p.tool_diameter, 0.1);
        assert_eq!(p.tolerance, 0.1);
        assert_eq!(p.passes, 1.0);
    }

    #[test]
    fn test_partial_params_overlay_defaults() {
        let p: ConversionParams =
            serde_json::from_str(r#"{"passes": 3, "tool_diameter": 0.2}"#).unwrap();
        assert_eq!(
            p,
            ConversionParams {
                passes: 3.0,
                tool_diameter: 0.2,
                ..ConversionParams::default()
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let p: ConversionParams = serde_json::from_str(r#"{"laser_power": 80}"#).unwrap();
        assert_eq!(p, ConversionParams::default());
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let p: ConversionParams = serde_json::from_str(r#"{"dpi": -5, "passes": 0}"#).unwrap();
        assert_eq!(p.dpi, -5.0);
        assert_eq!(p.passes, 0.0);
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        assert!(serde_json::from_str::<ConversionParams>(r#"{"dpi": "high"}"#).is_err());
    }

    #[test]
    fn test_request_without_params() {
        let req = ConversionRequest::from_json(r#"{"svg_content": "<svg/>"}"#).unwrap();
        assert_eq!(req.svg_content, "<svg/>");
        assert_eq!(req.params, ConversionParams::default());
    }

    #[test]
    fn test_request_with_null_params() {
        let req =
            ConversionRequest::from_json(r#"{"svg_content": "<svg/>", "params": null}"#).unwrap();
        assert_eq!(req.params, ConversionParams::default());
    }

    #[test]
    fn test_request_accepts_camel_case_content() {
        let req = ConversionRequest::from_json(r#"{"svgContent": "<svg/>", "params": {}}"#).unwrap();
        assert_eq!(req.svg_content, "<svg/>");
    }

    #[test]
    fn test_request_missing_content() {
        let err = ConversionRequest::from_json(r#"{"params": {}}"#).unwrap_err();
        assert!(err.to_string().contains("svg_content"));
    }
}
