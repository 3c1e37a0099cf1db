//! SVG to G-code toolpath converter
//!
//! The default [`GcodeConverter`] behind the gateway.
//!
//! The conversion process:
//! 1. Validate the numeric parameters
//! 2. Load the SVG with usvg (shapes become paths, transforms resolve)
//! 3. Flatten every path into millimetre polylines within `tolerance`
//! 4. Emit one cutting sequence per polyline and pass
//!
//! The tool follows path centrelines; no radius compensation is applied.

pub mod emit;
pub mod flatten;
pub mod types;

use std::path::Path;

use crate::error::ConvertError;
use crate::gateway::{ConversionParams, GcodeConverter};

pub use emit::{MotionSettings, emit_program};
pub use flatten::{collect_polylines, flatten_cubic, flatten_quad};
pub use types::{MachineSpace, Point, Polyline};

/// Converter backed by usvg.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolpathConverter;

impl ToolpathConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert SVG text that is already in memory.
    pub fn convert_str(
        &self,
        svg: &str,
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError> {
        self.convert_data(svg.as_bytes(), params)
    }

    fn convert_data(
        &self,
        data: &[u8],
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError> {
        let settings = validate(params)?;

        let opt = usvg::Options {
            dpi: params.dpi as f32,
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_data(data, &opt)?;

        let polylines = collect_polylines(&tree, params.dpi, params.tolerance);
        let points: usize = polylines.iter().map(Polyline::len).sum();
        tracing::info!(
            paths = polylines.len(),
            points,
            passes = settings.passes,
            "flattened drawing"
        );

        Ok(emit_program(&polylines, &settings))
    }
}

impl GcodeConverter for ToolpathConverter {
    #[tracing::instrument(skip_all, fields(svg_path = %svg_path.display()))]
    fn convert_file(
        &self,
        svg_path: &Path,
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError> {
        let data = std::fs::read(svg_path).map_err(|source| ConvertError::Read {
            path: svg_path.to_path_buf(),
            source,
        })?;
        self.convert_data(&data, params)
    }
}

fn check(
    name: &'static str,
    value: f64,
    ok: bool,
    reason: &'static str,
) -> Result<(), ConvertError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ConvertError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

/// Upper bound on `passes`; the whole program is held in memory.
pub const MAX_PASSES: f64 = 10_000.0;

/// Reject parameter values the converter cannot work with.
pub fn validate(params: &ConversionParams) -> Result<MotionSettings, ConvertError> {
    const POSITIVE: &str = "must be a finite number > 0";

    check("dpi", params.dpi, params.dpi > 0.0, POSITIVE)?;
    check("feed_rate", params.feed_rate, params.feed_rate > 0.0, POSITIVE)?;
    check("seek_rate", params.seek_rate, params.seek_rate > 0.0, POSITIVE)?;
    check(
        "cut_depth",
        params.cut_depth,
        params.cut_depth >= 0.0,
        "must be a finite number >= 0",
    )?;
    check(
        "safe_height",
        params.safe_height,
        true,
        "must be a finite number",
    )?;
    check(
        "tool_diameter",
        params.tool_diameter,
        params.tool_diameter > 0.0,
        POSITIVE,
    )?;
    check("tolerance", params.tolerance, params.tolerance > 0.0, POSITIVE)?;
    check(
        "passes",
        params.passes,
        params.passes >= 1.0 && params.passes.fract() == 0.0 && params.passes <= MAX_PASSES,
        "must be a whole number between 1 and 10000",
    )?;

    Ok(MotionSettings {
        feed_rate: params.feed_rate,
        seek_rate: params.seek_rate,
        cut_depth: params.cut_depth,
        safe_height: params.safe_height,
        tool_diameter: params.tool_diameter,
        tolerance: params.tolerance,
        passes: params.passes as u32,
    })
}
