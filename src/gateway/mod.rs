//! JSON-in/JSON-out conversion gateway
//!
//! The gateway owns everything around the conversion call:
//! 1. Parse the request and resolve parameter defaults
//! 2. Park the SVG text in a scoped temporary file
//! 3. Hand the file path and parameters to a [`GcodeConverter`]
//! 4. Join the returned lines and shape the result
//!
//! Every failure along the way becomes a [`ConversionResult::Failure`];
//! nothing propagates past [`Gateway::convert`] or [`Gateway::handle`].

mod params;
mod result;
mod scratch;

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, GatewayError, GatewayResult};

pub use params::{ConversionParams, ConversionRequest};
pub use result::ConversionResult;
pub use scratch::ScratchSvg;

/// The single call the gateway delegates to: SVG file in, G-code lines out.
pub trait GcodeConverter {
    fn convert_file(
        &self,
        svg_path: &Path,
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError>;
}

impl<T: GcodeConverter + ?Sized> GcodeConverter for &T {
    fn convert_file(
        &self,
        svg_path: &Path,
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError> {
        (**self).convert_file(svg_path, params)
    }
}

impl<T: GcodeConverter + ?Sized> GcodeConverter for Box<T> {
    fn convert_file(
        &self,
        svg_path: &Path,
        params: &ConversionParams,
    ) -> Result<Vec<String>, ConvertError> {
        (**self).convert_file(svg_path, params)
    }
}

pub struct Gateway<C> {
    converter: C,
    temp_dir: Option<PathBuf>,
}

impl<C: GcodeConverter> Gateway<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            temp_dir: None,
        }
    }

    /// Place scratch files in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Parse a JSON request and convert it.
    pub fn handle(&self, input: &str) -> ConversionResult {
        match ConversionRequest::from_json(input) {
            Ok(request) => self.convert(&request.svg_content, &request.params),
            Err(e) => {
                let err = GatewayError::from(e);
                tracing::warn!(error = %err, "rejected request");
                ConversionResult::failure(err)
            }
        }
    }

    pub fn convert(&self, svg_content: &str, params: &ConversionParams) -> ConversionResult {
        tracing::debug!(?params, "resolved conversion parameters");

        match self.try_convert(svg_content, params) {
            Ok(lines) => {
                tracing::info!(lines = lines.len(), "conversion succeeded");
                ConversionResult::Success {
                    gcode: lines.join("\n"),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "conversion failed");
                ConversionResult::failure(err)
            }
        }
    }

    fn try_convert(&self, svg_content: &str, params: &ConversionParams) -> GatewayResult<Vec<String>> {
        let scratch =
            ScratchSvg::create(svg_content, self.temp_dir.as_deref()).map_err(GatewayError::TempFile)?;

        let converted = self.converter.convert_file(scratch.path(), params);

        // Remove the file before reporting either outcome. A conversion error
        // wins over a cleanup error.
        let closed = scratch.close();
        let lines = converted?;
        closed.map_err(GatewayError::TempFile)?;

        Ok(lines)
    }
}
