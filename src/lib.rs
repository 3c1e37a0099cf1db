//! # svg-gcode-gateway
//!
//! Converts SVG drawings into G-code toolpaths for CNC and laser machines.
//!
//! ## Features
//!
//! - **Gateway**: one JSON request in, one JSON result out, never a crash
//! - **Toolpath converter**: usvg-based flattening and G-code emission
//!
//! ## Example
//!
//! ```rust,ignore
//! use svg_gcode_gateway::{Gateway, ToolpathConverter};
//!
//! let gateway = Gateway::new(ToolpathConverter::new());
//! let result = gateway.handle(r#"{"svg_content": "<svg ...>", "params": {"passes": 2}}"#);
//! println!("{}", result.to_json(false).unwrap());
//! ```

pub mod error;
pub mod gateway;
pub mod toolpath;

// Re-export commonly used items
pub use error::{ConvertError, GatewayError};
pub use gateway::{ConversionParams, ConversionRequest, ConversionResult, Gateway, GcodeConverter};
pub use toolpath::ToolpathConverter;
