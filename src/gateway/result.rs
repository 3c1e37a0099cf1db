use serde::{Deserialize, Serialize};

/// Outcome of one conversion, written to stdout as a single JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResult", try_from = "WireResult")]
pub enum ConversionResult {
    Success { gcode: String },
    Failure { error: String },
}

impl ConversionResult {
    pub fn failure(error: impl ToString) -> Self {
        Self::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn gcode(&self) -> Option<&str> {
        match self {
            Self::Success { gcode } => Some(gcode),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// `{"success": bool, "gcode"|"error": text}`
#[derive(Serialize, Deserialize)]
struct WireResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ConversionResult> for WireResult {
    fn from(result: ConversionResult) -> Self {
        match result {
            ConversionResult::Success { gcode } => WireResult {
                success: true,
                gcode: Some(gcode),
                error: None,
            },
            ConversionResult::Failure { error } => WireResult {
                success: false,
                gcode: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<WireResult> for ConversionResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match (wire.success, wire.gcode, wire.error) {
            (true, Some(gcode), _) => Ok(ConversionResult::Success { gcode }),
            (true, None, _) => Err("successful result without gcode".to_string()),
            (false, _, Some(error)) => Ok(ConversionResult::Failure { error }),
            (false, _, None) => Err("failed result without error".to_string()),
        }
    }
}
