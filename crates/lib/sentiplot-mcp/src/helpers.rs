use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use sentiplot_core::control::ControlError;
use serde_json::{Value, json};

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps plot failures onto MCP errors. Validation failures carry every
/// violation as structured `data`.
pub fn map_control_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::Validation(errors) => ErrorData {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::Owned(format!("invalid plot data: {errors}")),
            data: serde_json::to_value(&errors).ok(),
        },
        other @ (ControlError::Render(_) | ControlError::Display(_)) => {
            mcp_err(ErrorCode::INTERNAL_ERROR, other.to_string())
        }
    }
}

/// Payload returned in place of a fault when an upstream fetch fails.
pub fn error_payload(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

#[cfg(test)]
mod tests {
    use sentiplot_model::{RawRecord, validate_batch};

    use super::*;

    #[test]
    fn validation_errors_become_invalid_params_with_data() {
        let raws = vec![RawRecord {
            symbol: "AAPL".to_string(),
            sentiment: 0.0,
            presence: 0.5,
            summary: String::new(),
            links: Vec::new(),
        }];
        let errors = validate_batch("data", raws).expect_err("invalid symbol");

        let mapped = map_control_err(ControlError::Validation(errors));

        assert_eq!(mapped.code, ErrorCode::INVALID_PARAMS);
        assert!(mapped.message.contains("data[0].symbol"));
        let data = mapped.data.expect("violations attached");
        assert_eq!(data[0]["field"], "data[0].symbol");
        assert_eq!(data[0]["value"], "AAPL");
        assert_eq!(data[0]["constraint"]["kind"], "symbol_pattern");
    }

    #[test]
    fn error_payload_shape() {
        assert_eq!(error_payload("boom"), json!({ "error": "boom" }));
    }
}
