//! Interpretation of broadcast output.
//!
//! The client prints a JSON `TxResponse`. Only three fields matter here:
//! `code` (absent means success), `txhash`, and `raw_log`.

use serde::Deserialize;

use crate::gateway::types::{GatewayError, GatewayResult, TxHash};

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    txhash: Option<String>,
    #[serde(default)]
    raw_log: Option<String>,
}

/// Turn raw stdout from a broadcast into a transaction hash.
pub fn interpret(raw_output: &[u8]) -> GatewayResult<TxHash> {
    let text = std::str::from_utf8(raw_output)
        .map_err(|e| GatewayError::MalformedResponse(format!("output is not UTF-8: {}", e)))?;

    let response: TxResponse = serde_json::from_str(text.trim())
        .map_err(|e| GatewayError::MalformedResponse(format!("output is not a tx response: {}", e)))?;

    if response.code != 0 {
        return Err(GatewayError::Submission {
            code: response.code,
            raw_log: response.raw_log.unwrap_or_default(),
        });
    }

    match response.txhash {
        Some(hash) if !hash.trim().is_empty() => Ok(TxHash(hash.trim().to_string())),
        _ => Err(GatewayError::MalformedResponse(
            "successful response carries no txhash".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_hash() {
        let hash = interpret(br#"{"code":0,"txhash":"ABC123"}"#).unwrap();
        assert_eq!(hash, TxHash("ABC123".into()));
    }

    #[test]
    fn test_missing_code_means_success() {
        let hash = interpret(b"{\"height\":\"0\",\"txhash\":\"DEF456\",\"raw_log\":\"[]\"}\n").unwrap();
        assert_eq!(hash.as_str(), "DEF456");
    }

    #[test]
    fn test_non_zero_code_is_submission_error() {
        let err = interpret(br#"{"code":5,"raw_log":"insufficient funds"}"#).unwrap_err();
        match err {
            GatewayError::Submission { code, raw_log } => {
                assert_eq!(code, 5);
                assert_eq!(raw_log, "insufficient funds");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_without_log() {
        let err = interpret(br#"{"code":13,"txhash":"XYZ"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Submission { code: 13, ref raw_log } if raw_log.is_empty()));
    }

    #[test]
    fn test_success_without_hash_is_malformed() {
        assert!(matches!(interpret(br#"{"code":0}"#), Err(GatewayError::MalformedResponse(_))));
        assert!(matches!(interpret(br#"{"txhash":""}"#), Err(GatewayError::MalformedResponse(_))));
    }

    #[test]
    fn test_unparseable_output_is_malformed() {
        assert!(matches!(interpret(b"gas estimate: 1234"), Err(GatewayError::MalformedResponse(_))));
        assert!(matches!(interpret(b""), Err(GatewayError::MalformedResponse(_))));
        assert!(matches!(interpret(&[0xff, 0xfe]), Err(GatewayError::MalformedResponse(_))));
        assert!(matches!(interpret(b"[1,2,3]"), Err(GatewayError::MalformedResponse(_))));
    }
}
