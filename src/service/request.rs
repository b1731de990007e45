//! Request/response shapes of the engine boundary.

use crate::consensus::{ConsensusResult, ConsensusRunner, EngineConfig, Method};
use crate::error::ConsensusError;
use crate::model::{ExpertJudgment, Item};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn default_method() -> String {
    Method::default().name().to_string()
}

/// A consensus request: a full snapshot plus the method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusRequest {
    pub items: Vec<Item>,
    pub judgments: Vec<ExpertJudgment>,
    #[serde(default = "default_method")]
    pub method: String,
}

/// Failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NoExperts,
    NoValidItems,
    UnknownMethod,
    SearchSpaceExhausted,
    InvalidConfig,
}

impl From<&ConsensusError> for ErrorKind {
    fn from(err: &ConsensusError) -> Self {
        match err {
            ConsensusError::NoExperts => ErrorKind::NoExperts,
            ConsensusError::NoValidItems => ErrorKind::NoValidItems,
            ConsensusError::UnknownMethod(_) => ErrorKind::UnknownMethod,
            ConsensusError::SearchExhausted => ErrorKind::SearchSpaceExhausted,
            ConsensusError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_kind: ErrorKind,
    pub message: String,
}

impl From<ConsensusError> for ErrorBody {
    fn from(err: ConsensusError) -> Self {
        Self {
            error_kind: ErrorKind::from(&err),
            message: err.to_string(),
        }
    }
}

/// Either a full result or an error body; serializes as one or the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsensusResponse {
    Success(Box<ConsensusResult>),
    Failure(ErrorBody),
}

impl ConsensusResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ConsensusResponse::Success(_))
    }

    pub fn into_result(self) -> Result<ConsensusResult, ErrorBody> {
        match self {
            ConsensusResponse::Success(r) => Ok(*r),
            ConsensusResponse::Failure(e) => Err(e),
        }
    }
}

impl From<Result<ConsensusResult, ConsensusError>> for ConsensusResponse {
    fn from(result: Result<ConsensusResult, ConsensusError>) -> Self {
        match result {
            Ok(r) => ConsensusResponse::Success(Box::new(r)),
            Err(e) => ConsensusResponse::Failure(e.into()),
        }
    }
}

/// Answers one request. Never panics on bad input; failures become
/// [`ConsensusResponse::Failure`].
///
/// # Examples
///
/// ```
/// use u_consensus::consensus::EngineConfig;
/// use u_consensus::service::{respond, ConsensusRequest};
///
/// let request: ConsensusRequest = serde_json::from_str(r#"{
///     "items": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
///     "judgments": [{"expertId": 1, "expertName": "x", "order": [2, 1], "excluded": []}],
///     "method": "cook-seiford"
/// }"#).unwrap();
/// let response = respond(&request, &EngineConfig::default(), None);
/// assert_eq!(response.into_result().unwrap().winner(), vec![2, 1]);
/// ```
pub fn respond(
    request: &ConsensusRequest,
    config: &EngineConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> ConsensusResponse {
    ConsensusRunner::run_with_cancel(
        &request.items,
        &request.judgments,
        &request.method,
        config,
        cancel,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str) -> ConsensusRequest {
        ConsensusRequest {
            items: vec![Item::new(1, "A"), Item::new(2, "B"), Item::new(3, "C")],
            judgments: vec![
                ExpertJudgment::new(1, "x", vec![1, 2, 3]),
                ExpertJudgment::new(2, "y", vec![2, 1, 3]),
            ],
            method: method.to_string(),
        }
    }

    #[test]
    fn test_success_serializes_flat() {
        let response = respond(&request("kemeny-snell"), &EngineConfig::default(), None);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["methodUsed"], "kemeny-snell");
        assert_eq!(json["metricUsed"], "pairwise-preference");
        assert_eq!(json["criterionUsed"], "sum");
        assert_eq!(json["tieCount"], 2);
        assert_eq!(json["limited"], false);
        assert_eq!(json["candidatesExplored"], 6);
        assert_eq!(json["ranking"][0]["itemId"], 1);
    }

    #[test]
    fn test_failure_body() {
        let mut req = request("kemeny-snell");
        req.judgments.clear();
        let response = respond(&req, &EngineConfig::default(), None);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errorKind"], "NoExperts");
        assert!(json["message"].as_str().unwrap().contains("no expert"));
    }

    #[test]
    fn test_strict_unknown_method_kind() {
        let config = EngineConfig::default().with_strict_method(true);
        let err = respond(&request("borda"), &config, None).into_result().unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::UnknownMethod);
    }

    #[test]
    fn test_method_defaults_to_kemeny() {
        let req: ConsensusRequest = serde_json::from_str(r#"{"items": [], "judgments": []}"#).unwrap();
        assert_eq!(req.method, "kemeny-snell");
    }

    #[test]
    fn test_response_round_trip() {
        let response = respond(&request("minimax"), &EngineConfig::default(), None);
        let json = serde_json::to_string(&response).unwrap();
        let back: ConsensusResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
