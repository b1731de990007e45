//! WebAssembly entry point.
//!
//! Browsers get no thread pool, so requests are always scored sequentially.
//! A `timeoutMs` field is ignored here since `Instant` is unavailable on
//! `wasm32-unknown-unknown`; cap the search with `hardCap` instead.

use crate::consensus::{EngineConfig, SearchStrategy};
use crate::service::{respond, ConsensusRequest};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Engine options accepted alongside the request.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WasmOptions {
    hard_cap: Option<u64>,
    soft_cap: Option<u64>,
    strategy: Option<SearchStrategy>,
    strict_method: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WasmRequest {
    #[serde(flatten)]
    request: ConsensusRequest,
    #[serde(default)]
    options: WasmOptions,
}

/// Computes a consensus ranking.
///
/// Takes a `ConsensusRequest` object, optionally with an `options` field,
/// and returns either the result object or an `{ errorKind, message }` body.
/// Malformed input is rejected with a JS error.
#[wasm_bindgen(js_name = computeConsensus)]
pub fn compute_consensus(request: JsValue) -> Result<JsValue, JsValue> {
    let WasmRequest { request, options } = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("invalid request: {e}")))?;

    let response = respond(&request, &options.to_config(), None);
    serde_wasm_bindgen::to_value(&response).map_err(|e| JsValue::from_str(&e.to_string()))
}

impl WasmOptions {
    /// Sequential engine config. The soft cap never exceeds the hard cap.
    fn to_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default().with_parallel(false);
        if let Some(cap) = self.hard_cap {
            config.hard_cap = cap;
        }
        if let Some(cap) = self.soft_cap {
            config.soft_cap = cap;
        }
        config.soft_cap = config.soft_cap.min(config.hard_cap);
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(strict) = self.strict_method {
            config.strict_method = strict;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sequential() {
        let config = WasmOptions::default().to_config();
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_soft_cap_clamped_to_hard_cap() {
        let options = WasmOptions {
            hard_cap: Some(100),
            soft_cap: Some(5_000),
            ..WasmOptions::default()
        };
        let config = options.to_config();
        assert_eq!(config.hard_cap, 100);
        assert_eq!(config.soft_cap, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_hard_cap_lowers_default_soft_cap() {
        let options = WasmOptions {
            hard_cap: Some(50),
            ..WasmOptions::default()
        };
        let config = options.to_config();
        assert_eq!(config.soft_cap, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options_parse_camel_case() {
        let options: WasmOptions =
            serde_json::from_str(r#"{"hardCap": 10, "softCap": 20, "strategy": "auto"}"#).unwrap();
        assert_eq!(options.to_config().soft_cap, 10);
        assert_eq!(options.to_config().strategy, SearchStrategy::Auto);
    }
}
