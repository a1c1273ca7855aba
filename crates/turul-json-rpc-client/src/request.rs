//! Request construction
//!
//! Pure transformation from a method name and arguments into a
//! [`JsonRpcRequest`], plus exactly one id taken from the [`IdSequencer`].
//! Validation happens before the id is taken, so a rejected call never burns
//! an id.

use serde::Serialize;
use serde_json::Value;
use turul_json_rpc::{JsonRpcRequest, RequestId, RequestParams};

use crate::error::{RpcClientError, RpcClientResult};
use crate::params::ToRpcParams;
use crate::response::ValueKind;
use crate::sequencer::IdSequencer;

/// Build a request with positional params
pub fn build_request<P: ToRpcParams>(
    method: &str,
    params: P,
    ids: &IdSequencer,
) -> RpcClientResult<JsonRpcRequest> {
    validate_method(method)?;

    let values = params
        .to_rpc_params()
        .map_err(|e| RpcClientError::InvalidParams(e.to_string()))?;
    let params = if values.is_empty() {
        None
    } else {
        Some(RequestParams::Array(values))
    };

    Ok(JsonRpcRequest::new(
        RequestId::Number(ids.next()),
        method.to_string(),
        params,
    ))
}

/// Build a request with named params.
///
/// `params` must serialize to a JSON object; `null` (e.g. `None`) omits params.
pub fn build_named_request<P: Serialize>(
    method: &str,
    params: P,
    ids: &IdSequencer,
) -> RpcClientResult<JsonRpcRequest> {
    validate_method(method)?;

    let params = match serde_json::to_value(params)
        .map_err(|e| RpcClientError::InvalidParams(e.to_string()))?
    {
        Value::Object(map) => Some(RequestParams::Object(map)),
        Value::Null => None,
        other => {
            return Err(RpcClientError::InvalidParams(format!(
                "named params must serialize to an object, found {}",
                ValueKind::of(&other)
            )));
        }
    };

    Ok(JsonRpcRequest::new(
        RequestId::Number(ids.next()),
        method.to_string(),
        params,
    ))
}

fn validate_method(method: &str) -> RpcClientResult<()> {
    if method.is_empty() {
        return Err(RpcClientError::InvalidMethod);
    }
    Ok(())
}
