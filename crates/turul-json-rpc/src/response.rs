use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::JsonRpcErrorObject;
use crate::types::{JsonRpcVersion, RequestId};

/// Outcome carried by a response: exactly one of `result` or `error`
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// Success, with the (possibly `null`) result value
    Result(Value),
    /// Protocol-level failure reported by the server
    Error(JsonRpcErrorObject),
}

/// A JSON-RPC response document.
///
/// Deserialization enforces the JSON-RPC 2.0 rule that a response carries
/// exactly one of `result` and `error`. A `"result": null` member counts as
/// present; an `"error": null` member counts as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    pub version: JsonRpcVersion,
    pub payload: ResponsePayload,
    /// `None` when the server answered with `"id": null` (or omitted it)
    pub id: Option<RequestId>,
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            payload: ResponsePayload::Result(result),
            id: Some(id),
        }
    }

    pub fn failure(id: Option<RequestId>, error: JsonRpcErrorObject) -> Self {
        Self {
            version: JsonRpcVersion::V2_0,
            payload: ResponsePayload::Error(error),
            id,
        }
    }

    /// Parse a response from raw bytes
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(value) => Some(value),
            ResponsePayload::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&JsonRpcErrorObject> {
        match &self.payload {
            ResponsePayload::Error(error) => Some(error),
            ResponsePayload::Result(_) => None,
        }
    }
}

#[derive(Serialize)]
struct WireResponse<'a> {
    jsonrpc: JsonRpcVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a JsonRpcErrorObject>,
    id: &'a Option<RequestId>,
}

impl Serialize for JsonRpcResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireResponse {
            jsonrpc: self.version,
            result: self.result(),
            error: self.error(),
            id: &self.id,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct RawResponse {
    jsonrpc: JsonRpcVersion,
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
    #[serde(default)]
    id: Option<RequestId>,
}

// Only runs when the member exists, so an explicit `null` becomes `Some(Null)`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl<'de> Deserialize<'de> for JsonRpcResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawResponse::deserialize(deserializer)?;
        let payload = match (raw.result, raw.error) {
            (Some(result), None) => ResponsePayload::Result(result),
            (None, Some(error)) => ResponsePayload::Error(error),
            (Some(_), Some(_)) => {
                return Err(serde::de::Error::custom(
                    "response carries both `result` and `error`",
                ));
            }
            (None, None) => {
                return Err(serde::de::Error::custom(
                    "response carries neither `result` nor `error`",
                ));
            }
        };

        Ok(Self {
            version: raw.jsonrpc,
            payload,
            id: raw.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{from_str, json, to_string};

    #[test]
    fn test_success_response() {
        let parsed: JsonRpcResponse = from_str(r#"{"jsonrpc":"2.0","result":3,"id":0}"#).unwrap();

        assert_eq!(parsed.id, Some(RequestId::Number(0)));
        assert_eq!(parsed.result(), Some(&json!(3)));
        assert!(!parsed.is_error());
    }

    #[test]
    fn test_null_result_is_present() {
        let parsed: JsonRpcResponse =
            from_str(r#"{"jsonrpc":"2.0","result":null,"id":1}"#).unwrap();

        assert_eq!(parsed.payload, ResponsePayload::Result(Value::Null));
    }

    #[test]
    fn test_error_response_with_null_id() {
        let parsed: JsonRpcResponse = from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error"},"id":null}"#,
        )
        .unwrap();

        assert!(parsed.is_error());
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.error().map(|e| e.code), Some(-32700));
    }

    #[test]
    fn test_result_with_null_error_is_success() {
        let parsed: JsonRpcResponse =
            from_str(r#"{"jsonrpc":"2.0","result":"ok","error":null,"id":2}"#).unwrap();

        assert_eq!(parsed.result(), Some(&json!("ok")));
    }

    #[test]
    fn test_both_result_and_error_rejected() {
        let err = from_str::<JsonRpcResponse>(
            r#"{"jsonrpc":"2.0","result":1,"error":{"code":1,"message":"x"},"id":1}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_neither_result_nor_error_rejected() {
        let err = from_str::<JsonRpcResponse>(r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert!(err.to_string().contains("neither"));
    }

    #[test]
    fn test_missing_version_rejected() {
        assert!(from_str::<JsonRpcResponse>(r#"{"result":1,"id":1}"#).is_err());
    }

    #[test]
    fn test_serialization_emits_one_member() {
        let response = JsonRpcResponse::success(RequestId::Number(5), json!({"ok": true}));
        assert_eq!(
            to_string(&response).unwrap(),
            r#"{"jsonrpc":"2.0","result":{"ok":true},"id":5}"#
        );

        let failure = JsonRpcResponse::failure(
            None,
            JsonRpcErrorObject::new(-32601, "Method not found", None),
        );
        assert_eq!(
            to_string(&failure).unwrap(),
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":null}"#
        );
    }
}
