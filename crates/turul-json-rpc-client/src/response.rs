//! Response interpretation and typed result accessors
//!
//! Parsing only checks the document shape. Coercion errors are raised lazily by
//! the accessor that was asked for, and every accessor reports a server-sent
//! `error` as [`RpcClientError::Rpc`] before looking at the result.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use turul_json_rpc::{JsonRpcErrorObject, JsonRpcResponse, RequestId, ResponsePayload};

use crate::error::{RpcClientError, RpcClientResult};

/// JSON shape of a value, as reported in type mismatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    /// Only ever reported as the expected kind; actual numbers are `Number`
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed JSON-RPC response with typed accessors for its result
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    inner: JsonRpcResponse,
}

impl RpcResponse {
    /// Parse raw response bytes.
    ///
    /// Fails with [`RpcClientError::MalformedResponse`] when the bytes are not a
    /// JSON-RPC 2.0 response or carry both or neither of `result` and `error`.
    pub fn parse(bytes: &[u8]) -> RpcClientResult<Self> {
        JsonRpcResponse::from_slice(bytes)
            .map(Self::from)
            .map_err(|e| RpcClientError::malformed(e.to_string()))
    }

    /// The echoed request id; `None` for `"id": null`
    pub fn id(&self) -> Option<&RequestId> {
        self.inner.id.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.inner.is_error()
    }

    /// The server's `error` object, if any
    pub fn error(&self) -> Option<&JsonRpcErrorObject> {
        self.inner.error()
    }

    /// The raw result value, or the protocol error
    pub fn result(&self) -> RpcClientResult<&Value> {
        match &self.inner.payload {
            ResponsePayload::Result(value) => Ok(value),
            ResponsePayload::Error(error) => Err(RpcClientError::from_error_object(error)),
        }
    }

    /// Whether the call succeeded with a `null` result
    pub fn is_null(&self) -> bool {
        matches!(self.inner.payload, ResponsePayload::Result(Value::Null))
    }

    pub fn get_int(&self) -> RpcClientResult<i64> {
        match self.result()? {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                if n.is_u64() {
                    return Err(RpcClientError::IntegerOverflow(n.clone()));
                }
                match n.as_f64() {
                    Some(f) if f.fract() != 0.0 => Err(RpcClientError::NotAnInteger(n.clone())),
                    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
                    Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                    Some(_) => Err(RpcClientError::IntegerOverflow(n.clone())),
                    None => Err(RpcClientError::NotAnInteger(n.clone())),
                }
            }
            other => Err(mismatch(ValueKind::Integer, other)),
        }
    }

    pub fn get_float(&self) -> RpcClientResult<f64> {
        match self.result()? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| mismatch(ValueKind::Number, &Value::Number(n.clone()))),
            other => Err(mismatch(ValueKind::Number, other)),
        }
    }

    pub fn get_string(&self) -> RpcClientResult<String> {
        match self.result()? {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(ValueKind::String, other)),
        }
    }

    pub fn get_bool(&self) -> RpcClientResult<bool> {
        match self.result()? {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(ValueKind::Bool, other)),
        }
    }

    /// Decode the result into any deserializable type: structs, nested
    /// structures, sequences of structures, maps, `Option<T>` for nullable
    /// results.
    ///
    /// On failure the error names the path of the first field or element that
    /// did not match, e.g. `items[2].price`.
    pub fn get_object<T: DeserializeOwned>(&self) -> RpcClientResult<T> {
        let value = self.result()?;
        serde_path_to_error::deserialize(value).map_err(|e| RpcClientError::Decode {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    /// Take the owned result value, or the protocol error
    pub fn into_result(self) -> RpcClientResult<Value> {
        match self.inner.payload {
            ResponsePayload::Result(value) => Ok(value),
            ResponsePayload::Error(error) => Err(RpcClientError::from_error_object(&error)),
        }
    }

    pub fn into_inner(self) -> JsonRpcResponse {
        self.inner
    }
}

impl From<JsonRpcResponse> for RpcResponse {
    fn from(inner: JsonRpcResponse) -> Self {
        Self { inner }
    }
}

fn mismatch(expected: ValueKind, actual: &Value) -> RpcClientError {
    RpcClientError::TypeMismatch {
        expected,
        actual: ValueKind::of(actual),
    }
}
