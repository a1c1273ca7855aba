//! Positional argument encoding
//!
//! Anything implementing [`ToRpcParams`] can be passed as the argument list of a
//! call. Each argument is serialized on its own and the results keep the
//! caller's order. A single argument is still sent as a one-element array.
//!
//! ```rust
//! use turul_json_rpc_client::params::ToRpcParams;
//! use turul_json_rpc_client::rpc_params;
//!
//! let args = (1, "two", vec![3.0]).to_rpc_params().unwrap();
//! assert_eq!(args, vec![serde_json::json!(1), serde_json::json!("two"), serde_json::json!([3.0])]);
//!
//! let args = rpc_params![true, 7].to_rpc_params().unwrap();
//! assert_eq!(args.len(), 2);
//! ```

use serde::Serialize;
use serde_json::Value;

/// Conversion of a caller-supplied argument list into positional params
pub trait ToRpcParams {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error>;
}

/// No arguments: `params` is omitted from the request
impl ToRpcParams for () {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(Vec::new())
    }
}

/// The vector is the argument list, one element per argument
impl<T: Serialize> ToRpcParams for Vec<T> {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
        self.iter().map(serde_json::to_value).collect()
    }
}

impl<T: Serialize> ToRpcParams for &[T] {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
        self.iter().map(serde_json::to_value).collect()
    }
}

impl<T: Serialize, const N: usize> ToRpcParams for [T; N] {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
        self.iter().map(serde_json::to_value).collect()
    }
}

macro_rules! tuple_params {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Serialize),+> ToRpcParams for ($($ty,)+) {
            fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
                let ($($var,)+) = self;
                Ok(vec![$(serde_json::to_value($var)?),+])
            }
        }
    };
}

tuple_params!(A a);
tuple_params!(A a, B b);
tuple_params!(A a, B b, C c);
tuple_params!(A a, B b, C c, D d);
tuple_params!(A a, B b, C c, D d, E e);
tuple_params!(A a, B b, C c, D d, E e, F f);
tuple_params!(A a, B b, C c, D d, E e, F f, G g);
tuple_params!(A a, B b, C c, D d, E e, F f, G g, H h);

/// Heterogeneous argument list built one value at a time.
///
/// The first serialization failure is kept and reported when the list is
/// turned into params, so building never panics.
#[derive(Debug, Default)]
pub struct ArrayParams {
    values: Vec<Value>,
    error: Option<serde_json::Error>,
}

impl ArrayParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one argument
    pub fn insert<T: Serialize>(&mut self, value: T) -> &mut Self {
        if self.error.is_none() {
            match serde_json::to_value(value) {
                Ok(value) => self.values.push(value),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ToRpcParams for ArrayParams {
    fn to_rpc_params(self) -> Result<Vec<Value>, serde_json::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.values),
        }
    }
}

/// Build an [`ArrayParams`] from a list of serializable expressions
#[macro_export]
macro_rules! rpc_params {
    ($($param:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut params = $crate::params::ArrayParams::new();
        $( params.insert($param); )*
        params
    }};
}
