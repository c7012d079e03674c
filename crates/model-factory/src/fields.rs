//! Per-field override directives.
//!
//! A factory configuration carries at most one [`FieldOverride`] per field
//! name. Directives replace synthesis for that field:
//!
//! ```rust
//! use model_factory::{Deferred, FieldOverride};
//! use schema_core::Value;
//!
//! let fixed = FieldOverride::value("test_id");
//! let computed = FieldOverride::callable(|| Value::Integer(7));
//! let deferred = FieldOverride::Deferred(
//!     Deferred::new(|args| args.positional[0].clone()).arg("given"),
//! );
//! let required = FieldOverride::Required;
//! let ignored = FieldOverride::Ignored;
//! ```

use schema_core::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Zero-argument value producer.
pub type ValueFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Producer invoked with the arguments bound to a [`Deferred`].
pub type DeferredFn = Arc<dyn Fn(&BoundArgs) -> Value + Send + Sync>;

/// Arguments bound to a deferred call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    pub positional: Vec<Value>,
    pub keyword: BTreeMap<String, Value>,
}

/// A function plus bound arguments, evaluated each time the field resolves.
#[derive(Clone)]
pub struct Deferred {
    call: DeferredFn,
    args: BoundArgs,
}

impl Deferred {
    /// Wrap a function with no bound arguments.
    pub fn new<F>(call: F) -> Self
    where
        F: Fn(&BoundArgs) -> Value + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(call),
            args: BoundArgs::default(),
        }
    }

    /// Bind the next positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.positional.push(value.into());
        self
    }

    /// Bind a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.keyword.insert(name.into(), value.into());
        self
    }

    /// The bound arguments.
    pub fn args(&self) -> &BoundArgs {
        &self.args
    }

    /// Invoke the function with the bound arguments.
    pub fn evaluate(&self) -> Value {
        (self.call)(&self.args)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Directive replacing the default resolution of one field.
#[derive(Clone)]
pub enum FieldOverride {
    /// Use this value as-is.
    Value(Value),
    /// Call the function and use its result.
    Callable(ValueFn),
    /// Evaluate the deferred call and use its result.
    Deferred(Deferred),
    /// The caller must supply the field in the build arguments.
    Required,
    /// Leave the field out of the record entirely.
    Ignored,
}

impl FieldOverride {
    /// Static value directive.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Callable directive.
    pub fn callable<F>(call: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(call))
    }

    /// Produce the override value, if this directive produces one.
    ///
    /// `Required` and `Ignored` produce nothing.
    pub fn produce(&self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::Callable(call) => Some(call()),
            Self::Deferred(deferred) => Some(deferred.evaluate()),
            Self::Required | Self::Ignored => None,
        }
    }
}

impl fmt::Debug for FieldOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Deferred(deferred) => f.debug_tuple("Deferred").field(deferred).finish(),
            Self::Required => f.write_str("Required"),
            Self::Ignored => f.write_str("Ignored"),
        }
    }
}
