// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parameters that are either fixed or resolved from the context.
//!
//! A string's length may be known when the specification is written, or it
//! may come from an earlier sibling field. [`Param`] covers both:
//!
//! ```
//! use charwise::{Context, Param};
//!
//! let fixed: Param<usize> = 4.into();
//! let deferred: Param<usize> = Param::field("length");
//!
//! let ctx = Context::new().with("length", 2u8);
//! assert_eq!(fixed.resolve(&ctx).unwrap(), 4);
//! assert_eq!(deferred.resolve(&ctx).unwrap(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use super::error::{CharwiseError, Result};
use super::value::{Context, Value};

type Resolver<T> = Arc<dyn Fn(&Context) -> Result<T> + Send + Sync>;

/// A constant value or a function of the context.
pub enum Param<T> {
    /// Known up front
    Const(T),
    /// Computed from the context each time it is resolved
    Deferred(Resolver<T>),
}

impl<T: Clone> Param<T> {
    /// Build a deferred parameter from a function of the context.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Context) -> Result<T> + Send + Sync + 'static,
    {
        Param::Deferred(Arc::new(f))
    }

    /// Resolve against a context.
    pub fn resolve(&self, ctx: &Context) -> Result<T> {
        match self {
            Param::Const(v) => Ok(v.clone()),
            Param::Deferred(f) => f(ctx),
        }
    }
}

impl<T: FromValue + Clone + 'static> Param<T> {
    /// Deferred parameter read from the named context field.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Param::from_fn(move |ctx| {
            let value = ctx
                .get(&name)
                .ok_or_else(|| CharwiseError::context_missing(name.clone()))?;
            T::from_value(value)
                .ok_or_else(|| CharwiseError::context_type(name.clone(), T::EXPECTED, value.type_name()))
        })
    }
}

impl<T> From<T> for Param<T> {
    fn from(v: T) -> Self {
        Param::Const(v)
    }
}

impl From<&str> for Param<String> {
    fn from(v: &str) -> Self {
        Param::Const(v.to_string())
    }
}

impl<T: Clone> Clone for Param<T> {
    fn clone(&self) -> Self {
        match self {
            Param::Const(v) => Param::Const(v.clone()),
            Param::Deferred(f) => Param::Deferred(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Param::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Conversion from a context value into a parameter type.
pub trait FromValue: Sized {
    /// Type description used in error messages.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for usize {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_usize()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}
