// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use thiserror::Error;

/// Error type for opack encode and decode operations.
///
/// Construct variants through the static functions (`Error::unknown_type`,
/// `Error::truncated`, ...) rather than directly; they take anything
/// convertible into a `Cow<'static, str>` and keep call sites uniform.
///
/// Every failure is raised synchronously at the point it occurs and funneled
/// exactly once through the configured
/// [`FailurePolicy`](crate::policy::FailurePolicy) by the top-level call.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A type identifier read from the stream (or required for encoding)
    /// does not resolve to any registered type.
    #[error("unknown type identifier: {0}")]
    UnknownType(Cow<'static, str>),

    /// A field's type can neither be encoded trivially nor modeled, and no
    /// substitute value exists (e.g. a capability field with no zero value).
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(Cow<'static, str>),

    /// Fewer bytes remain than a requested read requires.
    #[error("truncated stream: {1} bytes requested at offset {0}, {2} available")]
    TruncatedStream(usize, usize, usize),

    /// No usable construction path exists to materialize a decoded composite.
    #[error("construction failed: {0}")]
    Construction(Cow<'static, str>),

    /// The stream was encoded under a different inclusion policy than the
    /// one the decode call requested.
    #[error("inclusion policy mismatch: stream tag {0}, requested tag {1}")]
    PolicyMismatch(u8, u8),

    /// A typed decode found an identifier for a different registered type.
    #[error("type mismatch: expected `{expected}`, stream carries `{found}`")]
    TypeMismatch { expected: String, found: String },

    /// A decoded enum discriminant matches no known variant.
    #[error("unknown enum discriminant: {0}")]
    UnknownEnum(Cow<'static, str>),

    /// Structurally invalid or corrupted data.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Internal contract violation (failed downcast, misused replacement).
    #[error("{0}")]
    TypeError(Cow<'static, str>),
}

impl Error {
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::UnknownType(s.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported_field_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::UnsupportedFieldType(s.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn truncated(offset: usize, requested: usize, available: usize) -> Self {
        Error::TruncatedStream(offset, requested, available)
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn construction<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::Construction(s.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn policy_mismatch(stream_tag: u8, requested_tag: u8) -> Self {
        Error::PolicyMismatch(stream_tag, requested_tag)
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_enum<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::UnknownEnum(s.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::InvalidData(s.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_error<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Error::TypeError(s.into())
    }
}

/// Ensures a condition holds; otherwise returns the given [`enum@Error`].
///
/// ```
/// use opack_core::ensure;
/// use opack_core::error::Error;
///
/// fn check(n: i32) -> Result<(), Error> {
///     ensure!(n >= 0, Error::invalid_data("negative count"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with an [`Error::InvalidData`].
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_data($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)))
    };
}
