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

use std::any::Any;

use crate::error::Error;

/// Outcome of offering a failure to a [`FailurePolicy`].
///
/// The replacement travels in the return value of the policy call and is
/// consumed by the one top-level encode/decode that triggered it; no state
/// outlives the call, so concurrent calls on a shared engine cannot observe
/// each other's recoveries.
pub enum Recovery {
    /// Re-raise the failure to the caller (fail-closed).
    Propagate(Error),
    /// Substitute a replacement result. For a failed encode the replacement
    /// must be a `Vec<u8>`; for a failed typed decode it must be the decoded
    /// type; for `decode_any` any boxed value is accepted.
    Replace(Box<dyn Any + Send>),
}

/// Strategy consulted exactly once per failed top-level encode/decode call.
///
/// Implementations must not suppress failures without providing a safe
/// replacement value; silently swallowing a decode error on a shared stream
/// masks protocol desynchronization.
pub trait FailurePolicy: Send + Sync {
    fn on_encode_failure(&self, error: Error) -> Recovery {
        Recovery::Propagate(error)
    }

    fn on_decode_failure(&self, error: Error) -> Recovery {
        Recovery::Propagate(error)
    }
}

/// Default policy: every failure propagates to the caller.
#[derive(Default, Debug, Clone, Copy)]
pub struct FailClosed;

impl FailurePolicy for FailClosed {}
