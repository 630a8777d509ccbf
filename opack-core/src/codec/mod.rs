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

use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{Inclusion, TypeKind};

pub mod capability;
pub mod enum_;
mod list;
mod map;
mod option;
mod primitive;
mod string;
pub mod struct_;

/// The recursive encode/decode contract every wire-capable type implements.
///
/// Implementations for scalars, strings, options, sequences and maps are
/// built in; composites and fieldless enums get theirs from
/// `#[derive(OpackObject)]`, and boxed trait objects from the
/// [`capability!`](crate::capability) macro.
///
/// `opack_write_data`/`opack_read_data` handle the payload only; the full
/// recursive type identifier is written and checked by the `*_ident` methods,
/// which the top-level call alone invokes. Nested fields rely on the
/// statically declared type instead, except capability fields, which embed
/// the concrete identifier in their payload (substitution).
pub trait Codec: Sized + 'static {
    /// The closed category this type encodes as.
    fn opack_kind() -> TypeKind;

    /// Whether the type is trivially encodable: primitives, enums, and
    /// sequences/maps whose element types are transitively trivial. Trivial
    /// field types need no model and no eager pre-registration.
    fn opack_trivial() -> bool;

    /// Canonical composed identifier, e.g. `demo.User` or `seq<demo.User>`.
    /// Used as the registry key for dynamic resolution.
    fn opack_ident(opack: &Opack) -> Result<String, Error>;

    /// Writes the full recursive identifier for this type.
    fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error>;

    /// Reads the identifier from the stream and verifies it names this type.
    fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error>;

    fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error>;

    fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error>;

    /// Zero value substituted for fields the active inclusion policy left
    /// out of the stream. Capability types have none and fail with
    /// `UnsupportedFieldType`.
    fn opack_zero() -> Result<Self, Error>;

    /// Eagerly builds models and registers container instantiations this
    /// type depends on, so first use at encode/decode time never stalls
    /// mid-stream. Trivial scalar types have nothing to do.
    #[allow(unused_variables)]
    fn opack_ensure(opack: &Opack, inclusion: Inclusion) -> Result<(), Error> {
        Ok(())
    }
}

/// Optional per-type hooks invoked by derive-generated composite code when
/// the type is annotated `#[opack(lifecycle)]`. Never invoked for trivially
/// encodable types.
pub trait Lifecycle {
    fn before_encode(&self) {}
    fn after_decode(&mut self) {}
}
