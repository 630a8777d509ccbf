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
use std::sync::Arc;

use tracing::warn;

use crate::buffer::{Reader, Writer};
use crate::codec::Codec;
use crate::ensure;
use crate::error::Error;
use crate::policy::{FailClosed, FailurePolicy, Recovery};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::model::{Described, Model, ModelCache};
use crate::resolver::registry::TypeRegistry;
use crate::types::Inclusion;

/// The opack codec engine.
///
/// Holds the process-wide type registry and serialization model cache, both
/// populated lazily with insert-if-absent semantics and immutable once
/// populated, so one engine can serve many concurrent encode/decode calls.
/// Buffers and contexts stay local to each top-level call.
///
/// # Examples
///
/// ```rust, ignore
/// use opack::{Inclusion, Opack, OpackObject};
///
/// #[derive(OpackObject, Debug, PartialEq)]
/// struct MakeMoveRequest {
///     #[opack(include)]
///     mv: i32,
/// }
///
/// let mut opack = Opack::default();
/// opack.register::<MakeMoveRequest>("MakeMoveRequest")?;
/// let bytes = opack.encode(&MakeMoveRequest { mv: 4 }, Inclusion::ExplicitOnly)?;
/// let back: MakeMoveRequest = opack.decode(&bytes, Inclusion::ExplicitOnly)?;
/// ```
pub struct Opack {
    hash_identifiers: bool,
    registry: TypeRegistry,
    models: ModelCache,
    failure: Box<dyn FailurePolicy>,
}

impl Default for Opack {
    fn default() -> Self {
        Opack {
            hash_identifiers: false,
            registry: TypeRegistry::default(),
            models: ModelCache::default(),
            failure: Box::new(FailClosed),
        }
    }
}

impl Opack {
    /// Writes identifiers as deterministic 32-bit hashes instead of name
    /// strings. Both peers must agree on this setting; it is part of the
    /// wire contract.
    pub fn hash_identifiers(mut self, hash_identifiers: bool) -> Self {
        self.hash_identifiers = hash_identifiers;
        self
    }

    /// Installs the recovery strategy consulted when a top-level encode or
    /// decode fails. The default propagates every failure (fail-closed).
    pub fn failure_policy<P: FailurePolicy + 'static>(mut self, policy: P) -> Self {
        self.failure = Box::new(policy);
        self
    }

    #[inline(always)]
    pub fn is_hash_identifiers(&self) -> bool {
        self.hash_identifiers
    }

    #[inline(always)]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Registers `T` under a stable wire identifier. All composite and enum
    /// types a message transitively contains must be registered before the
    /// first encode or decode; decoding an unregistered identifier is a data
    /// error, not a search miss.
    pub fn register<T: Codec>(&mut self, name: &str) -> Result<(), Error> {
        self.registry.register_named::<T>(name)
    }

    /// Eagerly builds the models and container instantiations `T` depends on
    /// under `inclusion`, so the first encode never builds state mid-stream.
    /// Optional: the same work happens lazily on first use.
    pub fn prepare<T: Codec>(&self, inclusion: Inclusion) -> Result<(), Error> {
        T::opack_ensure(self, inclusion)
    }

    /// Returns the memoized serialization model for `(T, inclusion)`.
    pub fn model_for<T: Described>(&self, inclusion: Inclusion) -> Result<Arc<Model>, Error> {
        self.models.model_for::<T>(self, inclusion)
    }

    /// Encodes one complete message: full recursive type identifier, the
    /// inclusion tag, then the payload. The returned bytes carry no framing;
    /// length-prefixing for transport is the framing layer's job.
    pub fn encode<T: Codec>(&self, value: &T, inclusion: Inclusion) -> Result<Vec<u8>, Error> {
        let mut writer = Writer::default();
        match self.encode_inner(value, inclusion, &mut writer) {
            Ok(()) => Ok(writer.into_bytes()),
            Err(error) => match self.failure.on_encode_failure(error) {
                Recovery::Propagate(error) => Err(error),
                Recovery::Replace(replacement) => {
                    warn!("encode failure replaced by policy-supplied bytes");
                    replacement.downcast::<Vec<u8>>().map(|b| *b).map_err(|_| {
                        Error::type_error(
                            "replacement for a failed encode must be Vec<u8>",
                        )
                    })
                }
            },
        }
    }

    fn encode_inner<T: Codec>(
        &self,
        value: &T,
        inclusion: Inclusion,
        writer: &mut Writer,
    ) -> Result<(), Error> {
        let mut context = WriteContext::new(self, writer, inclusion);
        T::opack_write_ident(&mut context)?;
        context.writer.write_u8(inclusion.into());
        value.opack_write_data(&mut context)
    }

    /// Decodes one complete message into `T`. `inclusion` must match the
    /// policy the message was encoded under; a mismatch fails with
    /// [`Error::PolicyMismatch`]. Any failure discards the call-local reader
    /// whole; no partially decoded value or resumable cursor escapes.
    pub fn decode<T: Codec>(&self, bytes: &[u8], inclusion: Inclusion) -> Result<T, Error> {
        match self.decode_inner::<T>(bytes, inclusion) {
            Ok(value) => Ok(value),
            Err(error) => match self.failure.on_decode_failure(error) {
                Recovery::Propagate(error) => Err(error),
                Recovery::Replace(replacement) => {
                    warn!("decode failure replaced by policy-supplied value");
                    replacement.downcast::<T>().map(|v| *v).map_err(|_| {
                        Error::type_error(
                            "replacement value does not match the requested decode type",
                        )
                    })
                }
            },
        }
    }

    fn decode_inner<T: Codec>(&self, bytes: &[u8], inclusion: Inclusion) -> Result<T, Error> {
        let mut context = ReadContext::new(self, Reader::new(bytes), inclusion);
        T::opack_read_ident(&mut context)?;
        read_inclusion_tag(&mut context, inclusion)?;
        let value = T::opack_read_data(&mut context)?;
        ensure!(
            context.reader.remaining() == 0,
            Error::invalid_data("trailing bytes after a complete message")
        );
        Ok(value)
    }

    /// Decodes one complete message without knowing its type in advance: the
    /// identifier read from the stream selects the registered type, and the
    /// result arrives as `Box<dyn Any>` for the caller to downcast.
    pub fn decode_any(&self, bytes: &[u8], inclusion: Inclusion) -> Result<Box<dyn Any>, Error> {
        match self.decode_any_inner(bytes, inclusion) {
            Ok(value) => Ok(value),
            Err(error) => match self.failure.on_decode_failure(error) {
                Recovery::Propagate(error) => Err(error),
                Recovery::Replace(replacement) => {
                    warn!("dynamic decode failure replaced by policy-supplied value");
                    let replacement: Box<dyn Any> = replacement;
                    Ok(replacement)
                }
            },
        }
    }

    fn decode_any_inner(
        &self,
        bytes: &[u8],
        inclusion: Inclusion,
    ) -> Result<Box<dyn Any>, Error> {
        let mut context = ReadContext::new(self, Reader::new(bytes), inclusion);
        let info = self.registry.read_ident(&mut context)?;
        read_inclusion_tag(&mut context, inclusion)?;
        let value = (info.harness().read_any())(&mut context)?;
        ensure!(
            context.reader.remaining() == 0,
            Error::invalid_data("trailing bytes after a complete message")
        );
        Ok(value)
    }
}

fn read_inclusion_tag(context: &mut ReadContext, inclusion: Inclusion) -> Result<(), Error> {
    let tag = context.reader.read_u8()?;
    let stream = Inclusion::try_from(tag)
        .map_err(|_| Error::invalid_data(format!("invalid inclusion tag: {tag}")))?;
    ensure!(
        stream == inclusion,
        Error::policy_mismatch(tag, inclusion.into())
    );
    Ok(())
}
