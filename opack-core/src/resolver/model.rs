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
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::codec::Codec;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::Inclusion;

pub type FieldWriteFn = fn(&dyn Any, &mut WriteContext) -> Result<(), Error>;
pub type FieldReadFn = fn(&mut ReadContext) -> Result<Box<dyn Any>, Error>;
pub type EnsureFn = fn(&Opack, Inclusion) -> Result<(), Error>;

/// Static description of one composite field, produced by the derive macro
/// in declaration order. Carries the inclusion flags the policies filter on
/// and the monomorphized accessors the model invokes.
pub struct FieldDescriptor {
    pub name: &'static str,
    /// `#[opack(include)]`
    pub explicit: bool,
    /// `#[opack(exclude)]`
    pub excluded: bool,
    /// `pub` visibility on the field declaration.
    pub public: bool,
    pub trivial: bool,
    pub write: FieldWriteFn,
    pub read: FieldReadFn,
    pub ensure: EnsureFn,
}

/// One field of a built model.
pub struct FieldModel {
    pub name: &'static str,
    pub trivial: bool,
    pub write: FieldWriteFn,
    pub read: FieldReadFn,
    ensure: EnsureFn,
}

impl From<FieldDescriptor> for FieldModel {
    fn from(d: FieldDescriptor) -> FieldModel {
        FieldModel {
            name: d.name,
            trivial: d.trivial,
            write: d.write,
            read: d.read,
            ensure: d.ensure,
        }
    }
}

/// Ordered, immutable field list for one `(type, inclusion)` pair.
///
/// Field order is declaration order filtered by the policy, fixed at first
/// build; every subsequent encode and decode of the pair walks the same
/// slice, which is what lets a decode reconstruct values without re-deriving
/// order from the stream.
pub struct Model {
    fields: Box<[FieldModel]>,
}

impl Model {
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// Composite types implement this (via `#[derive(OpackObject)]`) to expose
/// their field table and construction function to the model builder.
pub trait Described: Sized + 'static {
    /// Field descriptors in declaration order, before policy filtering.
    fn descriptors() -> Vec<FieldDescriptor>;

    /// Materializes a value from decoded fields. Fields absent from `values`
    /// (excluded by the active policy) fall back to their zero values.
    fn construct(values: &mut FieldValues) -> Result<Self, Error>;
}

/// Decoded field values staged for construction, keyed by field name.
#[derive(Default)]
pub struct FieldValues {
    slots: Vec<(&'static str, Box<dyn Any>)>,
}

impl FieldValues {
    pub fn with_capacity(capacity: usize) -> FieldValues {
        FieldValues {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: &'static str, value: Box<dyn Any>) {
        self.slots.push((name, value));
    }

    pub fn take(&mut self, name: &str) -> Option<Box<dyn Any>> {
        let index = self.slots.iter().position(|(n, _)| *n == name)?;
        Some(self.slots.swap_remove(index).1)
    }
}

/// Pulls the decoded value for `name`, or falls back to the field type's
/// zero value when the active policy excluded it from the stream.
pub fn take_or_zero<T: Codec>(values: &mut FieldValues, name: &'static str) -> Result<T, Error> {
    match values.take(name) {
        Some(boxed) => boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::construction(format!(
                "decoded value for field `{name}` does not match its declared type"
            ))
        }),
        None => T::opack_zero(),
    }
}

fn selected(inclusion: Inclusion, d: &FieldDescriptor) -> bool {
    match inclusion {
        Inclusion::ExplicitOnly => d.explicit,
        Inclusion::ExplicitPlusPublic => d.explicit || (d.public && !d.excluded),
        Inclusion::AllExceptExcluded => !d.excluded,
    }
}

/// Process-wide memo of built models, one entry per `(type, inclusion)`.
#[derive(Default)]
pub struct ModelCache {
    cache: RwLock<HashMap<(std::any::TypeId, Inclusion), Arc<Model>>>,
}

impl ModelCache {
    /// Returns the model for `(T, inclusion)`, building it on first use.
    ///
    /// Building is idempotent: the first inserted model wins and later calls
    /// return it untouched. The model is published to the cache before the
    /// eager pre-registration walk over its non-trivial fields, so
    /// self-referential composites terminate.
    pub fn model_for<T: Described>(
        &self,
        opack: &Opack,
        inclusion: Inclusion,
    ) -> Result<Arc<Model>, Error> {
        let key = (std::any::TypeId::of::<T>(), inclusion);
        if let Some(model) = self.cache.read().get(&key) {
            return Ok(model.clone());
        }
        trace!(
            rust_type = std::any::type_name::<T>(),
            ?inclusion,
            "building serialization model"
        );
        let fields: Vec<FieldModel> = T::descriptors()
            .into_iter()
            .filter(|d| selected(inclusion, d))
            .map(FieldModel::from)
            .collect();
        let model = self
            .cache
            .write()
            .entry(key)
            .or_insert_with(|| {
                Arc::new(Model {
                    fields: fields.into_boxed_slice(),
                })
            })
            .clone();
        for field in model.fields() {
            if !field.trivial {
                (field.ensure)(opack, inclusion)?;
            }
        }
        Ok(model)
    }
}
