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
use tracing::debug;

use crate::codec::Codec;
use crate::ensure;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{
    compute_name_hash, IDENT_BOOL, IDENT_F32, IDENT_F64, IDENT_I16, IDENT_I32, IDENT_I64,
    IDENT_I8, IDENT_MAP, IDENT_OPT, IDENT_SEQ, IDENT_STR, IDENT_U16, IDENT_U32, IDENT_U64,
    IDENT_U8,
};

type WriteAnyFn = fn(&dyn Any, &mut WriteContext) -> Result<(), Error>;
type ReadAnyFn = fn(&mut ReadContext) -> Result<Box<dyn Any>, Error>;

fn write_any_impl<T: Codec>(any: &dyn Any, context: &mut WriteContext) -> Result<(), Error> {
    let value = any.downcast_ref::<T>().ok_or_else(|| {
        Error::type_error(format!(
            "dynamic write expected `{}`",
            std::any::type_name::<T>()
        ))
    })?;
    value.opack_write_data(context)
}

fn read_any_impl<T: Codec>(context: &mut ReadContext) -> Result<Box<dyn Any>, Error> {
    Ok(Box::new(T::opack_read_data(context)?))
}

/// Monomorphized entry points for one concrete type, used wherever the
/// static type is only known at runtime (top-level `decode_any`, capability
/// fields).
#[derive(Clone, Copy)]
pub struct Harness {
    write_any: WriteAnyFn,
    read_any: ReadAnyFn,
}

impl Harness {
    pub fn of<T: Codec>() -> Harness {
        Harness {
            write_any: write_any_impl::<T>,
            read_any: read_any_impl::<T>,
        }
    }

    #[inline(always)]
    pub fn write_any(&self) -> WriteAnyFn {
        self.write_any
    }

    #[inline(always)]
    pub fn read_any(&self) -> ReadAnyFn {
        self.read_any
    }
}

/// One registered type: its wire identifier, the identifier's memoized hash,
/// the runtime type it resolves to, and the dispatch harness.
pub struct TypeInfo {
    name: Arc<str>,
    hash: u32,
    rust_type_id: std::any::TypeId,
    harness: Harness,
}

impl TypeInfo {
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    #[inline(always)]
    pub fn rust_type_id(&self) -> std::any::TypeId {
        self.rust_type_id
    }

    #[inline(always)]
    pub fn harness(&self) -> &Harness {
        &self.harness
    }
}

/// Closed table mapping runtime types to stable wire identifiers and back.
///
/// Populated explicitly at startup via [`Opack::register`](crate::opack::Opack::register)
/// and lazily (insert-if-absent) for container instantiations discovered
/// during model building. Entries are immutable once inserted; lookups after
/// population take only a read lock. Resolving an identifier with no entry is
/// [`Error::UnknownType`], fatal for the enclosing decode.
pub struct TypeRegistry {
    by_rust: RwLock<HashMap<std::any::TypeId, Arc<TypeInfo>>>,
    by_name: RwLock<HashMap<Arc<str>, Arc<TypeInfo>>>,
    hash_to_name: RwLock<HashMap<u32, Arc<str>>>,
    name_to_hash: RwLock<HashMap<Arc<str>, u32>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let registry = TypeRegistry {
            by_rust: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
            hash_to_name: RwLock::new(HashMap::new()),
            name_to_hash: RwLock::new(HashMap::new()),
        };
        registry.register_builtin::<bool>(IDENT_BOOL);
        registry.register_builtin::<i8>(IDENT_I8);
        registry.register_builtin::<i16>(IDENT_I16);
        registry.register_builtin::<i32>(IDENT_I32);
        registry.register_builtin::<i64>(IDENT_I64);
        registry.register_builtin::<u8>(IDENT_U8);
        registry.register_builtin::<u16>(IDENT_U16);
        registry.register_builtin::<u32>(IDENT_U32);
        registry.register_builtin::<u64>(IDENT_U64);
        registry.register_builtin::<f32>(IDENT_F32);
        registry.register_builtin::<f64>(IDENT_F64);
        registry.register_builtin::<String>(IDENT_STR);
        // structural names have no harness of their own; they only need to
        // resolve back from their hash when hashed identifiers are enabled
        for structural in [IDENT_SEQ, IDENT_MAP, IDENT_OPT] {
            let name: Arc<str> = Arc::from(structural);
            let hash = compute_name_hash(structural);
            registry.hash_to_name.write().insert(hash, name.clone());
            registry.name_to_hash.write().insert(name, hash);
        }
        registry
    }
}

impl TypeRegistry {
    fn register_builtin<T: Codec>(&self, name: &str) {
        // builtin names are distinct; the fallible path is for user names
        self.insert::<T>(name)
            .expect("builtin identifier registration cannot collide");
    }

    /// Registers `T` under `name`. Registering the same pair again is a
    /// no-op; reusing a name for a different type, or a type for a different
    /// name, is an error.
    pub fn register_named<T: Codec>(&self, name: &str) -> Result<(), Error> {
        debug!(name, rust_type = std::any::type_name::<T>(), "registering type");
        self.insert::<T>(name)
    }

    fn insert<T: Codec>(&self, name: &str) -> Result<(), Error> {
        let rust_type_id = std::any::TypeId::of::<T>();
        let hash = compute_name_hash(name);
        let mut by_name = self.by_name.write();
        if let Some(existing) = by_name.get(name) {
            ensure!(
                existing.rust_type_id == rust_type_id,
                Error::invalid_data(format!(
                    "identifier `{name}` is already registered to another type"
                ))
            );
            return Ok(());
        }
        if let Some(taken) = self.hash_to_name.read().get(&hash) {
            ensure!(
                &**taken == name,
                Error::invalid_data(format!(
                    "identifier hash collision: `{name}` and `{taken}` hash to {hash}"
                ))
            );
        }
        {
            let by_rust = self.by_rust.read();
            if let Some(existing) = by_rust.get(&rust_type_id) {
                return Err(Error::invalid_data(format!(
                    "type `{}` is already registered as `{}`",
                    std::any::type_name::<T>(),
                    existing.name()
                )));
            }
        }
        let info = Arc::new(TypeInfo {
            name: Arc::from(name),
            hash,
            rust_type_id,
            harness: Harness::of::<T>(),
        });
        by_name.insert(info.name.clone(), info.clone());
        self.by_rust.write().insert(rust_type_id, info.clone());
        self.hash_to_name.write().insert(hash, info.name.clone());
        self.name_to_hash.write().insert(info.name.clone(), hash);
        Ok(())
    }

    /// Registers a container instantiation (`seq<...>`, `map<...>`,
    /// `opt<...>`) under its composed identifier, insert-if-absent. Called
    /// from `Codec::opack_ensure` during model building so that dynamic
    /// decoding of such values never has to build state mid-stream.
    pub fn ensure_instantiation<T: Codec>(&self, opack: &Opack) -> Result<(), Error> {
        let name = match T::opack_ident(opack) {
            Ok(name) => name,
            // capability elements have no composed identifier; such containers
            // travel as fields only and need no dynamic entry
            Err(Error::UnsupportedFieldType(_)) => return Ok(()),
            Err(error) => return Err(error),
        };
        let mut by_name = self.by_name.write();
        if by_name.contains_key(name.as_str()) {
            return Ok(());
        }
        let info = Arc::new(TypeInfo {
            name: Arc::from(name.as_str()),
            hash: compute_name_hash(&name),
            rust_type_id: std::any::TypeId::of::<T>(),
            harness: Harness::of::<T>(),
        });
        by_name.insert(info.name.clone(), info.clone());
        self.by_rust
            .write()
            .entry(info.rust_type_id)
            .or_insert_with(|| info.clone());
        Ok(())
    }

    pub fn info_by_rust(
        &self,
        rust_type_id: std::any::TypeId,
        type_name_hint: &str,
    ) -> Result<Arc<TypeInfo>, Error> {
        self.by_rust.read().get(&rust_type_id).cloned().ok_or_else(|| {
            Error::unknown_type(format!("type `{type_name_hint}` is not registered"))
        })
    }

    pub fn info_by_name(&self, name: &str) -> Result<Arc<TypeInfo>, Error> {
        self.by_name
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_type(name.to_string()))
    }

    pub fn name_of_hash(&self, hash: u32) -> Result<Arc<str>, Error> {
        self.hash_to_name
            .read()
            .get(&hash)
            .cloned()
            .ok_or_else(|| Error::unknown_type(format!("identifier hash {hash:#010x}")))
    }

    /// Memoized hash of an identifier name. Hashes of registered names are
    /// computed once at registration; anything else is computed on first use
    /// and cached.
    pub fn hash_of(&self, name: &str) -> u32 {
        if let Some(hash) = self.name_to_hash.read().get(name) {
            return *hash;
        }
        let hash = compute_name_hash(name);
        let key: Arc<str> = Arc::from(name);
        self.hash_to_name.write().entry(hash).or_insert_with(|| key.clone());
        self.name_to_hash.write().insert(key, hash);
        hash
    }

    /// Reads one full (possibly parameterized) identifier from the stream and
    /// resolves it to a registered entry.
    pub fn read_ident(&self, context: &mut ReadContext) -> Result<Arc<TypeInfo>, Error> {
        let key = self.read_ident_key(context)?;
        self.info_by_name(&key)
    }

    fn read_ident_key(&self, context: &mut ReadContext) -> Result<String, Error> {
        let name = context.read_name()?;
        match &*name {
            IDENT_SEQ | IDENT_OPT => {
                let element = self.read_ident_key(context)?;
                Ok(format!("{name}<{element}>"))
            }
            IDENT_MAP => {
                let key = self.read_ident_key(context)?;
                let value = self.read_ident_key(context)?;
                Ok(format!("{IDENT_MAP}<{key},{value}>"))
            }
            _ => Ok(name.to_string()),
        }
    }
}
