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

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::codec::Codec;
use crate::ensure;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{Inclusion, TypeKind, IDENT_MAP};

// Map payload: `count:i32` then `count` interleaved (key, value) pairs.
// A single pair sequence keeps each value attached to its key regardless of
// the source map's iteration order; two parallel sequences would silently
// scramble entries if the order changed between the key and value passes.

macro_rules! impl_map {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> Codec for $map<K, V>
        where
            K: Codec $(+ $bound)+,
            V: Codec,
        {
            #[inline(always)]
            fn opack_kind() -> TypeKind {
                TypeKind::Map
            }

            #[inline(always)]
            fn opack_trivial() -> bool {
                K::opack_trivial() && V::opack_trivial()
            }

            fn opack_ident(opack: &Opack) -> Result<String, Error> {
                Ok(format!(
                    "{IDENT_MAP}<{},{}>",
                    K::opack_ident(opack)?,
                    V::opack_ident(opack)?
                ))
            }

            fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error> {
                context.write_name(IDENT_MAP)?;
                K::opack_write_ident(context)?;
                V::opack_write_ident(context)
            }

            fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error> {
                context.expect_name(IDENT_MAP)?;
                K::opack_read_ident(context)?;
                V::opack_read_ident(context)
            }

            fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                ensure!(
                    self.len() <= i32::MAX as usize,
                    Error::invalid_data("map entry count exceeds i32::MAX")
                );
                context.writer.write_i32(self.len() as i32);
                for (key, value) in self {
                    key.opack_write_data(context)?;
                    value.opack_write_data(context)?;
                }
                Ok(())
            }

            fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error> {
                let count = context.reader.read_i32()?;
                ensure!(
                    count >= 0,
                    Error::invalid_data(format!("negative map entry count: {count}"))
                );
                let mut entries = Self::default();
                for _ in 0..count {
                    let key = K::opack_read_data(context)?;
                    let value = V::opack_read_data(context)?;
                    entries.insert(key, value);
                }
                Ok(entries)
            }

            fn opack_zero() -> Result<Self, Error> {
                Ok(Self::default())
            }

            fn opack_ensure(opack: &Opack, inclusion: Inclusion) -> Result<(), Error> {
                K::opack_ensure(opack, inclusion)?;
                V::opack_ensure(opack, inclusion)?;
                opack.registry().ensure_instantiation::<Self>(opack)
            }
        }
    };
}

impl_map!(HashMap, Eq, Hash);
impl_map!(BTreeMap, Ord);
