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

use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::ensure;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::registry::TypeInfo;
use crate::types::Inclusion;

/// Call-local state for one top-level encode: the write buffer, the engine
/// and the inclusion policy every recursive step runs under.
pub struct WriteContext<'a> {
    pub writer: &'a mut Writer,
    opack: &'a Opack,
    inclusion: Inclusion,
}

impl<'a> WriteContext<'a> {
    pub fn new(opack: &'a Opack, writer: &'a mut Writer, inclusion: Inclusion) -> WriteContext<'a> {
        WriteContext {
            writer,
            opack,
            inclusion,
        }
    }

    #[inline(always)]
    pub fn opack(&self) -> &'a Opack {
        self.opack
    }

    #[inline(always)]
    pub fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    /// Writes one identifier component: the name string, or its memoized
    /// hash when hashed identifiers are enabled.
    pub fn write_name(&mut self, name: &str) -> Result<(), Error> {
        if self.opack.is_hash_identifiers() {
            self.writer.write_u32(self.opack.registry().hash_of(name));
        } else {
            self.writer.write_str(name);
        }
        Ok(())
    }

    pub fn write_name_of(&mut self, info: &TypeInfo) -> Result<(), Error> {
        if self.opack.is_hash_identifiers() {
            self.writer.write_u32(info.hash());
        } else {
            self.writer.write_str(info.name());
        }
        Ok(())
    }
}

/// Call-local state for one top-level decode.
pub struct ReadContext<'a> {
    pub reader: Reader<'a>,
    opack: &'a Opack,
    inclusion: Inclusion,
}

impl<'a> ReadContext<'a> {
    pub fn new(opack: &'a Opack, reader: Reader<'a>, inclusion: Inclusion) -> ReadContext<'a> {
        ReadContext {
            reader,
            opack,
            inclusion,
        }
    }

    #[inline(always)]
    pub fn opack(&self) -> &'a Opack {
        self.opack
    }

    #[inline(always)]
    pub fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    /// Reads one identifier component and resolves it to a name.
    pub fn read_name(&mut self) -> Result<Arc<str>, Error> {
        if self.opack.is_hash_identifiers() {
            let hash = self.reader.read_u32()?;
            self.opack.registry().name_of_hash(hash)
        } else {
            Ok(Arc::from(self.reader.read_str()?))
        }
    }

    pub fn expect_name(&mut self, expected: &str) -> Result<(), Error> {
        let found = self.read_name()?;
        ensure!(
            &*found == expected,
            Error::type_mismatch(expected, &*found)
        );
        Ok(())
    }

    /// Reads one identifier component and resolves it to a registered entry.
    pub fn read_info(&mut self) -> Result<Arc<TypeInfo>, Error> {
        let name = self.read_name()?;
        self.opack.registry().info_by_name(&name)
    }
}
