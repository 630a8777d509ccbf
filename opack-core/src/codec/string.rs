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

use crate::codec::Codec;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{TypeKind, IDENT_STR};

impl Codec for String {
    #[inline(always)]
    fn opack_kind() -> TypeKind {
        TypeKind::Str
    }

    #[inline(always)]
    fn opack_trivial() -> bool {
        true
    }

    fn opack_ident(_opack: &Opack) -> Result<String, Error> {
        Ok(IDENT_STR.to_string())
    }

    fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error> {
        context.write_name(IDENT_STR)
    }

    fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error> {
        context.expect_name(IDENT_STR)
    }

    #[inline(always)]
    fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_str(self);
        Ok(())
    }

    #[inline(always)]
    fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        context.reader.read_str()
    }

    fn opack_zero() -> Result<Self, Error> {
        Ok(String::new())
    }
}
