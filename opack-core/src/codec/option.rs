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
use crate::types::{Inclusion, TypeKind, IDENT_OPT};

/// Optional payload: one presence byte, then the value payload only when
/// present.
impl<T: Codec> Codec for Option<T> {
    #[inline(always)]
    fn opack_kind() -> TypeKind {
        TypeKind::Opt
    }

    #[inline(always)]
    fn opack_trivial() -> bool {
        false
    }

    fn opack_ident(opack: &Opack) -> Result<String, Error> {
        Ok(format!("{IDENT_OPT}<{}>", T::opack_ident(opack)?))
    }

    fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error> {
        context.write_name(IDENT_OPT)?;
        T::opack_write_ident(context)
    }

    fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error> {
        context.expect_name(IDENT_OPT)?;
        T::opack_read_ident(context)
    }

    fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        match self {
            Some(value) => {
                context.writer.write_bool(true);
                value.opack_write_data(context)
            }
            None => {
                context.writer.write_bool(false);
                Ok(())
            }
        }
    }

    fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        if context.reader.read_bool()? {
            Ok(Some(T::opack_read_data(context)?))
        } else {
            Ok(None)
        }
    }

    fn opack_zero() -> Result<Self, Error> {
        Ok(None)
    }

    fn opack_ensure(opack: &Opack, inclusion: Inclusion) -> Result<(), Error> {
        T::opack_ensure(opack, inclusion)?;
        opack.registry().ensure_instantiation::<Self>(opack)
    }
}
