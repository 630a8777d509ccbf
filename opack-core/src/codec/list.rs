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
use crate::ensure;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{Inclusion, TypeKind, IDENT_SEQ};

/// Sequence payload: `count:i32` then the elements in iteration order.
impl<T: Codec> Codec for Vec<T> {
    #[inline(always)]
    fn opack_kind() -> TypeKind {
        TypeKind::Seq
    }

    #[inline(always)]
    fn opack_trivial() -> bool {
        T::opack_trivial()
    }

    fn opack_ident(opack: &Opack) -> Result<String, Error> {
        Ok(format!("{IDENT_SEQ}<{}>", T::opack_ident(opack)?))
    }

    fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error> {
        context.write_name(IDENT_SEQ)?;
        T::opack_write_ident(context)
    }

    fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error> {
        context.expect_name(IDENT_SEQ)?;
        T::opack_read_ident(context)
    }

    fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        ensure!(
            self.len() <= i32::MAX as usize,
            Error::invalid_data("sequence length exceeds i32::MAX")
        );
        context.writer.write_i32(self.len() as i32);
        for element in self {
            element.opack_write_data(context)?;
        }
        Ok(())
    }

    fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let count = context.reader.read_i32()?;
        ensure!(
            count >= 0,
            Error::invalid_data(format!("negative sequence count: {count}"))
        );
        let mut elements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            elements.push(T::opack_read_data(context)?);
        }
        Ok(elements)
    }

    fn opack_zero() -> Result<Self, Error> {
        Ok(Vec::new())
    }

    fn opack_ensure(opack: &Opack, inclusion: Inclusion) -> Result<(), Error> {
        T::opack_ensure(opack, inclusion)?;
        opack.registry().ensure_instantiation::<Self>(opack)
    }
}
