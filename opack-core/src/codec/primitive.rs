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
use crate::types::{
    TypeKind, IDENT_BOOL, IDENT_F32, IDENT_F64, IDENT_I16, IDENT_I32, IDENT_I64, IDENT_I8,
    IDENT_U16, IDENT_U32, IDENT_U64, IDENT_U8,
};

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident, $ident:expr, $write:ident, $read:ident) => {
        impl Codec for $ty {
            #[inline(always)]
            fn opack_kind() -> TypeKind {
                TypeKind::$kind
            }

            #[inline(always)]
            fn opack_trivial() -> bool {
                true
            }

            fn opack_ident(_opack: &Opack) -> Result<String, Error> {
                Ok($ident.to_string())
            }

            fn opack_write_ident(context: &mut WriteContext) -> Result<(), Error> {
                context.write_name($ident)
            }

            fn opack_read_ident(context: &mut ReadContext) -> Result<(), Error> {
                context.expect_name($ident)
            }

            #[inline(always)]
            fn opack_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
                context.writer.$write(*self);
                Ok(())
            }

            #[inline(always)]
            fn opack_read_data(context: &mut ReadContext) -> Result<Self, Error> {
                context.reader.$read()
            }

            fn opack_zero() -> Result<Self, Error> {
                Ok(<$ty>::default())
            }
        }
    };
}

impl_scalar!(bool, Bool, IDENT_BOOL, write_bool, read_bool);
impl_scalar!(i8, I8, IDENT_I8, write_i8, read_i8);
impl_scalar!(i16, I16, IDENT_I16, write_i16, read_i16);
impl_scalar!(i32, I32, IDENT_I32, write_i32, read_i32);
impl_scalar!(i64, I64, IDENT_I64, write_i64, read_i64);
impl_scalar!(u8, U8, IDENT_U8, write_u8, read_u8);
impl_scalar!(u16, U16, IDENT_U16, write_u16, read_u16);
impl_scalar!(u32, U32, IDENT_U32, write_u32, read_u32);
impl_scalar!(u64, U64, IDENT_U64, write_u64, read_u64);
impl_scalar!(f32, F32, IDENT_F32, write_f32, read_f32);
impl_scalar!(f64, F64, IDENT_F64, write_f64, read_f64);
