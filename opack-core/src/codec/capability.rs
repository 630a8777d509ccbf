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

//! Capability fields: a field declared as `Box<dyn Trait>` holds one
//! concrete registered type per value. Its payload is the concrete type's
//! identifier followed by the concrete payload (substitution), so a decode
//! reconstructs the concrete type, never the declared abstraction. The
//! [`capability!`](crate::capability) macro implements [`Codec`] for the
//! boxed trait object over a closed list of concrete types.

use std::any::Any;

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};

/// Upcast to `&dyn Any`, available on every `'static` type so capability
/// traits only need to declare it as a supertrait:
///
/// ```ignore
/// trait Action: opack_core::codec::capability::AsAny { /* ... */ }
/// ```
pub trait AsAny: 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Writes the substituted identifier of `any`'s concrete type, then its
/// payload through the registered harness.
pub fn write_concrete(
    any: &dyn Any,
    declared: &'static str,
    context: &mut WriteContext,
) -> Result<(), Error> {
    let info = context
        .opack()
        .registry()
        .info_by_rust(any.type_id(), declared)?;
    context.write_name_of(&info)?;
    (info.harness().write_any())(any, context)
}

/// Mirror of [`write_concrete`]: reads the substituted identifier, resolves
/// the registered harness, and decodes the concrete payload.
pub fn read_concrete(context: &mut ReadContext) -> Result<Box<dyn Any>, Error> {
    let info = context.read_info()?;
    (info.harness().read_any())(context)
}

/// Implements [`Codec`](crate::codec::Codec) for `Box<dyn Trait>` over a
/// closed list of concrete types. The trait must have
/// [`AsAny`] as a supertrait, and every listed type must be registered with
/// the engine before the first encode.
///
/// ```ignore
/// trait Action: AsAny {}
/// impl Action for MoveAction {}
/// impl Action for ChatAction {}
/// capability!(dyn Action => MoveAction, ChatAction);
/// ```
#[macro_export]
macro_rules! capability {
    (dyn $trait_:path => $($concrete:ty),+ $(,)?) => {
        impl $crate::codec::Codec for ::std::boxed::Box<dyn $trait_> {
            fn opack_kind() -> $crate::types::TypeKind {
                $crate::types::TypeKind::Capability
            }

            fn opack_trivial() -> bool {
                false
            }

            fn opack_ident(
                _opack: &$crate::opack::Opack,
            ) -> ::std::result::Result<::std::string::String, $crate::error::Error> {
                ::std::result::Result::Err($crate::error::Error::unsupported_field_type(
                    concat!(
                        "dyn ",
                        stringify!($trait_),
                        " has no identifier of its own; values travel under their concrete type"
                    ),
                ))
            }

            fn opack_write_ident(
                _context: &mut $crate::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), $crate::error::Error> {
                ::std::result::Result::Err($crate::error::Error::unsupported_field_type(
                    concat!(
                        "dyn ",
                        stringify!($trait_),
                        " cannot be a top-level message; encode the concrete type"
                    ),
                ))
            }

            fn opack_read_ident(
                _context: &mut $crate::resolver::context::ReadContext,
            ) -> ::std::result::Result<(), $crate::error::Error> {
                ::std::result::Result::Err($crate::error::Error::unsupported_field_type(
                    concat!(
                        "dyn ",
                        stringify!($trait_),
                        " cannot be a top-level message; decode the concrete type"
                    ),
                ))
            }

            fn opack_write_data(
                &self,
                context: &mut $crate::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), $crate::error::Error> {
                $crate::codec::capability::write_concrete(
                    $crate::codec::capability::AsAny::as_any(&**self),
                    concat!("dyn ", stringify!($trait_)),
                    context,
                )
            }

            fn opack_read_data(
                context: &mut $crate::resolver::context::ReadContext,
            ) -> ::std::result::Result<Self, $crate::error::Error> {
                let value = $crate::codec::capability::read_concrete(context)?;
                $(
                    let value = match value.downcast::<$concrete>() {
                        ::std::result::Result::Ok(v) => {
                            return ::std::result::Result::Ok(v as ::std::boxed::Box<dyn $trait_>)
                        }
                        ::std::result::Result::Err(v) => v,
                    };
                )+
                let _ = value;
                ::std::result::Result::Err($crate::error::Error::unsupported_field_type(
                    concat!("decoded value does not implement ", stringify!($trait_)),
                ))
            }

            fn opack_zero() -> ::std::result::Result<Self, $crate::error::Error> {
                ::std::result::Result::Err($crate::error::Error::unsupported_field_type(
                    concat!(
                        "dyn ",
                        stringify!($trait_),
                        " has no zero value; wrap the field in Option or include it in the policy"
                    ),
                ))
            }
        }
    };
}
