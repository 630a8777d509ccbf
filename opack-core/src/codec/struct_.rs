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

//! Model-driven composite encode/decode, shared by all derive-generated
//! `Codec` implementations. The derive wires a type's `Described` table in;
//! everything here runs off the memoized `(type, inclusion)` model, so field
//! order is identical for every encode and decode of the pair.

use crate::ensure;
use crate::error::Error;
use crate::opack::Opack;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::model::{Described, FieldValues};

pub fn ident<T: 'static>(opack: &Opack) -> Result<String, Error> {
    let info = opack
        .registry()
        .info_by_rust(std::any::TypeId::of::<T>(), std::any::type_name::<T>())?;
    Ok(info.name().to_string())
}

pub fn write_ident<T: 'static>(context: &mut WriteContext) -> Result<(), Error> {
    let info = context
        .opack()
        .registry()
        .info_by_rust(std::any::TypeId::of::<T>(), std::any::type_name::<T>())?;
    context.write_name_of(&info)
}

pub fn read_ident<T: 'static>(context: &mut ReadContext) -> Result<(), Error> {
    let expected = context
        .opack()
        .registry()
        .info_by_rust(std::any::TypeId::of::<T>(), std::any::type_name::<T>())?;
    let found = context.read_name()?;
    ensure!(
        &*found == expected.name(),
        Error::type_mismatch(expected.name(), &*found)
    );
    Ok(())
}

/// Writes the fields selected by the active inclusion policy, in model order.
pub fn write<T: Described>(this: &T, context: &mut WriteContext) -> Result<(), Error> {
    let model = context.opack().model_for::<T>(context.inclusion())?;
    for field in model.fields() {
        (field.write)(this, context)?;
    }
    Ok(())
}

/// Reads the selected fields in model order, then hands them to the type's
/// construction function; fields the policy excluded fall back to their zero
/// values there.
pub fn read<T: Described>(context: &mut ReadContext) -> Result<T, Error> {
    let model = context.opack().model_for::<T>(context.inclusion())?;
    let mut values = FieldValues::with_capacity(model.len());
    for field in model.fields() {
        values.push(field.name, (field.read)(context)?);
    }
    T::construct(&mut values)
}

/// Zero-argument construction: every field takes its zero value.
pub fn zero<T: Described>() -> Result<T, Error> {
    T::construct(&mut FieldValues::default())
}
