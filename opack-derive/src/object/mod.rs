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

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, Fields};

mod derive_enum;
mod derive_struct;

pub fn derive(input: &DeriveInput) -> TokenStream {
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "OpackObject does not support generic types; derive each concrete instantiation",
        )
        .to_compile_error()
        .into();
    }
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => derive_struct::expand(input, Some(fields)),
            Fields::Unit => derive_struct::expand(input, None),
            Fields::Unnamed(_) => syn::Error::new_spanned(
                &input.ident,
                "OpackObject requires named fields; tuple structs are not supported",
            )
            .to_compile_error()
            .into(),
        },
        Data::Enum(data) => derive_enum::expand(input, data),
        Data::Union(_) => syn::Error::new_spanned(
            &input.ident,
            "OpackObject cannot be derived for unions",
        )
        .to_compile_error()
        .into(),
    }
}

/// True when any `#[opack(...)]` attribute carries the given flag.
pub(crate) fn has_opack_flag(attrs: &[syn::Attribute], flag: &str) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("opack") {
            continue;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}
