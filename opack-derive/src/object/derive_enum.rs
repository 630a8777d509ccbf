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
use proc_macro2::Span;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields, Ident};

pub fn expand(input: &DeriveInput, data: &DataEnum) -> TokenStream {
    let enum_ident = &input.ident;

    if data.variants.is_empty() {
        return syn::Error::new_spanned(enum_ident, "OpackObject requires at least one variant")
            .to_compile_error()
            .into();
    }
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                &variant.ident,
                "OpackObject enums must be fieldless; only the discriminant travels on the wire",
            )
            .to_compile_error()
            .into();
        }
    }

    // Discriminants follow the language rules: an explicit `= expr` resets
    // the counter, implicit variants continue from the previous one.
    let mut discriminants = Vec::with_capacity(data.variants.len());
    let mut last_explicit: Option<proc_macro2::TokenStream> = None;
    let mut offset: i64 = 0;
    for (index, variant) in data.variants.iter().enumerate() {
        let tokens = if let Some((_, expr)) = &variant.discriminant {
            last_explicit = Some(quote!(#expr));
            offset = 0;
            quote!((#expr) as i32)
        } else if let Some(base) = &last_explicit {
            offset += 1;
            let offset_lit = proc_macro2::Literal::i64_suffixed(offset);
            quote!(((#base) as i64 + #offset_lit) as i32)
        } else {
            let index_lit = proc_macro2::Literal::i32_suffixed(index as i32);
            quote!(#index_lit)
        };
        discriminants.push(tokens);
    }

    let write_arms = data.variants.iter().zip(&discriminants).map(|(v, disc)| {
        let v_ident = &v.ident;
        quote! { Self::#v_ident => #disc, }
    });
    let read_arms = data.variants.iter().zip(&discriminants).map(|(v, disc)| {
        let v_ident = &v.ident;
        quote! {
            if value == #disc {
                return ::std::result::Result::Ok(Self::#v_ident);
            }
        }
    });
    let first_variant = &data.variants.first().expect("non-empty enum").ident;

    let const_ident = Ident::new(
        &format!("__OPACK_OBJECT_FOR_{enum_ident}"),
        Span::call_site(),
    );

    let expanded = quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        const #const_ident: () = {
            impl ::opack_core::codec::Codec for #enum_ident {
                fn opack_kind() -> ::opack_core::types::TypeKind {
                    ::opack_core::types::TypeKind::Enum
                }

                fn opack_trivial() -> bool {
                    true
                }

                fn opack_ident(
                    opack: &::opack_core::opack::Opack,
                ) -> ::std::result::Result<::std::string::String, ::opack_core::error::Error> {
                    ::opack_core::codec::struct_::ident::<Self>(opack)
                }

                fn opack_write_ident(
                    context: &mut ::opack_core::resolver::context::WriteContext,
                ) -> ::std::result::Result<(), ::opack_core::error::Error> {
                    ::opack_core::codec::struct_::write_ident::<Self>(context)
                }

                fn opack_read_ident(
                    context: &mut ::opack_core::resolver::context::ReadContext,
                ) -> ::std::result::Result<(), ::opack_core::error::Error> {
                    ::opack_core::codec::struct_::read_ident::<Self>(context)
                }

                fn opack_write_data(
                    &self,
                    context: &mut ::opack_core::resolver::context::WriteContext,
                ) -> ::std::result::Result<(), ::opack_core::error::Error> {
                    let discriminant = match self { #(#write_arms)* };
                    ::opack_core::codec::enum_::write_discriminant(context, discriminant)
                }

                fn opack_read_data(
                    context: &mut ::opack_core::resolver::context::ReadContext,
                ) -> ::std::result::Result<Self, ::opack_core::error::Error> {
                    let value = ::opack_core::codec::enum_::read_discriminant(context)?;
                    #(#read_arms)*
                    ::std::result::Result::Err(::opack_core::error::Error::unknown_enum(
                        ::std::format!(
                            concat!(stringify!(#enum_ident), " has no variant with discriminant {}"),
                            value
                        ),
                    ))
                }

                fn opack_zero() -> ::std::result::Result<Self, ::opack_core::error::Error> {
                    ::std::result::Result::Ok(Self::#first_variant)
                }
            }
        };
    };
    expanded.into()
}
