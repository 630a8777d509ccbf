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
use quote::{format_ident, quote};
use syn::{DeriveInput, FieldsNamed, Ident, Type, Visibility};

use super::has_opack_flag;

struct FieldMeta {
    ident: Ident,
    name: String,
    ty: Type,
    explicit: bool,
    excluded: bool,
    public: bool,
}

pub fn expand(input: &DeriveInput, fields: Option<&FieldsNamed>) -> TokenStream {
    let struct_ident = &input.ident;
    let lifecycle = has_opack_flag(&input.attrs, "lifecycle");

    let metas: Vec<FieldMeta> = fields
        .map(|f| {
            f.named
                .iter()
                .map(|field| {
                    let ident = field.ident.clone().expect("named field");
                    let name = ident.to_string().trim_start_matches("r#").to_string();
                    FieldMeta {
                        ident,
                        name,
                        ty: field.ty.clone(),
                        explicit: has_opack_flag(&field.attrs, "include"),
                        excluded: has_opack_flag(&field.attrs, "exclude"),
                        public: matches!(field.vis, Visibility::Public(_)),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let accessor_fns = metas.iter().enumerate().map(|(index, meta)| {
        let write_fn = format_ident!("__opack_write_{}", index);
        let read_fn = format_ident!("__opack_read_{}", index);
        let field_ident = &meta.ident;
        let ty = &meta.ty;
        quote! {
            fn #write_fn(
                owner: &dyn ::std::any::Any,
                context: &mut ::opack_core::resolver::context::WriteContext,
            ) -> ::std::result::Result<(), ::opack_core::error::Error> {
                let this = owner.downcast_ref::<#struct_ident>().ok_or_else(|| {
                    ::opack_core::error::Error::type_error(concat!(
                        "field writer expected ",
                        stringify!(#struct_ident)
                    ))
                })?;
                ::opack_core::codec::Codec::opack_write_data(&this.#field_ident, context)
            }

            fn #read_fn(
                context: &mut ::opack_core::resolver::context::ReadContext,
            ) -> ::std::result::Result<::std::boxed::Box<dyn ::std::any::Any>, ::opack_core::error::Error> {
                ::std::result::Result::Ok(::std::boxed::Box::new(
                    <#ty as ::opack_core::codec::Codec>::opack_read_data(context)?,
                ))
            }
        }
    });

    let descriptor_entries = metas.iter().enumerate().map(|(index, meta)| {
        let write_fn = format_ident!("__opack_write_{}", index);
        let read_fn = format_ident!("__opack_read_{}", index);
        let name = &meta.name;
        let ty = &meta.ty;
        let explicit = meta.explicit;
        let excluded = meta.excluded;
        let public = meta.public;
        quote! {
            ::opack_core::resolver::model::FieldDescriptor {
                name: #name,
                explicit: #explicit,
                excluded: #excluded,
                public: #public,
                trivial: <#ty as ::opack_core::codec::Codec>::opack_trivial(),
                write: #write_fn,
                read: #read_fn,
                ensure: <#ty as ::opack_core::codec::Codec>::opack_ensure,
            }
        }
    });

    let construct_body = if fields.is_some() {
        let entries = metas.iter().map(|meta| {
            let field_ident = &meta.ident;
            let name = &meta.name;
            let ty = &meta.ty;
            quote! {
                #field_ident: ::opack_core::resolver::model::take_or_zero::<#ty>(values, #name)?
            }
        });
        quote! { ::std::result::Result::Ok(Self { #(#entries,)* }) }
    } else {
        quote! {
            let _ = values;
            ::std::result::Result::Ok(Self)
        }
    };

    let before_encode = if lifecycle {
        quote! { ::opack_core::codec::Lifecycle::before_encode(self); }
    } else {
        quote! {}
    };
    let read_body = if lifecycle {
        quote! {
            let mut value = ::opack_core::codec::struct_::read::<Self>(context)?;
            ::opack_core::codec::Lifecycle::after_decode(&mut value);
            ::std::result::Result::Ok(value)
        }
    } else {
        quote! { ::opack_core::codec::struct_::read::<Self>(context) }
    };

    let const_ident = Ident::new(
        &format!("__OPACK_OBJECT_FOR_{struct_ident}"),
        Span::call_site(),
    );

    let expanded = quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        const #const_ident: () = {
            #(#accessor_fns)*

            impl ::opack_core::resolver::model::Described for #struct_ident {
                fn descriptors() -> ::std::vec::Vec<::opack_core::resolver::model::FieldDescriptor> {
                    ::std::vec![#(#descriptor_entries),*]
                }

                fn construct(
                    values: &mut ::opack_core::resolver::model::FieldValues,
                ) -> ::std::result::Result<Self, ::opack_core::error::Error> {
                    #construct_body
                }
            }

            impl ::opack_core::codec::Codec for #struct_ident {
                fn opack_kind() -> ::opack_core::types::TypeKind {
                    ::opack_core::types::TypeKind::Composite
                }

                fn opack_trivial() -> bool {
                    false
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
                    #before_encode
                    ::opack_core::codec::struct_::write(self, context)
                }

                fn opack_read_data(
                    context: &mut ::opack_core::resolver::context::ReadContext,
                ) -> ::std::result::Result<Self, ::opack_core::error::Error> {
                    #read_body
                }

                fn opack_zero() -> ::std::result::Result<Self, ::opack_core::error::Error> {
                    ::opack_core::codec::struct_::zero::<Self>()
                }

                fn opack_ensure(
                    opack: &::opack_core::opack::Opack,
                    inclusion: ::opack_core::types::Inclusion,
                ) -> ::std::result::Result<(), ::opack_core::error::Error> {
                    opack.model_for::<Self>(inclusion).map(|_| ())
                }
            }
        };
    };
    expanded.into()
}
