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

//! # Opack Derive Macros
//!
//! Procedural macros for the opack binary object codec.
//!
//! `#[derive(OpackObject)]` generates the `Codec` implementation for structs
//! with named fields and for fieldless enums. For structs it additionally
//! generates the static field table (`Described`) the model builder filters
//! per inclusion policy.
//!
//! ## Field attributes
//!
//! - `#[opack(include)]`: opt the field in under `Inclusion::ExplicitOnly`
//!   (and every broader policy).
//! - `#[opack(exclude)]`: opt the field out of the visibility-based
//!   policies; only an explicit `include` overrides it.
//!
//! ## Type attributes
//!
//! - `#[opack(lifecycle)]`: the type implements
//!   `opack_core::codec::Lifecycle`; `before_encode` runs right before the
//!   fields are written and `after_decode` right after the value is
//!   constructed.
//!
//! ```rust, ignore
//! use opack_derive::OpackObject;
//!
//! #[derive(OpackObject, Debug, PartialEq)]
//! struct UserModel {
//!     #[opack(include)]
//!     id: i64,
//!     #[opack(include)]
//!     skin: i32,
//!     x: f32,
//!     y: f32,
//!     z: f32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;

#[proc_macro_derive(OpackObject, attributes(opack))]
pub fn proc_macro_derive_opack_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive(&input)
}
