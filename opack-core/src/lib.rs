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

//! # Opack Core
//!
//! Core implementation of the opack self-describing binary object codec.
//! A value of any registered type is encoded into a compact byte stream
//! prefixed with the type's identifier, so the receiving side can decode
//! messages without knowing in advance which concrete type comes next.
//!
//! ## Architecture
//!
//! - **`opack`**: the `Opack` engine and the top-level encode/decode API
//! - **`buffer`**: binary `Writer`/`Reader` with bounds-checked reads
//! - **`codec`**: the `Codec` trait and per-kind implementations
//! - **`resolver`**: type registry, serialization models, call contexts
//! - **`policy`**: pluggable recovery strategy for encode/decode failures
//! - **`types`**: type kinds, inclusion policies and identifier constants
//! - **`error`**: error taxonomy and result types
//!
//! ## Key Concepts
//!
//! Every encodable type implements [`codec::Codec`], usually through
//! `#[derive(OpackObject)]` from the `opack-derive` crate. Composite types
//! additionally carry a static field table ([`resolver::model::Described`])
//! from which an ordered, policy-filtered serialization model is built once
//! and memoized per `(type, inclusion)` pair. Identifiers travel as
//! length-prefixed names, or as deterministic 32-bit hashes when
//! [`opack::Opack::hash_identifiers`] is enabled.
//!
//! This crate is typically consumed through the higher-level `opack` crate,
//! which re-exports the public API together with the derive macro.

pub mod buffer;
pub mod codec;
pub mod error;
pub mod opack;
pub mod policy;
pub mod resolver;
pub mod types;

pub use crate::error::Error;
pub use crate::opack::Opack;
pub use crate::types::Inclusion;
