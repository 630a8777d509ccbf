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

//! # Opack
//!
//! Opack is a self-describing binary object codec: it turns in-memory
//! values (scalars, enums, optionals, sequences, maps and nested composite
//! records) into a compact byte stream prefixed with a stable type
//! identifier, and reconstructs equivalent values on the other side without
//! the receiver knowing in advance which message type comes next.
//!
//! ## Key Features
//!
//! - **Explicit type registration**: every composite and enum type is
//!   registered under a stable identifier at startup; decoding an unknown
//!   identifier is a data error, never a silent null
//! - **Inclusion policies**: a type can be serialized under
//!   `ExplicitOnly`, `ExplicitPlusPublic` or `AllExceptExcluded`, each with
//!   its own memoized field model
//! - **Substitution**: a field declared as a boxed capability trait travels
//!   under its concrete type's identifier and decodes back to that concrete
//!   type
//! - **Dynamic decoding**: [`Opack::decode_any`] resolves the type from the
//!   stream and returns a `Box<dyn Any>` to downcast
//! - **Pluggable failure recovery**: a [`FailurePolicy`] may substitute a
//!   replacement result for a failed call; the default propagates
//!
//! ## Usage
//!
//! ```rust
//! use opack::{Inclusion, Opack, OpackObject};
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
//!
//! # fn main() -> Result<(), opack::Error> {
//! let mut opack = Opack::default();
//! opack.register::<UserModel>("UserModel")?;
//!
//! let user = UserModel { id: 1, skin: 2, x: 0.0, y: 0.0, z: 0.0 };
//! let bytes = opack.encode(&user, Inclusion::AllExceptExcluded)?;
//! let back: UserModel = opack.decode(&bytes, Inclusion::AllExceptExcluded)?;
//! assert_eq!(user, back);
//! # Ok(())
//! # }
//! ```
//!
//! The codec hands back exactly the bytes of one complete message and
//! expects exactly one complete message on decode; length-prefixed framing
//! for a transport lives outside this crate.

pub use opack_core::capability;
pub use opack_core::codec::capability::AsAny;
pub use opack_core::codec::{Codec, Lifecycle};
pub use opack_core::error::Error;
pub use opack_core::opack::Opack;
pub use opack_core::policy::{FailClosed, FailurePolicy, Recovery};
pub use opack_core::types::{Inclusion, TypeKind};
pub use opack_derive::OpackObject;
