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

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Closed set of encodable categories the codec dispatches on.
///
/// Trivially encodable kinds (primitives, enums, and sequences/maps whose
/// element kinds are transitively trivial) carry no type header when nested
/// in a composite; composites and capabilities do not qualify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    Enum,
    Opt,
    Seq,
    Map,
    Composite,
    Capability,
}

/// Which fields of a composite participate in serialization.
///
/// The tag value is written as a single byte right after the top-level type
/// identifier; decoding under a different policy than the one used to encode
/// fails with `Error::PolicyMismatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Inclusion {
    /// Only fields explicitly opted in with `#[opack(include)]`.
    ExplicitOnly = 0,
    /// Explicit fields plus all non-excluded `pub` fields.
    ExplicitPlusPublic = 1,
    /// Every field not marked `#[opack(exclude)]`.
    AllExceptExcluded = 2,
}

/// Identifier names of the built-in scalar kinds, as they appear on the wire.
pub const IDENT_BOOL: &str = "bool";
pub const IDENT_I8: &str = "i8";
pub const IDENT_I16: &str = "i16";
pub const IDENT_I32: &str = "i32";
pub const IDENT_I64: &str = "i64";
pub const IDENT_U8: &str = "u8";
pub const IDENT_U16: &str = "u16";
pub const IDENT_U32: &str = "u32";
pub const IDENT_U64: &str = "u64";
pub const IDENT_F32: &str = "f32";
pub const IDENT_F64: &str = "f64";
pub const IDENT_STR: &str = "str";

/// Structural identifier names. Each is followed on the wire by its type
/// arguments, recursively: `seq` and `opt` by one, `map` by two.
pub const IDENT_SEQ: &str = "seq";
pub const IDENT_MAP: &str = "map";
pub const IDENT_OPT: &str = "opt";

const MAX_U31: u64 = (1 << 31) - 1;

/// Deterministic 31-bit hash of an identifier name, used in place of the
/// name string when hashed-identifier mode is enabled. Both peers must run
/// the same algorithm; it is part of the wire contract.
pub fn compute_name_hash(s: &str) -> u32 {
    let mut hash: u64 = 17;
    s.as_bytes().iter().for_each(|b| {
        hash = (hash * 31) + (*b as u64);
        while hash >= MAX_U31 {
            hash /= 7;
        }
    });
    hash as u32
}
