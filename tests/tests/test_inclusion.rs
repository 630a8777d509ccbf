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

use opack_core::error::Error;
use opack_core::opack::Opack;
use opack_core::types::Inclusion;
use opack_derive::OpackObject;

#[derive(OpackObject, Debug, PartialEq, Clone)]
struct Profile {
    #[opack(include)]
    id: i64,
    pub name: String,
    #[opack(exclude)]
    pub cache_key: u64,
    secret: i32,
}

fn sample() -> Profile {
    Profile {
        id: 7,
        name: "alice".to_string(),
        cache_key: 0xdead_beef,
        secret: 42,
    }
}

fn engine() -> Opack {
    let mut opack = Opack::default();
    opack.register::<Profile>("Profile").unwrap();
    opack
}

#[test]
fn test_explicit_only_selects_marked_fields() {
    let opack = engine();
    let bytes = opack.encode(&sample(), Inclusion::ExplicitOnly).unwrap();
    let result: Profile = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result.id, 7);
    // everything else falls back to its zero value
    assert_eq!(result.name, "");
    assert_eq!(result.cache_key, 0);
    assert_eq!(result.secret, 0);
}

#[test]
fn test_explicit_plus_public_adds_non_excluded_public_fields() {
    let opack = engine();
    let bytes = opack.encode(&sample(), Inclusion::ExplicitPlusPublic).unwrap();
    let result: Profile = opack.decode(&bytes, Inclusion::ExplicitPlusPublic).unwrap();
    assert_eq!(result.id, 7);
    assert_eq!(result.name, "alice");
    // excluded even though public
    assert_eq!(result.cache_key, 0);
    assert_eq!(result.secret, 0);
}

#[test]
fn test_all_except_excluded_takes_private_fields_too() {
    let opack = engine();
    let bytes = opack.encode(&sample(), Inclusion::AllExceptExcluded).unwrap();
    let result: Profile = opack.decode(&bytes, Inclusion::AllExceptExcluded).unwrap();
    assert_eq!(result.id, 7);
    assert_eq!(result.name, "alice");
    assert_eq!(result.cache_key, 0);
    assert_eq!(result.secret, 42);
}

#[test]
fn test_policies_produce_different_byte_lengths() {
    let opack = engine();
    let explicit = opack.encode(&sample(), Inclusion::ExplicitOnly).unwrap();
    let public = opack.encode(&sample(), Inclusion::ExplicitPlusPublic).unwrap();
    let all = opack.encode(&sample(), Inclusion::AllExceptExcluded).unwrap();
    assert!(explicit.len() < public.len());
    assert!(public.len() < all.len());
}

#[test]
fn test_decode_under_other_policy_is_policy_mismatch() {
    let opack = engine();
    let bytes = opack.encode(&sample(), Inclusion::AllExceptExcluded).unwrap();
    let err = opack
        .decode::<Profile>(&bytes, Inclusion::ExplicitOnly)
        .unwrap_err();
    assert!(matches!(err, Error::PolicyMismatch(2, 0)));
}

#[test]
fn test_field_order_is_declaration_order() {
    let opack = engine();
    let model = opack.model_for::<Profile>(Inclusion::AllExceptExcluded).unwrap();
    let names: Vec<&str> = model.field_names().collect();
    assert_eq!(names, ["id", "name", "secret"]);
}
