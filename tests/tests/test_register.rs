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

use std::sync::Arc;
use std::thread;

use opack_core::error::Error;
use opack_core::opack::Opack;
use opack_core::types::Inclusion;
use opack_derive::OpackObject;

#[derive(OpackObject, Debug, PartialEq, Clone)]
struct RoomState {
    #[opack(include)]
    round: i32,
    #[opack(include)]
    players: Vec<String>,
}

#[derive(OpackObject, Debug, PartialEq)]
struct Impostor {
    #[opack(include)]
    round: i32,
}

#[test]
fn test_registering_same_pair_twice_is_noop() {
    let mut opack = Opack::default();
    opack.register::<RoomState>("RoomState").unwrap();
    opack.register::<RoomState>("RoomState").unwrap();
}

#[test]
fn test_name_cannot_be_reused_for_another_type() {
    let mut opack = Opack::default();
    opack.register::<RoomState>("RoomState").unwrap();
    let err = opack.register::<Impostor>("RoomState").unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_type_cannot_be_registered_under_two_names() {
    let mut opack = Opack::default();
    opack.register::<RoomState>("RoomState").unwrap();
    let err = opack.register::<RoomState>("RoomStateV2").unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_builtin_names_are_reserved() {
    let mut opack = Opack::default();
    let err = opack.register::<RoomState>("i32").unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

// One engine, many concurrent sessions: caches populate insert-if-absent and
// entries are immutable afterwards, so concurrent encodes and decodes agree.
#[test]
fn test_shared_engine_across_threads() {
    let mut opack = Opack::default();
    opack.register::<RoomState>("RoomState").unwrap();
    let opack = Arc::new(opack);

    let handles: Vec<_> = (0..8)
        .map(|round| {
            let opack = opack.clone();
            thread::spawn(move || {
                let state = RoomState {
                    round,
                    players: vec![format!("player-{round}")],
                };
                for _ in 0..100 {
                    let bytes = opack.encode(&state, Inclusion::ExplicitOnly).unwrap();
                    let back: RoomState = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
                    assert_eq!(back, state);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
