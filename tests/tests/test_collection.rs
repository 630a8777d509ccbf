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

use std::collections::{BTreeMap, HashMap};

use opack_core::opack::Opack;
use opack_core::types::Inclusion;
use opack_derive::OpackObject;

#[derive(OpackObject, Debug, PartialEq, Clone)]
struct UserModel {
    #[opack(include)]
    id: i64,
    #[opack(include)]
    skin: i32,
    #[opack(include)]
    x: f32,
    #[opack(include)]
    y: f32,
    #[opack(include)]
    z: f32,
}

#[derive(OpackObject, Debug, PartialEq)]
struct ConnectedClients {
    #[opack(include)]
    users: Vec<UserModel>,
}

fn engine() -> Opack {
    let mut opack = Opack::default();
    opack.register::<UserModel>("UserModel").unwrap();
    opack.register::<ConnectedClients>("ConnectedClients").unwrap();
    opack
}

#[test]
fn test_composite_sequence_round_trip() {
    let opack = engine();
    let message = ConnectedClients {
        users: vec![UserModel {
            id: 1,
            skin: 2,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }],
    };
    let bytes = opack.encode(&message, Inclusion::ExplicitOnly).unwrap();
    let result: ConnectedClients = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result.users.len(), 1);
    assert_eq!(result.users[0].id, 1);
    assert_eq!(result, message);
}

#[test]
fn test_empty_sequence_round_trip() {
    let opack = engine();
    let message = ConnectedClients { users: Vec::new() };
    let bytes = opack.encode(&message, Inclusion::ExplicitOnly).unwrap();
    let result: ConnectedClients = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert!(result.users.is_empty());
}

#[test]
fn test_top_level_sequence_of_scalars() {
    let opack = Opack::default();
    let values: Vec<i32> = vec![3, 1, 4, 1, 5];
    let bytes = opack.encode(&values, Inclusion::ExplicitOnly).unwrap();
    // "seq" then "i32", policy tag, count, five elements
    let expected_len = (4 + 3) + (4 + 3) + 1 + 4 + 5 * 4;
    assert_eq!(bytes.len(), expected_len);
    let result: Vec<i32> = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(values, result);
}

#[test]
fn test_nested_sequences() {
    let opack = Opack::default();
    let grid: Vec<Vec<u8>> = vec![vec![1, 2], vec![], vec![3]];
    let bytes = opack.encode(&grid, Inclusion::ExplicitOnly).unwrap();
    let result: Vec<Vec<u8>> = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(grid, result);
}

#[test]
fn test_hash_map_round_trip() {
    #[derive(OpackObject, Debug, PartialEq)]
    struct Scores {
        #[opack(include)]
        by_player: HashMap<String, i32>,
    }

    let mut opack = Opack::default();
    opack.register::<Scores>("Scores").unwrap();

    let message = Scores {
        by_player: HashMap::from([
            ("alice".to_string(), 31),
            ("bob".to_string(), 17),
            ("carol".to_string(), 99),
        ]),
    };
    let bytes = opack.encode(&message, Inclusion::ExplicitOnly).unwrap();
    let result: Scores = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(message, result);
}

#[test]
fn test_btree_map_round_trip() {
    let opack = Opack::default();
    let map: BTreeMap<i32, String> = BTreeMap::from([
        (1, "one".to_string()),
        (2, "two".to_string()),
    ]);
    let bytes = opack.encode(&map, Inclusion::ExplicitOnly).unwrap();
    let result: BTreeMap<i32, String> = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(map, result);
}

// Entries travel as interleaved pairs, so each value stays attached to its
// key no matter how the source map iterates.
#[test]
fn test_map_pair_layout() {
    let opack = Opack::default();
    let map: HashMap<u8, u8> = HashMap::from([(5, 50)]);
    let bytes = opack.encode(&map, Inclusion::ExplicitOnly).unwrap();
    // "map" + "u8" + "u8" + policy + count + one (key, value) pair
    let expected_len = (4 + 3) + (4 + 2) + (4 + 2) + 1 + 4 + 2;
    assert_eq!(bytes.len(), expected_len);
    assert_eq!(&bytes[bytes.len() - 2..], &[5, 50]);
}

#[test]
fn test_option_round_trip() {
    let opack = Opack::default();
    let present: Option<String> = Some("here".to_string());
    let bytes = opack.encode(&present, Inclusion::ExplicitOnly).unwrap();
    let result: Option<String> = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(present, result);

    let absent: Option<String> = None;
    let bytes = opack.encode(&absent, Inclusion::ExplicitOnly).unwrap();
    // absent payload is just the presence byte
    assert_eq!(bytes.len(), (4 + 3) + (4 + 3) + 1 + 1);
    let result: Option<String> = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result, None);
}
