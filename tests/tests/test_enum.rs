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

#[derive(OpackObject, Debug, PartialEq, Clone, Copy)]
enum GameState {
    Lobby,
    Playing,
    Finished,
}

#[derive(OpackObject, Debug, PartialEq, Clone, Copy)]
enum ErrorCode {
    None = 0,
    Timeout = 10,
    Refused,
    Internal = 100,
}

#[test]
fn test_enum_round_trip() {
    let mut opack = Opack::default();
    opack.register::<GameState>("GameState").unwrap();
    for state in [GameState::Lobby, GameState::Playing, GameState::Finished] {
        let bytes = opack.encode(&state, Inclusion::ExplicitOnly).unwrap();
        let result: GameState = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
        assert_eq!(state, result);
    }
}

// An enum-valued field writes only the underlying integer, no symbolic text.
#[test]
fn test_enum_field_is_bare_integer() {
    #[derive(OpackObject, Debug, PartialEq)]
    struct StateChanged {
        #[opack(include)]
        state: GameState,
    }

    let mut opack = Opack::default();
    opack.register::<StateChanged>("StateChanged").unwrap();
    let bytes = opack
        .encode(
            &StateChanged {
                state: GameState::Finished,
            },
            Inclusion::ExplicitOnly,
        )
        .unwrap();
    assert_eq!(bytes.len(), 4 + "StateChanged".len() + 1 + 4);
    assert_eq!(&bytes[bytes.len() - 4..], &2i32.to_le_bytes());

    let result: StateChanged = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result.state, GameState::Finished);
}

#[test]
fn test_explicit_discriminants() {
    let mut opack = Opack::default();
    opack.register::<ErrorCode>("ErrorCode").unwrap();

    let bytes = opack.encode(&ErrorCode::Refused, Inclusion::ExplicitOnly).unwrap();
    // Refused follows Timeout = 10
    assert_eq!(&bytes[bytes.len() - 4..], &11i32.to_le_bytes());

    for code in [
        ErrorCode::None,
        ErrorCode::Timeout,
        ErrorCode::Refused,
        ErrorCode::Internal,
    ] {
        let bytes = opack.encode(&code, Inclusion::ExplicitOnly).unwrap();
        let result: ErrorCode = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
        assert_eq!(code, result);
    }
}

#[test]
fn test_unknown_discriminant_fails() {
    let mut opack = Opack::default();
    opack.register::<GameState>("GameState").unwrap();

    let mut bytes = opack
        .encode(&GameState::Lobby, Inclusion::ExplicitOnly)
        .unwrap();
    let len = bytes.len();
    bytes[len - 4..].copy_from_slice(&99i32.to_le_bytes());
    let err = opack
        .decode::<GameState>(&bytes, Inclusion::ExplicitOnly)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnum(_)));
}
