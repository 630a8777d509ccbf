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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use opack_core::error::Error;
use opack_core::opack::Opack;
use opack_core::policy::{FailurePolicy, Recovery};
use opack_core::types::Inclusion;
use opack_derive::OpackObject;

#[derive(OpackObject, Debug, PartialEq)]
struct Ping {
    #[opack(include)]
    seq: i32,
}

#[test]
fn test_default_policy_propagates() {
    let mut opack = Opack::default();
    opack.register::<Ping>("Ping").unwrap();
    let err = opack
        .decode::<Ping>(&[1, 2, 3], Inclusion::ExplicitOnly)
        .unwrap_err();
    assert!(matches!(err, Error::TruncatedStream(..)));
}

#[test]
fn test_decode_failure_replaced_with_substitute_value() {
    struct SubstituteSentinel;

    impl FailurePolicy for SubstituteSentinel {
        fn on_decode_failure(&self, _error: Error) -> Recovery {
            Recovery::Replace(Box::new(Ping { seq: -1 }))
        }
    }

    let mut opack = Opack::default().failure_policy(SubstituteSentinel);
    opack.register::<Ping>("Ping").unwrap();

    let result: Ping = opack.decode(&[0xde, 0xad], Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result, Ping { seq: -1 });

    // a healthy stream is untouched by the policy
    let bytes = opack.encode(&Ping { seq: 7 }, Inclusion::ExplicitOnly).unwrap();
    let result: Ping = opack.decode(&bytes, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(result, Ping { seq: 7 });
}

#[test]
fn test_encode_failure_replaced_with_substitute_bytes() {
    struct SubstituteBytes;

    impl FailurePolicy for SubstituteBytes {
        fn on_encode_failure(&self, _error: Error) -> Recovery {
            Recovery::Replace(Box::new(vec![0u8; 4]))
        }
    }

    // Ping is never registered, so encoding it fails with UnknownType and
    // the policy substitutes fallback bytes
    let opack = Opack::default().failure_policy(SubstituteBytes);
    let bytes = opack.encode(&Ping { seq: 1 }, Inclusion::ExplicitOnly).unwrap();
    assert_eq!(bytes, vec![0u8; 4]);
}

#[test]
fn test_replacement_of_wrong_type_is_rejected() {
    struct WrongReplacement;

    impl FailurePolicy for WrongReplacement {
        fn on_decode_failure(&self, _error: Error) -> Recovery {
            Recovery::Replace(Box::new("not a ping".to_string()))
        }
    }

    let mut opack = Opack::default().failure_policy(WrongReplacement);
    opack.register::<Ping>("Ping").unwrap();
    let err = opack
        .decode::<Ping>(&[0xde, 0xad], Inclusion::ExplicitOnly)
        .unwrap_err();
    assert!(matches!(err, Error::TypeError(_)));
}

// The policy is consulted exactly once per failed top-level call, not once
// per failed field.
#[test]
fn test_policy_consulted_once_per_call() {
    struct Counting(Arc<AtomicUsize>);

    impl FailurePolicy for Counting {
        fn on_decode_failure(&self, error: Error) -> Recovery {
            self.0.fetch_add(1, Ordering::SeqCst);
            Recovery::Propagate(error)
        }
    }

    #[derive(OpackObject, Debug, PartialEq)]
    struct Wide {
        #[opack(include)]
        a: i64,
        #[opack(include)]
        b: i64,
        #[opack(include)]
        c: i64,
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let mut opack = Opack::default().failure_policy(Counting(calls.clone()));
    opack.register::<Wide>("Wide").unwrap();

    let mut bytes = opack
        .encode(&Wide { a: 1, b: 2, c: 3 }, Inclusion::ExplicitOnly)
        .unwrap();
    bytes.truncate(bytes.len() - 10);
    assert!(opack.decode::<Wide>(&bytes, Inclusion::ExplicitOnly).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
