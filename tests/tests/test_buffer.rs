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

use opack_core::buffer::{Reader, Writer};
use opack_core::error::Error;

#[test]
fn test_primitive_round_trip() {
    let mut writer = Writer::default();
    writer.write_bool(true);
    writer.write_i8(-8);
    writer.write_u8(8);
    writer.write_i16(-1600);
    writer.write_u16(1600);
    writer.write_i32(-320000);
    writer.write_u32(320000);
    writer.write_i64(-64_000_000_000);
    writer.write_u64(64_000_000_000);
    writer.write_f32(1.5);
    writer.write_f64(-2.25);
    let bytes = writer.into_bytes();

    let mut reader = Reader::new(&bytes);
    assert!(reader.read_bool().unwrap());
    assert_eq!(reader.read_i8().unwrap(), -8);
    assert_eq!(reader.read_u8().unwrap(), 8);
    assert_eq!(reader.read_i16().unwrap(), -1600);
    assert_eq!(reader.read_u16().unwrap(), 1600);
    assert_eq!(reader.read_i32().unwrap(), -320000);
    assert_eq!(reader.read_u32().unwrap(), 320000);
    assert_eq!(reader.read_i64().unwrap(), -64_000_000_000);
    assert_eq!(reader.read_u64().unwrap(), 64_000_000_000);
    assert_eq!(reader.read_f32().unwrap(), 1.5);
    assert_eq!(reader.read_f64().unwrap(), -2.25);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_string_is_length_prefixed() {
    let mut writer = Writer::default();
    writer.write_str("héllo");
    let bytes = writer.into_bytes();
    // 4-byte length prefix, then the utf-8 bytes, no terminator
    assert_eq!(bytes.len(), 4 + "héllo".len());
    assert_eq!(&bytes[..4], &("héllo".len() as i32).to_le_bytes());

    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_str().unwrap(), "héllo");
}

#[test]
fn test_little_endian_layout() {
    let mut writer = Writer::default();
    writer.write_i32(4);
    assert_eq!(writer.as_slice(), &[4, 0, 0, 0]);
}

#[test]
fn test_read_past_end_is_truncated_stream() {
    let mut reader = Reader::new(&[1, 2]);
    let err = reader.read_i32().unwrap_err();
    assert!(matches!(err, Error::TruncatedStream(0, 4, 2)));
    // the failed read consumed nothing
    assert_eq!(reader.read_u16().unwrap(), 0x0201);
}

#[test]
fn test_truncated_string_payload() {
    let mut writer = Writer::default();
    writer.write_i32(10);
    writer.write_bytes(b"abc");
    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    assert!(matches!(
        reader.read_str().unwrap_err(),
        Error::TruncatedStream(4, 10, 7)
    ));
}

#[test]
fn test_reader_with_starting_cursor() {
    let bytes = [0xff, 0xff, 7, 0, 0, 0];
    let mut reader = Reader::new_at(&bytes, 2);
    assert_eq!(reader.read_i32().unwrap(), 7);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_raw_bytes_round_trip() {
    let mut writer = Writer::default();
    writer.write_bytes(&[9, 8, 7]);
    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_bytes(3).unwrap(), &[9, 8, 7]);
    assert!(reader.read_bytes(1).is_err());
}
