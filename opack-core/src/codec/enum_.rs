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

//! Enum payloads carry only the underlying `i32` discriminant, never the
//! symbolic variant name. The derive macro maps discriminants to variants on
//! both sides.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};

#[inline(always)]
pub fn write_discriminant(context: &mut WriteContext, value: i32) -> Result<(), Error> {
    context.writer.write_i32(value);
    Ok(())
}

#[inline(always)]
pub fn read_discriminant(context: &mut ReadContext) -> Result<i32, Error> {
    context.reader.read_i32()
}
