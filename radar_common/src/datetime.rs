/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::time::Duration;
use serde::{Deserialize, Deserializer, Serializer};

pub fn ser_duration_as_millis<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_u64( dur.as_millis() as u64)
}

/// deserialize a `Duration` from a (non-negative) number of milliseconds, as used in RON configs
pub fn de_duration_from_millis <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let millis: u64 = u64::deserialize(deserializer)?;
    Ok( Duration::from_millis(millis) )
}
