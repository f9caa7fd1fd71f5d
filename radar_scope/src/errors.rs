/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
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

use radar_common::define_error;

pub type Result<T> = std::result::Result<T, RadarScopeError>;

define_error!{ pub RadarScopeError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    ImageError(#[from] image::ImageError) : "image error: {0}",
    InvalidFont(#[from] ab_glyph::InvalidFont) : "invalid font: {0}",
    ConfigError(#[from] radar_common::CommonError) : "config error: {0}",
    ParseError(String) : "parse error: {0}",
    RouteDataError(String) : "route data error: {0}",
    StatusError(u16,String) : "request {1} failed with status {0}",
    IllegalArgument(String) : "illegal argument: {0}",
    ConfigurationError(String) : "configuration error: {0}",
    NoSelection() : "select aircraft first",
    NoPendingFix() : "no fix selected",
    NotArmed() : "fix selection not armed",
    OpFailed(String) : "operation failed: {0}"
}

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::RadarScopeError::ParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;

pub fn op_failed (msg: impl ToString)->RadarScopeError {
    RadarScopeError::OpFailed( msg.to_string())
}
