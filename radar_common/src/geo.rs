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

//! spherical earth helpers. All distances share the unit of the provided radius

use std::fmt;
use serde::{Serialize,Deserialize};
use crate::{clamp, sin, sin2, cos, asin, atan2, sqrt, deg, rad, angle::{normalize_180, normalize_360}};

/// a plain geodetic position in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    #[serde(alias="lat")]
    pub latitude: f64,
    #[serde(alias="lon")]
    pub longitude: f64,
}

impl GeoPos {
    pub fn new (latitude: f64, longitude: f64)->Self { GeoPos { latitude, longitude } }

    pub fn is_valid (&self)->bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.latitude.abs() <= 90.0 && self.longitude.abs() <= 180.0
    }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "({:.5},{:.5})", self.latitude, self.longitude)
    }
}

/// great circle distance between `a` and `b` on a sphere with the given `radius`
pub fn haversine_distance (a: &GeoPos, b: &GeoPos, radius: f64)->f64 {
    let lat1 = rad(a.latitude);
    let lat2 = rad(b.latitude);
    let dlat = lat2 - lat1;
    let dlon = rad(b.longitude - a.longitude);

    let h = sin2(dlat/2.0) + cos(lat1) * cos(lat2) * sin2(dlon/2.0);
    2.0 * radius * atan2( sqrt(h), sqrt(1.0 - h))
}

/// initial great circle bearing from `from` towards `to` in degrees [0..360), clockwise from north
pub fn initial_bearing (from: &GeoPos, to: &GeoPos)->f64 {
    let lat1 = rad(from.latitude);
    let lat2 = rad(to.latitude);
    let dlon = rad(to.longitude - from.longitude);

    let y = sin(dlon) * cos(lat2);
    let x = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(dlon);
    normalize_360( deg( atan2(y,x)))
}

/// the position reached from `from` after travelling `distance` along the great circle with initial
/// bearing `bearing_deg` (spherical direct problem)
pub fn destination (from: &GeoPos, bearing_deg: f64, distance: f64, radius: f64)->GeoPos {
    let delta = distance / radius; // angular distance
    let theta = rad(bearing_deg);
    let lat1 = rad(from.latitude);
    let lon1 = rad(from.longitude);

    let lat2 = asin( clamp( sin(lat1) * cos(delta) + cos(lat1) * sin(delta) * cos(theta), -1.0, 1.0));
    let lon2 = lon1 + atan2( sin(theta) * sin(delta) * cos(lat1), cos(delta) - sin(lat1) * sin(lat2));

    GeoPos { latitude: deg(lat2), longitude: normalize_180( deg(lon2)) }
}
