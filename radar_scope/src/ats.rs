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

//! static airspace structure (waypoints, radio navigation aids and routes) as served by the simulator
//! `/ats/route/all` endpoint. This is loaded once and read-only afterwards

use serde::{Serialize, Deserialize, Deserializer, de::Error as DeError};
use serde_json::Value as JsonValue;
use radar_common::geo::GeoPos;
use crate::errors::{RadarScopeError,Result};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(deserialize_with="de_lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with="de_lenient_f64")]
    pub longitude: f64,
    #[serde(rename="type", default)]
    pub kind: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RadioNavigationAid {
    pub name: String,
    #[serde(default, deserialize_with="de_lenient_string")]
    pub id: String,
    #[serde(rename="type", default)]
    pub kind: String,
    #[serde(deserialize_with="de_lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with="de_lenient_f64")]
    pub longitude: f64,
    #[serde(default, deserialize_with="de_lenient_string")]
    pub frequency: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct RoutePoint {
    pub name: String,
    #[serde(deserialize_with="de_lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with="de_lenient_f64")]
    pub longitude: f64,
    #[serde(rename="type", default)]
    pub kind: String,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Route {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub points: Vec<RoutePoint>,
}

/// the complete route data set. All four collections are required
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct AtsRouteData {
    pub waypoints: Vec<Waypoint>,
    pub radio_navigation_aids: Vec<RadioNavigationAid>,
    pub ats_lower_routes: Vec<Route>,
    pub rnav_routes: Vec<Route>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FixKind { Waypoint, NavigationAid }

/// result of a nearest fix lookup
#[derive(Debug,Clone,PartialEq)]
pub struct FixMatch<'a> {
    pub name: &'a str,
    pub kind: FixKind,
    pub pos: GeoPos,
}

impl AtsRouteData {
    pub fn from_json (src: &str)->Result<Self> {
        serde_json::from_str( src).map_err( |e| RadarScopeError::RouteDataError( e.to_string()))
    }

    pub fn n_fixes (&self)->usize { self.waypoints.len() + self.radio_navigation_aids.len() }

    /// the fix closest to `p`, using squared lat/lon differences (planar degree space, not geodesic).
    /// Navigation aids win exact ties against anything scanned before them (waypoints and earlier
    /// navaids), between waypoints the first one wins
    pub fn nearest_fix (&self, p: &GeoPos)->Option<FixMatch<'_>> {
        let dist2 = |lat: f64, lon: f64| { let dlat = lat - p.latitude; let dlon = lon - p.longitude; dlat*dlat + dlon*dlon };
        let mut best: Option<(f64,FixMatch)> = None;

        for wp in &self.waypoints {
            let d = dist2( wp.latitude, wp.longitude);
            if best.as_ref().map_or( true, |(bd,_)| d < *bd) {
                best = Some( (d, FixMatch { name: &wp.name, kind: FixKind::Waypoint, pos: GeoPos::new( wp.latitude, wp.longitude) }));
            }
        }

        for na in &self.radio_navigation_aids {
            let d = dist2( na.latitude, na.longitude);
            if best.as_ref().map_or( true, |(bd,_)| d <= *bd) {
                best = Some( (d, FixMatch { name: &na.name, kind: FixKind::NavigationAid, pos: GeoPos::new( na.latitude, na.longitude) }));
            }
        }

        best.map( |(_,m)| m)
    }
}

/* #region lenient field deserialization  *****************************************************************/

// the route service is not consistent about numbers - some of them come as JSON strings

fn de_lenient_f64<'a,D> (deserializer: D)->std::result::Result<f64,D::Error> where D: Deserializer<'a> {
    match JsonValue::deserialize( deserializer)? {
        JsonValue::Number(n) => n.as_f64().ok_or_else( || DeError::custom("number out of range")),
        JsonValue::String(s) => s.trim().parse::<f64>().map_err( |_| DeError::custom( format!("not a number: '{s}'"))),
        other => Err( DeError::custom( format!("expected number, got {other}")))
    }
}

fn de_lenient_string<'a,D> (deserializer: D)->std::result::Result<String,D::Error> where D: Deserializer<'a> {
    match JsonValue::deserialize( deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok( n.to_string()),
        JsonValue::Null => Ok( String::new()),
        other => Err( DeError::custom( format!("expected string, got {other}")))
    }
}

/* #endregion lenient field deserialization */
