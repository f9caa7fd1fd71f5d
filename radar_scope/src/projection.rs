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

//! conversion between geodetic positions and canvas pixel coordinates.
//! The canvas is centered on a geodetic position and its full width spans the display range.
//! Screen y grows downwards, bearings are clockwise from north

use std::fmt;
use serde::{Serialize,Deserialize};
use radar_common::{clamp, sin, cos, atan2, sqrt, deg, rad, geo::{GeoPos, haversine_distance, initial_bearing, destination}};
use crate::errors::{RadarScopeError,Result};

/// earth radius (km) used for all display projections
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// km per nautical mile
pub const KM_PER_NM: f64 = 1.852;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new (x: f64, y: f64)->Self { CanvasPoint { x, y } }
}

impl fmt::Display for CanvasPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "[{:.1},{:.1}]", self.x, self.y)
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// immutable projection parameters. Use `with_center` / `with_range` to derive a new projection
/// when the operator re-centers or zooms
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Projection {
    center: GeoPos,
    range_km: f64,
    width: f64,
    height: f64,
}

impl Projection {
    pub fn new (center: GeoPos, range_km: f64, size: CanvasSize)->Result<Self> {
        if !(range_km > 0.0) || !range_km.is_finite() {
            return Err( RadarScopeError::IllegalArgument( format!("display range has to be > 0: {range_km}")))
        }
        if size.width == 0 || size.height == 0 {
            return Err( RadarScopeError::IllegalArgument( format!("invalid canvas size {}x{}", size.width, size.height)))
        }
        if !center.is_valid() {
            return Err( RadarScopeError::IllegalArgument( format!("invalid center {center}")))
        }

        Ok( Projection { center, range_km, width: size.width as f64, height: size.height as f64 } )
    }

    pub fn with_center (&self, center: GeoPos)->Result<Self> {
        Projection::new( center, self.range_km, self.size())
    }

    pub fn with_range (&self, range_km: f64)->Result<Self> {
        Projection::new( self.center, range_km, self.size())
    }

    pub fn center (&self)->GeoPos { self.center }
    pub fn range_km (&self)->f64 { self.range_km }
    pub fn width (&self)->f64 { self.width }
    pub fn height (&self)->f64 { self.height }
    pub fn size (&self)->CanvasSize { CanvasSize { width: self.width as u32, height: self.height as u32 } }

    pub fn pixels_per_km (&self)->f64 { self.width / self.range_km }

    pub fn canvas_center (&self)->CanvasPoint { CanvasPoint::new( self.width / 2.0, self.height / 2.0) }

    pub fn to_canvas (&self, p: &GeoPos)->CanvasPoint {
        let dist_px = haversine_distance( &self.center, p, EARTH_RADIUS_KM) * self.pixels_per_km();
        let bearing = rad( initial_bearing( &self.center, p));

        CanvasPoint {
            x: self.width / 2.0 + dist_px * sin(bearing),
            y: self.height / 2.0 - dist_px * cos(bearing)
        }
    }

    pub fn to_geo (&self, p: CanvasPoint)->GeoPos {
        let dx = p.x - self.width / 2.0;
        let dy = self.height / 2.0 - p.y;

        let dist_km = sqrt( dx*dx + dy*dy) / self.pixels_per_km();
        let bearing = deg( atan2( dx, dy));

        destination( &self.center, bearing, dist_km, EARTH_RADIUS_KM)
    }

    /// where an aircraft will be in one minute (used for heading vectors)
    pub fn future_canvas_position (&self, speed_knots: f64, heading_deg: f64, current: CanvasPoint)->CanvasPoint {
        future_canvas_position( speed_knots, heading_deg, self.width, self.height, self.range_km, current)
    }
}

/// dead reckon the canvas position one minute ahead, clamped to the canvas bounds.
/// `range_km` has to be > 0
pub fn future_canvas_position (speed_knots: f64, heading_deg: f64, canvas_width: f64, canvas_height: f64, range_km: f64, current: CanvasPoint)->CanvasPoint {
    let km_per_min = speed_knots * KM_PER_NM / 60.0;
    let pixels_per_km = canvas_width / range_km;
    let angle = rad( heading_deg - 90.0); // 0deg is up, clockwise

    CanvasPoint {
        x: clamp( current.x + km_per_min * cos(angle) * pixels_per_km, 0.0, canvas_width),
        y: clamp( current.y + km_per_min * sin(angle) * pixels_per_km, 0.0, canvas_height)
    }
}
