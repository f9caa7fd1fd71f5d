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

use radar_common::geo::GeoPos;
use crate::{ats::{AtsRouteData, Route}, projection::{CanvasPoint, Projection}};
use super::{BACKGROUND, DisplaySettings, surface::{Color, Surface}};

pub const MAP_ALPHA: f64 = 0.7;
pub const ATS_LOWER_ROUTE_COLOR: Color = Color::rgb( 0x00, 0xff, 0xff);
pub const RNAV_ROUTE_COLOR: Color = Color::rgb( 0x33, 0x77, 0x66);
pub const FIX_COLOR: Color = Color::rgb( 0x33, 0x77, 0x66);

pub const VERTEX_DISC_RADIUS: f64 = 7.0;
pub const FIX_MARKER_SIZE: f64 = 3.0;
pub const FIX_NAME_OFFSET: f64 = 7.0;

/// routes first, then waypoints and navaids on top, each governed by its own toggles
pub fn draw_static_layer<S: Surface> (surface: &mut S, projection: &Projection, settings: &DisplaySettings, routes: &AtsRouteData) {
    if settings.ats_lower_route {
        for route in &routes.ats_lower_routes {
            draw_route( surface, projection, route, ATS_LOWER_ROUTE_COLOR.dimmed( MAP_ALPHA));
        }
    }
    if settings.rnav_route {
        for route in &routes.rnav_routes {
            draw_route( surface, projection, route, RNAV_ROUTE_COLOR.dimmed( MAP_ALPHA));
        }
    }

    let color = FIX_COLOR.dimmed( MAP_ALPHA);
    if settings.waypoint_point || settings.waypoint_name {
        for wp in &routes.waypoints {
            let p = projection.to_canvas( &GeoPos::new( wp.latitude, wp.longitude));
            if settings.waypoint_point { surface.stroke_cross( p, FIX_MARKER_SIZE, color); }
            if settings.waypoint_name { draw_fix_name( surface, p, &wp.name, color); }
        }
    }
    if settings.navaid_point || settings.navaid_name {
        for na in &routes.radio_navigation_aids {
            let p = projection.to_canvas( &GeoPos::new( na.latitude, na.longitude));
            if settings.navaid_point { surface.stroke_ring( p, FIX_MARKER_SIZE, color); }
            if settings.navaid_name { draw_fix_name( surface, p, &na.name, color); }
        }
    }
}

/// each segment covers its end points with background discs before the connecting line is drawn
pub fn draw_route<S: Surface> (surface: &mut S, projection: &Projection, route: &Route, color: Color) {
    let pts: Vec<CanvasPoint> = route.points.iter().map( |p| projection.to_canvas( &GeoPos::new( p.latitude, p.longitude))).collect();

    for seg in pts.windows(2) {
        surface.fill_disc( seg[0], VERTEX_DISC_RADIUS, BACKGROUND);
        surface.fill_disc( seg[1], VERTEX_DISC_RADIUS, BACKGROUND);
        surface.stroke_line( seg[0], seg[1], color);
    }
}

fn draw_fix_name<S: Surface> (surface: &mut S, p: CanvasPoint, name: &str, color: Color) {
    surface.fill_text( CanvasPoint::new( p.x + FIX_NAME_OFFSET, p.y - FIX_NAME_OFFSET), name, color);
}
