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

//! aircraft symbology: position marker, one minute heading vector, leader line and data label

use radar_common::geo::GeoPos;
use crate::{Aircraft, projection::{CanvasPoint, Projection}};
use super::surface::{Color, Surface};

pub const AIRCRAFT_COLOR: Color = Color::WHITE;
pub const HIGHLIGHT_COLORS: [Color;2] = [ Color::rgb( 0x80, 0x80, 0x80), Color::rgb( 0xcc, 0x00, 0x00) ];

pub const MARKER_RADIUS: f64 = 5.0;
pub const LEADER_LINE_GAP: f64 = 10.0;
pub const LABEL_LINE_SPACING: f64 = 15.0;
pub const DESTINATION_INDENT: f64 = 40.0;

// label block relative to the label anchor, used for both highlight and hit testing
pub const LABEL_LEFT: f64 = -5.0;
pub const LABEL_RIGHT: f64 = 70.0;
pub const LABEL_TOP: f64 = -20.0;
pub const LABEL_BOTTOM: f64 = 40.0;
pub const HIGHLIGHT_RADIUS: f64 = 5.0;

/// the text lines of a data label
#[derive(Debug,Clone,PartialEq)]
pub struct LabelText {
    pub callsign: String,
    pub altitude: String,
    pub ground_speed: String,
    pub destination: Option<String>,
}

/// altitudes in hundreds of ft, with the cleared altitude and direction arrow if we still have to climb/descend
pub fn altitude_text (altitude: f64, instructed_altitude: f64)->String {
    let alt = (altitude / 100.0).floor();
    let instr = (instructed_altitude / 100.0).floor();

    if instructed_altitude > altitude {
        format!("{instr} ↑ {alt}")
    } else if instructed_altitude < altitude {
        format!("{instr} ↓ {alt}")
    } else {
        format!("{alt}")
    }
}

pub fn label_text (ac: &Aircraft)->LabelText {
    LabelText {
        callsign: ac.callsign.clone(),
        altitude: altitude_text( ac.position.altitude, ac.instructed_vector.altitude),
        ground_speed: format!("G{}", (ac.vector.ground_speed / 10.0).floor()),
        destination: ac.category.flight_plan().map( |fp| fp.destination_code().to_string())
    }
}

/// `(left,top,right,bottom)` of the label block for a given label anchor
pub fn label_bounds (anchor: (f64,f64))->(f64,f64,f64,f64) {
    let (lx,ly) = anchor;
    (lx + LABEL_LEFT, ly + LABEL_TOP, lx + LABEL_RIGHT, ly + LABEL_BOTTOM)
}

/// the leader line runs from a point `LEADER_LINE_GAP` away from the aircraft (towards the label) to the
/// lower left corner of the label text
pub fn leader_line (ac: &Aircraft)->(CanvasPoint,CanvasPoint) {
    let (x,y) = (ac.position.canvas_x, ac.position.canvas_y);
    let (lx,ly) = ac.label_anchor();
    let off = ac.label_offset;

    let d = (off.dx * off.dx + off.dy * off.dy).sqrt();
    let start = if d > 0.0 {
        CanvasPoint::new( x + LEADER_LINE_GAP * off.dx / d, y - LEADER_LINE_GAP * off.dy / d)
    } else {
        CanvasPoint::new( x, y)
    };

    (start, CanvasPoint::new( lx + LABEL_LEFT, ly + LABEL_LINE_SPACING))
}

/// project and draw a single aircraft, storing the projected position in it
pub fn draw_aircraft<S: Surface> (surface: &mut S, projection: &Projection, ac: &mut Aircraft) {
    let p = projection.to_canvas( &GeoPos::new( ac.position.latitude, ac.position.longitude));
    ac.set_canvas_position( p.x, p.y);

    surface.fill_disc( p, MARKER_RADIUS, AIRCRAFT_COLOR);

    let future = projection.future_canvas_position( ac.vector.ground_speed, ac.vector.heading, p);
    surface.stroke_line( p, future, AIRCRAFT_COLOR);

    let anchor = ac.label_anchor();
    let rank = ac.highlight_rank();
    if rank > 0 {
        let (left,top,right,bottom) = label_bounds( anchor);
        let color = HIGHLIGHT_COLORS[ (rank as usize - 1).min( HIGHLIGHT_COLORS.len() - 1)];
        surface.fill_rounded_rect( CanvasPoint::new( left, top), right - left, bottom - top, HIGHLIGHT_RADIUS, color);
    }

    let (from,to) = leader_line( ac);
    surface.stroke_line( from, to, AIRCRAFT_COLOR);

    let text = label_text( ac);
    let (lx,ly) = anchor;
    surface.fill_text( CanvasPoint::new( lx, ly), &text.callsign, AIRCRAFT_COLOR);
    surface.fill_text( CanvasPoint::new( lx, ly + LABEL_LINE_SPACING), &text.altitude, AIRCRAFT_COLOR);
    surface.fill_text( CanvasPoint::new( lx, ly + 2.0 * LABEL_LINE_SPACING), &text.ground_speed, AIRCRAFT_COLOR);
    if let Some(dest) = &text.destination {
        if !dest.is_empty() {
            surface.fill_text( CanvasPoint::new( lx + DESTINATION_INDENT, ly + 2.0 * LABEL_LINE_SPACING), dest, AIRCRAFT_COLOR);
        }
    }
}
