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

use std::fmt;
use serde::{Serialize,Deserialize};
use crate::projection::CanvasPoint;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb (r: u8, g: u8, b: u8)->Self { Color { r, g, b } }

    pub const BLACK: Color = Color::rgb( 0, 0, 0);
    pub const WHITE: Color = Color::rgb( 255, 255, 255);

    /// scale towards black, which is what a translucent stroke on our black background ends up as
    pub fn dimmed (&self, alpha: f64)->Color {
        let f = alpha.clamp( 0.0, 1.0);
        Color::rgb( (self.r as f64 * f).round() as u8, (self.g as f64 * f).round() as u8, (self.b as f64 * f).round() as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// the drawing primitives our radar display needs. Coordinates are canvas pixels, text positions
/// refer to the left end of the text baseline
pub trait Surface {
    fn width (&self)->u32;
    fn height (&self)->u32;

    fn clear (&mut self, color: Color);

    fn fill_disc (&mut self, center: CanvasPoint, radius: f64, color: Color);
    fn stroke_ring (&mut self, center: CanvasPoint, radius: f64, color: Color);
    fn stroke_line (&mut self, from: CanvasPoint, to: CanvasPoint, color: Color);
    fn stroke_cross (&mut self, center: CanvasPoint, half_size: f64, color: Color);
    fn fill_rounded_rect (&mut self, top_left: CanvasPoint, width: f64, height: f64, radius: f64, color: Color);
    fn fill_text (&mut self, pos: CanvasPoint, text: &str, color: Color);

    fn set_visible (&mut self, is_visible: bool);
    fn is_visible (&self)->bool;
}

/// a display list entry of a [`RecordingSurface`]
#[derive(Debug,Clone,PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Disc { center: CanvasPoint, radius: f64, color: Color },
    Ring { center: CanvasPoint, radius: f64, color: Color },
    Line { from: CanvasPoint, to: CanvasPoint, color: Color },
    Cross { center: CanvasPoint, half_size: f64, color: Color },
    RoundedRect { top_left: CanvasPoint, width: f64, height: f64, radius: f64, color: Color },
    Text { pos: CanvasPoint, text: String, color: Color },
}

/// a surface that only records what was drawn since the last `clear`. Useful to inspect frames
/// without rasterizing them
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    is_visible: bool,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new (width: u32, height: u32)->Self {
        RecordingSurface { width, height, is_visible: false, ops: Vec::new() }
    }

    pub fn ops (&self)->&[DrawOp] { self.ops.as_slice() }

    pub fn texts (&self)->Vec<&str> {
        self.ops.iter().filter_map( |op| if let DrawOp::Text{text,..} = op { Some(text.as_str()) } else { None }).collect()
    }
}

impl Surface for RecordingSurface {
    fn width (&self)->u32 { self.width }
    fn height (&self)->u32 { self.height }

    fn clear (&mut self, color: Color) {
        self.ops.clear();
        self.ops.push( DrawOp::Clear(color));
    }

    fn fill_disc (&mut self, center: CanvasPoint, radius: f64, color: Color) {
        self.ops.push( DrawOp::Disc { center, radius, color });
    }

    fn stroke_ring (&mut self, center: CanvasPoint, radius: f64, color: Color) {
        self.ops.push( DrawOp::Ring { center, radius, color });
    }

    fn stroke_line (&mut self, from: CanvasPoint, to: CanvasPoint, color: Color) {
        self.ops.push( DrawOp::Line { from, to, color });
    }

    fn stroke_cross (&mut self, center: CanvasPoint, half_size: f64, color: Color) {
        self.ops.push( DrawOp::Cross { center, half_size, color });
    }

    fn fill_rounded_rect (&mut self, top_left: CanvasPoint, width: f64, height: f64, radius: f64, color: Color) {
        self.ops.push( DrawOp::RoundedRect { top_left, width, height, radius, color });
    }

    fn fill_text (&mut self, pos: CanvasPoint, text: &str, color: Color) {
        self.ops.push( DrawOp::Text { pos, text: text.to_string(), color });
    }

    fn set_visible (&mut self, is_visible: bool) { self.is_visible = is_visible; }
    fn is_visible (&self)->bool { self.is_visible }
}
