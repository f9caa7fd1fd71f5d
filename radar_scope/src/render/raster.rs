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

use std::{fs, io::Cursor, path::PathBuf, sync::Arc};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::{drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut}, rect::Rect};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use crate::projection::CanvasPoint;
use crate::errors::{RadarScopeError,Result};
use super::surface::{Color,Surface};

/// the font we ship in `resources/`
pub const DEFAULT_FONT_NAME: &str = "DejaVuSansMono.ttf";

/// resolve a font given as pathname or as resource filename
pub fn font_path (path_or_name: &str)->Option<PathBuf> {
    crate::find_resource( path_or_name)
}

pub fn load_font (path_or_name: &str)->Result<FontVec> {
    match font_path( path_or_name) {
        Some(path) => {
            let data = fs::read( &path)?;
            Ok( FontVec::try_from_vec( data)? )
        }
        None => Err( RadarScopeError::ConfigurationError( format!("font not found: {path_or_name}")))
    }
}

pub fn load_default_font ()->Result<FontVec> {
    load_font( DEFAULT_FONT_NAME)
}

#[inline] fn rgba (c: Color)->Rgba<u8> { Rgba([c.r, c.g, c.b, 255]) }

#[inline] fn ipos (p: CanvasPoint)->(i32,i32) { (p.x.round() as i32, p.y.round() as i32) }

/// a surface that rasterizes into an RGBA image
pub struct RasterSurface {
    img: RgbaImage,
    font: Arc<FontVec>,
    scale: PxScale,
    is_visible: bool,
}

impl RasterSurface {
    pub fn new (width: u32, height: u32, font: Arc<FontVec>, font_size: f32)->Self {
        RasterSurface {
            img: RgbaImage::new( width, height),
            font,
            scale: PxScale::from( font_size),
            is_visible: false
        }
    }

    pub fn image (&self)->&RgbaImage { &self.img }

    pub fn to_png (&self)->Result<Vec<u8>> {
        let mut buf = Cursor::new( Vec::with_capacity( 65536));
        self.img.write_to( &mut buf, ImageFormat::Png)?;
        Ok( buf.into_inner() )
    }
}

impl Surface for RasterSurface {
    fn width (&self)->u32 { self.img.width() }
    fn height (&self)->u32 { self.img.height() }

    fn clear (&mut self, color: Color) {
        let px = rgba( color);
        for p in self.img.pixels_mut() { *p = px; }
    }

    fn fill_disc (&mut self, center: CanvasPoint, radius: f64, color: Color) {
        draw_filled_circle_mut( &mut self.img, ipos(center), radius.round() as i32, rgba(color));
    }

    fn stroke_ring (&mut self, center: CanvasPoint, radius: f64, color: Color) {
        draw_hollow_circle_mut( &mut self.img, ipos(center), radius.round() as i32, rgba(color));
    }

    fn stroke_line (&mut self, from: CanvasPoint, to: CanvasPoint, color: Color) {
        draw_line_segment_mut( &mut self.img, (from.x as f32, from.y as f32), (to.x as f32, to.y as f32), rgba(color));
    }

    fn stroke_cross (&mut self, center: CanvasPoint, half_size: f64, color: Color) {
        let CanvasPoint{x,y} = center;
        self.stroke_line( CanvasPoint::new( x - half_size, y), CanvasPoint::new( x + half_size, y), color);
        self.stroke_line( CanvasPoint::new( x, y - half_size), CanvasPoint::new( x, y + half_size), color);
    }

    fn fill_rounded_rect (&mut self, top_left: CanvasPoint, width: f64, height: f64, radius: f64, color: Color) {
        let r = radius.min( width/2.0).min( height/2.0).max( 0.0);
        let x = top_left.x.round() as i32;
        let y = top_left.y.round() as i32;
        let w = width.round() as i32;
        let h = height.round() as i32;
        let ri = r.round() as i32;
        if w <= 0 || h <= 0 { return }

        let px = rgba( color);
        if w > 2*ri { draw_filled_rect_mut( &mut self.img, Rect::at( x + ri, y).of_size( (w - 2*ri) as u32, h as u32), px); }
        if h > 2*ri { draw_filled_rect_mut( &mut self.img, Rect::at( x, y + ri).of_size( w as u32, (h - 2*ri) as u32), px); }
        if ri > 0 {
            for (cx,cy) in [(x+ri, y+ri), (x+w-ri-1, y+ri), (x+ri, y+h-ri-1), (x+w-ri-1, y+h-ri-1)] {
                draw_filled_circle_mut( &mut self.img, (cx,cy), ri, px);
            }
        }
    }

    fn fill_text (&mut self, pos: CanvasPoint, text: &str, color: Color) {
        // pos is the baseline, imageproc wants the top of the glyph box
        let ascent = self.font.as_scaled( self.scale).ascent();
        let x = pos.x.round() as i32;
        let y = (pos.y - ascent as f64).round() as i32;
        draw_text_mut( &mut self.img, rgba(color), x, y, self.scale, &*self.font, text);
    }

    fn set_visible (&mut self, is_visible: bool) { self.is_visible = is_visible; }
    fn is_visible (&self)->bool { self.is_visible }
}
