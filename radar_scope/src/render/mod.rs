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

//! double buffered radar display rendering. Each frame is drawn into the hidden (back) surface which
//! is then shown while the previously shown surface gets hidden

use serde::{Serialize,Deserialize};
use crate::{TrackedSet, ats::AtsRouteData, projection::Projection};
use crate::errors::{RadarScopeError,Result};

pub mod surface;
pub use surface::{Color, DrawOp, RecordingSurface, Surface};

pub mod raster;
pub use raster::{RasterSurface, DEFAULT_FONT_NAME, load_font, load_default_font};

pub mod map;
pub mod symbology;

pub const BACKGROUND: Color = Color::BLACK;

/// visibility toggles for the static map layers
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default, rename_all="camelCase")]
pub struct DisplaySettings {
    pub waypoint_name: bool,
    pub waypoint_point: bool,
    pub navaid_name: bool,
    pub navaid_point: bool,
    pub ats_lower_route: bool,
    pub rnav_route: bool,
}

impl Default for DisplaySettings {
    fn default()->Self {
        DisplaySettings {
            waypoint_name: false,
            waypoint_point: true,
            navaid_name: false,
            navaid_point: true,
            ats_lower_route: false,
            rnav_route: true,
        }
    }
}

/// two equally sized surfaces, one of which is shown while the other one is drawn into
pub struct FrameBuffers<S: Surface> {
    surfaces: [S;2],
    back: usize,
}

impl<S: Surface> FrameBuffers<S> {
    pub fn new (mut front: S, mut back: S)->Result<Self> {
        if front.width() != back.width() || front.height() != back.height() {
            return Err( RadarScopeError::ConfigurationError(
                format!("frame buffer sizes differ: {}x{} vs {}x{}", front.width(), front.height(), back.width(), back.height())))
        }
        if front.width() == 0 || front.height() == 0 {
            return Err( RadarScopeError::ConfigurationError( "empty frame buffers".to_string()))
        }

        front.set_visible( true);
        back.set_visible( false);
        Ok( FrameBuffers { surfaces: [back, front], back: 0 } )
    }

    pub fn back_index (&self)->usize { self.back }
    pub fn back_mut (&mut self)->&mut S { &mut self.surfaces[self.back] }

    /// the currently shown surface
    pub fn front (&self)->&S { &self.surfaces[1 - self.back] }

    pub fn surface (&self, idx: usize)->Option<&S> { self.surfaces.get(idx) }

    /// show what was drawn into the back buffer, hide the previous front and make it the new back buffer
    pub fn flip (&mut self) {
        let shown = self.back;
        self.surfaces[shown].set_visible( true);
        self.surfaces[1 - shown].set_visible( false);
        self.back = 1 - shown;
    }
}

pub struct RenderPipeline<S: Surface> {
    buffers: FrameBuffers<S>,
    n_frames: u64,
}

impl<S: Surface> RenderPipeline<S> {
    pub fn new (front: S, back: S)->Result<Self> {
        Ok( RenderPipeline { buffers: FrameBuffers::new( front, back)?, n_frames: 0 } )
    }

    pub fn buffers (&self)->&FrameBuffers<S> { &self.buffers }
    pub fn shown (&self)->&S { self.buffers.front() }
    pub fn n_frames (&self)->u64 { self.n_frames }

    /// draw a complete frame: static map (if we have route data) and tracked aircraft, then flip buffers.
    /// This also updates the canvas positions of the tracked aircraft, which is what hit testing uses
    pub fn render_frame (&mut self, projection: &Projection, settings: &DisplaySettings, routes: Option<&AtsRouteData>, tracked: &mut TrackedSet) {
        let surface = self.buffers.back_mut();
        surface.clear( BACKGROUND);

        if let Some(routes) = routes {
            map::draw_static_layer( surface, projection, settings, routes);
        }

        for ac in tracked.aircraft_mut() {
            symbology::draw_aircraft( surface, projection, ac);
        }

        self.buffers.flip();
        self.n_frames += 1;
    }
}
