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

use std::{collections::BTreeMap, net::SocketAddr, time::Duration};
use serde::{Serialize,Deserialize};
use radar_common::{datetime::{de_duration_from_millis, ser_duration_as_millis}, geo::GeoPos};
use crate::projection::CanvasSize;
use crate::render::{DisplaySettings, DEFAULT_FONT_NAME};
use crate::errors::{RadarScopeError,Result};

/// width of the displayed airspace in km, bounded to what the operator can select
#[derive(Debug,Clone,Copy,PartialEq,PartialOrd,Serialize)]
pub struct DisplayRange(f64);

impl DisplayRange {
    pub const MIN_KM: f64 = 10.0;
    pub const MAX_KM: f64 = 4000.0;

    pub fn new (km: f64)->Result<Self> {
        if km >= Self::MIN_KM && km <= Self::MAX_KM {
            Ok( DisplayRange(km))
        } else {
            Err( RadarScopeError::IllegalArgument( format!("display range {km} not within [{},{}] km", Self::MIN_KM, Self::MAX_KM)))
        }
    }

    pub fn km (&self)->f64 { self.0 }
}

impl<'de> Deserialize<'de> for DisplayRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: serde::Deserializer<'de> {
        let km = f64::deserialize( deserializer)?;
        DisplayRange::new( km).map_err( serde::de::Error::custom)
    }
}

/// the local display service through which operators view frames and send pointer events
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct DisplayServerConfig {
    pub sock_addr: SocketAddr,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RadarScopeConfig {
    pub server_url: String, // base URL of the simulator
    pub canvas: CanvasSize,
    pub display_range: DisplayRange,
    pub center: GeoPos, // used if there is no sector

    #[serde(default)]
    pub sector: Option<String>, // initial sector
    #[serde(default)]
    pub sectors: BTreeMap<String,GeoPos>,

    #[serde(default)]
    pub layers: DisplaySettings,

    #[serde(deserialize_with="de_duration_from_millis", serialize_with="ser_duration_as_millis")]
    pub fetch_interval: Duration,
    #[serde(deserialize_with="de_duration_from_millis", serialize_with="ser_duration_as_millis")]
    pub frame_interval: Duration,
    #[serde(deserialize_with="de_duration_from_millis", serialize_with="ser_duration_as_millis")]
    pub request_timeout: Duration,

    #[serde(default="default_font")]
    pub font: String, // TTF/OTF pathname or resource filename
    #[serde(default="default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub display: Option<DisplayServerConfig>,
}

fn default_font ()->String { DEFAULT_FONT_NAME.to_string() }
fn default_font_size ()->f32 { 12.0 }

impl RadarScopeConfig {
    pub fn sector_center (&self, name: &str)->Result<GeoPos> {
        self.sectors.get( name).copied().ok_or_else( || RadarScopeError::IllegalArgument( format!("unknown sector {name}")))
    }

    /// the center we start with
    pub fn initial_center (&self)->Result<GeoPos> {
        match &self.sector {
            Some(name) => self.sector_center( name),
            None => Ok( self.center)
        }
    }

    /// check what serde can't
    pub fn validate (&self)->Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err( RadarScopeError::ConfigurationError( "canvas size has to be > 0".to_string()))
        }
        if self.fetch_interval.is_zero() || self.frame_interval.is_zero() {
            return Err( RadarScopeError::ConfigurationError( "fetch and frame intervals have to be > 0".to_string()))
        }
        if !self.center.is_valid() {
            return Err( RadarScopeError::ConfigurationError( format!("invalid center {}", self.center)))
        }
        if let Some((name,pos)) = self.sectors.iter().find( |(_,pos)| !pos.is_valid()) {
            return Err( RadarScopeError::ConfigurationError( format!("invalid center for sector {name}: {pos}")))
        }
        self.initial_center()?;
        Ok(())
    }
}
