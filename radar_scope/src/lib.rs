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
#![allow(unused)]

use std::{collections::HashMap, fmt};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

pub mod errors;
pub use errors::{RadarScopeError,Result};

pub mod projection;
pub mod snapshot;
pub mod ats;
pub mod render;
pub mod interaction;
pub mod client;
pub mod config;
pub mod scope;
pub mod display;

radar_common::define_load_config!{}

/// label offset that is assigned to aircraft we see for the first time
pub const DEFAULT_LABEL_OFFSET: LabelOffset = LabelOffset { dx: 50.0, dy: 50.0 };

/* #region aircraft data model  ***************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct AircraftPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64, // ft

    // where we drew it last - derived from latitude/longitude by the render pipeline
    pub canvas_x: f64,
    pub canvas_y: f64,
}

/// the reported (actual) motion state
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct AircraftVector {
    pub heading: f64,       // deg
    pub ground_speed: f64,  // kn
    pub vertical_speed: f64 // ft/min
}

/// the clearance the controller assigned
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct InstructedVector {
    pub heading: f64,
    pub ground_speed: f64,
    pub altitude: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct FlightPlan {
    pub origin_iata: String,
    pub origin_icao: String,
    pub destination_iata: String,
    pub destination_icao: String,
    pub eta: String,
}

impl FlightPlan {
    /// the short destination shown in labels - the last three letters of the ICAO code
    pub fn destination_code (&self)->&str {
        let code = self.destination_icao.as_str();
        let n = code.chars().count();
        if n > 3 {
            let (i,_) = code.char_indices().nth(n-3).unwrap_or((0,' '));
            &code[i..]
        } else {
            code
        }
    }
}

/// aircraft category with the category specific payload
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(tag="type", content="flightPlan")]
pub enum Category {
    CommercialPassenger(FlightPlan),
    CommercialCargo(FlightPlan),
    MilitaryFighter,
    MilitaryCargo,
    Helicopter,
    Other(String),
}

impl Category {
    pub const COMMERCIAL_PASSENGER: &'static str = "COMMERCIAL_PASSENGER";
    pub const COMMERCIAL_CARGO: &'static str = "COMMERCIAL_CARGO";
    pub const MILITARY_FIGHTER: &'static str = "MILITARY_FIGHTER";
    pub const MILITARY_CARGO: &'static str = "MILITARY_CARGO";
    pub const HELICOPTER: &'static str = "HELICOPTER";

    pub fn is_commercial_tag (tag: &str)->bool {
        tag == Self::COMMERCIAL_PASSENGER || tag == Self::COMMERCIAL_CARGO
    }

    /// build category from its wire tag. Commercial tags require a flight plan
    pub fn from_tag (tag: &str, flight_plan: Option<FlightPlan>)->Result<Category> {
        match (tag, flight_plan) {
            (Self::COMMERCIAL_PASSENGER, Some(fp)) => Ok( Category::CommercialPassenger(fp)),
            (Self::COMMERCIAL_CARGO, Some(fp)) => Ok( Category::CommercialCargo(fp)),
            (Self::COMMERCIAL_PASSENGER | Self::COMMERCIAL_CARGO, None) => {
                Err( RadarScopeError::ParseError( format!("{tag} without flight plan")))
            }
            (Self::MILITARY_FIGHTER, _) => Ok( Category::MilitaryFighter),
            (Self::MILITARY_CARGO, _) => Ok( Category::MilitaryCargo),
            (Self::HELICOPTER, _) => Ok( Category::Helicopter),
            (other, _) => Ok( Category::Other( other.to_string()))
        }
    }

    pub fn tag (&self)->&str {
        match self {
            Category::CommercialPassenger(_) => Self::COMMERCIAL_PASSENGER,
            Category::CommercialCargo(_) => Self::COMMERCIAL_CARGO,
            Category::MilitaryFighter => Self::MILITARY_FIGHTER,
            Category::MilitaryCargo => Self::MILITARY_CARGO,
            Category::Helicopter => Self::HELICOPTER,
            Category::Other(tag) => tag.as_str()
        }
    }

    pub fn flight_plan (&self)->Option<&FlightPlan> {
        match self {
            Category::CommercialPassenger(fp) | Category::CommercialCargo(fp) => Some(fp),
            _ => None
        }
    }
}

/// alert classification of the simulator risk level (0..100)
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Serialize,Deserialize)]
pub enum AlertLevel {
    Safe,
    WhiteConflict,
    RedConflict,
}

impl AlertLevel {
    pub const WHITE_THRESHOLD: f64 = 30.0;
    pub const RED_THRESHOLD: f64 = 70.0;

    pub fn from_risk_level (risk_level: f64)->Self {
        if risk_level < Self::WHITE_THRESHOLD { AlertLevel::Safe }
        else if risk_level < Self::RED_THRESHOLD { AlertLevel::WhiteConflict }
        else { AlertLevel::RedConflict }
    }

    pub fn highlight_rank (&self)->u8 { *self as u8 }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LabelOffset {
    pub dx: f64, // to the right
    pub dy: f64, // upwards
}

impl Default for LabelOffset {
    fn default()->Self { DEFAULT_LABEL_OFFSET }
}

/// what the snapshot parser produces for each aircraft line
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct AircraftRecord {
    pub callsign: String,
    pub position: AircraftPosition,
    pub vector: AircraftVector,
    pub instructed_vector: InstructedVector,
    pub category: Category,
    pub model: String,
    pub risk_level: f64,
}

/// the data model for a tracked aircraft, which is the last reported state plus the locally owned UI state
#[derive(Debug,Clone,PartialEq)]
pub struct Aircraft {
    pub callsign: String,
    pub position: AircraftPosition,
    pub vector: AircraftVector,
    pub instructed_vector: InstructedVector,
    pub category: Category,
    pub model: String,
    pub risk_level: f64,

    pub label_offset: LabelOffset,
    is_drawn: bool, // canvas position is from a rendered frame
}

impl Aircraft {
    pub fn new (rec: AircraftRecord)->Self {
        Aircraft {
            callsign: rec.callsign,
            position: rec.position,
            vector: rec.vector,
            instructed_vector: rec.instructed_vector,
            category: rec.category,
            model: rec.model,
            risk_level: rec.risk_level,
            label_offset: LabelOffset::default(),
            is_drawn: false
        }
    }

    /// overwrite reported state in place. This leaves the label offset and the last drawn canvas position alone
    pub fn update_from (&mut self, rec: AircraftRecord) {
        self.position.latitude = rec.position.latitude;
        self.position.longitude = rec.position.longitude;
        self.position.altitude = rec.position.altitude;
        self.vector = rec.vector;
        self.instructed_vector = rec.instructed_vector;
        self.category = rec.category;
        self.model = rec.model;
        self.risk_level = rec.risk_level;
    }

    pub fn alert_level (&self)->AlertLevel { AlertLevel::from_risk_level( self.risk_level) }

    pub fn highlight_rank (&self)->u8 { self.alert_level().highlight_rank() }

    pub fn set_canvas_position (&mut self, x: f64, y: f64) {
        self.position.canvas_x = x;
        self.position.canvas_y = y;
        self.is_drawn = true;
    }

    /// has this aircraft been drawn yet. Aircraft added by a merge have no canvas position until the next frame
    pub fn is_drawn (&self)->bool { self.is_drawn }

    /// the label anchor (upper left text baseline) in canvas coordinates
    pub fn label_anchor (&self)->(f64,f64) {
        (self.position.canvas_x + self.label_offset.dx, self.position.canvas_y - self.label_offset.dy)
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Aircraft( cs: \"{}\", type: {}, model: {}", self.callsign, self.category.tag(), self.model)?;
        write!( f, ", pos: ({:.4},{:.4}), alt: {:.0}", self.position.latitude, self.position.longitude, self.position.altitude)?;
        write!( f, ", hdg: {:.0}, spd: {:.0}, vr: {:.0}", self.vector.heading, self.vector.ground_speed, self.vector.vertical_speed)?;
        write!( f, ", risk: {:.1})", self.risk_level)
    }
}

/* #endregion aircraft data model */

/* #region tracked set  ***********************************************************************************/

#[derive(Debug,Default,Clone,PartialEq)]
pub struct MergeReport {
    pub updated: Vec<String>,
    pub added: Vec<String>,
    pub dropped: Vec<String>,
}

impl MergeReport {
    pub fn has_changes (&self)->bool { !self.added.is_empty() || !self.dropped.is_empty() }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "updated: {}, added: {}, dropped: {}", self.updated.len(), self.added.len(), self.dropped.len())
    }
}

/// the locally held aircraft collection that is kept in sync with the simulator snapshots.
/// Callsigns are unique within the set
#[derive(Debug,Default)]
pub struct TrackedSet {
    aircraft: Vec<Aircraft>,
    last_update: Option<DateTime<Utc>>,
}

impl TrackedSet {
    pub fn new ()->Self { TrackedSet::default() }

    pub fn len (&self)->usize { self.aircraft.len() }
    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }
    pub fn aircraft (&self)->&[Aircraft] { self.aircraft.as_slice() }
    pub fn aircraft_mut (&mut self)->&mut [Aircraft] { self.aircraft.as_mut_slice() }
    pub fn iter (&self)->impl Iterator<Item=&Aircraft> { self.aircraft.iter() }
    pub fn last_update (&self)->Option<DateTime<Utc>> { self.last_update }

    pub fn index_of (&self, callsign: &str)->Option<usize> {
        self.aircraft.iter().position( |ac| ac.callsign == callsign)
    }

    pub fn get (&self, callsign: &str)->Option<&Aircraft> {
        self.aircraft.iter().find( |ac| ac.callsign == callsign)
    }

    pub fn get_mut (&mut self, callsign: &str)->Option<&mut Aircraft> {
        self.aircraft.iter_mut().find( |ac| ac.callsign == callsign)
    }

    /// reconcile a parsed snapshot into this set: matching callsigns are updated in place, aircraft
    /// that are not in the snapshot are dropped, and new ones are appended (in snapshot order) with
    /// the default label offset. The new state becomes visible in one assignment
    pub fn merge (&mut self, snapshot: Vec<AircraftRecord>)->MergeReport {
        let mut report = MergeReport::default();

        let mut slots: Vec<Option<AircraftRecord>> = Vec::with_capacity( snapshot.len());
        let mut index: HashMap<String,usize> = HashMap::with_capacity( snapshot.len());
        for rec in snapshot {
            if let Some(&i) = index.get( &rec.callsign) {
                warn!("duplicate callsign {} in snapshot, using last record", rec.callsign);
                slots[i] = Some(rec);
            } else {
                index.insert( rec.callsign.clone(), slots.len());
                slots.push( Some(rec));
            }
        }

        let mut next: Vec<Aircraft> = Vec::with_capacity( slots.len());
        for mut ac in std::mem::take( &mut self.aircraft) {
            match index.get( &ac.callsign).and_then( |&i| slots[i].take()) {
                Some(rec) => {
                    ac.update_from( rec);
                    report.updated.push( ac.callsign.clone());
                    next.push( ac);
                }
                None => report.dropped.push( ac.callsign)
            }
        }

        for rec in slots.into_iter().flatten() {
            report.added.push( rec.callsign.clone());
            next.push( Aircraft::new( rec));
        }

        self.aircraft = next;
        self.last_update = Some( Utc::now());

        debug!("merged snapshot: {report}");
        report
    }
}

/* #endregion tracked set */
