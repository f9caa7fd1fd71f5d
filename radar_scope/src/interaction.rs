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

//! pointer driven operator interaction: aircraft selection, label dragging and direct-to fix picking.
//! The controller does not perform any I/O, operations that have to reach the simulator return a
//! [`Command`] that is sent by the caller

use std::fmt;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use crate::{Aircraft, InstructedVector, TrackedSet};
use crate::ats::AtsRouteData;
use crate::client::SimulationAction;
use crate::projection::{CanvasPoint, Projection};
use crate::render::symbology::label_bounds;
use crate::errors::{RadarScopeError,Result};

/// half size of the box around an aircraft position that counts as a hit on the aircraft
pub const AIRCRAFT_HIT_DISTANCE: f64 = 30.0;

pub const NO_FIX_SELECTED: &str = "No fixes selected";

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum PointerKind { Down, Move, Up }

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn down (x: f64, y: f64)->Self { PointerEvent { kind: PointerKind::Down, x, y } }
    pub fn moved (x: f64, y: f64)->Self { PointerEvent { kind: PointerKind::Move, x, y } }
    pub fn up (x: f64, y: f64)->Self { PointerEvent { kind: PointerKind::Up, x, y } }

    pub fn pos (&self)->CanvasPoint { CanvasPoint::new( self.x, self.y) }
}

#[derive(Debug,Clone,PartialEq)]
pub enum InteractionState {
    Idle,
    /// `grab` is the pointer position relative to the label anchor when the drag started
    DraggingLabel { index: usize, callsign: String, grab: (f64,f64) },
    FixSelect { armed: bool },
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionState::Idle => write!( f, "idle"),
            InteractionState::DraggingLabel{callsign,..} => write!( f, "dragging label of {callsign}"),
            InteractionState::FixSelect{armed} => if *armed { write!( f, "fix select (armed)") } else { write!( f, "fix select") }
        }
    }
}

/// editable clearance values of the selected aircraft
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct ControlInputs {
    pub altitude: f64,
    pub ground_speed: f64,
    pub heading: f64,
}

impl From<&InstructedVector> for ControlInputs {
    fn from (iv: &InstructedVector)->Self {
        ControlInputs { altitude: iv.altitude, ground_speed: iv.ground_speed, heading: iv.heading }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Selection {
    pub callsign: String,
    pub inputs: ControlInputs,
}

/// outbound operator commands
#[derive(Debug,Clone,PartialEq)]
pub enum Command {
    Clearance { callsign: String, inputs: ControlInputs },
    DirectToFix { callsign: String, fix: String },
    Simulation(SimulationAction),
}

/// what a pointer event did
#[derive(Debug,Clone,PartialEq)]
pub enum PointerOutcome {
    Ignored,
    Selected(String),
    DragStarted(String),
    DragMoved(String),
    DragEnded,
    FixPicked(String),
    NoFixFound,
}

pub fn is_aircraft_hit (ac: &Aircraft, p: CanvasPoint)->bool {
    (p.x - ac.position.canvas_x).abs() <= AIRCRAFT_HIT_DISTANCE && (p.y - ac.position.canvas_y).abs() <= AIRCRAFT_HIT_DISTANCE
}

pub fn is_label_hit (ac: &Aircraft, p: CanvasPoint)->bool {
    let (left,top,right,bottom) = label_bounds( ac.label_anchor());
    p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
}

#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    selection: Option<Selection>,
    pending_fix: Option<String>,
    status: String,
}

impl Default for InteractionController {
    fn default()->Self { InteractionController::new() }
}

impl InteractionController {
    pub fn new ()->Self {
        InteractionController {
            state: InteractionState::Idle,
            selection: None,
            pending_fix: None,
            status: NO_FIX_SELECTED.to_string()
        }
    }

    pub fn state (&self)->&InteractionState { &self.state }
    pub fn selection (&self)->Option<&Selection> { self.selection.as_ref() }
    pub fn pending_fix (&self)->Option<&str> { self.pending_fix.as_deref() }
    pub fn status (&self)->&str { self.status.as_str() }

    fn set_state (&mut self, new_state: InteractionState) {
        if new_state != self.state {
            debug!("interaction state {} -> {}", self.state, new_state);
            self.state = new_state;
        }
    }

    fn operator_error (&mut self, e: RadarScopeError)->RadarScopeError {
        warn!("{e}");
        self.status = e.to_string();
        e
    }

    pub fn handle_pointer (&mut self, ev: PointerEvent, tracked: &mut TrackedSet, projection: &Projection, routes: Option<&AtsRouteData>)->PointerOutcome {
        match ev.kind {
            PointerKind::Down => self.pointer_down( ev.pos(), tracked, projection, routes),
            PointerKind::Move => self.pointer_move( ev.pos(), tracked),
            PointerKind::Up => self.pointer_up()
        }
    }

    pub fn pointer_down (&mut self, p: CanvasPoint, tracked: &TrackedSet, projection: &Projection, routes: Option<&AtsRouteData>)->PointerOutcome {
        match self.state {
            InteractionState::FixSelect{armed: true} => self.pick_fix( p, projection, routes),
            InteractionState::DraggingLabel{..} => PointerOutcome::Ignored, // we missed the up event
            InteractionState::Idle | InteractionState::FixSelect{armed: false} => {
                for (index,ac) in tracked.aircraft().iter().enumerate() {
                    if !ac.is_drawn() { continue } // nothing on screen to hit yet

                    if is_aircraft_hit( ac, p) {
                        self.selection = Some( Selection { callsign: ac.callsign.clone(), inputs: (&ac.instructed_vector).into() });
                        debug!("selected {}", ac.callsign);
                        return PointerOutcome::Selected( ac.callsign.clone())
                    }
                    if is_label_hit( ac, p) {
                        let (lx,ly) = ac.label_anchor();
                        self.set_state( InteractionState::DraggingLabel { index, callsign: ac.callsign.clone(), grab: (p.x - lx, p.y - ly) });
                        return PointerOutcome::DragStarted( ac.callsign.clone())
                    }
                }
                PointerOutcome::Ignored
            }
        }
    }

    fn pick_fix (&mut self, p: CanvasPoint, projection: &Projection, routes: Option<&AtsRouteData>)->PointerOutcome {
        let geo = projection.to_geo( p);
        match routes.and_then( |r| r.nearest_fix( &geo)) {
            Some(fix) => {
                debug!("picked fix {} for {}", fix.name, geo);
                self.pending_fix = Some( fix.name.to_string());
                self.status = format!("Selected fix: {}", fix.name);
                PointerOutcome::FixPicked( fix.name.to_string())
            }
            None => {
                warn!("no fix data to pick from");
                self.status = "No fix data available".to_string();
                PointerOutcome::NoFixFound
            }
        }
    }

    /// the label offset is re-computed relative to the current aircraft canvas position
    pub fn pointer_move (&mut self, p: CanvasPoint, tracked: &mut TrackedSet)->PointerOutcome {
        if let InteractionState::DraggingLabel{index, callsign, grab} = &self.state {
            if let Some(ac) = tracked.aircraft_mut().get_mut( *index) {
                if ac.callsign == *callsign {
                    ac.label_offset.dx = p.x - grab.0 - ac.position.canvas_x;
                    ac.label_offset.dy = ac.position.canvas_y - (p.y - grab.1);
                    return PointerOutcome::DragMoved( ac.callsign.clone())
                }
            }
        }
        PointerOutcome::Ignored
    }

    pub fn pointer_up (&mut self)->PointerOutcome {
        if let InteractionState::DraggingLabel{..} = self.state {
            self.set_state( InteractionState::Idle);
            PointerOutcome::DragEnded
        } else {
            PointerOutcome::Ignored
        }
    }

    /// enter fix selection mode for the selected aircraft
    pub fn arm_fix_select (&mut self)->Result<()> {
        if self.selection.is_none() {
            return Err( self.operator_error( RadarScopeError::NoSelection()))
        }
        self.pending_fix = None;
        self.status = NO_FIX_SELECTED.to_string();
        self.set_state( InteractionState::FixSelect { armed: true });
        Ok(())
    }

    /// turn the pending fix into a direct-to command and leave fix selection
    pub fn confirm_fix (&mut self)->Result<Command> {
        if self.state != (InteractionState::FixSelect{armed: true}) {
            return Err( self.operator_error( RadarScopeError::NotArmed()))
        }
        let callsign = match &self.selection {
            Some(sel) => sel.callsign.clone(),
            None => return Err( self.operator_error( RadarScopeError::NoSelection()))
        };
        let fix = match self.pending_fix.take() {
            Some(fix) => fix,
            None => return Err( self.operator_error( RadarScopeError::NoPendingFix()))
        };

        self.status = NO_FIX_SELECTED.to_string();
        self.set_state( InteractionState::Idle);
        Ok( Command::DirectToFix { callsign, fix } )
    }

    pub fn cancel_fix (&mut self) {
        self.pending_fix = None;
        self.status = NO_FIX_SELECTED.to_string();
        if let InteractionState::FixSelect{..} = self.state {
            self.set_state( InteractionState::Idle);
        }
    }

    pub fn set_control_inputs (&mut self, inputs: ControlInputs)->Result<()> {
        match &mut self.selection {
            Some(sel) => { sel.inputs = inputs; Ok(()) }
            None => Err( self.operator_error( RadarScopeError::NoSelection()))
        }
    }

    pub fn submit_clearance (&mut self)->Result<Command> {
        match &self.selection {
            Some(sel) => Ok( Command::Clearance { callsign: sel.callsign.clone(), inputs: sel.inputs }),
            None => Err( self.operator_error( RadarScopeError::NoSelection()))
        }
    }

    /// re-validate index based state after the tracked set was merged
    pub fn tracks_changed (&mut self, tracked: &TrackedSet) {
        if let InteractionState::DraggingLabel{index, callsign, grab} = &self.state {
            match tracked.index_of( callsign) {
                Some(i) => {
                    if i != *index {
                        let (callsign,grab) = (callsign.clone(), *grab);
                        self.state = InteractionState::DraggingLabel { index: i, callsign, grab };
                    }
                }
                None => {
                    debug!("dragged aircraft {} is gone", callsign);
                    self.set_state( InteractionState::Idle);
                }
            }
        }

        let is_gone = self.selection.as_ref().is_some_and( |sel| tracked.get( &sel.callsign).is_none());
        if is_gone {
            if let Some(sel) = self.selection.take() {
                debug!("selected aircraft {} is gone", sel.callsign);
            }
            if self.state == (InteractionState::FixSelect{armed: true}) {
                self.pending_fix = None;
                self.status = NO_FIX_SELECTED.to_string();
                self.set_state( InteractionState::FixSelect { armed: false });
            }
        }
    }
}
