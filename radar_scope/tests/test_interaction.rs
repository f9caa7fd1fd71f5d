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

use std::fs;
use radar_common::geo::GeoPos;
use radar_scope::{AircraftRecord, LabelOffset, TrackedSet, snapshot::parse_aircraft_line};
use radar_scope::ats::AtsRouteData;
use radar_scope::interaction::*;
use radar_scope::projection::{CanvasPoint, CanvasSize, Projection};
use radar_scope::errors::RadarScopeError;

// run with "cargo test test_interaction -- --nocapture"

fn record (callsign: &str) -> AircraftRecord {
    let line = format!("Aircraft{{callsign={callsign}, position={{latitude=35.0, longitude=139.0, altitude=20000}}, vector={{heading=90, groundSpeed=400, verticalSpeed=0}}, instructedVector={{heading=45, groundSpeed=380, altitude=24000}}, type=MILITARY_CARGO, model=C2}}");
    parse_aircraft_line( &line).unwrap()
}

/// tracked aircraft at the given canvas positions (as if they had been rendered)
fn tracked_at (positions: &[(&str,f64,f64)]) -> TrackedSet {
    let mut tracked = TrackedSet::new();
    tracked.merge( positions.iter().map( |(cs,_,_)| record(cs)).collect());
    for (cs,x,y) in positions {
        tracked.get_mut(cs).unwrap().set_canvas_position( *x, *y);
    }
    tracked
}

fn projection () -> Projection {
    Projection::new( GeoPos::new( 35.0, 139.0), 400.0, CanvasSize { width: 2000, height: 2000 }).unwrap()
}

fn routes () -> AtsRouteData {
    AtsRouteData::from_json( &fs::read_to_string( "resources/ats_routes.json").unwrap()).unwrap()
}

#[test]
fn test_select () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0), ("B", 900.0, 900.0)]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    assert_eq!( ctrl.handle_pointer( PointerEvent::down( 1500.0, 1500.0), &mut tracked, &proj, None), PointerOutcome::Ignored);
    assert!( ctrl.selection().is_none());

    let outcome = ctrl.handle_pointer( PointerEvent::down( 920.0, 875.0), &mut tracked, &proj, None);
    println!("{outcome:?}, selection: {:?}", ctrl.selection());
    assert_eq!( outcome, PointerOutcome::Selected("B".to_string()));

    let sel = ctrl.selection().unwrap();
    assert_eq!( sel.callsign, "B");
    assert_eq!( sel.inputs, ControlInputs { altitude: 24000.0, ground_speed: 380.0, heading: 45.0 });
    assert_eq!( *ctrl.state(), InteractionState::Idle);
}

#[test]
fn test_undrawn_aircraft_not_hit () {
    // merged but not yet rendered, so the canvas position is still the (0,0) placeholder
    let mut tracked = TrackedSet::new();
    tracked.merge( vec![ record("A") ]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    assert!( !tracked.get("A").unwrap().is_drawn());
    assert_eq!( ctrl.handle_pointer( PointerEvent::down( 10.0, 10.0), &mut tracked, &proj, None), PointerOutcome::Ignored);
    assert!( ctrl.selection().is_none());

    // once drawn it is hit where it was drawn, and later merges keep it hittable
    tracked.get_mut("A").unwrap().set_canvas_position( 10.0, 10.0);
    tracked.merge( vec![ record("A") ]);
    assert!( tracked.get("A").unwrap().is_drawn());
    assert_eq!( ctrl.handle_pointer( PointerEvent::down( 10.0, 10.0), &mut tracked, &proj, None), PointerOutcome::Selected("A".to_string()));
}

#[test]
fn test_aircraft_before_label () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    tracked.get_mut("A").unwrap().label_offset = LabelOffset { dx: 10.0, dy: 10.0 };
    let proj = projection();
    let mut ctrl = InteractionController::new();

    // inside both the aircraft box and the label block
    let outcome = ctrl.handle_pointer( PointerEvent::down( 520.0, 500.0), &mut tracked, &proj, None);
    assert_eq!( outcome, PointerOutcome::Selected("A".to_string()));
}

#[test]
fn test_label_drag () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    // default offset puts the label anchor at (550,450)
    assert_eq!( tracked.get("A").unwrap().label_anchor(), (550.0, 450.0));

    let outcome = ctrl.handle_pointer( PointerEvent::down( 560.0, 455.0), &mut tracked, &proj, None);
    println!("{outcome:?} -> {}", ctrl.state());
    assert_eq!( outcome, PointerOutcome::DragStarted("A".to_string()));
    assert!( matches!( ctrl.state(), InteractionState::DraggingLabel{index: 0, ..}));
    assert!( ctrl.selection().is_none()); // dragging does not select

    let outcome = ctrl.handle_pointer( PointerEvent::moved( 600.0, 520.0), &mut tracked, &proj, None);
    assert_eq!( outcome, PointerOutcome::DragMoved("A".to_string()));

    let ac = tracked.get("A").unwrap();
    println!("new offset: {:?}", ac.label_offset);
    assert_eq!( ac.label_offset, LabelOffset { dx: 90.0, dy: -15.0 });
    assert_eq!( ac.label_anchor(), (590.0, 515.0)); // keeps the grab point under the pointer

    assert_eq!( ctrl.handle_pointer( PointerEvent::up( 600.0, 520.0), &mut tracked, &proj, None), PointerOutcome::DragEnded);
    assert_eq!( *ctrl.state(), InteractionState::Idle);

    // moves after release don't change anything
    assert_eq!( ctrl.handle_pointer( PointerEvent::moved( 700.0, 700.0), &mut tracked, &proj, None), PointerOutcome::Ignored);
    assert_eq!( tracked.get("A").unwrap().label_offset, LabelOffset { dx: 90.0, dy: -15.0 });

    // offset survives the next snapshot
    tracked.merge( vec![ record("A") ]);
    assert_eq!( tracked.get("A").unwrap().label_offset, LabelOffset { dx: 90.0, dy: -15.0 });
}

#[test]
fn test_label_offset_sign () {
    // dragging the anchor right by d and down by e gives offset (d,-e)
    let (d,e) = (30.0, 20.0);
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    ctrl.handle_pointer( PointerEvent::down( 550.0, 450.0), &mut tracked, &proj, None);
    ctrl.handle_pointer( PointerEvent::moved( 500.0 + d, 500.0 + e), &mut tracked, &proj, None);
    ctrl.handle_pointer( PointerEvent::up( 500.0 + d, 500.0 + e), &mut tracked, &proj, None);

    assert_eq!( tracked.get("A").unwrap().label_offset, LabelOffset { dx: d, dy: -e });
}

#[test]
fn test_fix_select_requires_selection () {
    let mut ctrl = InteractionController::new();
    assert_eq!( ctrl.status(), NO_FIX_SELECTED);

    let res = ctrl.arm_fix_select();
    println!("{res:?}, status: {}", ctrl.status());
    assert!( matches!( res, Err(RadarScopeError::NoSelection())));
    assert_eq!( ctrl.status(), "select aircraft first");
    assert_eq!( *ctrl.state(), InteractionState::Idle);

    assert!( matches!( ctrl.confirm_fix(), Err(RadarScopeError::NotArmed())));
    assert!( matches!( ctrl.submit_clearance(), Err(RadarScopeError::NoSelection())));
}

#[test]
fn test_direct_to_fix () {
    let mut tracked = tracked_at( &[("JAL123", 500.0, 500.0)]);
    let proj = projection();
    let routes = routes();
    let mut ctrl = InteractionController::new();

    ctrl.handle_pointer( PointerEvent::down( 500.0, 500.0), &mut tracked, &proj, Some(&routes));
    ctrl.arm_fix_select().unwrap();
    assert_eq!( *ctrl.state(), InteractionState::FixSelect { armed: true });
    assert!( matches!( ctrl.confirm_fix(), Err(RadarScopeError::NoPendingFix())));
    assert_eq!( *ctrl.state(), InteractionState::FixSelect { armed: true });

    // the canvas center is at (35,139) where waypoint ABC and navaid XYZ coincide - navaids win ties
    let outcome = ctrl.handle_pointer( PointerEvent::down( 1000.0, 1000.0), &mut tracked, &proj, Some(&routes));
    println!("{outcome:?}, status: {}", ctrl.status());
    assert_eq!( outcome, PointerOutcome::FixPicked("XYZ".to_string()));
    assert_eq!( ctrl.pending_fix(), Some("XYZ"));
    assert_eq!( ctrl.status(), "Selected fix: XYZ");

    // picking again replaces the pending fix
    let p = proj.to_canvas( &GeoPos::new( 35.48, 139.52));
    assert_eq!( ctrl.handle_pointer( PointerEvent::down( p.x, p.y), &mut tracked, &proj, Some(&routes)), PointerOutcome::FixPicked("DEF".to_string()));
    assert_eq!( ctrl.pending_fix(), Some("DEF"));

    let cmd = ctrl.confirm_fix().unwrap();
    println!("{cmd:?}");
    assert_eq!( cmd, Command::DirectToFix { callsign: "JAL123".to_string(), fix: "DEF".to_string() });
    assert_eq!( *ctrl.state(), InteractionState::Idle);
    assert!( ctrl.pending_fix().is_none());
    assert_eq!( ctrl.status(), NO_FIX_SELECTED);
}

#[test]
fn test_fix_select_without_routes () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    ctrl.handle_pointer( PointerEvent::down( 500.0, 500.0), &mut tracked, &proj, None);
    ctrl.arm_fix_select().unwrap();
    assert_eq!( ctrl.handle_pointer( PointerEvent::down( 1000.0, 1000.0), &mut tracked, &proj, None), PointerOutcome::NoFixFound);
    assert!( ctrl.pending_fix().is_none());
}

#[test]
fn test_cancel_fix () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    let proj = projection();
    let routes = routes();
    let mut ctrl = InteractionController::new();

    ctrl.handle_pointer( PointerEvent::down( 500.0, 500.0), &mut tracked, &proj, Some(&routes));
    ctrl.arm_fix_select().unwrap();
    ctrl.handle_pointer( PointerEvent::down( 1000.0, 1000.0), &mut tracked, &proj, Some(&routes));
    assert!( ctrl.pending_fix().is_some());

    ctrl.cancel_fix();
    assert_eq!( *ctrl.state(), InteractionState::Idle);
    assert!( ctrl.pending_fix().is_none());
    assert_eq!( ctrl.status(), NO_FIX_SELECTED);
    assert!( ctrl.selection().is_some()); // cancel keeps the aircraft selected
}

#[test]
fn test_clearance () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0)]);
    let proj = projection();
    let mut ctrl = InteractionController::new();

    assert!( ctrl.set_control_inputs( ControlInputs { altitude: 1.0, ground_speed: 2.0, heading: 3.0 }).is_err());

    ctrl.handle_pointer( PointerEvent::down( 500.0, 500.0), &mut tracked, &proj, None);
    let inputs = ControlInputs { altitude: 32000.0, ground_speed: 420.0, heading: 270.0 };
    ctrl.set_control_inputs( inputs).unwrap();

    let cmd = ctrl.submit_clearance().unwrap();
    println!("{cmd:?}");
    assert_eq!( cmd, Command::Clearance { callsign: "A".to_string(), inputs });
}

#[test]
fn test_tracks_changed () {
    let mut tracked = tracked_at( &[("A", 500.0, 500.0), ("B", 900.0, 900.0)]);
    let proj = projection();
    let routes = routes();
    let mut ctrl = InteractionController::new();

    // start dragging the label of B (index 1)
    assert_eq!( ctrl.handle_pointer( PointerEvent::down( 955.0, 855.0), &mut tracked, &proj, None), PointerOutcome::DragStarted("B".to_string()));

    // A disappears, B moves to index 0
    tracked.merge( vec![ record("B") ]);
    ctrl.tracks_changed( &tracked);
    println!("after merge: {}", ctrl.state());
    assert!( matches!( ctrl.state(), InteractionState::DraggingLabel{index: 0, ..}));
    assert_eq!( ctrl.handle_pointer( PointerEvent::moved( 965.0, 855.0), &mut tracked, &proj, None), PointerOutcome::DragMoved("B".to_string()));

    // B disappears while dragging
    tracked.merge( Vec::new());
    ctrl.tracks_changed( &tracked);
    assert_eq!( *ctrl.state(), InteractionState::Idle);

    // selected aircraft disappears while fix selection is armed
    let mut tracked = tracked_at( &[("C", 300.0, 300.0)]);
    ctrl.handle_pointer( PointerEvent::down( 300.0, 300.0), &mut tracked, &proj, Some(&routes));
    ctrl.arm_fix_select().unwrap();
    ctrl.handle_pointer( PointerEvent::down( 1000.0, 1000.0), &mut tracked, &proj, Some(&routes));

    tracked.merge( Vec::new());
    ctrl.tracks_changed( &tracked);
    assert!( ctrl.selection().is_none());
    assert!( ctrl.pending_fix().is_none());
    assert_eq!( *ctrl.state(), InteractionState::FixSelect { armed: false });
}
