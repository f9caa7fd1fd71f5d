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

use radar_scope::{AircraftRecord, LabelOffset, TrackedSet, DEFAULT_LABEL_OFFSET, snapshot::parse_aircraft_line};

// run with "cargo test test_tracks -- --nocapture"

fn record (callsign: &str, lat: f64, lon: f64, alt: f64) -> AircraftRecord {
    let line = format!("Aircraft{{callsign={callsign}, position={{latitude={lat}, longitude={lon}, altitude={alt}}}, vector={{heading=90, groundSpeed=400, verticalSpeed=0}}, instructedVector={{heading=90, groundSpeed=400, altitude={alt}}}, type=MILITARY_CARGO, model=C2}}");
    parse_aircraft_line( &line).unwrap()
}

fn callsigns (tracked: &TrackedSet) -> Vec<&str> {
    tracked.iter().map( |ac| ac.callsign.as_str()).collect()
}

#[test]
fn test_initial_merge () {
    let mut tracked = TrackedSet::new();
    assert!( tracked.last_update().is_none());

    let report = tracked.merge( vec![ record("A", 35.0, 139.0, 10000.0), record("B", 35.1, 139.1, 11000.0) ]);
    println!("{report}");

    assert_eq!( report.added, vec!["A", "B"]);
    assert!( report.updated.is_empty() && report.dropped.is_empty());
    assert_eq!( callsigns( &tracked), vec!["A", "B"]);
    assert!( tracked.iter().all( |ac| ac.label_offset == DEFAULT_LABEL_OFFSET));
    assert!( tracked.last_update().is_some());
}

#[test]
fn test_update_keeps_ui_state () {
    let mut tracked = TrackedSet::new();
    tracked.merge( vec![ record("A", 35.0, 139.0, 10000.0) ]);

    let ac = tracked.get_mut("A").unwrap();
    ac.label_offset = LabelOffset { dx: -30.0, dy: 12.0 };
    ac.set_canvas_position( 100.0, 200.0);

    let report = tracked.merge( vec![ record("A", 35.2, 139.3, 12000.0) ]);
    println!("{report}");
    assert_eq!( report.updated, vec!["A"]);

    let ac = tracked.get("A").unwrap();
    println!("{ac}");
    assert_eq!( ac.label_offset, LabelOffset { dx: -30.0, dy: 12.0 });
    assert_eq!( ac.position.latitude, 35.2);
    assert_eq!( ac.position.longitude, 139.3);
    assert_eq!( ac.position.altitude, 12000.0);
    assert_eq!( (ac.position.canvas_x, ac.position.canvas_y), (100.0, 200.0)); // only rendering updates this
}

#[test]
fn test_drop_and_append () {
    let mut tracked = TrackedSet::new();
    tracked.merge( vec![ record("A", 35.0, 139.0, 10000.0), record("B", 35.1, 139.1, 11000.0), record("C", 35.2, 139.2, 12000.0) ]);

    let report = tracked.merge( vec![ record("D", 34.0, 138.0, 5000.0), record("C", 35.2, 139.2, 12000.0), record("A", 35.0, 139.0, 10000.0) ]);
    println!("{report}");

    assert_eq!( report.dropped, vec!["B"]);
    assert_eq!( report.added, vec!["D"]);
    assert!( report.has_changes());

    // survivors keep their relative order, new ones go to the end
    assert_eq!( callsigns( &tracked), vec!["A", "C", "D"]);
    assert_eq!( tracked.index_of("D"), Some(2));
    assert!( tracked.get("B").is_none());
}

#[test]
fn test_empty_snapshot () {
    let mut tracked = TrackedSet::new();
    tracked.merge( vec![ record("A", 35.0, 139.0, 10000.0) ]);

    let report = tracked.merge( Vec::new());
    assert_eq!( report.dropped, vec!["A"]);
    assert!( tracked.is_empty());
}

#[test]
fn test_duplicate_callsigns () {
    let mut tracked = TrackedSet::new();
    let report = tracked.merge( vec![ record("A", 35.0, 139.0, 10000.0), record("B", 35.0, 139.0, 9000.0), record("A", 36.0, 140.0, 20000.0) ]);
    println!("{report}");

    assert_eq!( tracked.len(), 2);
    assert_eq!( callsigns( &tracked), vec!["A", "B"]);
    assert_eq!( tracked.get("A").unwrap().position.altitude, 20000.0);
}
