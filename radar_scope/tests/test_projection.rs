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

use radar_common::geo::{GeoPos, haversine_distance};
use radar_scope::projection::*;

// run with "cargo test test_projection -- --nocapture"

const CENTER: GeoPos = GeoPos { latitude: 35.0, longitude: 139.0 };
const SIZE: CanvasSize = CanvasSize { width: 2000, height: 2000 };

fn assert_close (a: f64, b: f64, eps: f64) {
    assert!( (a-b).abs() < eps, "{a} != {b} (eps={eps})");
}

#[test]
fn test_center () {
    let proj = Projection::new( CENTER, 400.0, SIZE).unwrap();
    let p = proj.to_canvas( &CENTER);
    println!("center {CENTER} -> {p}");
    assert_close( p.x, 1000.0, 1e-9);
    assert_close( p.y, 1000.0, 1e-9);
    assert_close( proj.pixels_per_km(), 5.0, 1e-12);
}

#[test]
fn test_orientation () {
    let proj = Projection::new( CENTER, 400.0, SIZE).unwrap();

    let north = proj.to_canvas( &GeoPos::new( 35.5, 139.0));
    let east = proj.to_canvas( &GeoPos::new( 35.0, 139.5));
    println!("north: {north}, east: {east}");

    assert!( north.y < 1000.0);
    assert_close( north.x, 1000.0, 1e-6);
    assert!( east.x > 1000.0);

    // distance on screen is proportional to great circle distance
    let p = GeoPos::new( 35.3, 139.4);
    let cp = proj.to_canvas( &p);
    let d_px = ((cp.x - 1000.0).powi(2) + (cp.y - 1000.0).powi(2)).sqrt();
    let d_km = haversine_distance( &CENTER, &p, EARTH_RADIUS_KM);
    assert_close( d_px, d_km * 5.0, 1e-6);
}

#[test]
fn test_round_trip () {
    let proj = Projection::new( CENTER, 400.0, SIZE).unwrap();

    for p in [ GeoPos::new( 35.4, 139.3), GeoPos::new( 34.2, 138.1), GeoPos::new( 36.0, 140.5), GeoPos::new( 35.0, 137.5) ] {
        let cp = proj.to_canvas( &p);
        let q = proj.to_geo( cp);
        println!("{p} -> {cp} -> {q}");
        assert_close( p.latitude, q.latitude, 1e-6);
        assert_close( p.longitude, q.longitude, 1e-6);
    }

    let q = proj.to_geo( CanvasPoint::new( 1000.0, 1000.0));
    assert_close( q.latitude, CENTER.latitude, 1e-9);
    assert_close( q.longitude, CENTER.longitude, 1e-9);
}

#[test]
fn test_invalid_projection () {
    assert!( Projection::new( CENTER, 0.0, SIZE).is_err());
    assert!( Projection::new( CENTER, -10.0, SIZE).is_err());
    assert!( Projection::new( CENTER, f64::NAN, SIZE).is_err());
    assert!( Projection::new( CENTER, 400.0, CanvasSize { width: 0, height: 100 }).is_err());
    assert!( Projection::new( GeoPos::new( 95.0, 0.0), 400.0, SIZE).is_err());

    let proj = Projection::new( CENTER, 400.0, SIZE).unwrap();
    assert!( proj.with_range( 0.0).is_err());
    let zoomed = proj.with_range( 100.0).unwrap();
    assert_eq!( zoomed.center(), CENTER);
    assert_close( zoomed.pixels_per_km(), 20.0, 1e-12);
}

#[test]
fn test_future_position () {
    // 600kn = 18.52 km/min, at 10 px/km that is 185.2 px
    let p = future_canvas_position( 600.0, 90.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 500.0, 500.0));
    println!("east: {p}");
    assert_close( p.x, 685.2, 1e-9);
    assert_close( p.y, 500.0, 1e-9);

    let p = future_canvas_position( 600.0, 0.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 500.0, 500.0));
    println!("north: {p}");
    assert_close( p.x, 500.0, 1e-9);
    assert_close( p.y, 314.8, 1e-9);

    let p = future_canvas_position( 600.0, 180.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 500.0, 500.0));
    assert_close( p.y, 685.2, 1e-9);

    // clamped to canvas
    let p = future_canvas_position( 600.0, 90.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 990.0, 500.0));
    assert_close( p.x, 1000.0, 1e-12);
    let p = future_canvas_position( 600.0, 270.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 10.0, 500.0));
    assert_close( p.x, 0.0, 1e-12);

    // zero speed stays put
    let p = future_canvas_position( 0.0, 123.0, 1000.0, 1000.0, 100.0, CanvasPoint::new( 42.0, 17.0));
    assert_eq!( p, CanvasPoint::new( 42.0, 17.0));
}
