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

//! parser for the textual aircraft snapshot the simulator serves, one aircraft per line:
//! ```text
//! Aircraft{callsign=JAL123, position={latitude=35.0, longitude=139.0, altitude=30000}, vector={...}, ... , riskLevel=0}
//! ```
//! The grammar we accept is
//! ```text
//! line   := "Aircraft" "{" fields "}"
//! fields := field ("," field)*
//! field  := key "=" value
//! value  := "{" fields "}" | scalar
//! ```
//! where scalars extend to the next ',' or '}'. Fields we don't know are ignored.

use std::{fmt, str::FromStr};
use tracing::{debug,warn};
use crate::{AircraftPosition, AircraftRecord, AircraftVector, Category, FlightPlan, InstructedVector};
use crate::errors::{RadarScopeError, Result, parse_error};

pub const AIRCRAFT_TAG: &str = "Aircraft";

#[derive(Debug,Clone,PartialEq)]
enum Value<'a> {
    Scalar(&'a str),
    Group(Fields<'a>),
}

#[derive(Debug,Clone,PartialEq,Default)]
struct Fields<'a> (Vec<(&'a str, Value<'a>)>);

impl<'a> Fields<'a> {
    fn value (&self, key: &str)->Option<&Value<'a>> {
        // last one wins if a key is repeated
        self.0.iter().rev().find( |(k,_)| *k == key).map( |(_,v)| v)
    }

    fn str (&self, key: &str)->Result<&'a str> {
        match self.value( key) {
            Some(Value::Scalar(s)) => Ok(*s),
            Some(Value::Group(_)) => Err( parse_error!("field '{}' is not a scalar", key)),
            None => Err( parse_error!("missing field '{}'", key))
        }
    }

    fn opt_str (&self, key: &str)->Result<Option<&'a str>> {
        match self.value( key) {
            Some(Value::Scalar(s)) => Ok( Some(*s)),
            Some(Value::Group(_)) => Err( parse_error!("field '{}' is not a scalar", key)),
            None => Ok(None)
        }
    }

    fn f64 (&self, key: &str)->Result<f64> {
        parse_f64( key, self.str( key)?)
    }

    fn group (&self, key: &str)->Result<&Fields<'a>> {
        match self.value( key) {
            Some(Value::Group(g)) => Ok(g),
            Some(Value::Scalar(_)) => Err( parse_error!("field '{}' is not a group", key)),
            None => Err( parse_error!("missing group '{}'", key))
        }
    }
}

fn parse_f64 (key: &str, s: &str)->Result<f64> {
    match f64::from_str( s) {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err( parse_error!("invalid number for '{}': '{}'", key, s))
    }
}

/* #region tokenizer/parser  ******************************************************************************/

struct LineParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LineParser<'a> {
    fn new (src: &'a str)->Self { LineParser { src, pos: 0 } }

    fn rest (&self)->&'a str { &self.src[self.pos..] }

    fn peek (&self)->Option<u8> { self.src.as_bytes().get( self.pos).copied() }

    fn skip_ws (&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() { self.pos += 1 } else { break }
        }
    }

    fn expect (&mut self, c: u8)->Result<()> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err( parse_error!("expected '{}' at {}", c as char, self.pos))
        }
    }

    fn parse_line (&mut self)->Result<Fields<'a>> {
        self.skip_ws();
        if !self.rest().starts_with( AIRCRAFT_TAG) {
            return Err( parse_error!("not an {} record", AIRCRAFT_TAG))
        }
        self.pos += AIRCRAFT_TAG.len();

        self.expect(b'{')?;
        let fields = self.parse_fields()?;
        self.expect(b'}')?;

        self.skip_ws();
        if self.pos < self.src.len() {
            return Err( parse_error!("trailing characters at {}", self.pos))
        }
        Ok(fields)
    }

    fn parse_fields (&mut self)->Result<Fields<'a>> {
        let mut fields = Vec::new();
        loop {
            let key = self.parse_key()?;
            self.expect(b'=')?;
            let value = self.parse_value()?;
            fields.push( (key,value));

            self.skip_ws();
            if self.peek() == Some(b',') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok( Fields(fields))
    }

    fn parse_key (&mut self)->Result<&'a str> {
        self.skip_ws();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' { self.pos += 1 } else { break }
        }
        if self.pos == start {
            Err( parse_error!("expected key at {}", start))
        } else {
            Ok( &self.src[start..self.pos])
        }
    }

    fn parse_value (&mut self)->Result<Value<'a>> {
        self.skip_ws();
        if self.peek() == Some(b'{') {
            self.pos += 1;
            let fields = self.parse_fields()?;
            self.expect(b'}')?;
            Ok( Value::Group(fields))

        } else {
            let start = self.pos;
            while let Some(b) = self.peek() {
                match b {
                    b',' | b'}' => break,
                    b'{' | b'=' => return Err( parse_error!("unexpected '{}' in value at {}", b as char, self.pos)),
                    _ => self.pos += 1
                }
            }
            Ok( Value::Scalar( self.src[start..self.pos].trim()))
        }
    }
}

/* #endregion tokenizer/parser */

/* #region record decoding  *******************************************************************************/

fn decode_record (fields: &Fields)->Result<AircraftRecord> {
    let callsign = fields.str("callsign")?;
    if callsign.is_empty() { return Err( parse_error!("empty callsign")) }

    let pos = fields.group("position")?;
    let position = AircraftPosition {
        latitude: pos.f64("latitude")?,
        longitude: pos.f64("longitude")?,
        altitude: pos.f64("altitude")?,
        canvas_x: 0.0,
        canvas_y: 0.0
    };

    let vec = fields.group("vector")?;
    let vector = AircraftVector {
        heading: vec.f64("heading")?,
        ground_speed: vec.f64("groundSpeed")?,
        vertical_speed: vec.f64("verticalSpeed")?
    };

    let ivec = fields.group("instructedVector")?;
    let instructed_vector = InstructedVector {
        heading: ivec.f64("heading")?,
        ground_speed: ivec.f64("groundSpeed")?,
        altitude: ivec.f64("altitude")?
    };

    let tag = fields.str("type")?;
    let flight_plan = if Category::is_commercial_tag( tag) {
        Some( FlightPlan {
            origin_iata: fields.str("originIata")?.to_string(),
            origin_icao: fields.str("originIcao")?.to_string(),
            destination_iata: fields.str("destinationIata")?.to_string(),
            destination_icao: fields.str("destinationIcao")?.to_string(),
            eta: fields.str("eta")?.to_string(),
        })
    } else { None };
    let category = Category::from_tag( tag, flight_plan)?;

    let model = fields.str("model")?.to_string();

    let risk_level = match fields.opt_str("riskLevel")? {
        Some(s) => parse_f64( "riskLevel", s)?,
        None => 0.0
    };

    Ok( AircraftRecord {
        callsign: callsign.to_string(),
        position,
        vector,
        instructed_vector,
        category,
        model,
        risk_level
    })
}

/* #endregion record decoding */

/// parse a single snapshot line
pub fn parse_aircraft_line (line: &str)->Result<AircraftRecord> {
    let fields = LineParser::new( line).parse_line()?;
    decode_record( &fields)
}

/// the result of parsing a whole snapshot
#[derive(Debug,Default)]
pub struct Snapshot {
    pub records: Vec<AircraftRecord>,
    pub n_skipped: usize,
}

impl Snapshot {
    /// true if there were records but none of them could be parsed
    pub fn is_unusable (&self)->bool { self.records.is_empty() && self.n_skipped > 0 }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Snapshot( parsed: {}, skipped: {})", self.records.len(), self.n_skipped)
    }
}

/// parse a snapshot text. Lines that cannot be parsed are logged and skipped, blank lines are ignored
pub fn parse_snapshot (text: &str)->Snapshot {
    let mut snapshot = Snapshot::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() { continue }

        match parse_aircraft_line( line) {
            Ok(rec) => snapshot.records.push( rec),
            Err(e) => {
                warn!("skipping snapshot line ({e}): {line}");
                snapshot.n_skipped += 1;
            }
        }
    }

    debug!("{snapshot}");
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_groups () {
        let fields = LineParser::new("Aircraft{a=1, b={c= x y , d={e=2}}, f=}").parse_line().unwrap();
        assert_eq!( fields.str("a").unwrap(), "1");
        let b = fields.group("b").unwrap();
        assert_eq!( b.str("c").unwrap(), "x y");
        assert_eq!( b.group("d").unwrap().f64("e").unwrap(), 2.0);
        assert_eq!( fields.str("f").unwrap(), "");
    }

    #[test]
    fn test_unbalanced () {
        assert!( LineParser::new("Aircraft{a=1, b={c=2}").parse_line().is_err());
        assert!( LineParser::new("Aircraft{a=1}}").parse_line().is_err());
        assert!( LineParser::new("Aircraft{=1}").parse_line().is_err());
        assert!( LineParser::new("Airplane{a=1}").parse_line().is_err());
    }
}
