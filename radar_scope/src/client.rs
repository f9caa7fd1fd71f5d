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

//! HTTP client for the simulator services. None of these calls is retried, callers just log failures

use std::{fmt, time::Duration};
use reqwest::{Client, Response, Url};
use serde::{Serialize,Deserialize};
use tracing::{debug,error};
use crate::ats::AtsRouteData;
use crate::interaction::{Command, ControlInputs};
use crate::errors::{RadarScopeError,Result};

pub const SNAPSHOT_PATH: &str = "/aircraft/location/all";
pub const ATS_ROUTES_PATH: &str = "/ats/route/all";

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum SimulationAction { Start, Pause }

impl SimulationAction {
    pub fn path_segment (&self)->&'static str {
        match self { SimulationAction::Start => "start", SimulationAction::Pause => "pause" }
    }
}

impl fmt::Display for SimulationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!( f, "{}", self.path_segment()) }
}

/// body of a clearance change request
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct ClearanceRequest {
    pub instructed_altitude: f64,
    pub instructed_ground_speed: f64,
    pub instructed_heading: f64,
}

impl From<&ControlInputs> for ClearanceRequest {
    fn from (ci: &ControlInputs)->Self {
        ClearanceRequest { instructed_altitude: ci.altitude, instructed_ground_speed: ci.ground_speed, instructed_heading: ci.heading }
    }
}

#[derive(Debug,Clone)]
pub struct SimulatorClient {
    base: Url,
    client: Client,
}

impl SimulatorClient {
    pub fn new (base_url: &str, timeout: Duration)->Result<Self> {
        let base = Url::parse( base_url).map_err( |e| RadarScopeError::ConfigurationError( format!("invalid server url {base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err( RadarScopeError::ConfigurationError( format!("not a base url: {base_url}")))
        }
        let client = Client::builder().timeout( timeout).build()?;
        Ok( SimulatorClient { base, client } )
    }

    pub fn base_url (&self)->&Url { &self.base }

    /// build a service URL from path segments, which get percent-encoded
    pub fn url_for (&self, segments: &[&str])->Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() { // can't fail, we checked cannot_be_a_base
            path.pop_if_empty();
            path.extend( segments);
        }
        url
    }

    fn url_for_path (&self, path: &str)->Url {
        let segments: Vec<&str> = path.split('/').filter( |s| !s.is_empty()).collect();
        self.url_for( &segments)
    }

    fn check_status (url: &Url, response: Response)->Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err( RadarScopeError::StatusError( status.as_u16(), url.to_string()))
        }
    }

    pub async fn fetch_snapshot_text (&self)->Result<String> {
        let url = self.url_for_path( SNAPSHOT_PATH);
        let response = self.client.get( url.clone()).header( "accept", "*/*").send().await?;
        let response = Self::check_status( &url, response)?;
        Ok( response.text().await? )
    }

    pub async fn fetch_ats_routes (&self)->Result<AtsRouteData> {
        let url = self.url_for_path( ATS_ROUTES_PATH);
        let response = self.client.get( url.clone()).send().await?;
        let response = Self::check_status( &url, response)?;
        let text = response.text().await?;
        AtsRouteData::from_json( &text)
    }

    pub async fn post_clearance (&self, callsign: &str, req: &ClearanceRequest)->Result<()> {
        let url = self.url_for( &["api", "aircraft", "control", callsign]);
        let response = self.client.post( url.clone()).json( req).send().await?;
        Self::check_status( &url, response)?;
        Ok(())
    }

    pub async fn post_direct_to_fix (&self, callsign: &str, fix: &str)->Result<()> {
        let url = self.url_for( &["api", "aircraft", "control", callsign, "direct", fix]);
        let response = self.client.post( url.clone()).send().await?;
        Self::check_status( &url, response)?;
        Ok(())
    }

    pub async fn post_simulation (&self, action: SimulationAction)->Result<()> {
        let url = self.url_for( &["simulation", action.path_segment()]);
        let response = self.client.post( url.clone()).send().await?;
        Self::check_status( &url, response)?;
        Ok(())
    }

    pub async fn send_command (&self, cmd: &Command)->Result<()> {
        match cmd {
            Command::Clearance{callsign, inputs} => self.post_clearance( callsign, &inputs.into()).await,
            Command::DirectToFix{callsign, fix} => self.post_direct_to_fix( callsign, fix).await,
            Command::Simulation(action) => self.post_simulation( *action).await
        }
    }

    /// fire-and-forget command submission. Failures are only logged
    pub fn spawn_command (&self, cmd: Command) {
        let client = self.clone();
        tokio::spawn( async move {
            match client.send_command( &cmd).await {
                Ok(()) => debug!("sent {:?}", cmd),
                Err(e) => error!("command {:?} failed: {}", cmd, e)
            }
        });
    }
}
