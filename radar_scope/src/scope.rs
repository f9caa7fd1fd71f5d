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

//! the radar scope event loop. All display state is owned by a single task that reacts to frame ticks,
//! snapshot fetch ticks and [`ScopeMsg`] messages. Network requests run in their own tasks and report
//! back through the message channel, so they never block rendering

use std::sync::Arc;
use chrono::{DateTime,Utc};
use serde::Serialize;
use tokio::{sync::{mpsc, oneshot}, time::{self, MissedTickBehavior}};
use tracing::{debug,info,warn,error};
use radar_common::geo::GeoPos;
use crate::{TrackedSet, MergeReport};
use crate::ats::AtsRouteData;
use crate::client::{SimulationAction, SimulatorClient};
use crate::config::{DisplayRange, RadarScopeConfig};
use crate::interaction::{Command, ControlInputs, InteractionController, PointerEvent, Selection};
use crate::projection::Projection;
use crate::render::{DisplaySettings, RasterSurface, RenderPipeline, load_font};
use crate::snapshot::parse_snapshot;
use crate::errors::{RadarScopeError, Result, op_failed};

pub const MSG_QUEUE_SIZE: usize = 64;

#[derive(Debug)]
pub enum ScopeMsg {
    Pointer(PointerEvent),
    ArmFixSelect,
    ConfirmFix,
    CancelFix,
    SetControlInputs(ControlInputs),
    SubmitClearance(ControlInputs, oneshot::Sender<Result<()>>),
    Simulation(SimulationAction),
    SetRange(f64),
    SetCenter(GeoPos),
    SelectSector(String),
    SetLayers(DisplaySettings),
    SnapshotReceived(Result<String>),
    RoutesLoaded(Result<AtsRouteData>),
    GetFrame(oneshot::Sender<Result<Vec<u8>>>),
    GetStatus(oneshot::Sender<ScopeStatus>),
    Terminate,
}

/// what operators can query about the scope
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct ScopeStatus {
    pub state: String,
    pub selection: Option<Selection>,
    pub pending_fix: Option<String>,
    pub message: String,
    pub n_tracked: usize,
    pub range_km: f64,
    pub center: GeoPos,
    pub layers: DisplaySettings,
    pub has_routes: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub n_frames: u64,
}

/// cloneable sender side of a running [`RadarScope`]
#[derive(Debug,Clone)]
pub struct ScopeHandle {
    tx: mpsc::Sender<ScopeMsg>,
}

impl ScopeHandle {
    pub async fn send (&self, msg: ScopeMsg)->Result<()> {
        self.tx.send( msg).await.map_err( |_| op_failed("radar scope not running"))
    }

    pub async fn get_frame (&self)->Result<Vec<u8>> {
        let (tx,rx) = oneshot::channel();
        self.send( ScopeMsg::GetFrame(tx)).await?;
        rx.await.map_err( |_| op_failed("no frame response"))?
    }

    pub async fn get_status (&self)->Result<ScopeStatus> {
        let (tx,rx) = oneshot::channel();
        self.send( ScopeMsg::GetStatus(tx)).await?;
        rx.await.map_err( |_| op_failed("no status response"))
    }

    /// set the control inputs of the selected aircraft and send them as clearance. Operator errors
    /// (no selection) are returned to the caller
    pub async fn submit_clearance (&self, inputs: ControlInputs)->Result<()> {
        let (tx,rx) = oneshot::channel();
        self.send( ScopeMsg::SubmitClearance( inputs, tx)).await?;
        rx.await.map_err( |_| op_failed("no clearance response"))?
    }

    pub async fn terminate (&self)->Result<()> {
        self.send( ScopeMsg::Terminate).await
    }
}

pub struct RadarScope {
    config: RadarScopeConfig,
    projection: Projection,
    settings: DisplaySettings,
    tracked: TrackedSet,
    routes: Option<AtsRouteData>,
    pipeline: RenderPipeline<RasterSurface>,
    interaction: InteractionController,
    client: SimulatorClient,

    tx: mpsc::Sender<ScopeMsg>, // for the request tasks we spawn
    rx: Option<mpsc::Receiver<ScopeMsg>>,
}

impl RadarScope {
    /// set up scope state from a (validated) config. Unusable configs (bad canvas, range, center, font or
    /// server URL) are rejected here
    pub fn new (config: RadarScopeConfig)->Result<(Self,ScopeHandle)> {
        config.validate()?;

        let projection = Projection::new( config.initial_center()?, config.display_range.km(), config.canvas)?;

        let font = Arc::new( load_font( &config.font)?);
        let (w,h) = (config.canvas.width, config.canvas.height);
        let pipeline = RenderPipeline::new(
            RasterSurface::new( w, h, font.clone(), config.font_size),
            RasterSurface::new( w, h, font, config.font_size)
        )?;

        let client = SimulatorClient::new( &config.server_url, config.request_timeout)?;
        let (tx,rx) = mpsc::channel( MSG_QUEUE_SIZE);
        let handle = ScopeHandle { tx: tx.clone() };

        let scope = RadarScope {
            settings: config.layers,
            config,
            projection,
            tracked: TrackedSet::new(),
            routes: None,
            pipeline,
            interaction: InteractionController::new(),
            client,
            tx,
            rx: Some(rx),
        };

        Ok( (scope, handle) )
    }

    pub fn projection (&self)->&Projection { &self.projection }
    pub fn tracked (&self)->&TrackedSet { &self.tracked }
    pub fn interaction (&self)->&InteractionController { &self.interaction }
    pub fn routes (&self)->Option<&AtsRouteData> { self.routes.as_ref() }
    pub fn settings (&self)->&DisplaySettings { &self.settings }

    pub async fn run (mut self)->Result<()> {
        let mut rx = self.rx.take().ok_or_else( || op_failed("radar scope already running"))?;

        info!("radar scope started for {}, center {}, range {} km", self.client.base_url(), self.projection.center(), self.projection.range_km());
        self.spawn_route_load();

        let mut frame_timer = time::interval( self.config.frame_interval);
        frame_timer.set_missed_tick_behavior( MissedTickBehavior::Skip);
        let mut fetch_timer = time::interval( self.config.fetch_interval);
        fetch_timer.set_missed_tick_behavior( MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = frame_timer.tick() => self.render(),
                _ = fetch_timer.tick() => self.spawn_fetch(),
                msg = rx.recv() => match msg {
                    Some(ScopeMsg::Terminate) | None => break,
                    Some(msg) => self.handle_msg( msg)
                }
            }
        }

        info!("radar scope terminated");
        Ok(())
    }

    pub fn render (&mut self) {
        self.pipeline.render_frame( &self.projection, &self.settings, self.routes.as_ref(), &mut self.tracked);
    }

    fn spawn_fetch (&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn( async move {
            let res = client.fetch_snapshot_text().await;
            let _ = tx.send( ScopeMsg::SnapshotReceived( res)).await; // only fails if we are shutting down
        });
    }

    fn spawn_route_load (&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn( async move {
            let res = client.fetch_ats_routes().await;
            let _ = tx.send( ScopeMsg::RoutesLoaded( res)).await;
        });
    }

    fn send_command (&self, cmd: Command) {
        info!("sending {:?}", cmd);
        self.client.spawn_command( cmd);
    }

    pub fn handle_msg (&mut self, msg: ScopeMsg) {
        match msg {
            ScopeMsg::Pointer(ev) => {
                let outcome = self.interaction.handle_pointer( ev, &mut self.tracked, &self.projection, self.routes.as_ref());
                debug!("{:?} -> {:?}", ev, outcome);
            }
            ScopeMsg::ArmFixSelect => { let _ = self.interaction.arm_fix_select(); } // errors are reported by the controller
            ScopeMsg::ConfirmFix => {
                if let Ok(cmd) = self.interaction.confirm_fix() { self.send_command( cmd) }
            }
            ScopeMsg::CancelFix => self.interaction.cancel_fix(),
            ScopeMsg::SetControlInputs(inputs) => { let _ = self.interaction.set_control_inputs( inputs); }
            ScopeMsg::SubmitClearance(inputs, tx) => { let _ = tx.send( self.submit_clearance( inputs)); }
            ScopeMsg::Simulation(action) => self.send_command( Command::Simulation(action)),
            ScopeMsg::SetRange(km) => {
                if let Err(e) = self.set_range( km) { warn!("{e}") }
            }
            ScopeMsg::SetCenter(center) => {
                if let Err(e) = self.set_center( center) { warn!("{e}") }
            }
            ScopeMsg::SelectSector(name) => {
                if let Err(e) = self.select_sector( &name) { warn!("{e}") }
            }
            ScopeMsg::SetLayers(settings) => self.settings = settings,
            ScopeMsg::SnapshotReceived(res) => {
                match res {
                    Ok(text) => { self.update_tracks( &text); }
                    Err(e) => warn!("snapshot fetch failed: {e}")
                }
            }
            ScopeMsg::RoutesLoaded(res) => {
                match res {
                    Ok(routes) => {
                        info!("loaded {} fixes, {} ATS lower and {} RNAV routes", routes.n_fixes(), routes.ats_lower_routes.len(), routes.rnav_routes.len());
                        self.routes = Some(routes);
                    }
                    Err(e) => error!("failed to load ATS routes, map layer disabled: {e}")
                }
            }
            ScopeMsg::GetFrame(tx) => { let _ = tx.send( self.pipeline.shown().to_png()); }
            ScopeMsg::GetStatus(tx) => { let _ = tx.send( self.status()); }
            ScopeMsg::Terminate => {} // handled by run loop
        }
    }

    /// parse and merge a snapshot. Returns `None` if the tracked set was left unchanged
    pub fn update_tracks (&mut self, text: &str)->Option<MergeReport> {
        let snapshot = parse_snapshot( text);
        if snapshot.is_unusable() {
            warn!("no usable aircraft records in snapshot, keeping previous tracks");
            return None
        }

        let report = self.tracked.merge( snapshot.records);
        self.interaction.tracks_changed( &self.tracked);
        Some(report)
    }

    pub fn submit_clearance (&mut self, inputs: ControlInputs)->Result<()> {
        self.interaction.set_control_inputs( inputs)?;
        let cmd = self.interaction.submit_clearance()?;
        self.send_command( cmd);
        Ok(())
    }

    pub fn set_range (&mut self, km: f64)->Result<()> {
        let range = DisplayRange::new( km)?;
        self.projection = self.projection.with_range( range.km())?;
        Ok(())
    }

    pub fn set_center (&mut self, center: GeoPos)->Result<()> {
        self.projection = self.projection.with_center( center)?;
        Ok(())
    }

    pub fn select_sector (&mut self, name: &str)->Result<()> {
        let center = self.config.sector_center( name)?;
        debug!("sector {name} -> {center}");
        self.set_center( center)
    }

    pub fn status (&self)->ScopeStatus {
        ScopeStatus {
            state: self.interaction.state().to_string(),
            selection: self.interaction.selection().cloned(),
            pending_fix: self.interaction.pending_fix().map( |s| s.to_string()),
            message: self.interaction.status().to_string(),
            n_tracked: self.tracked.len(),
            range_km: self.projection.range_km(),
            center: self.projection.center(),
            layers: self.settings,
            has_routes: self.routes.is_some(),
            last_update: self.tracked.last_update(),
            n_frames: self.pipeline.n_frames(),
        }
    }
}
