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

//! local HTTP surface through which an operator client views frames and sends input. Handlers only
//! forward messages to the scope task

use std::net::SocketAddr;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{info,error};
use crate::client::SimulationAction;
use crate::config::DisplayServerConfig;
use crate::interaction::{ControlInputs, PointerEvent};
use crate::render::DisplaySettings;
use crate::scope::{ScopeHandle, ScopeMsg};
use crate::errors::RadarScopeError;

#[derive(Debug,Deserialize)]
pub struct RangeRequest {
    pub km: f64,
}

pub fn router (handle: ScopeHandle)->Router {
    Router::new()
        .route( "/scope/frame.png", get( get_frame))
        .route( "/scope/status", get( get_status))
        .route( "/scope/pointer", post( post_pointer))
        .route( "/scope/fix/arm", post( post_arm_fix))
        .route( "/scope/fix/confirm", post( post_confirm_fix))
        .route( "/scope/fix/cancel", post( post_cancel_fix))
        .route( "/scope/clearance", post( post_clearance))
        .route( "/scope/simulation/{action}", post( post_simulation))
        .route( "/scope/range", post( post_range))
        .route( "/scope/sector/{name}", post( post_sector))
        .route( "/scope/layers", post( post_layers))
        .with_state( handle)
}

pub fn spawn_display_server (config: &DisplayServerConfig, router: Router)->JoinHandle<()> {
    let sock_addr = config.sock_addr;
    tokio::spawn( async move {
        match tokio::net::TcpListener::bind( sock_addr).await {
            Ok(listener) => {
                info!("serving radar display on http://{sock_addr}/scope");
                if let Err(e) = axum::serve( listener, router).await {
                    error!("display server failed: {e}");
                }
            }
            Err(e) => error!("cannot bind display server to {sock_addr}: {e}")
        }
    })
}

fn error_response (e: RadarScopeError)->Response {
    let status = match e {
        RadarScopeError::NoSelection() | RadarScopeError::NoPendingFix() | RadarScopeError::NotArmed() => StatusCode::CONFLICT,
        _ => StatusCode::SERVICE_UNAVAILABLE
    };
    (status, e.to_string()).into_response()
}

async fn forward (handle: &ScopeHandle, msg: ScopeMsg)->Response {
    match handle.send( msg).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(e)
    }
}

async fn get_frame (State(handle): State<ScopeHandle>)->Response {
    match handle.get_frame().await {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => error_response(e)
    }
}

async fn get_status (State(handle): State<ScopeHandle>)->Response {
    match handle.get_status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e)
    }
}

async fn post_pointer (State(handle): State<ScopeHandle>, Json(ev): Json<PointerEvent>)->Response {
    forward( &handle, ScopeMsg::Pointer(ev)).await
}

async fn post_arm_fix (State(handle): State<ScopeHandle>)->Response {
    forward( &handle, ScopeMsg::ArmFixSelect).await
}

async fn post_confirm_fix (State(handle): State<ScopeHandle>)->Response {
    forward( &handle, ScopeMsg::ConfirmFix).await
}

async fn post_cancel_fix (State(handle): State<ScopeHandle>)->Response {
    forward( &handle, ScopeMsg::CancelFix).await
}

async fn post_clearance (State(handle): State<ScopeHandle>, Json(inputs): Json<ControlInputs>)->Response {
    match handle.submit_clearance( inputs).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(e)
    }
}

async fn post_simulation (State(handle): State<ScopeHandle>, Path(action): Path<SimulationAction>)->Response {
    forward( &handle, ScopeMsg::Simulation(action)).await
}

async fn post_range (State(handle): State<ScopeHandle>, Json(req): Json<RangeRequest>)->Response {
    forward( &handle, ScopeMsg::SetRange(req.km)).await
}

async fn post_sector (State(handle): State<ScopeHandle>, Path(name): Path<String>)->Response {
    forward( &handle, ScopeMsg::SelectSector(name)).await
}

async fn post_layers (State(handle): State<ScopeHandle>, Json(settings): Json<DisplaySettings>)->Response {
    forward( &handle, ScopeMsg::SetLayers(settings)).await
}
