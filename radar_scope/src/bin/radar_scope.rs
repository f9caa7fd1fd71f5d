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

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use radar_common::{define_cli, check_cli};
use radar_scope::{load_config, config::{DisplayRange, RadarScopeConfig}, display, scope::RadarScope};

define_cli! { ARGS [about="ATC radar scope display and control"] =
    config: String [help="config file (pathname or name within config dirs)", long, default_value="radar_scope.ron"],
    server: Option<String> [help="simulator base URL (overrides config)", long],
    range: Option<f64> [help="initial display range in km (overrides config)", long],
    sector: Option<String> [help="initial sector (overrides config)", long]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config: RadarScopeConfig = load_config( &ARGS.config)?;
    if let Some(url) = &ARGS.server { config.server_url = url.clone(); }
    if let Some(km) = ARGS.range { config.display_range = DisplayRange::new( km)?; }
    if let Some(sector) = &ARGS.sector { config.sector = Some( sector.clone()); }

    let display_config = config.display.clone();
    let (scope, handle) = RadarScope::new( config)?;

    if let Some(dc) = &display_config {
        display::spawn_display_server( dc, display::router( handle.clone()));
    }

    let scope_task = tokio::spawn( scope.run());

    tokio::signal::ctrl_c().await?;
    handle.terminate().await?;
    scope_task.await??;

    Ok(())
}
