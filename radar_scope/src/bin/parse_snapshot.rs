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

use std::{fs, time::Duration};
use anyhow::Result;
use tracing_subscriber::EnvFilter;
use radar_common::{define_cli, check_cli};
use radar_scope::{Aircraft, client::SimulatorClient, snapshot::parse_snapshot};

define_cli! { ARGS [about="aircraft snapshot parsing tool"] =
    json: bool [help="print records as JSON", long],
    source: String [help="snapshot file or simulator base URL (http://..)"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let text = if ARGS.source.starts_with("http://") || ARGS.source.starts_with("https://") {
        SimulatorClient::new( &ARGS.source, Duration::from_secs(10))?.fetch_snapshot_text().await?
    } else {
        fs::read_to_string( &ARGS.source)?
    };

    let snapshot = parse_snapshot( &text);
    for rec in &snapshot.records {
        if ARGS.json {
            println!("{}", serde_json::to_string( rec)?);
        } else {
            println!("{}", Aircraft::new( rec.clone()));
        }
    }
    println!("{snapshot}");

    Ok(())
}
