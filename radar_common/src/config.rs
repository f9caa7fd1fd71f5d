/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

//! RON config and resource file lookup. Config files are searched (in this order) as
//!   1. the provided path if it refers to an existing file
//!   2. `$RADAR_CONFIG_DIR/❬filename❭`
//!   3. `./configs/❬filename❭` (relative to the current working dir)
//!   4. `❬crate-dir❭/configs/❬filename❭` if a crate dir is provided
//!
//! Resource files (fonts, fixtures) use the same order with `$RADAR_RESOURCE_DIR` and `resources/`

use std::{env, fs, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;
use crate::errors::{CommonError,Result};

pub const CONFIG_DIR_ENV: &str = "RADAR_CONFIG_DIR";
pub const CONFIGS: &str = "configs";

pub const RESOURCE_DIR_ENV: &str = "RADAR_RESOURCE_DIR";
pub const RESOURCES: &str = "resources";

pub fn find_config_file (crate_dir: Option<&str>, path_or_name: &str)->Option<PathBuf> {
    find_file( CONFIG_DIR_ENV, CONFIGS, crate_dir, path_or_name)
}

pub fn find_resource_file (crate_dir: Option<&str>, path_or_name: &str)->Option<PathBuf> {
    find_file( RESOURCE_DIR_ENV, RESOURCES, crate_dir, path_or_name)
}

fn find_file (dir_env: &str, subdir: &str, crate_dir: Option<&str>, path_or_name: &str)->Option<PathBuf> {
    let path = Path::new(path_or_name);
    if path.is_file() { return Some(path.to_path_buf()) }

    let filename = path.file_name()?;

    if let Ok(dir) = env::var(dir_env) {
        let p = Path::new(&dir).join(filename);
        if p.is_file() { return Some(p) }
    }

    let p = Path::new(subdir).join(filename);
    if p.is_file() { return Some(p) }

    if let Some(dir) = crate_dir {
        let p = Path::new(dir).join(subdir).join(filename);
        if p.is_file() { return Some(p) }
    }

    None
}

pub fn load_config_from<C> (crate_dir: Option<&str>, path_or_name: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    if let Some(path) = find_config_file( crate_dir, path_or_name) {
        debug!("loading config {:?}", path);
        let src = fs::read_to_string( &path)?;
        config_from_ron_str( &src)
    } else {
        Err( CommonError::ConfigNotFound( path_or_name.to_string()))
    }
}

pub fn config_from_ron_str<C> (src: &str)->Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::from_str( src)? )
}
