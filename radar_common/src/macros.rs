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

/* #region define_cli  ****************************************************************************************/

/// syntactic sugar macro for clap based command line interface definition
/// ```ignore
/// define_cli! { ARGS [about="radar scope"] =
///   verbose: bool          [help="run verbose", short],
///   config: Option<String> [help="pathname of config", long]
/// }
///
/// fn main () {
///    check_cli!(ARGS); // makes sure we exit on -h or --help before anything else is executed
///    ...
///    let config = &ARGS.config;
///    ...
/// }
/// ```
/// expands into:
/// ```ignore
/// use clap::Parser;
/// use lazy_static::lazy_static;
///
/// #[derive(Parser)]
/// #[command(about = "radar scope")]
/// struct CliOpts {
///     #[arg(help = "run verbose", short)]
///     verbose: bool,
///
///     #[arg(help = "pathname of config", long)]
///     config: Option<String>,
///
///     #[arg(skip=true)] // hidden field to check initialization without referencing any of the arg fields
///     _initialized: bool
/// }
/// lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }
/// ```
/// Using crates have to depend on `clap` and `lazy_static`
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $( #[$meta:meta] )? $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        use clap::Parser;
        use lazy_static::lazy_static;

        #[derive(Parser)]
        #[command( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[arg( $( $fopt $(=$fx)? ),* )]
                $(#[$meta])?
                $fname : $ftype,
            )*
            #[arg(skip=true)]
            _initialized: bool
        }
        lazy_static! { static ref $name: CliOpts = CliOpts::parse(); }
    }
}

#[macro_export]
macro_rules! check_cli {
    ($sopt:ident) => { { let _is_initialized = &$sopt._initialized; } }
}

/* #endregion define_cli */

/// syntactic sugar macro to define thiserror Error enums:
/// ```ignore
/// define_error!{ pub RadarError =
///   IOError( #[from] std::io::Error ) : "IO error: {0}",
///   OpFailed(String) : "operation failed: {0}"
/// }
/// ```
/// will get expanded into
/// ```ignore
/// use thiserror;
/// #[derive(thiserror::Error,Debug)]
/// pub enum RadarError {
///     #[error("IO error: {0}")]
///     IOError(#[from] std::io::Error),
///
///     #[error("operation failed: {0}")]
///     OpFailed(String),
/// }
/// ```
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $err_variant:ident ( $( $( #[$meta:meta] )? $field_type:ty),* ) : $msg_lit:literal ),*) => {
        use thiserror;
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $(
                #[error($msg_lit)]
                $err_variant ( $( $(#[$meta])? $field_type ),*  )
            ),*
        }
    }
}

/// create crate local `load_config(filename)` and `find_resource(filename)` functions that look up
/// RON config and resource files relative to the using crate (see [`crate::config::find_config_file`] for the lookup order)
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load a RON config, either from an explicit path or by filename through the config lookup
        pub fn load_config<C> (path_or_name: &str)->radar_common::Result<C> where C: for <'a> serde::Deserialize<'a> {
            radar_common::config::load_config_from( Some(env!("CARGO_MANIFEST_DIR")), path_or_name)
        }

        /// look up a resource file (fonts etc.) by path or by filename
        pub fn find_resource (path_or_name: &str)->Option<std::path::PathBuf> {
            radar_common::config::find_resource_file( Some(env!("CARGO_MANIFEST_DIR")), path_or_name)
        }
    }
}
