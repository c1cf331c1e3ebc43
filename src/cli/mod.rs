//! # CLI Module
//!
//! Command-line interface for the `crudsmith` binary.
//!
//! ## Commands
//!
//! ### `crud`
//!
//! Infer the schema, show the final mapping, confirm, then generate every
//! artifact:
//!
//! ```bash
//! crudsmith crud Product --schema product.json --group Shop
//! ```
//!
//! Options:
//! - `--schema <FILE>` - JSON or YAML sample record (built-in sample if omitted)
//! - `--group <NAME>` - Sub-namespace for controllers, requests, resources, enums
//! - `--table <NAME>` - Table name (default: snake plural of the entity)
//! - `--route <api|web>` - Route file to register in
//! - `--output <DIR>` - Laravel project root (default: `.`)
//! - `--only <a,b>` - Restrict to model, controller, request, resource, enum,
//!   migration, seeder, routes
//! - `--force`, `--dry-run`, `--no-interaction`
//!
//! ### `inspect`
//!
//! ```bash
//! crudsmith inspect --schema product.yaml --json --no-interaction
//! ```
//!
//! ### `sample-schema` / `init`
//!
//! Print the built-in sample schema; write a starter `crudsmith.toml`.
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use clap::Parser;
//! use crudsmith::cli::{run, Cli};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cli = Cli::parse_from(["crudsmith", "inspect", "--no-interaction"]);
//! run(&cli, &mut std::io::empty(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

mod commands;


pub use commands::{run, run_cli, ArtifactArg, Cli, Commands, RouteArg};
