use anyhow::Context;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::context::CrudContext;
use super::fields::enum_fields;
use super::templates::{
    register_route, write_controller, write_enum, write_migration, write_model, write_request,
    write_resource, write_seeder, FileStatus, WriteMode,
};
use crate::config::ScaffoldConfig;

/// Kind of file the generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    Model,
    Controller,
    Request,
    Resource,
    Enum,
    Migration,
    Seeder,
    Routes,
}

impl Artifact {
    /// Generation order.
    pub const ALL: [Artifact; 8] = [
        Artifact::Enum,
        Artifact::Model,
        Artifact::Controller,
        Artifact::Request,
        Artifact::Resource,
        Artifact::Migration,
        Artifact::Seeder,
        Artifact::Routes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Artifact::Model => "model",
            Artifact::Controller => "controller",
            Artifact::Request => "request",
            Artifact::Resource => "resource",
            Artifact::Enum => "enum",
            Artifact::Migration => "migration",
            Artifact::Seeder => "seeder",
            Artifact::Routes => "routes",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how to write the artifacts.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Project root; configured paths are relative to it
    pub output: PathBuf,
    pub force: bool,
    pub dry_run: bool,
    /// Restrict generation to these artifacts (`None` = all)
    pub only: Option<Vec<Artifact>>,
    /// Migration timestamp; the current local time when unset
    pub timestamp: Option<NaiveDateTime>,
}

impl GenerationOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        GenerationOptions {
            output: output.into(),
            ..GenerationOptions::default()
        }
    }

    pub fn includes(&self, artifact: Artifact) -> bool {
        self.only
            .as_ref()
            .is_none_or(|only| only.contains(&artifact))
    }
}

/// One file the generator touched (or would have).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Path of the create-table migration for `table`.
///
/// An existing `*_create_{table}_table.php` in `dir` is reused so repeated
/// runs do not pile up migrations; otherwise a new timestamped name is used.
pub fn migration_path(dir: &Path, table: &str, now: NaiveDateTime) -> anyhow::Result<PathBuf> {
    let suffix = format!("_create_{table}_table.php");
    if dir.is_dir() {
        let mut existing: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read migrations directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(&suffix))
            })
            .collect();
        existing.sort();
        if let Some(path) = existing.pop() {
            return Ok(path);
        }
    }
    Ok(dir.join(format!("{}{suffix}", now.format("%Y_%m_%d_%H%M%S"))))
}

/// Generate every selected artifact for `ctx`.
///
/// Files are written in [`Artifact::ALL`] order. Existing files are skipped
/// unless `options.force` or `config.force` is set; the routes file is always
/// appended to idempotently.
///
/// # Errors
///
/// Returns an error if any template fails to render or any file cannot be
/// written. Files written before the failure are left in place.
pub fn generate_crud(
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    options: &GenerationOptions,
) -> anyhow::Result<Vec<GeneratedFile>> {
    let root = &options.output;
    let paths = &config.paths;
    let mode = WriteMode {
        force: options.force || config.force,
        dry_run: options.dry_run,
    };
    info!(
        model = %ctx.studly,
        table = %ctx.table,
        group = %ctx.group,
        "generating CRUD"
    );

    let mut generated = Vec::new();
    let mut record = |artifact: Artifact, path: PathBuf, status: FileStatus| {
        generated.push(GeneratedFile {
            artifact,
            path,
            status,
        });
    };

    for artifact in Artifact::ALL {
        if !options.includes(artifact) {
            continue;
        }
        match artifact {
            Artifact::Enum => {
                for field in enum_fields(&ctx.fields) {
                    let path = root
                        .join(&paths.enumeration)
                        .join(&ctx.group)
                        .join(format!("{}.php", field.class));
                    let status = write_enum(&path, ctx, config, &field, mode)?;
                    record(artifact, path, status);
                }
            }
            Artifact::Model => {
                let path = root.join(&paths.model).join(format!("{}.php", ctx.studly));
                let status = write_model(&path, ctx, config, mode)?;
                record(artifact, path, status);
            }
            Artifact::Controller => {
                let path = root
                    .join(&paths.controller)
                    .join(&ctx.group)
                    .join(format!("{}Controller.php", ctx.studly));
                let status = write_controller(&path, ctx, config, mode)?;
                record(artifact, path, status);
            }
            Artifact::Request => {
                let path = root
                    .join(&paths.request)
                    .join(&ctx.group)
                    .join(format!("{}Request.php", ctx.studly));
                let status = write_request(&path, ctx, config, mode)?;
                record(artifact, path, status);
            }
            Artifact::Resource => {
                let path = root
                    .join(&paths.resource)
                    .join(&ctx.group)
                    .join(format!("{}Resource.php", ctx.studly));
                let status = write_resource(&path, ctx, config, mode)?;
                record(artifact, path, status);
            }
            Artifact::Migration => {
                let now = options
                    .timestamp
                    .unwrap_or_else(|| chrono::Local::now().naive_local());
                let path = migration_path(&root.join(&paths.migration), &ctx.table, now)?;
                let status = write_migration(&path, ctx, mode)?;
                record(artifact, path, status);
            }
            Artifact::Seeder => {
                let path = root
                    .join(&paths.seeder)
                    .join(format!("{}Seeder.php", ctx.studly));
                let status = write_seeder(&path, ctx, config, mode)?;
                record(artifact, path, status);
            }
            Artifact::Routes => {
                let path = root
                    .join(&paths.routes)
                    .join(format!("{}.php", ctx.route.as_str()));
                let status = register_route(&path, ctx, config, mode.dry_run)?;
                record(artifact, path, status);
            }
        }
    }

    Ok(generated)
}
