use anyhow::Context;
use askama::Template;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::context::CrudContext;
use super::fields::{
    casts, enum_fields, file_columns, fillable, migration_columns, relations,
    resource_lines, translatable, validation_rules, EnumCase, EnumField, RelationMethod, RuleLine,
};
use super::seed_value::seed_value;
use crate::config::ScaffoldConfig;
use crate::naming::to_camel_case;

/// Outcome of writing one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Created,
    Overwritten,
    /// Existing file appended to (route registration)
    Updated,
    /// Existing file left alone because `force` was not set
    Skipped,
    /// Would have been written, but this is a dry run
    DryRun,
    /// Already up to date
    Unchanged,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Created => "created",
            FileStatus::Overwritten => "overwritten",
            FileStatus::Updated => "updated",
            FileStatus::Skipped => "skipped",
            FileStatus::DryRun => "dry-run",
            FileStatus::Unchanged => "unchanged",
        }
    }
}

/// How existing files are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteMode {
    pub force: bool,
    pub dry_run: bool,
}

#[derive(Template)]
#[template(path = "model.php.txt", escape = "none")]
pub struct ModelTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub table: String,
    pub fillable: Vec<String>,
    pub translatable: Vec<String>,
    pub casts: Vec<(String, String)>,
    pub relations: Vec<RelationMethod>,
    /// Accessor method names of file columns
    pub files: Vec<String>,
}

#[derive(Template)]
#[template(path = "controller.php.txt", escape = "none")]
pub struct ControllerTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub model: String,
    pub model_import: String,
    pub request: String,
    pub request_import: String,
    pub resource: String,
    pub resource_import: String,
    /// Record variable name, without `$`
    pub var: String,
    pub table: String,
    /// Quoted relation names for `with()` / `load()`, empty if none
    pub eager: String,
    pub files: Vec<String>,
}

#[derive(Template)]
#[template(path = "request.php.txt", escape = "none")]
pub struct RequestTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub imports: Vec<String>,
    pub rules: Vec<String>,
}

#[derive(Template)]
#[template(path = "resource.php.txt", escape = "none")]
pub struct ResourceTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub imports: Vec<String>,
    pub lines: Vec<String>,
}

#[derive(Template)]
#[template(path = "enum.php.txt", escape = "none")]
pub struct EnumTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub cases: Vec<EnumCase>,
}

#[derive(Template)]
#[template(path = "migration.php.txt", escape = "none")]
pub struct MigrationTemplateData {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Template)]
#[template(path = "seeder.php.txt", escape = "none")]
pub struct SeederTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub model: String,
    pub model_import: String,
    pub values: Vec<(String, String)>,
}

#[derive(Template)]
#[template(path = "routes.php.txt", escape = "none")]
pub struct RoutesTemplate;

#[derive(Template)]
#[template(path = "crudsmith.toml.txt", escape = "none")]
pub struct StarterConfigTemplate;

fn grouped(namespace: &str, group: &str) -> String {
    format!("{namespace}\\{group}")
}

fn with_trailing_newline(mut rendered: String) -> String {
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}

/// Render and write an artifact, honouring `force` and `dry_run`. Skipped
/// files are not rendered.
fn write_rendered(
    path: &Path,
    mode: WriteMode,
    render: impl FnOnce() -> anyhow::Result<String>,
) -> anyhow::Result<FileStatus> {
    let exists = path.exists();
    if exists && !mode.force {
        warn!(path = %path.display(), "skipping existing file (use --force to overwrite)");
        return Ok(FileStatus::Skipped);
    }
    if mode.dry_run {
        info!(path = %path.display(), "dry run: would write file");
        return Ok(FileStatus::DryRun);
    }
    let rendered = render()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, with_trailing_newline(rendered))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "generated file");
    Ok(if exists {
        FileStatus::Overwritten
    } else {
        FileStatus::Created
    })
}

pub fn render_model(ctx: &CrudContext, config: &ScaffoldConfig) -> anyhow::Result<String> {
    let files = file_columns(&ctx.fields)
        .iter()
        .map(|column| to_camel_case(column))
        .collect();
    Ok(ModelTemplateData {
        namespace: config.namespaces.model.clone(),
        class_name: ctx.studly.clone(),
        table: ctx.table.clone(),
        fillable: fillable(&ctx.fields),
        translatable: translatable(&ctx.fields),
        casts: casts(&ctx.fields),
        relations: relations(&ctx.fields),
        files,
    }
    .render()?)
}

/// Write the Eloquent model.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_model(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_model(ctx, config))
}

pub fn render_controller(ctx: &CrudContext, config: &ScaffoldConfig) -> anyhow::Result<String> {
    let ns = &config.namespaces;
    let model = ctx.studly.clone();
    let request = format!("{}Request", ctx.studly);
    let resource = format!("{}Resource", ctx.studly);
    let eager = relations(&ctx.fields)
        .iter()
        .map(|r| format!("'{}'", r.method))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(ControllerTemplateData {
        namespace: grouped(&ns.controller, &ctx.group),
        class_name: format!("{}Controller", ctx.studly),
        model_import: format!("{}\\{model}", ns.model),
        request_import: format!("{}\\{request}", grouped(&ns.request, &ctx.group)),
        resource_import: format!("{}\\{resource}", grouped(&ns.resource, &ctx.group)),
        model,
        request,
        resource,
        var: ctx.variable(),
        table: ctx.table.clone(),
        eager,
        files: file_columns(&ctx.fields),
    }
    .render()?)
}

/// Write the API resource controller.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_controller(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_controller(ctx, config))
}

pub fn render_request(ctx: &CrudContext, config: &ScaffoldConfig) -> anyhow::Result<String> {
    let rules = validation_rules(ctx);
    let mut imports = BTreeSet::from(["Illuminate\\Foundation\\Http\\FormRequest".to_string()]);
    for (_, meta) in ctx.fields.iter() {
        if meta.is_translatable {
            let rule = if meta.is_nullable {
                "TranslatableNullable"
            } else {
                "TranslatableRequired"
            };
            imports.insert(format!("App\\Rules\\{rule}"));
        } else if meta.is_unique {
            imports.insert("Illuminate\\Validation\\Rule".to_string());
        }
    }
    Ok(RequestTemplateData {
        namespace: grouped(&config.namespaces.request, &ctx.group),
        class_name: format!("{}Request", ctx.studly),
        imports: imports.into_iter().collect(),
        rules: rules.iter().map(RuleLine::render).collect(),
    }
    .render()?)
}

/// Write the form request with validation rules.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_request(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_request(ctx, config))
}

pub fn render_resource(ctx: &CrudContext, config: &ScaffoldConfig) -> anyhow::Result<String> {
    let mut imports = BTreeSet::from([
        "Illuminate\\Http\\Request".to_string(),
        "Illuminate\\Http\\Resources\\Json\\JsonResource".to_string(),
    ]);
    let enum_ns = grouped(&config.namespaces.enumeration, &ctx.group);
    for field in enum_fields(&ctx.fields) {
        imports.insert(format!("{enum_ns}\\{}", field.class));
    }
    Ok(ResourceTemplateData {
        namespace: grouped(&config.namespaces.resource, &ctx.group),
        class_name: format!("{}Resource", ctx.studly),
        imports: imports.into_iter().collect(),
        lines: resource_lines(&ctx.fields),
    }
    .render()?)
}

/// Write the JSON API resource.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_resource(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_resource(ctx, config))
}

pub fn render_enum(ctx: &CrudContext, config: &ScaffoldConfig, field: &EnumField) -> anyhow::Result<String> {
    Ok(EnumTemplateData {
        namespace: grouped(&config.namespaces.enumeration, &ctx.group),
        class_name: field.class.clone(),
        cases: field.cases.clone(),
    }
    .render()?)
}

/// Write the backed enum for one enum field.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_enum(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    field: &EnumField,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_enum(ctx, config, field))
}

pub fn render_migration(ctx: &CrudContext) -> anyhow::Result<String> {
    Ok(MigrationTemplateData {
        table: ctx.table.clone(),
        columns: migration_columns(&ctx.fields),
    }
    .render()?)
}

/// Write the create-table migration.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_migration(path: &Path, ctx: &CrudContext, mode: WriteMode) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_migration(ctx))
}

pub fn render_seeder(ctx: &CrudContext, config: &ScaffoldConfig) -> anyhow::Result<String> {
    let values = ctx
        .fields
        .iter()
        .filter(|(_, meta)| meta.is_column)
        .map(|(column, meta)| (column.to_string(), seed_value(column, meta)))
        .collect();
    Ok(SeederTemplateData {
        namespace: config.namespaces.seeder.clone(),
        class_name: format!("{}Seeder", ctx.studly),
        model: ctx.studly.clone(),
        model_import: format!("{}\\{}", config.namespaces.model, ctx.studly),
        values,
    }
    .render()?)
}

/// Write the database seeder with one sample row.
///
/// # Errors
///
/// Returns an error if rendering or writing fails
pub fn write_seeder(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    mode: WriteMode,
) -> anyhow::Result<FileStatus> {
    write_rendered(path, mode, || render_seeder(ctx, config))
}

/// `Route::apiResource(...)` line for the entity.
pub fn route_line(ctx: &CrudContext) -> String {
    format!(
        "Route::apiResource('{}', {}Controller::class);",
        ctx.table, ctx.studly
    )
}

/// Insert `use_line` after the last top-level `use` import, or after the
/// opening `<?php` tag when there is none.
fn insert_use(content: &str, use_line: &str) -> String {
    let mut lines: Vec<&str> = content.lines().collect();
    let at = lines
        .iter()
        .rposition(|l| l.starts_with("use "))
        .or_else(|| lines.iter().position(|l| l.trim_start().starts_with("<?php")))
        .map_or(0, |i| i + 1);
    lines.insert(at, use_line);
    let mut out = lines.join("\n");
    if content.ends_with('\n') || content.is_empty() {
        out.push('\n');
    }
    out
}

/// Register the resource route in a routes file, creating the file if
/// needed. Registration is idempotent and never rewrites an existing route.
///
/// # Errors
///
/// Returns an error if the routes file cannot be read or written
pub fn register_route(
    path: &Path,
    ctx: &CrudContext,
    config: &ScaffoldConfig,
    dry_run: bool,
) -> anyhow::Result<FileStatus> {
    let existing = if path.exists() {
        Some(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read routes file {}", path.display()))?,
        )
    } else {
        None
    };

    let line = route_line(ctx);
    let marker = line.trim_end_matches(';');
    if existing.as_deref().is_some_and(|c| c.contains(marker)) {
        info!(path = %path.display(), "route already registered");
        return Ok(FileStatus::Unchanged);
    }

    let mut content = match &existing {
        Some(content) => content.clone(),
        None => with_trailing_newline(RoutesTemplate.render()?),
    };
    let use_line = format!(
        "use {}\\{}Controller;",
        grouped(&config.namespaces.controller, &ctx.group),
        ctx.studly
    );
    if !content.lines().any(|l| l.trim() == use_line) {
        content = insert_use(&content, &use_line);
    }
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push('\n');
    content.push_str(&line);
    content.push('\n');

    if dry_run {
        return Ok(FileStatus::DryRun);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write routes file {}", path.display()))?;
    info!(path = %path.display(), route = %line, "registered route");
    Ok(if existing.is_some() {
        FileStatus::Updated
    } else {
        FileStatus::Created
    })
}

pub fn render_starter_config() -> anyhow::Result<String> {
    Ok(with_trailing_newline(StarterConfigTemplate.render()?))
}
