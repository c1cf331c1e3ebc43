use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{default_config_path, load_or_default, write_config_if_missing};
use crate::generator::{
    generate_crud, render_starter_config, Artifact, CrudContext, FileStatus, GenerationOptions,
    RouteFile,
};
use crate::naming::to_studly_case;
use crate::schema::{
    default_schema, describe_field, load_raw_schema, normalize, DefaultResolver, FieldMetaMap,
    RawSchema, TerminalResolver, TypeResolver,
};

/// Command-line interface for crudsmith
///
/// Infers a typed field schema from a loosely written sample record and
/// scaffolds the Laravel CRUD files for it.
#[derive(Parser, Debug)]
#[command(name = "crudsmith")]
#[command(about = "Laravel CRUD scaffolding with schema inference", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate model, controller, request, resource, enums, migration,
    /// seeder and route for an entity
    Crud {
        /// Base name of the entity (e.g. Product)
        name: String,

        /// Schema file (JSON or YAML); the built-in sample when omitted
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Group used for sub-namespaces (default from config: DataEntry)
        #[arg(short, long)]
        group: Option<String>,

        /// Custom table name (default: snake plural of the name)
        #[arg(long)]
        table: Option<String>,

        /// Route file to register the resource route in
        #[arg(long, value_enum)]
        route: Option<RouteArg>,

        /// Laravel project root
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Path to crudsmith.toml; auto-detected in the project root if omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Limit generation to specific artifacts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<ArtifactArg>>,

        /// Never prompt: unknown types become string, nothing is translatable
        /// unless the schema says so, and generation proceeds without asking
        #[arg(long, default_value_t = false)]
        no_interaction: bool,
    },
    /// Print the normalized schema mapping without generating anything
    Inspect {
        /// Schema file (JSON or YAML); the built-in sample when omitted
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Print the mapping as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Never prompt
        #[arg(long, default_value_t = false)]
        no_interaction: bool,
    },
    /// Print the built-in sample schema as JSON
    SampleSchema,
    /// Write a starter crudsmith.toml
    Init {
        /// Laravel project root
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Overwrite an existing config file
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
}

/// Route file choices for `--route`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RouteArg {
    /// routes/api.php
    Api,
    /// routes/web.php
    Web,
}

impl From<RouteArg> for RouteFile {
    fn from(arg: RouteArg) -> Self {
        match arg {
            RouteArg::Api => RouteFile::Api,
            RouteArg::Web => RouteFile::Web,
        }
    }
}

/// Artifacts that can be selected with `--only`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArtifactArg {
    /// Eloquent model
    Model,
    /// API controller
    Controller,
    /// Form request with validation rules
    Request,
    /// JSON resource
    Resource,
    /// Backed enums for enum fields
    Enum,
    /// Create-table migration
    Migration,
    /// Database seeder
    Seeder,
    /// Route registration
    Routes,
}

/// Parse the process arguments and run the selected command on stdio.
///
/// # Errors
///
/// Returns an error if the schema or config cannot be loaded, or if any
/// file cannot be written.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&cli, &mut stdin.lock(), &mut stdout.lock())
}

/// Run a parsed command against the given input and output.
///
/// Prompts read from `input`; everything user-facing is written to `output`.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: &mut R, output: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Crud {
            name,
            schema,
            group,
            table,
            route,
            output: root,
            config,
            force,
            dry_run,
            only,
            no_interaction,
        } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("Name is required");
            }
            let scaffold = load_or_default(config.as_deref(), root)?;
            let raw = read_schema(schema.as_deref())?;
            let interactive = !*no_interaction;
            let fields = normalize_schema(&raw, interactive, input, output);

            print_mapping(output, &fields)?;
            if interactive
                && !TerminalResolver::new(&mut *input, &mut *output)
                    .confirm("Do you want to continue and generate CRUD files?")
            {
                writeln!(output, "Generation aborted.")?;
                return Ok(());
            }

            let group = group.as_deref().unwrap_or(&scaffold.default_group);
            let mut ctx = CrudContext::new(name, group, fields)
                .with_route(route.map(RouteFile::from).unwrap_or(scaffold.route));
            if let Some(table) = table.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                ctx = ctx.with_table(table);
            }

            let options = GenerationOptions {
                force: *force,
                dry_run: *dry_run,
                only: map_only_to_artifacts(only.as_deref()),
                ..GenerationOptions::new(root)
            };
            let files = generate_crud(&ctx, &scaffold, &options)?;

            writeln!(output)?;
            if *dry_run {
                writeln!(output, "🔎 Dry run, nothing written:")?;
            } else {
                writeln!(output, "✅ CRUD generation complete:")?;
            }
            for file in &files {
                writeln!(
                    output,
                    " - [{:<11}] {:<10} {}",
                    file.status.as_str(),
                    file.artifact.as_str(),
                    display_path(&file.path, root)
                )?;
            }
            if files.iter().any(|f| f.status == FileStatus::Skipped) {
                writeln!(output, "Some files already existed; use --force to overwrite.")?;
            }

            writeln!(output)?;
            writeln!(output, "Next steps:")?;
            writeln!(output, " - php artisan migrate")?;
            writeln!(
                output,
                " - php artisan db:seed --class={}Seeder",
                to_studly_case(name)
            )?;
            Ok(())
        }
        Commands::Inspect {
            schema,
            json,
            no_interaction,
        } => {
            let raw = read_schema(schema.as_deref())?;
            let fields = normalize_schema(&raw, !*no_interaction, input, output);
            if *json {
                let rendered = serde_json::to_string_pretty(&fields)
                    .context("Failed to serialize schema mapping")?;
                writeln!(output, "{rendered}")?;
            } else {
                print_mapping(output, &fields)?;
            }
            Ok(())
        }
        Commands::SampleSchema => {
            let rendered = serde_json::to_string_pretty(&default_schema())
                .context("Failed to serialize sample schema")?;
            writeln!(output, "{rendered}")?;
            Ok(())
        }
        Commands::Init { output: root, force } => {
            let path = default_config_path(root);
            let content = render_starter_config()?;
            if write_config_if_missing(&path, &content, *force)? {
                info!(path = %path.display(), "wrote starter config");
                writeln!(output, "✅ Wrote {}", path.display())?;
            } else {
                writeln!(
                    output,
                    "⚠️  {} already exists; use --force to overwrite.",
                    path.display()
                )?;
            }
            Ok(())
        }
    }
}

/// Convert CLI `--only` artifacts to generator artifacts
///
/// `None` means every artifact.
fn map_only_to_artifacts(only: Option<&[ArtifactArg]>) -> Option<Vec<Artifact>> {
    only.map(|parts| {
        parts
            .iter()
            .map(|p| match p {
                ArtifactArg::Model => Artifact::Model,
                ArtifactArg::Controller => Artifact::Controller,
                ArtifactArg::Request => Artifact::Request,
                ArtifactArg::Resource => Artifact::Resource,
                ArtifactArg::Enum => Artifact::Enum,
                ArtifactArg::Migration => Artifact::Migration,
                ArtifactArg::Seeder => Artifact::Seeder,
                ArtifactArg::Routes => Artifact::Routes,
            })
            .collect()
    })
}

fn read_schema(path: Option<&Path>) -> anyhow::Result<RawSchema> {
    match path {
        Some(path) => load_raw_schema(path),
        None => Ok(default_schema()),
    }
}

fn normalize_schema<R: BufRead, W: Write>(
    raw: &RawSchema,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> FieldMetaMap {
    if interactive {
        normalize(raw, &mut TerminalResolver::new(input, output))
    } else {
        normalize(raw, &mut DefaultResolver)
    }
}

fn print_mapping<W: Write>(output: &mut W, fields: &FieldMetaMap) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "📋 Final Schema Mapping:")?;
    for (key, meta) in fields.iter() {
        writeln!(output, " - {}", describe_field(key, meta))?;
    }
    Ok(())
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
