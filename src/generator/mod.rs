//! # Generator Module
//!
//! Renders the Laravel CRUD artifacts for one entity from its normalized
//! schema ([`crate::schema::FieldMetaMap`]).
//!
//! ## Overview
//!
//! For an entity `Product` in group `Shop` the generator produces:
//!
//! ```text
//! app/
//! ├── Enums/Shop/StatusEnum.php                 # one per enum field
//! ├── Http/Controllers/API/Shop/ProductController.php
//! ├── Http/Requests/Shop/ProductRequest.php
//! ├── Http/Resources/Shop/ProductResource.php
//! └── Models/Product.php
//! database/
//! ├── migrations/2025_01_31_120000_create_products_table.php
//! └── seeders/ProductSeeder.php
//! routes/api.php                                # route appended
//! ```
//!
//! Paths and namespaces come from [`crate::config::ScaffoldConfig`].
//!
//! ## Architecture
//!
//! ```text
//! FieldMetaMap → fields (per-field PHP fragments) → askama templates → files
//! ```
//!
//! - `fields` builds rule, cast, resource and column lines
//! - `templates` holds one askama template struct and one `write_*`
//!   function per artifact
//! - [`generate_crud`] resolves output paths and drives the writers
//!
//! Existing files are skipped unless forced; the routes file is appended to
//! only when the route is not already registered.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crudsmith::config::ScaffoldConfig;
//! use crudsmith::generator::{generate_crud, CrudContext, GenerationOptions};
//! use crudsmith::schema::{default_schema, normalize, DefaultResolver};
//!
//! # fn main() -> anyhow::Result<()> {
//! let fields = normalize(&default_schema(), &mut DefaultResolver);
//! let ctx = CrudContext::new("product", "Shop", fields);
//! let files = generate_crud(&ctx, &ScaffoldConfig::default(), &GenerationOptions::new("."))?;
//! for file in files {
//!     println!("{} {}", file.status.as_str(), file.path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod fields;
mod project;
mod seed_value;
mod templates;
#[cfg(test)]
mod tests;

pub use context::{CrudContext, RouteFile};
pub use fields::{
    casts, enum_cases, enum_class, enum_fields, fillable, migration_columns, php_literal,
    php_string, relations, resource_lines, validation_rules, EnumCase, EnumField,
    RelationMethod, RuleLine,
};
pub use project::{generate_crud, migration_path, Artifact, GeneratedFile, GenerationOptions};
pub use seed_value::seed_value;
pub use templates::{
    register_route, render_controller, render_enum, render_migration, render_model,
    render_request, render_resource, render_seeder, render_starter_config, route_line,
    FileStatus, WriteMode,
};
