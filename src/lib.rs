//! # crudsmith
//!
//! **crudsmith** scaffolds Laravel CRUD modules from a loosely written sample
//! record. It infers a typed field schema (types, modifiers, enums, file
//! uploads, foreign-key relations, translatable fields) and renders the
//! model, controller, form request, API resource, backed enums, migration,
//! seeder and route registration for it.
//!
//! ## Architecture
//!
//! - **[`schema`]** - Schema inference: modifier parsing, value and key
//!   pattern matching, relation inference and normalization
//! - **[`generator`]** - Askama-rendered PHP artifacts and the project writer
//! - **[`config`]** - `crudsmith.toml` namespaces, paths and defaults
//! - **[`naming`]** - Case and plural helpers shared by inference and generation
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `crudsmith` command line
//!
//! ### Flow
//!
//! ```text
//! sample record (JSON/YAML)
//!     └─ schema::normalize ──► FieldMetaMap
//!            │  modifiers ─► value matcher ─► key matcher ─► resolver prompt
//!            │  relation inference ─► translatable confirmation
//!            ▼
//!     generator::generate_crud ──► app/, database/, routes/
//! ```
//!
//! ## Schema Syntax
//!
//! Keys may carry modifier markers: `*` not null, `^` unique, `!` default
//! (the first enum value, or the key itself). Values are samples or type
//! hints:
//!
//! ```json
//! {
//!   "*name": {"ar": "اسم", "en": "Name"},
//!   "^email": "someone@example.com",
//!   "status": "enum[pending,approved,rejected]",
//!   "photo": "file",
//!   "country_id": 1
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! crudsmith sample-schema > product.json
//! crudsmith crud Product --schema product.json --group Shop --output path/to/laravel
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod schema;
