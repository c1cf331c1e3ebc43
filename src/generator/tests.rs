#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::ScaffoldConfig;
use crate::schema::{default_schema, normalize, DefaultResolver};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("gen_test_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_context() -> CrudContext {
    let fields = normalize(&default_schema(), &mut DefaultResolver);
    CrudContext::new("product", "Shop", fields)
}

fn options(dir: &std::path::Path) -> GenerationOptions {
    GenerationOptions {
        timestamp: Some(
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        ),
        ..GenerationOptions::new(dir)
    }
}

#[test]
fn test_render_model() {
    let out = render_model(&sample_context(), &ScaffoldConfig::default()).unwrap();
    assert!(out.contains("namespace App\\Models;"));
    assert!(out.contains("class Product extends Model"));
    assert!(out.contains("use SoftDeletes, HasTranslations;"));
    assert!(out.contains("use Spatie\\Translatable\\HasTranslations;"));
    assert!(out.contains("protected $table = 'products';"));
    assert!(out.contains("        'country_id',\n        'created_by',\n    ];"));
    assert!(out.contains("public array $translatable = [\n        'name',\n        'description',\n    ];"));
    assert!(out.contains("public function country(): BelongsTo"));
    assert!(out.contains("return $this->belongsTo(Country::class, 'country_id');"));
    assert!(out.contains("protected function photo(): Attribute"));
    // No field of the sample needs a cast.
    assert!(!out.contains("function casts()"));
}

#[test]
fn test_render_model_casts() {
    let mut ctx = sample_context();
    let raw = serde_json::json!({"price": 9.5, "is_active": true});
    ctx.fields = normalize(raw.as_object().unwrap(), &mut DefaultResolver);
    let out = render_model(&ctx, &ScaffoldConfig::default()).unwrap();
    assert!(out.contains("'price' => 'float',"));
    assert!(out.contains("'is_active' => 'boolean',"));
    assert!(out.contains("use SoftDeletes;"));
    assert!(!out.contains("HasTranslations"));
}

#[test]
fn test_render_controller() {
    let out = render_controller(&sample_context(), &ScaffoldConfig::default()).unwrap();
    assert!(out.contains("namespace App\\Http\\Controllers\\API\\Shop;"));
    assert!(out.contains("use App\\Http\\Requests\\Shop\\ProductRequest;"));
    assert!(out.contains("use App\\Http\\Resources\\Shop\\ProductResource;"));
    assert!(out.contains("use App\\Models\\Product;"));
    assert!(out.contains("class ProductController extends Controller"));
    assert!(out.contains("Product::query()->with(['country'])->latest()->paginate()"));
    assert!(out.contains("public function show(Product $product): ProductResource"));
    assert!(out.contains("public function destroy(Product $product): JsonResponse"));
    assert!(out.contains("$request->file('photo')->store('products', 'public')"));
}

#[test]
fn test_render_request() {
    let out = render_request(&sample_context(), &ScaffoldConfig::default()).unwrap();
    assert!(out.contains("namespace App\\Http\\Requests\\Shop;\n\nuse App\\Rules\\TranslatableNullable;\nuse App\\Rules\\TranslatableRequired;\nuse Illuminate\\Foundation\\Http\\FormRequest;\nuse Illuminate\\Validation\\Rule;\n"));
    assert!(out.contains(
        "'name' => ['required', 'array', new TranslatableRequired('name', ['string'], 'name')],"
    ));
    assert!(out.contains(
        "'description' => ['nullable', 'array', new TranslatableNullable('description', ['string'], 'description')],"
    ));
    assert!(out.contains("Rule::unique('products', 'phone')->ignore($this->route('product'))"));
    assert!(out.contains("'status' => ['nullable', 'in:pending,approved,rejected'],"));
    assert!(out.contains("'country_id' => ['nullable', 'exists:countries,id'],"));
}

#[test]
fn test_render_resource_and_enum() {
    let ctx = sample_context();
    let config = ScaffoldConfig::default();
    let out = render_resource(&ctx, &config).unwrap();
    assert!(out.contains("use App\\Enums\\Shop\\StatusEnum;"));
    assert!(out.contains("class ProductResource extends JsonResource"));
    assert!(out.contains("'display_status' => StatusEnum::resolve($this->status),"));

    let field = enum_fields(&ctx.fields).remove(0);
    let out = render_enum(&ctx, &config, &field).unwrap();
    assert!(out.contains("namespace App\\Enums\\Shop;"));
    assert!(out.contains("enum StatusEnum: string"));
    assert!(out.contains("    case Pending = 'pending';\n    case Approved = 'approved';\n    case Rejected = 'rejected';"));
}

#[test]
fn test_render_migration_and_seeder() {
    let ctx = sample_context();
    let out = render_migration(&ctx).unwrap();
    assert!(out.contains("Schema::create('products', function (Blueprint $table) {"));
    assert!(out.contains("            $table->id();\n            $table->json('name');"));
    assert!(out.contains("$table->foreignId('country_id')->nullable()->constrained('countries');"));
    assert!(out.contains("$table->softDeletes();"));
    assert!(out.contains("Schema::dropIfExists('products');"));

    let out = render_seeder(&ctx, &ScaffoldConfig::default()).unwrap();
    assert!(out.contains("namespace Database\\Seeders;"));
    assert!(out.contains("class ProductSeeder extends Seeder"));
    assert!(out.contains("'status' => 'pending',"));
    assert!(out.contains("'country_id' => 1,"));
}

#[test]
fn test_generate_crud_writes_all_artifacts() {
    let dir = temp_dir();
    let files = generate_crud(&sample_context(), &ScaffoldConfig::default(), &options(&dir)).unwrap();

    let artifacts: Vec<Artifact> = files.iter().map(|f| f.artifact).collect();
    assert_eq!(
        artifacts,
        vec![
            Artifact::Enum,
            Artifact::Model,
            Artifact::Controller,
            Artifact::Request,
            Artifact::Resource,
            Artifact::Migration,
            Artifact::Seeder,
            Artifact::Routes,
        ]
    );
    assert!(files.iter().all(|f| f.status == FileStatus::Created));
    assert!(files.iter().all(|f| f.path.exists()));

    assert!(dir.join("app/Models/Product.php").exists());
    assert!(dir.join("app/Enums/Shop/StatusEnum.php").exists());
    assert!(dir.join("app/Http/Controllers/API/Shop/ProductController.php").exists());
    assert!(dir
        .join("database/migrations/2024_01_02_030405_create_products_table.php")
        .exists());

    let routes = fs::read_to_string(dir.join("routes/api.php")).unwrap();
    assert!(routes.starts_with("<?php\n"));
    assert!(routes.contains("use App\\Http\\Controllers\\API\\Shop\\ProductController;"));
    assert!(routes.contains("Route::apiResource('products', ProductController::class);"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_generate_crud_is_idempotent_without_force() {
    let dir = temp_dir();
    let ctx = sample_context();
    let config = ScaffoldConfig::default();
    generate_crud(&ctx, &config, &options(&dir)).unwrap();

    let mut later = options(&dir);
    later.timestamp = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(0, 0, 0);
    let second = generate_crud(&ctx, &config, &later).unwrap();
    for file in &second {
        let expected = if file.artifact == Artifact::Routes {
            FileStatus::Unchanged
        } else {
            FileStatus::Skipped
        };
        assert_eq!(file.status, expected, "{}", file.path.display());
    }
    // The existing migration is reused instead of adding a second one.
    assert_eq!(fs::read_dir(dir.join("database/migrations")).unwrap().count(), 1);

    let routes = fs::read_to_string(dir.join("routes/api.php")).unwrap();
    assert_eq!(routes.matches("Route::apiResource('products'").count(), 1);

    let forced = generate_crud(
        &ctx,
        &config,
        &GenerationOptions {
            force: true,
            ..options(&dir)
        },
    )
    .unwrap();
    assert!(forced
        .iter()
        .filter(|f| f.artifact != Artifact::Routes)
        .all(|f| f.status == FileStatus::Overwritten));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_generate_crud_dry_run_writes_nothing() {
    let dir = temp_dir();
    let files = generate_crud(
        &sample_context(),
        &ScaffoldConfig::default(),
        &GenerationOptions {
            dry_run: true,
            ..options(&dir)
        },
    )
    .unwrap();
    assert!(!files.is_empty());
    assert!(files.iter().all(|f| f.status == FileStatus::DryRun));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_generate_crud_only_selected() {
    let dir = temp_dir();
    let files = generate_crud(
        &sample_context(),
        &ScaffoldConfig::default(),
        &GenerationOptions {
            only: Some(vec![Artifact::Model, Artifact::Routes]),
            ..options(&dir)
        },
    )
    .unwrap();
    assert_eq!(files.len(), 2);
    assert!(dir.join("app/Models/Product.php").exists());
    assert!(!dir.join("app/Http").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_register_route_appends_to_existing_file() {
    let dir = temp_dir();
    let path = dir.join("routes/api.php");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        "<?php\n\nuse App\\Http\\Controllers\\API\\Auth\\LoginController;\nuse Illuminate\\Support\\Facades\\Route;\n\nRoute::post('login', [LoginController::class, 'login']);\n",
    )
    .unwrap();

    let ctx = sample_context().with_route(RouteFile::Api);
    let status = register_route(&path, &ctx, &ScaffoldConfig::default(), false).unwrap();
    assert_eq!(status, FileStatus::Updated);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(
        "use Illuminate\\Support\\Facades\\Route;\nuse App\\Http\\Controllers\\API\\Shop\\ProductController;\n"
    ));
    assert!(content.ends_with("\nRoute::apiResource('products', ProductController::class);\n"));
    assert!(content.contains("Route::post('login'"));

    let status = register_route(&path, &ctx, &ScaffoldConfig::default(), false).unwrap();
    assert_eq!(status, FileStatus::Unchanged);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_custom_paths_and_namespaces() {
    let dir = temp_dir();
    let mut config = ScaffoldConfig::default();
    config.paths.model = "src/Domain".into();
    config.namespaces.model = "Domain\\Models".into();
    let files = generate_crud(
        &sample_context(),
        &config,
        &GenerationOptions {
            only: Some(vec![Artifact::Model, Artifact::Seeder]),
            ..options(&dir)
        },
    )
    .unwrap();
    assert_eq!(files[0].path, dir.join("src/Domain/Product.php"));
    let seeder = fs::read_to_string(dir.join("database/seeders/ProductSeeder.php")).unwrap();
    assert!(seeder.contains("use Domain\\Models\\Product;"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_migration_path_reuses_existing() {
    let dir = temp_dir();
    let now = NaiveDate::from_ymd_opt(2024, 5, 6)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap();
    let fresh = migration_path(&dir, "products", now).unwrap();
    assert_eq!(fresh, dir.join("2024_05_06_070809_create_products_table.php"));

    let existing = dir.join("2020_01_01_000000_create_products_table.php");
    fs::write(&existing, "").unwrap();
    assert_eq!(migration_path(&dir, "products", now).unwrap(), existing);
    assert_eq!(
        migration_path(&dir, "orders", now).unwrap(),
        dir.join("2024_05_06_070809_create_orders_table.php")
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_starter_config_parses_to_defaults() {
    let rendered = render_starter_config().unwrap();
    let parsed: ScaffoldConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, ScaffoldConfig::default());
}
