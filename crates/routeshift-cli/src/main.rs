//! routeshift CLI - Command line interface for the Next.js to TanStack Router migration

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use routeshift_cli::config::{Config, Overrides};
use routeshift_cli::report::{print_summary, print_warnings, report_parse_error};
use routeshift_cli::{logging, migrate, transform_source, FileOutcome, MigrateError};
use routeshift_routes::{discover_route_files, find_app_dir, RouteKind};
use routeshift_syntax::{Dialect, SyntaxError};
use routeshift_transform::{LayoutVariant, TransformKind, TransformOptions};

#[derive(Parser)]
#[command(name = "routeshift")]
#[command(about = "Migrate a Next.js App Router project to TanStack Router", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v for debug, -vv for everything)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate every route file of a project
    Migrate {
        /// Project root containing app/ or src/app/
        #[arg(default_value = ".")]
        project: PathBuf,
        /// Transform and report without writing
        #[arg(long)]
        dry_run: bool,
        /// Delete originals instead of keeping .backup copies
        #[arg(long)]
        no_backup: bool,
        /// Do not run the package manager
        #[arg(long)]
        no_install: bool,
        /// Drop next/image imports instead of switching to @unpic/react
        #[arg(long)]
        no_image_rewrite: bool,
        #[arg(long, value_enum)]
        layout_variant: Option<Variant>,
    },
    /// Transform a single file and print the result
    Transform {
        /// Input file
        file: PathBuf,
        /// Route file kind, inferred from the file name when omitted
        #[arg(short, long, value_enum)]
        kind: Option<Kind>,
        /// Route path passed to createFileRoute
        #[arg(short, long, default_value = "/")]
        route: String,
        #[arg(long, value_enum)]
        layout_variant: Option<Variant>,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the route files of a project and where they will be written
    Routes {
        #[arg(default_value = ".")]
        project: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    FontAware,
    Plain,
}

impl From<Variant> for LayoutVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::FontAware => LayoutVariant::FontAware,
            Variant::Plain => LayoutVariant::Plain,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Page,
    RootLayout,
    Layout,
    Loading,
    Error,
    Api,
}

impl From<Kind> for TransformKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Page => TransformKind::Page,
            Kind::RootLayout => TransformKind::RootLayout,
            Kind::Layout => TransformKind::Layout,
            Kind::Loading => TransformKind::Loading,
            Kind::Error => TransformKind::Error,
            Kind::Api => TransformKind::Api,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Migrate {
            project,
            dry_run,
            no_backup,
            no_install,
            no_image_rewrite,
            layout_variant,
        } => {
            let overrides = Overrides {
                layout_variant: layout_variant.map(Into::into),
                keep_backups: no_backup.then_some(false),
                rewrite_image_imports: no_image_rewrite.then_some(false),
                install_packages: no_install.then_some(false),
                dry_run: dry_run.then_some(true),
            };
            cmd_migrate(&project, &overrides)
        }
        Commands::Transform {
            file,
            kind,
            route,
            layout_variant,
            output,
        } => cmd_transform(&file, kind, route, layout_variant, output),
        Commands::Routes { project, json } => cmd_routes(&project, json),
    }
}

fn cmd_migrate(project: &Path, overrides: &Overrides) {
    let config = match Config::load(project) {
        Ok(config) => config.apply(overrides),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = match migrate(project, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Migrated { warnings, .. } if !warnings.is_empty() => {
                print_warnings(&file.route.original_path, warnings);
            }
            FileOutcome::Failed(MigrateError::Parse { path, text, error }) => {
                report_parse_error(text, path, error);
            }
            _ => {}
        }
    }
    print_summary(&report, config.dry_run);

    if !report.dependencies.is_empty() {
        let add: Vec<&str> = report.dependencies.add.iter().map(String::as_str).collect();
        let remove: Vec<&str> = report.dependencies.remove.iter().map(String::as_str).collect();
        if !add.is_empty() {
            println!("packages to add: {}", add.join(", "));
        }
        if !remove.is_empty() {
            println!("packages to remove: {}", remove.join(", "));
        }
    }

    if let Some(e) = &report.dependency_error {
        eprintln!("Error updating dependencies: {}", e);
    }

    if report.failed() > 0 || report.dependency_error.is_some() {
        std::process::exit(1);
    }
}

fn cmd_transform(
    file: &Path,
    kind: Option<Kind>,
    route: String,
    layout_variant: Option<Variant>,
    output: Option<PathBuf>,
) {
    let source = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let stem = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    let kind = kind
        .map(TransformKind::from)
        .unwrap_or_else(|| infer_kind(&stem, &route));

    let mut options = TransformOptions::new(kind, route, stem);
    if let Some(variant) = layout_variant {
        options.layout_variant = variant.into();
    }

    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let transformed = match transform_source(&source, Dialect::from_extension(extension), options) {
        Ok(output) => output,
        Err(e @ SyntaxError::Parse { .. }) => {
            report_parse_error(&source, file, &e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_warnings(file, &transformed.result.warnings);

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &transformed.code) {
                eprintln!("Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!("Wrote {}", path.display());
        }
        None => print!("{}", transformed.code),
    }
}

/// Kind for a file outside a project: by stem, falling back to a page
fn infer_kind(stem: &str, route: &str) -> TransformKind {
    match RouteKind::from_stem(stem) {
        Some(RouteKind::Layout) if route == "/" => TransformKind::RootLayout,
        Some(RouteKind::Layout) => TransformKind::Layout,
        Some(RouteKind::Loading) => TransformKind::Loading,
        Some(RouteKind::Error) => TransformKind::Error,
        Some(RouteKind::Api) => TransformKind::Api,
        _ => TransformKind::Page,
    }
}

fn cmd_routes(project: &Path, json: bool) {
    let routes = match find_app_dir(project).and_then(|app| discover_route_files(&app.path)) {
        Ok(routes) => routes,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&routes) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if routes.is_empty() {
        println!("No route files found");
        return;
    }

    for route in &routes {
        println!(
            "{:<10} {:<24} {} → {}",
            route.kind.as_str(),
            route.route_path(),
            route.original_path.display(),
            route.target_path.display()
        );
    }
}
