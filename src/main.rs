use clap::{Parser, Subcommand};
use route_tree::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "route-tree")]
#[command(about = "Generate a nested route table from a views directory")]
#[command(long_about = "\
Generate a nested route table from a views directory

Every page file under the views root becomes a route. Directories become
parent routes bound to a named layout; [param] segments become :param.

Project structure:

  .
  ├── routes.toml                  # Generator config (optional)
  └── src/
      ├── layouts/
      │   ├── DefaultLayout.vue    # Named layouts, referenced by meta.layout
      │   └── AdminLayout.vue
      └── views/
          ├── index.vue            # → /
          ├── AuthLogin.vue        # → /AuthLogin  (Auth* pages require auth)
          ├── admin/
          │   ├── route.json       # Route config for every page in admin/
          │   ├── users.vue        # → /admin [AdminLayout] → /admin/users
          │   └── roles.vue        # → /admin/roles
          └── users/
              └── [id].vue         # → /users [DefaultLayout] → /users/:id

Route config resolution (later wins for meta, first wins for the rest):
  meta:                  computed defaults → route.json → <route> block
  name, redirect, props: route.json → <route> block

Set RUST_LOG=debug for per-page progress.

Run 'route-tree gen-config' to generate a documented routes.toml.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Config file (defaults to <project>/routes.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the route table as JSON
    Generate {
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the route tree and warnings; fail if any page was dropped
    Check,
    /// Print a stock routes.toml with all options documented
    GenConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Command::Generate { output: out } => {
            let config = load(&cli)?;
            let generated = generate::generate(&cli.project, &config)?;
            let json = serde_json::to_string_pretty(&generated.routes)?;
            match out {
                Some(path) => {
                    if let Some(parent) = path.parent()
                        && !parent.as_os_str().is_empty()
                    {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json + "\n")?;
                    output::print_generate_output(&generated);
                    println!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Check => {
            let config = load(&cli)?;
            let generated = generate::generate(&cli.project, &config)?;
            output::print_generate_output(&generated);
            if generated.skipped_count() > 0 {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load(cli: &Cli) -> Result<config::GeneratorConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(&cli.project),
    }
}
