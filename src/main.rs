use clap::{Parser, Subcommand};
use mechanicus_codex::catalog::Catalog;
use mechanicus_codex::site::Site;
use mechanicus_codex::{config, generate, output, quotes, serve};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "mechanicus-codex")]
#[command(about = "A themed catalog of web-performance techniques")]
#[command(long_about = "\
A themed catalog of web-performance techniques

Articles live in a TOML registry (built in, or --source). Categories are
fixed tables; an article belongs to the first category that lists its slug,
or to Miscellanea if none does.

Registry format:

  [[article]]
  slug = \"react-memo\"          # unique, lowercase, URL-safe
  title = \"React.memo\"
  summary = \"...\"
  why = \"...\"                  # markdown
  example = \"...\"              # shown verbatim
  when_not = \"...\"             # markdown
  benediction = \"...\"          # optional; synthesized from the slug if absent

Config directory:

  site/
  ├── config.toml                # Title, colors, build and serve settings
  └── assets/                    # Copied verbatim into dist/assets/

Run 'mechanicus-codex gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Article registry (TOML). Defaults to the built-in codex
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Directory holding config.toml and assets/
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Output directory for build
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the registry and config, list categories and findings
    Check,
    /// Render the static site into the output directory
    Build,
    /// Serve pages over HTTP, rendered on demand
    Serve {
        /// Listen address (overrides serve.addr in config.toml)
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Print the benediction for a slug
    Quote {
        slug: String,
        /// Synthesize for this title instead of using the registry entry
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the catalog as JSON
    Export,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let load = || Site::load(cli.source.as_deref(), &cli.config);

    match cli.command {
        Command::Check => {
            let site = load()?;
            let findings = site.registry().audit(site.taxonomy());
            output::print_check_output(&site, &findings);
            println!("==> Codex is valid");
        }
        Command::Build => {
            let site = load()?;
            init_thread_pool(&site.config().build);
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&site, &cli.output)?;
            output::print_generate_output(&site, &report);
            println!("==> Build complete: {}", report.output_dir.display());
        }
        Command::Serve { addr } => {
            let site = load()?;
            let addr = match addr {
                Some(addr) => addr,
                None => site.config().serve.socket_addr()?,
            };
            output::print_serve_banner(&site, addr);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve::run(Arc::new(site), addr))?;
        }
        Command::Quote { slug, title } => {
            let site = load()?;
            let line = match (title, site.registry().get(&slug)) {
                (Some(title), _) => quotes::synthesize(site.taxonomy(), &slug, &title),
                (None, Some(article)) => site.flavor_text(article).into_owned(),
                (None, None) => quotes::synthesize(site.taxonomy(), &slug, &slug),
            };
            println!("{}", line);
        }
        Command::Export => {
            let site = load()?;
            println!("{}", Catalog::build(&site).to_json()?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so command output on stdout stays clean.
///
/// `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Initialize the rayon thread pool based on build config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
