use clap::{Parser, Subcommand};
use rsm_site::config::{self, ToolConfig};
use rsm_site::site::{JsonFileRepository, SiteDocument, SiteError, SiteRepository};
use rsm_site::{check, hero, markup, output, schema_org, verification};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rsm-site")]
#[command(about = "Build-time generators for the driving school website")]
#[command(long_about = "\
Build-time generators for the driving school website

Every command reads the site config store (siteConfig.json) and derives a
static artifact from it. Missing fields fail the command with a non-zero
exit status, so a broken config stops the deploy.

Layout:

  .
  ├── rsm-site.toml                # Tool config (optional)
  ├── src/data/siteConfig.json     # Site config store
  └── public/
      ├── <token>.txt              # Bing site verification
      ├── schema-org.json          # Organization structured data
      └── partials/                # Lightbox, booking popup, hero, gallery

Run 'rsm-site gen-config' to generate a documented rsm-site.toml.")]
#[command(version)]
struct Cli {
    /// Project root holding rsm-site.toml
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Site config store (overrides paths.site_config)
    #[arg(long, global = true)]
    site_config: Option<PathBuf>,

    /// Public output directory (overrides paths.public_dir)
    #[arg(long, global = true)]
    public: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the Bing site verification file
    Verification,
    /// Write schema-org.json for the business
    SchemaOrg,
    /// Feature a random hero image in the site config
    ImageOfTheDay,
    /// Render the widget HTML partials
    Partials,
    /// Run verification then schema-org
    Build,
    /// Validate the site config without writing anything
    Check,
    /// Print a stock rsm-site.toml with all options documented
    GenConfig,
}

/// Resolved locations for one run.
struct Paths {
    root: PathBuf,
    site_config: PathBuf,
    public: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli, config: &ToolConfig) -> Self {
        let under_root = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                cli.root.join(p)
            }
        };
        Self {
            root: cli.root.clone(),
            site_config: under_root(cli.site_config.as_deref().unwrap_or(config.paths.site_config.as_path())),
            public: under_root(cli.public.as_deref().unwrap_or(config.paths.public_dir.as_path())),
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Verification => {
            let (_, paths) = setup(&cli)?;
            let document = JsonFileRepository::new(&paths.site_config).load()?;
            write_verification(&document, &paths)?;
        }
        Command::SchemaOrg => {
            let (tool_config, paths) = setup(&cli)?;
            let document = JsonFileRepository::new(&paths.site_config).load()?;
            write_schema(&document, &tool_config, &paths)?;
        }
        Command::ImageOfTheDay => {
            let (_, paths) = setup(&cli)?;
            let repo = JsonFileRepository::new(&paths.site_config);
            let chosen = hero::rotate_image_of_the_day(&repo, &mut rand::thread_rng())?;
            output::print_image_of_the_day(&chosen, repo.path(), &paths.root);
        }
        Command::Partials => {
            let (tool_config, paths) = setup(&cli)?;
            let document = JsonFileRepository::new(&paths.site_config).load()?;
            let written = markup::write_partials(&document, &tool_config, &paths.public)?;
            output::print_partials(&written, &paths.root);
        }
        Command::Build => {
            let (tool_config, paths) = setup(&cli)?;
            let document = JsonFileRepository::new(&paths.site_config).load()?;
            println!("==> Verification");
            write_verification(&document, &paths)?;
            println!("==> Schema.org");
            write_schema(&document, &tool_config, &paths)?;
            println!("==> Build complete: {}", paths.public.display());
        }
        Command::Check => {
            let (tool_config, paths) = setup(&cli)?;
            println!("==> Checking {}", paths.site_config.display());
            let document = JsonFileRepository::new(&paths.site_config).load()?;
            let items = check::check_site(&document, &tool_config, &paths.public);
            output::print_check(&items);
            if !check::all_passed(&items) {
                return Err("site config check failed".into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `rsm-site.toml` from the root and resolve paths against it.
fn setup(cli: &Cli) -> Result<(ToolConfig, Paths), config::ConfigError> {
    let tool_config = config::load_config(&cli.root)?;
    let paths = Paths::resolve(cli, &tool_config);
    Ok((tool_config, paths))
}

fn write_verification(
    document: &SiteDocument,
    paths: &Paths,
) -> Result<(), SiteError> {
    let file = verification::VerificationFile::from_site(document, &paths.public)?;
    file.write()?;
    output::print_verification(&file, &paths.root);
    Ok(())
}

fn write_schema(
    document: &SiteDocument,
    tool_config: &ToolConfig,
    paths: &Paths,
) -> Result<(), SiteError> {
    let organization = schema_org::Organization::from_site(document, &tool_config.locale)?;
    let written = schema_org::write_schema(&organization, &paths.public)?;
    output::print_schema(&organization, &written, &paths.root);
    Ok(())
}
