use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use works_gallery::{config, output, site};

#[derive(Parser)]
#[command(name = "works-gallery")]
#[command(about = "Static gallery of photographic works grouped by camera")]
#[command(long_about = "\
Static gallery of photographic works grouped by camera

Reads an XML works feed, groups the works by camera make and model, and
writes a flat directory of HTML pages:

  site/
  ├── index.html               # make dropdown + first thumbnails
  ├── Canon.html               # one page per make
  ├── Canon-EOS-20D.html       # one page per model
  └── nomake.html              # works without a make (only if any)

An optional config.toml in the working directory sets the site title,
thumbnails per page, colors and HTTP settings. Log verbosity follows
RUST_LOG (default: warn).")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Feed location: http(s):// URL, file:// URL or local path
    feed: String,

    /// Directory the pages are written to (created if missing)
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "build failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), site::BuildError> {
    let site_config = config::load_config(Path::new("."))?;
    let report = site::build_site(&cli.feed, &cli.output, &site_config)?;
    output::print_catalog_output(&report.catalog);
    println!();
    output::print_site_output(&report.pages, &cli.output);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
