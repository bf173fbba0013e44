use std::path::PathBuf;

use clap::Parser;
use path_slash::PathExt;

use dynimport::options::DynimportOptions;
use dynimport::plugin::{DynimportPlugin, OnLoadArgs};

#[derive(Parser, Debug)]
#[command(name = "dynimport")]
#[command(about = "Preview the dynamic-import rewrite a bundler load hook would see", long_about = None)]
struct Cli {
    /// Extensions eligible for glob transformation (e.g. .js,.jsx).
    #[arg(long = "extensions", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Rewrite relative .js import paths to absolute ones.
    #[arg(long = "relative-to-absolute")]
    relative_to_absolute: bool,

    /// Loader tag assigned to non-JSON output (default: js).
    #[arg(long)]
    loader: Option<String>,

    /// Regex selecting which files to process (default: \.(js|json)$).
    #[arg(long)]
    filter: Option<String>,

    /// Files to run through the load hook.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let options = DynimportOptions {
        transform_extensions: (!cli.extensions.is_empty()).then(|| cli.extensions.clone()),
        change_relative_to_absolute: cli.relative_to_absolute,
        filter: cli.filter.clone(),
        loader: cli.loader.clone(),
    };
    let plugin = match DynimportPlugin::new(options) {
        Ok(plugin) => plugin,
        Err(err) => {
            eprintln!("dynimport: {err}");
            std::process::exit(2);
        }
    };

    let mut exit_code = 0;
    for file in &cli.files {
        if !plugin.wants(file) {
            eprintln!(
                "dynimport: {} does not match the filter, skipped",
                file.to_slash_lossy()
            );
            continue;
        }
        match plugin.load(&OnLoadArgs { path: file.clone() }) {
            Ok(output) => print!("{}", output.contents),
            Err(err) => {
                eprintln!("{err}");
                exit_code = 1;
            }
        }
    }
    std::process::exit(exit_code);
}
