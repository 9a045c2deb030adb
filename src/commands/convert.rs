use clap::Args;
use serde::Serialize;

use phpns::config::{self, ConvertConfig};
use phpns::convert::{self, ConversionReport};
use phpns::paths;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ConvertArgs {
    /// Library root containing a `src` directory
    pub source: String,

    /// Output root; its `src` directory is wiped and rebuilt
    pub target: String,

    /// Namespace root, e.g. `Facebook\Libphutil` (overrides the config file)
    #[arg(long)]
    pub namespace: Option<String>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Print a JSON report instead of progress lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConvertOutput {
    #[serde(rename = "convert")]
    Convert {
        source: String,
        target: String,
        #[serde(flatten)]
        report: ConversionReport,
    },
}

/// Settings from `--config`, with `--namespace` taking precedence.
pub fn resolve_config(args: &ConvertArgs) -> phpns::Result<ConvertConfig> {
    let config_path = args.config.as_deref().map(paths::expand);
    let settings = config::load_config(config_path.as_deref())?;

    Ok(match args.namespace.as_deref() {
        Some(namespace) => settings.with_namespace(namespace),
        None => settings,
    })
}

pub fn run(args: ConvertArgs) -> CmdResult<ConvertOutput> {
    let settings = resolve_config(&args)?;
    let source = paths::expand(&args.source);
    let target = paths::expand(&args.target);
    let print_progress = !args.json;

    let report = convert::convert(&source, &target, &settings, |event| {
        if print_progress {
            println!("{}", event);
        }
    })?;

    Ok((
        ConvertOutput::Convert {
            source: source.to_string_lossy().to_string(),
            target: target.to_string_lossy().to_string(),
            report,
        },
        0,
    ))
}
