use clap::Args;
use serde::Serialize;

use phpns::convert::{extract, Classification, Extraction};
use phpns::{io, paths};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct SymbolsArgs {
    /// PHP file to inspect
    pub file: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum SymbolsOutput {
    #[serde(rename = "symbols")]
    Symbols {
        file: String,
        classification: Classification,
        #[serde(flatten)]
        extraction: Extraction,
    },
}

pub fn run(args: SymbolsArgs) -> CmdResult<SymbolsOutput> {
    let path = paths::expand(&args.file);
    let (source, _) = io::read_text(&path, &format!("read {}", path.display()))?;
    let extraction = extract::try_extract(&source)?;

    Ok((
        SymbolsOutput::Symbols {
            file: path.to_string_lossy().to_string(),
            classification: extraction.classification(),
            extraction,
        },
        0,
    ))
}
