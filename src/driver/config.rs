use super::files::{TmFilepath, TreeFilepath};
use crate::common::identifier::RawIdentifier;
use anyhow::{Result, anyhow};
use clap::Parser as ClapParser;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
pub struct CliArgs {
    tree_filepaths: Vec<PathBuf>,

    #[clap(long = "tree")]
    until_tree: bool,

    #[clap(long = "codegen")]
    until_codegen: bool,

    #[clap(long = "entry", default_value = "main")]
    entry_ident: String,

    #[clap(short = 'o')]
    out_filepath: Option<PathBuf>,
}

pub struct Args {
    pub tree_filepaths: Vec<TreeFilepath>,

    pub until: DriverUntil,

    pub entry_ident: RawIdentifier,

    pub out_filepath: Option<TmFilepath>,
}
impl TryFrom<CliArgs> for Args {
    type Error = anyhow::Error;
    fn try_from(cli_args: CliArgs) -> Result<Self> {
        let until = if cli_args.until_tree {
            DriverUntil::Tree
        } else if cli_args.until_codegen {
            DriverUntil::Codegen
        } else {
            DriverUntil::Emit
        };

        let tree_filepaths = cli_args
            .tree_filepaths
            .into_iter()
            .map(TreeFilepath::try_from)
            .collect::<Result<Vec<_>>>()?;

        if cli_args.out_filepath.is_some() && tree_filepaths.len() != 1 {
            return Err(anyhow!(
                "`-o` requires exactly one input tree; got {}.",
                tree_filepaths.len()
            ));
        }

        Ok(Self {
            tree_filepaths,
            until,
            entry_ident: RawIdentifier::new(cli_args.entry_ident),
            out_filepath: cli_args.out_filepath.map(TmFilepath::from),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DriverUntil {
    /// Load the annotated tree.
    Tree,
    /// Generate the instruction stream, without writing it out.
    Codegen,
    /// Write the `.tm` listing.
    Emit,
}
