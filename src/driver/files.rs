use anyhow::{Result, anyhow};
use derive_more::Deref;
use std::{ffi::OsStr, path::PathBuf};

/// An annotated tree, serialized by the front end.
#[derive(Deref, Debug)]
pub struct TreeFilepath(PathBuf);
impl TryFrom<PathBuf> for TreeFilepath {
    type Error = anyhow::Error;
    fn try_from(p: PathBuf) -> Result<Self> {
        if p.extension() == Some(OsStr::new("json")) {
            Ok(Self(p))
        } else {
            Err(anyhow!("The annotated tree file must have extension `.json`. {p:?}"))
        }
    }
}

/// A TM listing, loadable by the TM simulator.
#[derive(Deref, Clone, Debug)]
pub struct TmFilepath(PathBuf);
impl From<PathBuf> for TmFilepath {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}
impl<'a> From<&'a TreeFilepath> for TmFilepath {
    fn from(tree_filepath: &'a TreeFilepath) -> Self {
        let mut tm_filepath = PathBuf::from(tree_filepath as &PathBuf);
        tm_filepath.set_extension("tm");
        Self(tm_filepath)
    }
}
