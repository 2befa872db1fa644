use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use squeeze_core::NodeRef;

/// Where the IR program comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrInput {
    Inline(String),
    Stdin,
    File(PathBuf),
    Missing,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IR program is required: use a positional file, \"-\" for stdin, or -i/--ir")]
    Missing,
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid IR in {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
}

impl IrInput {
    /// Inline text wins over a path; `-` means stdin.
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        match (text, path) {
            (Some(text), _) => IrInput::Inline(text),
            (None, Some(path)) if path.as_os_str() == "-" => IrInput::Stdin,
            (None, Some(path)) => IrInput::File(path),
            (None, None) => IrInput::Missing,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            IrInput::File(path) => Some(path),
            _ => None,
        }
    }

    fn origin(&self) -> String {
        match self {
            IrInput::Inline(_) => "--ir".to_owned(),
            IrInput::Stdin => "<stdin>".to_owned(),
            IrInput::File(path) => format!("'{}'", path.display()),
            IrInput::Missing => String::new(),
        }
    }

    pub fn load(&self) -> Result<NodeRef, LoadError> {
        let json = match self {
            IrInput::Inline(text) => text.clone(),
            IrInput::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(LoadError::Stdin)?;
                buf
            }
            IrInput::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?,
            IrInput::Missing => return Err(LoadError::Missing),
        };
        squeeze_core::parse_program(&json).map_err(|source| LoadError::Parse {
            origin: self.origin(),
            source,
        })
    }
}
