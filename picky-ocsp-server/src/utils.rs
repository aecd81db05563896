use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

/// Either a path to a file holding the value or the value itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PathOr<T> {
    Path(PathBuf),
    Pem(T),
}

impl PathOr<String> {
    pub fn read_to_string(&self) -> io::Result<Cow<'_, str>> {
        match self {
            PathOr::Path(path) => std::fs::read_to_string(path).map(Cow::Owned),
            PathOr::Pem(pem) => Ok(Cow::Borrowed(pem)),
        }
    }
}
