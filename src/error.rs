use std::{env::JoinPathsError, io, path::PathBuf};

use crate::host::Host;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open run directory '{}': {source}", path.display())]
    RunDir { path: PathBuf, source: io::Error },
    #[error("invalid run definition '{}': {source}", path.display())]
    RunDef {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid run definition '{}': {reason}", path.display())]
    InvalidRunDef { path: PathBuf, reason: String },
    #[error("invalid variable name '{name}': {reason}")]
    InvalidVarName { name: String, reason: &'static str },
    #[error("invalid entry in '{name}': {reason}")]
    InvalidVarEntry { name: String, reason: &'static str },
    #[error("cannot build search path: {0}")]
    JoinPaths(#[from] JoinPathsError),
    #[error("failed to run '{program}': {source}")]
    Spawn { program: String, source: io::Error },
    #[error("*** Halting run - EA reset detected ({}) ***", stop_file.display())]
    Halted { stop_file: PathBuf },
    #[error(
        "this run definition was generated under a different operating system \
         (generated: {generated}, current: {current}); update its toolchain paths before executing it"
    )]
    ForeignHost { generated: Host, current: Host },
    #[error("{0}")]
    Io(#[from] io::Error),
}
