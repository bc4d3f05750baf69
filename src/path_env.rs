use std::{
    env,
    ffi::{OsStr, OsString},
    path::PathBuf,
    process::Command,
};

use tracing::debug;

use crate::error::{Error, Result};

#[cfg(windows)]
pub const DELIMITER: &str = ";";
#[cfg(not(windows))]
pub const DELIMITER: &str = ":";

/// A PATH-like variable together with the directories prepended to it.
#[derive(Debug, Clone, Copy)]
pub struct PathVar<'a> {
    name: &'a str,
    entries: &'a [PathBuf],
}

impl<'a> PathVar<'a> {
    pub fn new(name: &'a str, entries: &'a [PathBuf]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Rejects names and entries the process environment cannot hold.
    pub fn check(&self) -> Result<()> {
        let invalid_name = |reason| Error::InvalidVarName {
            name: self.name.to_string(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid_name("name is empty"));
        }
        if self.name.contains('=') {
            return Err(invalid_name("name contains '='"));
        }
        if self.name.contains('\0') {
            return Err(invalid_name("name contains NUL"));
        }
        if self
            .entries
            .iter()
            .any(|entry| entry.to_string_lossy().contains('\0'))
        {
            return Err(Error::InvalidVarEntry {
                name: self.name.to_string(),
                reason: "entry contains NUL",
            });
        }

        Ok(())
    }

    /// Prepended entries joined with the platform delimiter.
    pub fn prefix(&self) -> Result<OsString> {
        self.check()?;
        Ok(env::join_paths(self.entries)?)
    }

    /// Computes the new value for `current`. An absent or empty value yields the bare
    /// prefix, otherwise `current` is kept as is after the prefix.
    pub fn extend(&self, current: Option<&OsStr>) -> Result<OsString> {
        let mut value = self.prefix()?;

        match current {
            Some(current) if !current.is_empty() => {
                if value.is_empty() {
                    return Ok(current.to_owned());
                }
                value.push(DELIMITER);
                value.push(current);
            }
            _ => {}
        }

        Ok(value)
    }

    /// Extends the variable in the environment of the current process, so every
    /// child spawned afterwards inherits it.
    pub fn apply(&self) -> Result<OsString> {
        self.check()?;
        let current = env::var_os(self.name);
        let value = self.extend(current.as_deref())?;

        debug!("{} = {}", self.name, value.to_string_lossy());
        env::set_var(self.name, &value);

        Ok(value)
    }

    /// Extends the variable for `cmd` only.
    pub fn apply_to(&self, cmd: &mut Command) -> Result<OsString> {
        self.check()?;
        let current = env::var_os(self.name);
        let value = self.extend(current.as_deref())?;

        cmd.env(self.name, &value);

        Ok(value)
    }
}
