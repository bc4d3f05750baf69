use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    host::Host,
    path_env::PathVar,
    script::RunDir,
};

pub const RUNDEF_FILE: &str = "rundef.json";

const VIVADO_ROOT: &str = "/opt/Xilinx/Vivado/2018.1";

/// Program and literal arguments of the synthesis step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl StepCommand {
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDef {
    pub host: Host,
    pub path_var: String,
    pub toolchain: Vec<PathBuf>,
    pub step: StepCommand,
}

impl RunDef {
    /// Synthesis run of `Board_Nexys4DDR` with Vivado 2018.1 on Linux.
    pub fn builtin() -> Self {
        let toolchain: Vec<PathBuf> = [
            "ids_lite/ISE/bin/lin64",
            "ids_lite/ISE/lib/lin64",
            "bin",
        ]
        .into_iter()
        .map(|dir| [VIVADO_ROOT, dir].iter().collect::<PathBuf>())
        .collect();

        let args = [
            "-log",
            "Board_Nexys4DDR.vds",
            "-m64",
            "-product",
            "Vivado",
            "-mode",
            "batch",
            "-messageDb",
            "vivado.pb",
            "-notrace",
            "-source",
            "Board_Nexys4DDR.tcl",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            host: Host::Linux,
            path_var: "PATH".into(),
            toolchain,
            step: StepCommand {
                program: "vivado".into(),
                args,
            },
        }
    }

    /// Loads the definition stored next to the run, falling back to the builtin one.
    pub fn load(run_dir: &RunDir) -> Result<Self> {
        match run_dir.read_sibling(RUNDEF_FILE)? {
            Some(text) => {
                let rundef: Self =
                    serde_json::from_str(&text).map_err(|source| Error::RunDef {
                        path: run_dir.sibling(RUNDEF_FILE),
                        source,
                    })?;
                rundef
                    .search_path()
                    .check()
                    .map_err(|e| Error::InvalidRunDef {
                        path: run_dir.sibling(RUNDEF_FILE),
                        reason: e.to_string(),
                    })?;
                debug!("using {}", run_dir.sibling(RUNDEF_FILE).display());
                Ok(rundef)
            }
            None => {
                debug!("{RUNDEF_FILE} not found, using builtin run definition");
                Ok(Self::builtin())
            }
        }
    }

    pub fn check_host(&self) -> Result<()> {
        let current = Host::current();
        if self.host != current {
            return Err(Error::ForeignHost {
                generated: self.host,
                current,
            });
        }
        Ok(())
    }

    pub fn search_path(&self) -> PathVar<'_> {
        PathVar::new(&self.path_var, &self.toolchain)
    }
}
