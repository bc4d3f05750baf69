pub mod error;
pub mod host;
pub mod path_env;
pub mod rundef;
pub mod script;
pub mod step;

pub use crate::{
    error::{Error, Result},
    host::Host,
    path_env::PathVar,
    rundef::{RunDef, StepCommand, RUNDEF_FILE},
    script::RunDir,
    step::{Marker, Step, StepOutcome, STOP_FILE},
};
