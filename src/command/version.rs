use clap::Parser;
use serde::Serialize;

use crate::command::AppctlOutput;
use crate::{AppctlResult, PKG_NAME, PKG_VERSION};

#[derive(Debug, Serialize, Parser)]
pub struct Version {}

impl Version {
    pub fn run(&self) -> AppctlResult<AppctlOutput> {
        Ok(AppctlOutput::Version(format!("{PKG_NAME} {PKG_VERSION}")))
    }
}
