use clap::Parser;
use serde::Serialize;

use crate::command::AppctlOutput;
use crate::error::Code;
use crate::AppctlResult;

#[derive(Debug, Serialize, Parser)]
pub struct Explain {
    /// The full error code. For example, E005
    #[arg(value_parser = code_from_str)]
    code: Code,
}

fn code_from_str(code: &str) -> Result<Code, String> {
    code.to_uppercase()
        .parse()
        .map_err(|_| format!("'{code}' is not an appctl error code"))
}

impl Explain {
    pub fn run(&self) -> AppctlResult<AppctlOutput> {
        Ok(AppctlOutput::ErrorExplanation(self.code.explain()))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn codes_are_case_insensitive() {
        let explain = Explain::parse_from(["explain", "e005"]);
        assert_eq!(explain.code, Code::E005);
        assert!(Explain::try_parse_from(["explain", "E999"]).is_err());
    }

    #[test]
    fn explanations_start_with_the_code() {
        let output = Explain::parse_from(["explain", "E001"]).run().unwrap();
        match output {
            AppctlOutput::ErrorExplanation(text) => assert!(text.starts_with("**E001**")),
            other => panic!("unexpected output {other:?}"),
        }
    }
}
