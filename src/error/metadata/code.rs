use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Display};
use strum_macros::{EnumIter, EnumString};

/// `Code` contains the error codes associated with specific errors.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, EnumString, EnumIter)]
pub enum Code {
    E001,
    E002,
    E003,
    E004,
    E005,
    E006,
    E007,
    E008,
    E009,
    E010,
    E011,
    E012,
    E013,
    E014,
    E015,
    E016,
}

impl Display for Code {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", &self)
    }
}

impl Code {
    // builds a Map of every possible code and its explanation, so we can
    // access from the `explain` function
    fn explanations() -> HashMap<Code, &'static str> {
        let contents = vec![
            (Code::E001, include_str!("./codes/E001.md")),
            (Code::E002, include_str!("./codes/E002.md")),
            (Code::E003, include_str!("./codes/E003.md")),
            (Code::E004, include_str!("./codes/E004.md")),
            (Code::E005, include_str!("./codes/E005.md")),
            (Code::E006, include_str!("./codes/E006.md")),
            (Code::E007, include_str!("./codes/E007.md")),
            (Code::E008, include_str!("./codes/E008.md")),
            (Code::E009, include_str!("./codes/E009.md")),
            (Code::E010, include_str!("./codes/E010.md")),
            (Code::E011, include_str!("./codes/E011.md")),
            (Code::E012, include_str!("./codes/E012.md")),
            (Code::E013, include_str!("./codes/E013.md")),
            (Code::E014, include_str!("./codes/E014.md")),
            (Code::E015, include_str!("./codes/E015.md")),
            (Code::E016, include_str!("./codes/E016.md")),
        ];
        contents.into_iter().collect()
    }

    /// For a given error code, returns a markdown string with a given error's
    /// explanation. Explanations are in ./codes
    pub fn explain(&self) -> String {
        match Code::explanations().get(self) {
            Some(explanation) => format!("**{}**\n\n{}\n\n", &self, explanation.trim()),
            None => "Explanation not available".to_string(),
        }
    }
}
