use std::io::{self, BufRead};

/// Asks a yes/no question on stderr and reads the answer from `input`.
///
/// Anything other than `y` or `n` re-asks the question. Returns `None` when
/// `attempts` answers in a row were unrecognised or the input was closed.
pub fn confirm_with_retries<R>(message: &str, attempts: usize, input: &mut R) -> io::Result<Option<bool>>
where
    R: BufRead,
{
    for _ in 0..attempts {
        eprint!("{message} (y/n)? ");
        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        match answer.trim() {
            "y" | "Y" => return Ok(Some(true)),
            "n" | "N" => return Ok(Some(false)),
            _ => eprintln!("Please enter correct input (y/n)."),
        }
    }
    Ok(None)
}

/// Whether a person is at the keyboard, i.e. both stdin and stderr are terminals.
pub fn is_interactive() -> bool {
    console::user_attended() && console::user_attended_stderr()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;
    use speculoos::prelude::*;

    use super::confirm_with_retries;

    #[rstest]
    #[case::yes("y\n", Some(true))]
    #[case::no("n\n", Some(false))]
    #[case::retry_then_yes("maybe\nY\n", Some(true))]
    #[case::gives_up("a\nb\nc\ny\n", None)]
    #[case::closed_input("", None)]
    fn it_reads_confirmations(#[case] input: &str, #[case] expected: Option<bool>) {
        let mut input = Cursor::new(input.as_bytes());
        let answer = confirm_with_retries("Delete the app", 3, &mut input);
        assert_that!(answer).is_ok().is_equal_to(expected);
    }
}
