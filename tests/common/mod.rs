//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use sheet::{parse_commands, DelimiterSet, Limits, Pipeline, RunSummary, SheetError};

/// Run the whole pipeline over `input`, returning the result and whatever
/// was written before it finished
pub fn run_partial(
    input: &str,
    delimiters: &str,
    args: &[&str],
    limits: Limits,
) -> (Result<RunSummary, SheetError>, String) {
    let delimiters = DelimiterSet::new(delimiters).unwrap();
    let commands = match parse_commands(args, &delimiters) {
        Ok(commands) => commands,
        Err(e) => return (Err(e), String::new()),
    };
    let mut output = Vec::new();
    let result = Pipeline::new(commands, delimiters, limits).run(input.as_bytes(), &mut output);
    (result, String::from_utf8(output).unwrap())
}

/// Run with default limits and return the output, or the error
pub fn run_sheet(input: &str, delimiters: &str, args: &[&str]) -> Result<String, SheetError> {
    let (result, output) = run_partial(input, delimiters, args, Limits::default());
    result.map(|_| output)
}

/// Run with default limits, panicking on error
pub fn edit(input: &str, delimiters: &str, args: &[&str]) -> String {
    run_sheet(input, delimiters, args)
        .unwrap_or_else(|e| panic!("edit {:?} failed: {}", args, e))
}
