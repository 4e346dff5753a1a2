pub mod answers;
pub mod cli;
pub mod manifest;
pub mod prompt;
pub mod readme;
pub mod scaffold;
pub mod template;

#[cfg(test)]
mod test_support;

/// Run the command line interface and return an exit code.
pub fn run_cli() -> i32 {
    cli::run()
}
