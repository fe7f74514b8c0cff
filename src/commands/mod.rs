use std::io::Read;
use std::path::Path;

use namecheck::naming::JsonFactsSource;

pub type CmdResult<T> = namecheck::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod check;
pub mod explain;
pub mod fix;
pub mod policy;

// ============================================================================
// Facts input (CLI layer)
// ============================================================================

/// Open a symbol-facts dump from a file path, or stdin when `input` is `-`.
pub(crate) fn open_facts(input: &str) -> namecheck::Result<JsonFactsSource> {
    use std::io::IsTerminal;

    if input.trim() == "-" {
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(namecheck::Error::validation_invalid_argument(
                "facts",
                "Cannot read symbol facts from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        let mut buf = String::new();
        stdin.read_to_string(&mut buf).map_err(|e| {
            namecheck::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return JsonFactsSource::from_str(&buf);
    }

    let path = Path::new(input);
    if !path.is_file() {
        return Err(namecheck::Error::validation_invalid_argument(
            "facts",
            format!("Not a file: {}", input),
            None,
            None,
        ));
    }

    JsonFactsSource::from_path(path)
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (namecheck::Result<serde_json::Value>, i32) {
    crate::tty::status("namecheck is working...");

    match command {
        // Commands without global context
        crate::Commands::Policy(args) => dispatch!(args, policy),
        crate::Commands::Explain(args) => dispatch!(args, explain),

        // Commands with global context
        crate::Commands::Check(args) => dispatch!(args, global, check),
        crate::Commands::Fix(args) => dispatch!(args, global, fix),
    }
}
