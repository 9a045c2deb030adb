pub type CmdResult<T> = phpns::Result<(T, i32)>;

pub mod convert;
pub mod symbols;

macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (phpns::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Convert(args) => dispatch!(args, convert),
        crate::Commands::Symbols(args) => dispatch!(args, symbols),
    }
}
