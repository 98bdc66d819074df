use crate::config::DebuggerConfig;

/// Full argv for the debugger: program, configured flags, then the user's
/// own arguments in order.
pub fn debugger_argv(config: &DebuggerConfig, user_args: &[String]) -> Vec<String> {
    let mut argv = Vec::with_capacity(1 + config.args.len() + user_args.len());
    argv.push(config.program.clone());
    argv.extend(config.args.iter().cloned());
    argv.extend(user_args.iter().cloned());
    argv
}
