//! Shell quoting for script command lines

use std::path::Path;

/// Wrap a value in single quotes; each embedded `'` becomes `'"'"'`
pub fn quote_argument(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

/// `<interpreter> '<script>' '<a1>' '<a2>' ...`
pub fn build_command_line(interpreter: &str, script: &Path, arguments: &[String]) -> String {
    let mut line = String::from(interpreter);
    line.push(' ');
    line.push_str(&quote_argument(&script.to_string_lossy()));
    for argument in arguments {
        line.push(' ');
        line.push_str(&quote_argument(argument));
    }
    line
}
