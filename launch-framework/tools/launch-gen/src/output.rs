use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use launch_framework_config::LaunchConfiguration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

pub fn render(config: &LaunchConfiguration, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(config),
        OutputFormat::Compact => serde_json::to_string(config),
    }
}

/// Write the rendered document to `path`, or stdout when no path is given.
pub fn write_output(rendered: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{rendered}\n")),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}")?;
            stdout.flush()
        }
    }
}
