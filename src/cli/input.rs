//! Reading the code and error context named on the command line.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::args::{CodeSource, ErrorSource};

/// Read the code to fix.
pub fn read_code(source: &CodeSource) -> io::Result<String> {
    match source {
        CodeSource::File(path) => read_file(path),
        CodeSource::Stdin => {
            let mut code = String::new();
            io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}

/// Read the error context, or an empty string if none was given.
pub fn read_error_context(source: &ErrorSource) -> io::Result<String> {
    match source {
        ErrorSource::None => Ok(String::new()),
        ErrorSource::Text(text) => Ok(text.clone()),
        ErrorSource::File(path) => read_file(path),
    }
}

fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}
