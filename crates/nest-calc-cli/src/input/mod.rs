pub mod file;
pub mod stdin;
pub mod text;

use serde::de::DeserializeOwned;
use std::error::Error;

/// Pick the command input: `--input` file first, then piped stdin, then
/// the individual flags.
pub fn resolve<T: DeserializeOwned>(
    path: Option<&str>,
    from_flags: impl FnOnce() -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    if let Some(path) = path {
        return file::read_structured(path);
    }
    if let Some(data) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    from_flags()
}
