use std::path::PathBuf;

/// Overrides the state directory, mostly for tests and sandboxes.
pub const HOME_ENV: &str = "MAPSCOPE_HOME";

/// Root of mapscope's on-disk state: `$MAPSCOPE_HOME`, else `~/.mapscope`.
pub fn mapscope_home() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".mapscope"))
}
