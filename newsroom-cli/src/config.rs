//! Environment loading for the newsroom binary

use std::path::PathBuf;

/// Load environment variables from .env files, returning the files read.
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.newsroom/.env
///
/// dotenvy never overwrites a variable that is already set. Runs before
/// tracing is up so `RUST_LOG` can come from a .env file; callers log the
/// result.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// The newsroom config directory path (~/.newsroom)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".newsroom"))
}
