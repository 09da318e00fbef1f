use crate::error::LpoError;
use std::path::PathBuf;

const CACHE_DIR_NAME: &str = "lpo_weather_cache";
const DB_FILE_NAME: &str = "lpo.db";

/// `<platform cache dir>/lpo_weather_cache/lpo.db`
pub fn default_db_path() -> Result<PathBuf, LpoError> {
    dirs::cache_dir()
        .ok_or(LpoError::CacheDirResolution)
        .map(|p| p.join(CACHE_DIR_NAME).join(DB_FILE_NAME))
}
