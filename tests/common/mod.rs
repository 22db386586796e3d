// tests/common/mod.rs

use std::path::Path;

use buildpipe::{ConfigFile, Session};

/// Config pointing at a scratch log directory.
pub fn config_at(log_dir: &Path) -> ConfigFile {
    let mut config = ConfigFile::default();
    config.log.dir = log_dir.to_path_buf();
    config
}

/// Session writing its logs into a scratch directory.
pub fn session_at(log_dir: &Path) -> Session {
    Session::new(config_at(log_dir))
}
