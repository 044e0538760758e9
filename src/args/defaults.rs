pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 8080;
pub(crate) const DEFAULT_CLIENTS: usize = 1000;
pub(crate) const DEFAULT_PATH: &str = "/";
pub(crate) const DEFAULT_TIMEOUT: &str = "10.0";
pub(crate) const DEFAULT_RAMP: &str = "0.0";
pub(crate) const DEFAULT_CONCURRENCY: &str = "1000";

/// Config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["webstress.toml", "webstress.json"];
