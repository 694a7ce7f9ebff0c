//! Compile-time build metadata exposed through `--version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("TOOLBOX_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("TOOLBOX_BUILD_TIMESTAMP");

/// Version block rendered by `--version` for either tool binary.
pub const CLI_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("TOOLBOX_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("TOOLBOX_BUILD_TIMESTAMP")
);
