/// Tool name, used as the file prefix and the metadata namespace key.
pub const APP_NAME: &str = "pkgswap";

/// The manifest filename the build tooling reads.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Label of the master variant (`.pkgswap.package.json`).
pub const MASTER_LABEL: &str = "package";

/// Pointer file recording the active variant where symlinks are unavailable.
pub const POINTER_FILENAME: &str = ".pkgswap.link";

/// Overrides the directory the root search starts from.
pub const ROOT_ENV: &str = "PKGSWAP_ROOT";
