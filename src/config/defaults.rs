//! Default configuration values

/// Default root for source checkouts and build output
pub const DEFAULT_ROOT: &str = "/tmp/ska3_pkg";

/// Subdirectory of the root that receives build tool output
pub const BUILDS_SUBDIR: &str = "builds";

/// Subdirectory of the root that holds per-package working copies
pub const SRC_SUBDIR: &str = "src";

/// Directory (relative to the recipes directory) with package definitions
pub const PKG_DEFS_DIR: &str = "pkg_defs";

/// Build order file name (relative to the recipes directory)
pub const BUILD_ORDER_FILE: &str = "build_order.txt";

/// Package descriptor file name inside each package definition
pub const DESCRIPTOR_FILE: &str = "meta.yaml";

/// Name of the package that denotes the Ska environment itself
pub const SELF_PACKAGE: &str = "ska";

/// Comment marker for build order lines
pub const COMMENT_MARKER: char = '#';

/// Default build tool executable
pub const BUILD_COMMAND: &str = "conda";

/// Environment variable the build scripts read to find checked-out sources
pub const SRC_DIR_ENV: &str = "SKA_TOP_SRC_DIR";
