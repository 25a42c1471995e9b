//! Conventional virtual filesystem layout

/// Directory holding project descriptors and asset files
pub const NUTS_DIR: &str = "/nuts";

/// Directory holding `<project>.dotnut-manifest.{json,yaml}`
pub const MANIFESTS_DIR: &str = "/manifests";

/// Directory holding configuration text/binary files
pub const CONF_DIR: &str = "/conf";

pub const ASSETS_DIR: &str = "/assets";

pub const ICONS_DIR: &str = "/icons";

/// Fixed-name app-selector manifests at the virtual root, probed in order
pub const APP_SELECTOR_JSON: &str = "dotnut.app-selector.manifest.json";
pub const APP_SELECTOR_YAML: &str = "dotnut.app-selector.manifest.yaml";

/// Manifest suffixes appended to the project name, probed in order
pub const MANIFEST_EXTENSIONS: [&str; 2] = ["dotnut-manifest.json", "dotnut-manifest.yaml"];

/// Project descriptor suffixes appended to the project name, probed in order
pub const PROJECT_EXTENSIONS: [&str; 9] = [
    "nutsjsnproj",
    "nutjsnproj",
    "nuts.json",
    "nuts.jsn",
    "nutsymlproj",
    "nutymlproj",
    "nuts.yaml",
    "nuts.yml",
    "nut",
];

/// Icon extensions probed for the application icon
pub const APP_ICON_EXTENSIONS: [&str; 2] = ["png", "ico"];

/// Project name used when none was set
pub const DEFAULT_PROJECT_NAME: &str = "nutApplication";

/// Directories below the application root mounted by default
pub const ASSET_DIRECTORIES: [&str; 6] = ["nuts", "assets", "translations", "conf", "manifests", "icons"];
