#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Marker literal embedded in every injected annotation line. Its presence in
/// a source line is the sole signal used to detect and strip stale
/// annotations.
pub const MARK_COMMENT: &str = "This part worth";

/// Extension appended to a notebook path to form its backup name.
pub const BACKUP_EXT: &str = "bak";

/// File extension used when discovering notebooks in a directory.
pub const NOTEBOOK_EXT: &str = "ipynb";

/// Metadata key under which nbgrader stores per-cell grading information.
pub const NBGRADER_KEY: &str = "nbgrader";

/// Key within the nbgrader metadata map holding the cell's point value.
pub const POINTS_KEY: &str = "points";

/// Accessory bundles for the allowed-modules check. Permitting the first
/// module in each pair implicitly permits the listed companions, since
/// importing the former drags the latter in.
pub const ACCESSORY_BUNDLES: &[(&str, &[&str])] = &[
    ("pandas", &["numpy", "dateutil", "pytz", "six"]),
    ("matplotlib", &["numpy", "PIL", "kiwisolver", "cycler", "pyparsing"]),
    ("scipy", &["numpy"]),
    ("cogent3", &["numpy"]),
];
