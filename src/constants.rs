//! Common constants used throughout reposync.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["reposync.json", "reposync.yml", "reposync.yaml"];

/// Source root scanned by the index generator
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Generated barrel file name
pub const DEFAULT_BARREL_FILE: &str = "index.mts";

/// Extension of the source modules that get re-exported
pub const DEFAULT_SOURCE_EXTENSION: &str = ".mts";

/// Extension of the compiled module that barrel exports refer to
pub const DEFAULT_OUTPUT_EXTENSION: &str = ".mjs";

/// Type declarations and tests are never re-exported
pub const DEFAULT_EXCLUDE: [&str; 2] = ["*.d.mts", "*.test.mts"];

/// Content written when a directory has nothing to export
pub const EMPTY_BARREL: &str = "export {};\n";

/// Token opening a replaceable code block
pub const DEFAULT_FENCE_START: &str = "```ts";
/// Token closing a replaceable code block
pub const DEFAULT_FENCE_END: &str = "```";
/// Sample lines up to and including this marker are not embedded
pub const DEFAULT_IGNORE_ABOVE: &str = "// ignore-above";
/// Sample lines from this marker on are not embedded
pub const DEFAULT_IGNORE_BELOW: &str = "// ignore-below";
/// Sample lines starting with this marker are dropped
pub const DEFAULT_IGNORE_LINE: &str = "// ignore-this-line";

/// Target extensions embedded as plain documents (no comment prefix)
pub const DOCUMENT_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];
