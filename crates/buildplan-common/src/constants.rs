//! System-wide constants and defaults.

/// Interpreters accepted as the first entrypoint token.
pub const PYTHON_INTERPRETERS: &[&str] = &["python", "python3"];

/// Environment variable the plan always assigns to the resolved python path.
pub const PYTHONPATH_ENV: &str = "PYTHONPATH";

/// Lowest port an image may expose.
pub const MIN_PORT: u32 = 1;

/// Highest port an image may expose.
pub const MAX_PORT: u32 = 65_535;

/// Base image shared by the built-in variants.
pub const DEFAULT_BASE_IMAGE: &str = "python:3.12-slim";

/// Variant used when none is given on the command line.
pub const DEFAULT_VARIANT: &str = "fastmcp-pinned";

/// Default build context directory.
pub const DEFAULT_CONTEXT_DIR: &str = ".";

/// Variants file looked up in the build context when none is given.
pub const DEFAULT_VARIANTS_FILE: &str = "buildplan.yaml";

/// `fastmcp` release pinned by the `fastmcp-pinned` variant.
pub const FASTMCP_PINNED_VERSION: &str = "2.10.6";

/// Port the Jira service listens on when started through its own `main`.
pub const JIRA_SSE_PORT: u32 = 8100;

/// Port used by the pinned and split-package Jira images.
pub const JIRA_ALT_PORT: u32 = 8001;

/// Port the Salesforce service listens on.
pub const SALESFORCE_SSE_PORT: u32 = 8200;

/// Application name used in rendered output.
pub const APP_NAME: &str = "buildplan";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "bplan";
