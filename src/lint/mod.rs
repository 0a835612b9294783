//! ESLint runs behind the results page
//!
//! The page shows what ESLint reported for the current document. These
//! modules prepare the input ESLint sees, read back its `compact` output and
//! turn the issues into the summary, report counts and gutter marks the
//! editor displays. Running the processes is left to the caller; the modules
//! only decide which commands to run.
//!
//! # Modules
//!
//! - [`compact`]: Parsing of `eslint -f compact` output into issues
//! - [`eslint`]: ESLint command lines and the search path they run with
//! - [`marks`]: Gutter mark commands for the editor
//! - [`scripts`]: Blanking of everything outside `<script>` elements
//! - [`summary`]: Ignored reasons, issue counts and the save summary

pub mod compact;
pub mod eslint;
pub mod marks;
pub mod scripts;
pub mod summary;
