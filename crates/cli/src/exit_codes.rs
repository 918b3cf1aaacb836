//! CLI Exit Code Registry
//!
//! Single source of truth for the exit codes of `sps`. Scripts rely on them.
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 0    | Success, or `--help` / `--version`                             |
//! | 1    | Any failure: bad arguments, unreadable file, script error      |
//!
//! Every failure shares code 1; the `--json` error object carries the
//! specific kind.

/// Success - the whole script ran and the table was written.
pub const EXIT_SUCCESS: u8 = 0;

/// Any failure. Nothing is written.
pub const EXIT_ERROR: u8 = 1;

/// Machine-readable error kinds used in `--json` output.
pub const KIND_ARGUMENT: &str = "argument";
pub const KIND_IO: &str = "io";
