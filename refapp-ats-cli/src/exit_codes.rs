//! Process exit codes for the `refapp-ats` binary

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// The config document was rejected, or could not be read
pub const EXIT_ERROR: i32 = 1;

/// Bad invocation: no source given, malformed `--set`, unknown form key
pub const EXIT_USAGE: i32 = 2;
