//! CLI Exit Code Registry
//!
//! Single source of truth for `dlens` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 2    | Usage error (bad args, unknown format)    |
//! | 3    | IO error (cannot read input/write output) |
//! | 4    | Input parse error (CSV/JSON/amounts)      |
//! | 5    | Invalid config                            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, format not given and not inferable.
pub const EXIT_USAGE: u8 = 2;

/// IO error - input, config or output file could not be read/written.
pub const EXIT_IO: u8 = 3;

/// Transaction file could not be parsed.
pub const EXIT_PARSE: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;
