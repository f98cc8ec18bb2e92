//! Global constants for the gapedit editor

pub mod layout {
    /// Tab stops sit at every multiple of this column count
    pub const TAB_STOP: usize = 8;

    /// Rows covered by one page-up/page-down step
    pub const PAGE_ROWS: usize = 20;
}

pub mod buffer {
    /// Minimum gap width preserved after any operation; one maximal UTF-8
    /// scalar must always fit without growing
    pub const GAP_HEADROOM: usize = 4;

    /// Backing size for a freshly created empty document
    pub const INITIAL_CAPACITY: usize = 4096;
}

pub mod history {
    /// Initial entry capacity of the undo log
    pub const INITIAL_ENTRIES: usize = 64;
}

pub mod errors {
    // Error codes
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const LOAD_FAILED: &str = "LOAD_FAILED";
    pub const SAVE_FAILED: &str = "SAVE_FAILED";
    pub const NO_PATH: &str = "NO_PATH";

    // Error messages
    pub const MSG_NO_FILE_NAME: &str = "No file name";
}
