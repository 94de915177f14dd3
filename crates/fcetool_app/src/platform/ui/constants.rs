pub const CMD_URL: &str = "url";
pub const CMD_IMAGE: &str = "image";
pub const CMD_EXTRACT: &str = "extract";
pub const CMD_NEW: &str = "new";
pub const CMD_LIST: &str = "list";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const TAG_INFO: &str = "[info]";
pub const TAG_SUCCESS: &str = "[ok]";
pub const TAG_WARNING: &str = "[warn]";
pub const TAG_ERROR: &str = "[error]";

pub const HINT_BUSY: &str = "an extraction is already running; wait for its result";
pub const HINT_RESULT_SHOWN: &str = "a result is shown; type `new` to start another extraction";

pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  url <URL>                set the firmware URL",
    "  image <NAME|NUMBER>      select a partition image (no argument clears it)",
    "  extract [URL IMAGE]      start the extraction",
    "  new                      start a new extraction",
    "  list                     show the partition images",
    "  help                     show this help",
    "  quit                     exit",
];
