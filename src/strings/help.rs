//! # Help Text
//!
//! Displayed to the user via the `.help` command.

pub const MAIN: &str = concat!(
    "**🤖 Summabies Help**\n",
    "Tag a message with `[Project]` and it is collected for the next digest.\n",
    "Several tags in one message file it under every project.\n",
    "\n",
    "**⚡ Commands**\n",
    "* .status: Scheduler state and pending messages\n",
    "* .summarize: Summarize all pending projects now\n",
    "* .help: This message\n"
);
