//! Command-line schema.

use clap::{Parser, Subcommand};

/// Talk to a SkillStack site from the terminal.
///
/// Connection settings come from `SKILLSTACK_URL`, `SKILLSTACK_CSRF_TOKEN` and
/// `SKILLSTACK_SESSION` (a `.env` file is read if present); flags override
/// them.
#[derive(Parser, Debug)]
#[command(name = "skillstack")]
#[command(version)]
pub struct Cli {
    /// Site URL, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// CSRF token for POST requests
    #[arg(long, global = true)]
    pub csrf_token: Option<String>,

    /// Session cookie value for endpoints that need a login
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check usernames. Without arguments, reads keystrokes from stdin: each
    /// line is the field's new value.
    CheckUsername {
        /// Names to check once each
        names: Vec<String>,

        /// Debounce for interactive mode, in milliseconds
        #[arg(long, default_value_t = 250)]
        debounce_ms: u64,
    },

    /// Show the unread message count
    Unread {
        /// Keep polling and print the badge whenever it changes
        #[arg(long)]
        watch: bool,

        /// Poll interval in seconds for --watch
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },

    /// Preview a portfolio link
    Preview {
        url: String,
    },

    /// Mark a message as read
    MarkRead {
        id: String,
    },

    /// Change a project's status (ongoing, completed, paused)
    Status {
        project_id: String,
        status: String,
    },
}
