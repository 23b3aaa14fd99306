use clap::{Parser, Subcommand};

/// Conversational front desk: answers questions, explains services and books meetings.
#[derive(Parser, Debug, Clone)]
#[command(name = "concierge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Brand profile to use (engageai, aicognitech); overrides BRAND
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Command to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP chat API
    Serve {
        /// Port to listen on; overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with the assistant in the terminal
    Chat,

    /// List upcoming events on the connected Google calendar
    Upcoming,
}
