use clap::{Parser, Subcommand};

pub mod main;

/// Node network RPC client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Node RPC address, overrides the configuration file (e.g., http://127.0.0.1:8732)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Log requests and decoded record counts
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List active peer connections
    Connections,

    /// Show one peer connection
    Connection { peer_id: String },

    /// Close peer connections, one after the other in the given order
    Remove {
        #[arg(required = true)]
        peer_ids: Vec<String>,

        /// Wait for each connection to be torn down
        #[arg(long)]
        wait: bool,
    },

    /// Clear the greylist
    ClearGreylist,

    /// Print network log entries as they arrive
    Log {
        /// Stop after this many seconds (defaults to the configuration file)
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// List gossip peers
    Peers,

    /// Show one gossip peer
    Peer { peer_id: String },
}
