use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::time::Duration;
use crate::cli::{Args, Command};
use crate::config::{self, Config};
use crate::rpc::{NetworkRpc, RpcError};
use crate::utils;

pub fn run() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = execute(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn execute(args: &Args) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => config::load(path).with_context(|| format!("failed to load {}", path))?,
        None => Config::default(),
    };
    if let Some(url) = &args.url {
        cfg.node.url = url.clone();
    }
    tracing::debug!("config: {:?}", cfg);

    let rpc = NetworkRpc::from_config(&cfg.node);

    match &args.command {
        Command::Connections => print_json(&rpc.list_connections()?),
        Command::Connection { peer_id } => print_json(&rpc.get_connection(peer_id)?),
        Command::Remove { peer_ids, wait } => {
            match rpc.remove_peers(peer_ids.iter().map(|id| (id.as_str(), *wait))) {
                Ok(removed) => print_json(&removed),
                Err(partial) => {
                    print_json(&partial.removed)?;
                    Err(partial.into())
                }
            }
        }
        Command::ClearGreylist => {
            rpc.clear_greylist()?;
            Ok(())
        }
        Command::Log { duration } => {
            let secs = duration.unwrap_or(cfg.log.max_duration_secs);
            let res = rpc.stream_network_log(Duration::from_secs(secs), |entry| {
                println!("{}", entry);
            });
            match res {
                Ok(count) => {
                    tracing::info!("network log closed by node after {} entries", count);
                    Ok(())
                }
                Err(RpcError::Deadline(d)) => {
                    tracing::info!("network log stopped after {:?}", d);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Peers => print_json(&rpc.list_peers()?),
        Command::Peer { peer_id } => print_json(&rpc.get_peer(peer_id)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
