use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use paste_crypto::ContentAddresser;
use paste_server::{PasteServer, ServerConfig};
use paste_store::{BlobBackend, BlobStore, FsBackend, ShortIdPolicy, StoreConfig};
use paste_types::{Address, FullId, ShortId, SHORT_ID_HEX_LEN};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let dir = cli.pastes_dir();
    match &cli.command {
        Command::Put(args) => cmd_put(&cli, &dir, args.file.as_deref()),
        Command::Get(args) => cmd_get(&cli, &dir, &args.id),
        Command::Id(args) => cmd_id(&cli, args.file.as_deref()),
        Command::List(_) => cmd_list(&cli, &dir),
        Command::Fsck(_) => cmd_fsck(&cli, &dir),
        Command::Serve(args) => cmd_serve(&cli, args).await,
    }
}

fn store_config(cli: &Cli) -> StoreConfig {
    StoreConfig {
        short_id_policy: if cli.strict {
            ShortIdPolicy::Strict
        } else {
            ShortIdPolicy::FirstMatch
        },
        ..StoreConfig::default()
    }
}

fn open_store(cli: &Cli, dir: &Path) -> anyhow::Result<BlobStore<FsBackend>> {
    let backend = FsBackend::open(dir)
        .with_context(|| format!("opening pastes directory {}", dir.display()))?;
    Ok(BlobStore::with_config(backend, store_config(cli))?)
}

fn read_input(file: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Look up a paste by full id or, when the input is short-id sized, by
/// short id.
pub fn lookup<B: BlobBackend>(store: &BlobStore<B>, id: &str) -> anyhow::Result<Option<Vec<u8>>> {
    let found = if id.len() == SHORT_ID_HEX_LEN {
        store.get_by_short_id(&ShortId::from_hex(id)?)?
    } else {
        store.get(&FullId::from_hex(id)?)?
    };
    Ok(found)
}

fn print_address(cli: &Cli, addr: &Address, stored: bool) {
    match cli.format {
        OutputFormat::Json => println!("{}", json!({ "id": addr.id, "short_id": addr.short_id })),
        OutputFormat::Text => {
            if stored {
                println!("{} Paste stored", "✓".green().bold());
            }
            println!("  Full id:  {}", addr.id.to_string().yellow());
            println!("  Short id: {}", addr.short_id.to_string().cyan());
        }
    }
}

fn cmd_put(cli: &Cli, dir: &Path, file: Option<&Path>) -> anyhow::Result<()> {
    let content = read_input(file)?;
    let store = open_store(cli, dir)?;
    let id = store.put(&content)?;
    print_address(cli, &Address::from(id), true);
    Ok(())
}

fn cmd_get(cli: &Cli, dir: &Path, id: &str) -> anyhow::Result<()> {
    let store = open_store(cli, dir)?;
    let Some(content) = lookup(&store, id)? else {
        bail!("paste not found: {id}");
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_id(cli: &Cli, file: Option<&Path>) -> anyhow::Result<()> {
    let content = read_input(file)?;
    print_address(cli, &ContentAddresser::address(&content), false);
    Ok(())
}

fn cmd_list(cli: &Cli, dir: &Path) -> anyhow::Result<()> {
    let store = open_store(cli, dir)?;
    let ids = store.ids()?;
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&ids)?),
        OutputFormat::Text => {
            if ids.is_empty() {
                println!("No pastes.");
            }
            for id in &ids {
                let hex = id.to_hex();
                let (short, rest) = hex.split_at(SHORT_ID_HEX_LEN);
                println!("{}{}", short.yellow().bold(), rest.dimmed());
            }
        }
    }
    Ok(())
}

fn cmd_fsck(cli: &Cli, dir: &Path) -> anyhow::Result<()> {
    let store = open_store(cli, dir)?;
    let report = store.verify()?;
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
        OutputFormat::Text => {
            for id in &report.corrupt {
                println!("  {} {}", "corrupt:".red(), id);
            }
            for id in &report.missing {
                println!("  {} {}", "missing:".red(), id);
            }
            if report.is_clean() {
                println!("{} {} pastes checked, no issues.", "✓".green().bold(), report.checked);
            }
        }
    }
    if !report.is_clean() {
        bail!(
            "{} corrupt, {} missing out of {} pastes",
            report.corrupt.len(),
            report.missing.len(),
            report.checked
        );
    }
    Ok(())
}

async fn cmd_serve(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = &cli.dir {
        config.pastes_dir = dir.clone();
    }
    if cli.strict {
        config.store.short_id_policy = ShortIdPolicy::Strict;
    }
    println!(
        "Pastebin server on {} (pastes: {})",
        format!("http://{}", config.bind_addr).bold(),
        config.pastes_dir.display()
    );
    PasteServer::new(config).serve().await?;
    Ok(())
}
