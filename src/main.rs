// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Drawsync-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Drawsync and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drawsync CLI entrypoint.
//!
//! `push` stores a local diagram file through the same orchestrator the editor uses, without
//! opening an editor. `embed-url` prints the editor URL for the configured installation.

use std::error::Error;
use std::path::{Path, PathBuf};

use drawsync::model::{DiagramResource, StorageKind};
use drawsync::store::{DocumentPath, RedmineStore};
use drawsync::sync::{NoAttachmentList, Persist, SaveTarget, Synchronizer};
use drawsync::EditorConfig;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} push <file> --document <path> [--page <name>] [--original <name>] [--external] [--config <toml>]\n  {program} embed-url [--config <toml>]\n\npush uploads <file> and rewrites the diagram macro of the wiki page or issue at <path>\n(e.g. /projects/demo/wiki or /issues/42). --external writes to the external document store instead.\n\nLog verbosity follows RUST_LOG (default `info`)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Push(PushOptions),
    EmbedUrl,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct PushOptions {
    file: PathBuf,
    document: String,
    page: Option<String>,
    original: Option<String>,
    external: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    config: Option<PathBuf>,
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let command = args.next().ok_or(())?;
    if command != "push" && command != "embed-url" {
        return Err(());
    }
    let push = command == "push";

    let mut config = None;
    let mut file = None;
    let mut document = None;
    let mut page = None;
    let mut original = None;
    let mut external = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => set_once(&mut config, args.next().map(PathBuf::from))?,
            "--document" if push => set_once(&mut document, args.next())?,
            "--page" if push => set_once(&mut page, args.next())?,
            "--original" if push => set_once(&mut original, args.next())?,
            "--external" if push => {
                if external {
                    return Err(());
                }
                external = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ if push => set_once(&mut file, Some(PathBuf::from(arg)))?,
            _ => return Err(()),
        }
    }

    let command = if push {
        Command::Push(PushOptions {
            file: file.ok_or(())?,
            document: document.ok_or(())?,
            page,
            original,
            external,
        })
    } else {
        Command::EmbedUrl
    };

    Ok(CliOptions { command, config })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    })
}

async fn push(config: &EditorConfig, options: PushOptions) -> Result<(), Box<dyn Error>> {
    let name = options
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("diagram path has no file name")?
        .to_owned();
    let storage_kind = if options.external {
        StorageKind::ExternalStore
    } else {
        StorageKind::Attachment
    };
    let resource = DiagramResource::new(name, storage_kind)?;
    let bytes = tokio::fs::read(&options.file).await?;

    let mut target = SaveTarget::new(DocumentPath::new(options.document));
    if let Some(page) = options.page {
        target = target.with_page_name(page);
    }
    if let Some(original) = options.original {
        target = target.with_original_name(original);
    }

    let store = RedmineStore::from_config(config)?;
    let mut sync = Synchronizer::new(store, NoAttachmentList, target)
        .with_journal_notes(config.journal_notes);

    let report = match sync.persist(&resource, bytes).await {
        Ok(report) => report,
        Err(err) => return Err(err.failure(storage_kind).to_string().into()),
    };

    println!("stored {}", report.resource);
    if !resource.is_external() {
        if report.macro_found {
            println!("macro updated");
        } else {
            println!("no macro references {}", report.resource);
        }
        if report.note_added {
            println!("issue note added");
        }
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "drawsync".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let config = load_config(options.config.as_deref())?;

        match options.command {
            Command::EmbedUrl => {
                println!("{}", drawsync::session::embed_url(&config));
                Ok(())
            }
            Command::Push(push_options) => {
                let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
                runtime.block_on(push(&config, push_options))
            }
        }
    })();

    if let Err(err) = result {
        eprintln!("drawsync: {err}");
        std::process::exit(1);
    }
}
