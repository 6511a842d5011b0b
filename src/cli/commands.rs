//! CLI command implementations
//!
//! Each command is one engine call: open the file if the command needs a
//! record, run the operation, report the outcome as JSON. There are no
//! prompts and no retries.

use std::path::Path;

use serde_json::{json, Value};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::write_response;
use crate::observability::{log_event, Event, Logger};
use crate::search::{SearchEngine, SearchMode};
use crate::store::{ContentStore, LocalBackend};
use crate::walk::DirectorySearch;

/// Main CLI entry point
///
/// Parses arguments, loads configuration and runs the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;

    Logger::set_min_severity(config.severity()?);
    log_event(
        Event::ConfigLoaded,
        &[("search_root", config.search_root.display().to_string().as_str())],
    );

    let data = execute(&config, cli.command)?;
    write_response(data)
}

/// Build the content store described by `config`
pub fn build_store(config: &Config) -> ContentStore<LocalBackend> {
    ContentStore::new(LocalBackend::new().with_fsync(config.fsync))
        .with_timestamp_format(config.timestamp_format.clone())
}

/// Run one command and return its response payload
pub fn execute(config: &Config, cmd: Command) -> CliResult<Value> {
    let store = build_store(config);

    match cmd {
        Command::Create { path, content } => create(&store, &path, &content),
        Command::Read { path } => read(&store, &path),
        Command::Write { path, content } => write(&store, &path, &content),
        Command::Append { path, content } => append(&store, &path, &content),
        Command::Search {
            path,
            item,
            ignore_case,
        } => search(&store, &path, &item, !ignore_case),
        Command::Count {
            path,
            item,
            ignore_case,
        } => count(&store, &path, &item, !ignore_case),
        Command::DeleteContent { path, item } => delete_content(&store, &path, &item),
        Command::DeleteFile { path } => delete_file(&store, &path),
        Command::Find { name, root } => {
            let root = root.unwrap_or_else(|| config.search_root.clone());
            Ok(find(&root, &name))
        }
    }
}

fn create(store: &ContentStore, path: &Path, content: &str) -> CliResult<Value> {
    store.create(path, content)?;
    Ok(json!({ "created": path.display().to_string() }))
}

fn read(store: &ContentStore, path: &Path) -> CliResult<Value> {
    let record = store.open(path)?;
    Ok(json!({
        "path": path.display().to_string(),
        "size": record.size(),
        "content": store.read(&record),
    }))
}

fn write(store: &ContentStore, path: &Path, content: &str) -> CliResult<Value> {
    let mut record = store.open(path)?;
    store.write(&mut record, content)?;
    Ok(json!({ "path": path.display().to_string(), "size": record.size() }))
}

fn append(store: &ContentStore, path: &Path, content: &str) -> CliResult<Value> {
    let mut record = store.open(path)?;
    store.append(&mut record, content)?;
    Ok(json!({ "path": path.display().to_string(), "size": record.size() }))
}

fn search(store: &ContentStore, path: &Path, item: &str, sensitive: bool) -> CliResult<Value> {
    let record = store.open(path)?;
    let index = SearchEngine::locate(&record, item, sensitive)?;
    Ok(json!({
        "path": path.display().to_string(),
        "item": item,
        "mode": mode_name(item, sensitive),
        "found": index.is_some(),
        "index": index,
    }))
}

fn count(store: &ContentStore, path: &Path, item: &str, sensitive: bool) -> CliResult<Value> {
    let record = store.open(path)?;
    let count = SearchEngine::count(&record, item, sensitive)?;
    Ok(json!({
        "path": path.display().to_string(),
        "item": item,
        "mode": mode_name(item, sensitive),
        "count": count,
    }))
}

fn delete_content(store: &ContentStore, path: &Path, item: &str) -> CliResult<Value> {
    let mut record = store.open(path)?;
    let removed = store.delete_content(&mut record, item)?;
    Ok(json!({
        "path": path.display().to_string(),
        "removed": removed,
        "size": record.size(),
    }))
}

fn delete_file(store: &ContentStore, path: &Path) -> CliResult<Value> {
    let mut record = store.open(path)?;
    store.delete_file(&mut record)?;
    Ok(json!({ "deleted": path.display().to_string() }))
}

fn find(root: &Path, name: &str) -> Value {
    let found = DirectorySearch::new().find(root, name);
    json!({
        "name": name,
        "found": found.is_some(),
        "path": found.map(|p| p.display().to_string()),
    })
}

fn mode_name(item: &str, sensitive: bool) -> &'static str {
    let folded;
    let target = if sensitive {
        item
    } else {
        folded = item.to_lowercase();
        &folded
    };
    SearchMode::for_target(target).as_str()
}
