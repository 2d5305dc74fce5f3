use std::error::Error;
use std::path::Path;

use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store_io;
use crate::ops::store::{Store, StoreError};

/// Run one subcommand against the data file at `data_path`. Mutating
/// commands write the file back only when the operation succeeds.
pub fn dispatch(command: Commands, data_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    match command {
        // Read commands
        Commands::Groups => cmd_groups(data_path, json),
        Commands::List(args) => cmd_list(args, data_path, json),
        Commands::Tags(args) => cmd_tags(args, data_path, json),

        // Write commands
        Commands::Group(cmd) => cmd_group(cmd, data_path),
        Commands::Add(args) => cmd_add(args, data_path),
        Commands::Edit(args) => cmd_edit(args, data_path),
        Commands::Rm(args) => cmd_rm(args, data_path),
        Commands::Toggle(args) => cmd_toggle(args, data_path),

        // Import / export
        Commands::Export(args) => cmd_export(args, data_path),
        Commands::Import(args) => cmd_import(args, data_path),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_groups(data_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = store_io::load_or_empty(data_path)?;
    let groups = store.groups();

    if json {
        let infos: Vec<GroupJson> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| group_to_json(i, g))
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        for (i, group) in groups.iter().enumerate() {
            println!("{}", format_group_line(i, group));
        }
    }
    Ok(())
}

fn cmd_list(args: ListArgs, data_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = store_io::load_or_empty(data_path)?;
    let group = store
        .group(args.group)
        .ok_or(StoreError::GroupOutOfRange(args.group))?;
    let query = args.query.as_deref().unwrap_or("");
    let tasks = store.filter_tasks(args.group, query, &args.tags);

    if json {
        let list = TaskListJson {
            group: group.name.clone(),
            tasks: tasks.iter().map(|(i, t)| task_to_json(*i, t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for (i, task) in &tasks {
            println!("{}", format_task_line(*i, task));
        }
    }
    Ok(())
}

fn cmd_tags(args: TagsArgs, data_path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = store_io::load_or_empty(data_path)?;
    if store.group(args.group).is_none() {
        return Err(StoreError::GroupOutOfRange(args.group).into());
    }
    let tags = store.distinct_tags(args.group);

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        for tag in &tags {
            println!("{}", tag);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Load, apply `op`, and save only if it succeeded
fn mutate<T>(
    data_path: &Path,
    op: impl FnOnce(&mut Store) -> Result<T, StoreError>,
) -> Result<T, Box<dyn Error>> {
    let mut store = store_io::load_or_empty(data_path)?;
    let value = op(&mut store)?;
    store_io::save_file(&mut store, data_path)?;
    Ok(value)
}

fn cmd_group(cmd: GroupCmd, data_path: &Path) -> Result<(), Box<dyn Error>> {
    match cmd.action {
        GroupAction::Add { name } => {
            let index = mutate(data_path, |store| store.add_group(&name))?;
            println!("{}", index);
        }
        GroupAction::Rename { index, name } => {
            mutate(data_path, |store| store.rename_group(index, &name))?;
        }
        GroupAction::Rm { index } => {
            let removed = mutate(data_path, |store| store.delete_group(index))?;
            println!(
                "removed group \"{}\" ({} tasks)",
                removed.name,
                removed.tasks.len()
            );
        }
    }
    Ok(())
}

fn cmd_add(args: AddArgs, data_path: &Path) -> Result<(), Box<dyn Error>> {
    let tags = args.tags.as_deref().unwrap_or("");
    let index = mutate(data_path, |store| {
        store.add_task(args.group, &args.text, tags)
    })?;
    println!("{}", index);
    Ok(())
}

fn cmd_edit(args: EditArgs, data_path: &Path) -> Result<(), Box<dyn Error>> {
    mutate(data_path, |store| match &args.tags {
        Some(tags) => store.edit_task(args.group, args.task, &args.text, tags),
        None => store.edit_task_text(args.group, args.task, &args.text),
    })?;
    Ok(())
}

fn cmd_rm(args: TaskRef, data_path: &Path) -> Result<(), Box<dyn Error>> {
    let removed = mutate(data_path, |store| store.delete_task(args.group, args.task))?;
    println!("removed \"{}\"", removed.text);
    Ok(())
}

fn cmd_toggle(args: TaskRef, data_path: &Path) -> Result<(), Box<dyn Error>> {
    let (index, task) = mutate(data_path, |store| {
        store.toggle_complete(args.group, args.task)?;
        let task = store.task(args.group, args.task).cloned().ok_or(StoreError::TaskOutOfRange {
            group: args.group,
            task: args.task,
        })?;
        Ok((args.task, task))
    })?;
    println!("{}", format_task_line(index, &task));
    Ok(())
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

fn cmd_export(args: ExportArgs, data_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = store_io::load_or_empty(data_path)?;
    store_io::save_file(&mut store, &args.dest)?;
    info!(dest = %args.dest.display(), "exported");
    println!("exported {} groups to {}", store.groups().len(), args.dest.display());
    Ok(())
}

fn cmd_import(args: ImportArgs, data_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = Store::new();
    let count = store_io::load_file(&mut store, &args.src)?;
    store_io::save_file(&mut store, data_path)?;
    println!("imported {} groups from {}", count, args.src.display());
    Ok(())
}
