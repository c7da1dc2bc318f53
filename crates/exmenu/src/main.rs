use anyhow::Context;
use clap::{Parser, Subcommand};
use exmenu::item::MenuItem;
use exmenu::sync::item_is_active;
use exmenu::{AvatarDescriptor, InMemoryStore, PreviewSession};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "exmenu", version, about = "Inspect and drive an avatar expression menu", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the menu hierarchy.
    Tree {
        /// Avatar descriptor (TOML)
        avatar: PathBuf,
    },
    /// Start a preview session and press items by name, level by level.
    Click {
        /// Avatar descriptor (TOML)
        avatar: PathBuf,

        /// Item names to press in order (e.g. "Expr" "Wave" "Back")
        items: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { avatar } => print_tree(&load(&avatar)?),
        Commands::Click { avatar, items } => run_clicks(&load(&avatar)?, &items),
    }
}

fn load(path: &Path) -> anyhow::Result<AvatarDescriptor> {
    AvatarDescriptor::load(path).with_context(|| format!("loading {}", path.display()))
}

fn print_tree(avatar: &AvatarDescriptor) -> anyhow::Result<()> {
    if !avatar.name.is_empty() {
        println!("{}", avatar.name);
    }
    for (depth, control) in avatar.menu.walk() {
        let target = if control.parameter.is_empty() {
            String::new()
        } else {
            format!(" {}={}", control.parameter, control.value)
        };
        println!(
            "{}- {} [{}]{}",
            "  ".repeat(depth),
            control.name,
            control.control_type,
            target
        );
    }
    Ok(())
}

fn run_clicks(avatar: &AvatarDescriptor, names: &[String]) -> anyhow::Result<()> {
    let mut store = InMemoryStore::from_descriptor(avatar);
    let mut session = PreviewSession::new();
    session.set_preview(true, avatar, &mut store);

    print_level(&session.items(avatar), avatar, &store);

    for name in names {
        let items = session.items(avatar);
        let index = items
            .iter()
            .position(|i| i.name == *name)
            .or_else(|| items.iter().position(|i| i.name.eq_ignore_ascii_case(name)))
            .with_context(|| format!("no item named '{}' at this level", name))?;

        let activation = session.activate_index(index, avatar, &mut store);
        println!("> {}", name);
        if activation.home_requested {
            println!("  (home)");
        }
        if let Some(puppet) = session.puppet() {
            println!("  puppet {} = {}", puppet.parameter, puppet.value);
        }
        print_level(&session.items(avatar), avatar, &store);
    }

    println!("parameters:");
    for (name, value) in store.iter() {
        println!("  {} = {}", name, value);
    }
    Ok(())
}

fn print_level(items: &[MenuItem], avatar: &AvatarDescriptor, store: &InMemoryStore) {
    let line: Vec<_> = items
        .iter()
        .map(|item| {
            let mark = if item_is_active(avatar, item, store) { "*" } else { "" };
            format!("[{}{}]", item.name, mark)
        })
        .collect();
    println!("  {}", line.join(" "));
}
