use clap::Parser;
use exmenu_preview::config::{self, Overrides};
use exmenu_preview::gui::app::AppModel;
use exmenu_preview::gui::menu::Preview;
use exmenu_preview::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "exmenu-preview", version, about = "Preview an avatar's expression menu", long_about = None)]
struct Args {
    /// Avatar descriptor to preview (overrides the config file)
    #[arg(short = 'a', long)]
    avatar: Option<PathBuf>,

    /// Size of the menu disc area in pixels
    #[arg(short = 's', long)]
    size: Option<f64>,

    /// Write the default config file, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides {
        avatar: args.avatar,
        menu_size: args.size,
    };
    let config = overrides.apply(config::load_or_default());

    let preview = Preview::load(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, config::watch_targets(&config));

    // clap already consumed the arguments; keep GTK from parsing them again
    let app = RelmApp::new("org.exmenu.preview").with_args(Vec::new());

    app.run::<AppModel>((preview, overrides, rx));
    Ok(())
}
