mod app;
mod events;
mod host;
mod runtime;
mod view;
mod watcher;

use app::{AppInit, AppModel};
use clap::Parser;
use relm4::prelude::*;
use ringslide::config;
use ringslide::{ResourceId, Slider};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive circular slider", long_about = None)]
struct Args {
    /// Slider configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Square image to use as the thumb, relative to the config directory
    #[arg(short, long)]
    thumb: Option<String>,

    /// Write the bundled default configuration and exit
    #[arg(long)]
    write_default: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_default {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config_path = match args.config {
        Some(p) => p,
        None => config::config_path()?,
    };
    let slider = Slider::from_config(config::load_or_default(Some(config_path.as_path())))?;

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.ringslide.demo").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        slider,
        config_path,
        thumb: args.thumb.map(ResourceId::from),
        rx,
    });

    Ok(())
}
