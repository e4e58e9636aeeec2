use std::{error::Error, path::PathBuf, sync::mpsc};

use clap::{Parser, Subcommand};
use daily_alarms::{
    config::Config,
    local_scheduler::{LocalScheduler, SettingsPermission},
    ringer,
    store::AlarmStore,
    time_picker::PickerStyle,
    Clock,
};
use eframe::{egui::ViewportBuilder, run_native};
use log::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// config file to use instead of the platform default
    #[clap(long)]
    config: Option<PathBuf>,
    /// how the time picker is drawn
    #[clap(long, value_enum)]
    picker: Option<PickerStyle>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write the default config file
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("daily_alarms").expect("couldn't initialize logger");

    let args = Args::parse();
    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    if let Some(Command::Init { force }) = args.command {
        if force || !config_path.exists() {
            Config::new().save(&config_path)?;
            println!("wrote {}", config_path.display());
        } else {
            println!("{} already exists, use --force to overwrite", config_path.display());
        }
        return Ok(());
    }

    let mut config = Config::load_or_default(&config_path).unwrap_or_else(|e| {
        warn!("{e}, using default config");
        Config::default()
    });
    if let Some(picker) = args.picker {
        config.picker = Some(picker);
    }

    let (delivery_tx, delivery_rx) = mpsc::channel();
    let scheduler = LocalScheduler::start(delivery_tx, config.tick());
    let mut store =
        AlarmStore::new(scheduler).with_title(config.notification_title.clone());
    store.request_permission(&mut SettingsPermission::new(config.notifications_allowed));
    let ringer = ringer::spawn(config.volume);
    info!("starting with config from {}", config_path.display());

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Daily Alarms")
            .with_inner_size([360.0, 560.0]),
        ..Default::default()
    };
    // run the gui
    run_native(
        "Daily Alarms",
        native_options,
        Box::new(move |_| Ok(Box::new(Clock::new(config, store, delivery_rx, ringer)))),
    )
    .map_err(std::convert::Into::into)
}
