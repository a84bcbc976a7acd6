use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logger;
mod settings;

use cli::{Args, Command};
use commands::LayoutOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    log::info!("Starting impact-lens");
    let config = settings::load_config(args.config.as_deref())?;

    match args.command {
        Command::Diff {
            original,
            modified,
            text,
        } => commands::diff(&original, &modified, text),
        Command::Report { payload, text } => commands::report(&payload, text),
        Command::Analyze {
            payload,
            repos,
            text,
        } => {
            let options = settings::analyze_options(&config.analyze);
            commands::analyze(&payload, repos.as_deref(), &options, text)
        }
        Command::Layout {
            payload,
            width,
            height,
            ticks,
            actions,
            live,
            fps,
        } => {
            let options = LayoutOptions {
                width: width.unwrap_or(config.layout.width),
                height: height.unwrap_or(config.layout.height),
                max_ticks: ticks,
                params: settings::layout_params(&config.layout),
            };
            let actions = commands::read_actions(actions.as_deref())?;
            if live {
                commands::layout_live(&payload, &actions, &options, fps).await
            } else {
                commands::layout(&payload, &actions, &options)
            }
        }
    }
}
