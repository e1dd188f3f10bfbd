//! `stayhub_cli`: offline draft inspection, image compression and read-only
//! views of the partner's listings and bookings.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stayhub_domain::PropertyCategory;

use crate::{App, AppError};

#[derive(Debug, Parser)]
#[command(name = "stayhub_cli")]
#[command(about = "StayHub partner onboarding tools", version, long_about = None)]
pub struct Cli {
    /// Directory holding config.json and drafts (defaults to $STAYHUB_HOME or ~/.stayhub)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress an image the way the upload pipeline does
    Compress {
        input: PathBuf,

        /// Output path (defaults to `<name>-upload.<ext>` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Inspect locally saved wizard drafts
    Drafts {
        #[command(subcommand)]
        command: DraftsCommand,
    },
    /// List or delete your properties
    Properties {
        #[command(subcommand)]
        command: PropertiesCommand,
    },
    /// Show your bookings grouped by status
    Bookings,
    /// Print the wizard steps for a category
    Steps { category: PropertyCategory },
}

#[derive(Debug, Subcommand)]
pub enum DraftsCommand {
    List,
    Show { key: String },
    Clear { key: String },
}

#[derive(Debug, Subcommand)]
pub enum PropertiesCommand {
    List,
    Delete { id: String },
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<(), AppError> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    if cli.no_color {
        output::disable_color();
    }
    if let Command::Steps { category } = cli.command {
        commands::steps::print_steps(category);
        return Ok(());
    }

    let app = match cli.home {
        Some(home) => App::with_base_dir(home)?,
        None => App::from_env()?,
    };
    if !app.config().ui_color_enabled {
        output::disable_color();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        match cli.command {
            Command::Compress { input, output: target } => {
                commands::compress::compress(&app, &input, target.as_deref())
            }
            Command::Drafts { command } => match command {
                DraftsCommand::List => commands::drafts::list(&app),
                DraftsCommand::Show { key } => commands::drafts::show(&app, &key),
                DraftsCommand::Clear { key } => commands::drafts::clear(&app, &key),
            },
            Command::Properties { command } => match command {
                PropertiesCommand::List => commands::remote::list_properties(&app).await,
                PropertiesCommand::Delete { id } => {
                    commands::remote::delete_property(&app, &id).await
                }
            },
            Command::Bookings => commands::remote::bookings(&app).await,
            Command::Steps { .. } => Ok(()),
        }
    })
}
