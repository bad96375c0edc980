mod cli;
mod commands;
mod errors;
mod report;
mod settings;

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::error;
use remote::{check_identifier, PaperChannelFactory, RemoteInvoker};

use crate::cli::{split_instruments, Cli, Command};
use crate::errors::{Result, UploaderError};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?;
    check_identifier(&settings.bus_domain, "bus domain")?;

    let factory = match settings.transport.as_str() {
        "paper" => PaperChannelFactory::new(),
        other => {
            return Err(UploaderError::settings(format!(
                "unknown transport '{}': this build ships the paper transport only",
                other
            )));
        }
    };
    let invoker = RemoteInvoker::new(factory);

    match cli.cmd {
        Command::Set { strategy, input } => {
            commands::send_goals(&invoker, strategy.as_deref(), &input).await
        }
        Command::Close {
            strategy,
            instruments,
        } => {
            let instruments = instruments.as_deref().map(split_instruments);
            commands::close_goals(&invoker, &strategy, instruments.as_deref()).await
        }
        Command::Get {
            strategy,
            output,
            version,
        } => {
            let mut sink = open_output(output.as_deref())?;
            commands::request_goals(&invoker, &strategy, sink.as_mut(), version).await
        }
        Command::Orders {
            strategy,
            start,
            output,
        } => {
            let mut sink = open_output(output.as_deref())?;
            commands::request_order_history(&invoker, &strategy, start, sink.as_mut()).await
        }
        Command::Transactions {
            strategy,
            start,
            output,
        } => {
            let mut sink = open_output(output.as_deref())?;
            commands::request_transaction_history(&invoker, &strategy, start, sink.as_mut()).await
        }
        Command::Pnl {
            strategy,
            start,
            output,
        } => {
            let mut sink = open_output(output.as_deref())?;
            commands::request_pnl(&invoker, &strategy, start, false, sink.as_mut()).await
        }
        Command::EodPnl {
            strategy,
            start,
            output,
        } => {
            let mut sink = open_output(output.as_deref())?;
            commands::request_pnl(&invoker, &strategy, start, true, sink.as_mut()).await
        }
    }
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}
