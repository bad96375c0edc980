use std::fs;
use std::io::Write;

use chrono::NaiveDate;
use goals::{parse_goals, write_goals, GoalSet, SchemaVersion};
use log::debug;
use remote::{wire_symbol, ChannelFactory, RemoteInvoker};

use crate::errors::{Result, UploaderError};
use crate::report;

/// Parses the input file (header required) and uploads the goals.
///
/// The command-line strategy name wins over the file's Strategy column;
/// a blank argument falls back to the column, and a mismatch between
/// the two is logged and resolved in favor of the argument.
pub async fn send_goals<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: Option<&str>,
    input: &str,
) -> Result<()> {
    debug!("Parsing {}...", input);
    let text = fs::read_to_string(input)?;
    let parsed = parse_goals(text.lines(), true)?;
    let from_file = parsed.set.strategy_name;

    let strategy = match strategy {
        Some(name) if !name.is_empty() => {
            if !from_file.is_empty() && from_file != name {
                debug!(
                    "Warning: strategy name from file ('{}') mismatches command line argument \
                     ('{}'): using '{}'.",
                    from_file, name, name
                );
            }
            name.to_string()
        }
        _ => {
            if from_file.is_empty() {
                return Err(UploaderError::usage(
                    "Specify strategy name either in first column or via command line argument",
                ));
            }
            from_file
        }
    };

    let set = GoalSet::new(strategy.clone(), parsed.set.goals);
    dump_goals(&set);

    debug!("Sending goals...");
    let set_ref = &set;
    invoker
        .invoke(&strategy, move |channel| async move {
            channel.set_goals(set_ref).await
        })
        .await?;
    debug!("Done.");
    Ok(())
}

pub async fn close_goals<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: &str,
    instruments: Option<&[String]>,
) -> Result<()> {
    match instruments {
        Some(list) => debug!("Closing {}: {}", strategy, list.join(", ")),
        None => debug!("Closing {}: all targets", strategy),
    }
    let wire: Option<Vec<String>> =
        instruments.map(|list| list.iter().map(|symbol| wire_symbol(symbol)).collect());
    let wire_ref = wire.as_deref();
    invoker
        .invoke(strategy, move |channel| async move {
            channel.close(wire_ref).await
        })
        .await?;
    debug!("Done.");
    Ok(())
}

pub async fn request_goals<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: &str,
    output: &mut dyn Write,
    version: SchemaVersion,
) -> Result<()> {
    debug!("Requesting goals...");
    let set = invoker
        .invoke(strategy, |channel| async move {
            channel.get_current_goals().await
        })
        .await?;
    debug!("Done.");
    dump_goals(&set);
    write_goals(output, strategy, &set.goals, true, version)?;
    Ok(())
}

pub async fn request_order_history<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: &str,
    start: Option<NaiveDate>,
    output: &mut dyn Write,
) -> Result<()> {
    let list = invoker
        .invoke(strategy, move |channel| async move {
            channel.get_order_history(start).await
        })
        .await?;
    debug!("Got {} entries:", list.len());
    for entry in &list {
        debug!("\t{}", entry);
    }
    report::write_orders(output, &list)
}

pub async fn request_transaction_history<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: &str,
    start: Option<NaiveDate>,
    output: &mut dyn Write,
) -> Result<()> {
    let list = invoker
        .invoke(strategy, move |channel| async move {
            channel.get_transaction_history(start).await
        })
        .await?;
    debug!("Got {} entries:", list.len());
    for entry in &list {
        debug!("\t{}", entry);
    }
    report::write_transactions(output, &list)
}

pub async fn request_pnl<F: ChannelFactory>(
    invoker: &RemoteInvoker<F>,
    strategy: &str,
    start: Option<NaiveDate>,
    end_of_day: bool,
    output: &mut dyn Write,
) -> Result<()> {
    let list = invoker
        .invoke(strategy, move |channel| async move {
            if end_of_day {
                channel.get_eod_pnl(start).await
            } else {
                channel.get_pnl(start).await
            }
        })
        .await?;
    debug!("Got {} entries:", list.len());
    for entry in &list {
        debug!("\t{}", entry);
    }
    report::write_pnl(output, &list)
}

fn dump_goals(set: &GoalSet) {
    debug!(
        "Got {} goals for strategy {}:",
        set.goals.len(),
        set.strategy_name
    );
    for goal in &set.goals {
        debug!("\t{}", goal);
    }
}
