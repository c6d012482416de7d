//! Command-line driver for the order state machine.
//!
//! Creates a fresh order, applies the operations given on the command line
//! in order, writes each status line to the chosen sink, and finishes with
//! the name of the state the order ended in.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use orderstate::order::{Order, OrderOperation};
use orderstate::sink::{ConsoleSink, StatusSink, TracingSink};
use tracing_subscriber::{fmt, EnvFilter};

/// Where status lines are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// Plain lines on stdout
    Console,
    /// `tracing` info events
    Tracing,
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operations to apply: cancel, verify-payment, ship
    #[arg(default_values_t = [OrderOperation::VerifyPayment, OrderOperation::Ship, OrderOperation::Cancel])]
    operations: Vec<OrderOperation>,

    /// Status line destination
    #[arg(short, long, value_enum, default_value_t = SinkKind::Console)]
    sink: SinkKind,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the final checkpoint as JSON
    #[arg(long)]
    checkpoint: bool,
}

/// Apply `operations` to a fresh order, writing each status line to `sink`.
fn run(operations: &[OrderOperation], sink: &mut dyn StatusSink) -> Order {
    let mut order = Order::new();
    tracing::debug!(order_id = %order.id(), "created order");

    for operation in operations {
        order.apply_with(*operation, &mut *sink);
    }
    order
}

/// Closing output: the checkpoint JSON when requested, then the final state.
fn summary(order: &Order, with_checkpoint: bool) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    if with_checkpoint {
        let json = order
            .checkpoint()
            .to_json()
            .context("failed to serialize checkpoint")?;
        lines.push(json);
    }
    lines.push(format!("Order state: {}", order.state()));
    Ok(lines)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let mut sink: Box<dyn StatusSink> = match args.sink {
        SinkKind::Console => Box::new(ConsoleSink),
        SinkKind::Tracing => Box::new(TracingSink),
    };

    let order = run(&args.operations, sink.as_mut());

    for line in summary(&order, args.checkpoint)? {
        println!("{line}");
    }

    Ok(())
}
