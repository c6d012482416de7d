//! State Pattern Client
//!
//! This example walks an order through the classic State pattern scenario.
//!
//! Key concepts:
//! - One tag per state, one pure function for all transitions
//! - Illegal operations are reported, not raised
//! - Terminal states ignore every further operation
//! - Status lines go to a pluggable sink
//!
//! Run with: cargo run --example state_client

use orderstate::order::{Order, OrderOperation};
use orderstate::sink::{ConsoleSink, MemorySink};

fn main() {
    println!("=== State Pattern Client ===\n");

    let mut order = Order::new();
    let mut console = ConsoleSink;

    println!("Happy path, then a late cancel:");
    order.apply_with(OrderOperation::VerifyPayment, &mut console);
    order.apply_with(OrderOperation::Ship, &mut console);
    order.apply_with(OrderOperation::Cancel, &mut console);
    println!("Order state: {}\n", order.state_name());

    println!("Cancelled before payment:");
    let mut cancelled = Order::new();
    let mut captured = MemorySink::new();
    cancelled.apply_with(OrderOperation::Cancel, &mut captured);
    cancelled.apply_with(OrderOperation::VerifyPayment, &mut captured);
    cancelled.apply_with(OrderOperation::Ship, &mut captured);
    for line in captured.lines() {
        println!("  {line}");
    }
    println!("Order state: {}\n", cancelled.state_name());

    println!("Path taken by the first order:");
    let path: Vec<String> = order
        .history()
        .get_path()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    println!("  {}", path.join(" -> "));

    println!("\nKey Takeaways:");
    println!("- The transition table is a single exhaustive match");
    println!("- Rejected operations leave the state untouched");
    println!("- History records only real state changes");

    println!("\n=== Example Complete ===");
}
