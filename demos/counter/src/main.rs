//! Counter example binary
//!
//! Dispatches a scripted sequence of typed actions, then any JSON actions given
//! on the command line, e.g. `counter '{"type":"counter/add","payload":5}'`.

use counter::{AddBy, CounterAction, CounterState, counter_reducer, json_counter_reducer};
use tagged_reducer_core::{JsonAction, Reducer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,tagged_reducer_core=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Example: Tagged Actions ===\n");

    let reducer = counter_reducer();

    // No state yet: the reducer starts from its initial state
    let mut state = reducer.reduce_optional(None, CounterAction::Increment);
    println!(">>> Sending: Increment (no prior state)");
    println!("Count: {}", count(state.as_ref()));

    let script = [
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Add(AddBy(10)),
        CounterAction::Reset,
    ];

    for action in script {
        println!("\n>>> Sending: {}", action.action_type());
        state = reducer.reduce_optional(state, action);
        println!("Count: {}", count(state.as_ref()));
    }

    let json_reducer = json_counter_reducer();
    for raw in std::env::args().skip(1) {
        match JsonAction::from_json_str(&raw) {
            Ok(action) => {
                println!("\n>>> Sending JSON: {action}");
                state = json_reducer.reduce_optional(state, action);
                println!("Count: {}", count(state.as_ref()));
            }
            Err(error) => {
                tracing::warn!(%error, input = %raw, "Skipping malformed action");
            }
        }
    }

    println!("\n=== Demonstration Complete ===");
    println!("\nKey concepts demonstrated:");
    println!("  • Action: a tagged record, typed or loose JSON");
    println!("  • Handler table: one handler per action type");
    println!("  • Reducer: dispatches on the tag, passes unknown actions through");
    println!("  • Initial state: used when no state exists yet");
}

fn count(state: Option<&CounterState>) -> i64 {
    state.map_or(0, |state| state.count)
}
