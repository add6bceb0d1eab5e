//! Definition Loading
//!
//! This example ships a machine as JSON, round-trips it through the binary
//! format and binds its guard labels at load time.
//!
//! Run with: cargo run --example definition_loading

use krsm::core::{Resource, Transition};
use krsm::definition::StateDefinition;
use krsm::{GuardRegistry, MachineDefinition};

struct Order {
    id: String,
    paid: bool,
    state: String,
}

impl Resource<String, String> for Order {
    fn name(&self) -> &str {
        &self.id
    }

    fn namespace(&self) -> &str {
        "shop"
    }

    fn current_state(&self) -> String {
        self.state.clone()
    }

    fn set_transition(&mut self, transition: Transition<String, String>) {
        self.state = transition.target_state;
    }
}

fn s(name: &str) -> String {
    name.to_string()
}

fn main() -> Result<(), krsm::Error> {
    println!("=== Definition Loading Example ===\n");

    let definition = MachineDefinition::new("OrderMachine")
        .state(StateDefinition::root(s("Open")).edge(s("cancel"), s("Cancelled")))
        .state(
            StateDefinition::sub_state(s("Cart"), s("Open"))
                .guarded_edge(s("checkout"), s("Shipped"), "paid", false)
                .guarded_edge(s("checkout"), s("AwaitingPayment"), "paid", true),
        )
        .state(StateDefinition::sub_state(s("AwaitingPayment"), s("Open")).edge(s("pay"), s("Cart")));

    let json = definition.to_json()?;
    println!("JSON definition:\n{json}\n");

    let bytes = MachineDefinition::<String, String>::from_json(&json)?.to_binary()?;
    println!("Binary definition: {} bytes", bytes.len());
    let loaded = MachineDefinition::<String, String>::from_binary(&bytes)?;
    println!("Guard labels: {:?}\n", loaded.guard_labels());

    let guards = GuardRegistry::new().register_fn("paid", |order: &Order| order.paid);
    let machine = loaded.build(&guards)?;

    let mut order = Order {
        id: s("order-7"),
        paid: false,
        state: s("Cart"),
    };

    machine.trigger(s("checkout"), &mut order, "unpaid checkout")?;
    println!("unpaid checkout -> {}", order.state);

    order.paid = true;
    machine.trigger(s("pay"), &mut order, "payment received")?;
    println!("pay             -> {}", order.state);

    machine.trigger(s("checkout"), &mut order, "paid checkout")?;
    println!("paid checkout   -> {}", order.state);

    let missing = MachineDefinition::<String, String>::from_json(&json)?
        .build::<Order>(&GuardRegistry::new());
    if let Err(error) = missing {
        println!("\nWithout guards: {error}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
