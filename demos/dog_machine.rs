//! Dog Machine
//!
//! This example drives two dogs through a hierarchical state machine.
//!
//! Key concepts:
//! - Sub-states inherit the edges of their parent
//! - Guards pick between edges that share an event
//! - Failed triggers leave the resource untouched
//!
//! Run with: RUST_LOG=krsm=trace cargo run --example dog_machine

use krsm::{
    event_enum, state_enum, Guard, Resource, StateMachineBuilder, Transition, TransitionHistory,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

state_enum! {
    enum DogState {
        Asleep,
        Awake,
        Barking,
        Biting,
        Eating,
    }
}

event_enum! {
    enum DogEvent {
        Pet,
        Slap,
        Kick,
        Feed,
    }
}

struct Dog {
    name: String,
    age: u32,
    state: DogState,
    history: TransitionHistory<DogState, DogEvent>,
}

impl Resource<DogState, DogEvent> for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> &str {
        "kennel"
    }

    fn current_state(&self) -> DogState {
        self.state
    }

    fn set_transition(&mut self, transition: Transition<DogState, DogEvent>) {
        self.state = transition.target_state;
        self.history = self.history.record(transition);
    }
}

fn main() -> Result<(), krsm::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("krsm=debug")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Dog Machine Example ===\n");

    let puppy = Guard::new(|dog: &Dog| dog.age < 10);

    let machine = StateMachineBuilder::new("DogMachine")
        .configure_state(DogState::Asleep)
        .target(DogState::Asleep, [DogEvent::Pet])
        .target(DogState::Awake, [DogEvent::Slap])
        .target(DogState::Barking, [DogEvent::Kick])
        .configure_state(DogState::Awake)
        .target(DogState::Biting, [DogEvent::Slap, DogEvent::Kick])
        .target(DogState::Eating, [DogEvent::Feed])
        .configure_sub_state(DogState::Barking, DogState::Awake)
        .target_with_guard(DogState::Biting, DogEvent::Slap, "puppy", puppy.clone())
        .target_with_guard(DogState::Barking, DogEvent::Slap, "grown", !puppy)
        .configure_sub_state(DogState::Biting, DogState::Awake)
        .build()?;

    println!("Machine: {}", machine.name());
    println!("States: {:?}\n", machine.states());

    let mut tommy = Dog {
        name: "tommy".to_string(),
        age: 3,
        state: DogState::Asleep,
        history: TransitionHistory::new(),
    };
    let mut bolt = Dog {
        name: "bolt".to_string(),
        age: 12,
        state: DogState::Asleep,
        history: TransitionHistory::new(),
    };

    for dog in [&mut tommy, &mut bolt] {
        println!("{} (age {}) starts {:?}", dog.name, dog.age, dog.state);
        machine.trigger(DogEvent::Kick, dog, "kick")?;
        println!("  kicked  -> {:?}", dog.state);
        machine.trigger(DogEvent::Slap, dog, "slap")?;
        println!("  slapped -> {:?}", dog.state);
        println!("  permitted now: {:?}", machine.permitted_events(dog));
        machine.trigger(DogEvent::Feed, dog, "dinner")?;
        println!("  fed     -> {:?}", dog.state);

        match machine.trigger(DogEvent::Pet, dog, "good dog") {
            Ok(_) => println!("  petted  -> {:?}", dog.state),
            Err(error) => println!("  petting refused: {error}"),
        }
        println!("  path: {:?}\n", dog.history.path());
    }

    println!("=== Example Complete ===");
    Ok(())
}
