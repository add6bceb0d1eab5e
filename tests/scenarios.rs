//! End-to-end scenarios: building machines and driving resources through them.

use chrono::{TimeZone, Utc};
use krsm::{
    event_enum, state_enum, ErrorKind, FixedClock, Guard, Resource, StateMachine,
    StateMachineBuilder, Transition, TransitionHistory,
};
use std::collections::BTreeSet;
use std::sync::Arc;

state_enum! {
    enum CatState {
        Sleeping,
        Purring,
        Scratching,
        Biting,
    }
}

event_enum! {
    enum CatEvent {
        Pet,
        Hit,
    }
}

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

struct Cat {
    state: CatState,
}

impl Resource<CatState, CatEvent> for Cat {
    fn name(&self) -> &str {
        "tom"
    }

    fn namespace(&self) -> &str {
        "house"
    }

    fn current_state(&self) -> CatState {
        self.state
    }

    fn set_transition(&mut self, transition: Transition<CatState, CatEvent>) {
        self.state = transition.target_state;
    }
}

struct Dog {
    name: String,
    age: u32,
    state: DogState,
    history: TransitionHistory<DogState, DogEvent>,
}

impl Dog {
    fn new(name: &str, age: u32, state: DogState) -> Self {
        Self {
            name: name.to_string(),
            age,
            state,
            history: TransitionHistory::new(),
        }
    }
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

fn cat_machine() -> StateMachine<CatState, CatEvent, Cat> {
    StateMachineBuilder::new("CatMachine")
        .configure_state(CatState::Sleeping)
        .target(CatState::Purring, [CatEvent::Pet])
        .target(CatState::Scratching, [CatEvent::Hit])
        .configure_state(CatState::Purring)
        .target(CatState::Sleeping, [CatEvent::Pet])
        .target(CatState::Biting, [CatEvent::Hit])
        .configure_state(CatState::Scratching)
        .target(CatState::Purring, [CatEvent::Pet])
        .target(CatState::Biting, [CatEvent::Hit])
        .configure_state(CatState::Biting)
        .target(CatState::Scratching, [CatEvent::Pet])
        .target(CatState::Biting, [CatEvent::Hit])
        .build()
        .unwrap()
}

fn dog_machine() -> StateMachine<DogState, DogEvent, Dog> {
    let puppy = Guard::new(|dog: &Dog| dog.age < 10);

    StateMachineBuilder::new("DogMachine")
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()))
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
        .target(DogState::Biting, [DogEvent::Kick])
        .configure_sub_state(DogState::Biting, DogState::Awake)
        .build()
        .unwrap()
}

#[test]
fn simple_cat_machine() {
    let machine = cat_machine();
    let mut cat = Cat {
        state: CatState::Sleeping,
    };

    assert_eq!(machine.name(), "CatMachine");
    assert_eq!(machine.initial_state(), &CatState::Sleeping);
    assert_eq!(
        machine.states(),
        BTreeSet::from([
            CatState::Sleeping,
            CatState::Purring,
            CatState::Scratching,
            CatState::Biting,
        ])
    );

    let transition = machine.trigger(CatEvent::Pet, &mut cat, "So Fluffy!").unwrap();

    assert_eq!(transition.source_state, CatState::Sleeping);
    assert_eq!(transition.target_state, CatState::Purring);
    assert_eq!(transition.event, CatEvent::Pet);
    assert_eq!(transition.message, "So Fluffy!");
    assert_eq!(cat.state, CatState::Purring);
}

#[test]
fn machine_with_sub_states() {
    let machine = dog_machine();
    let mut dog = Dog::new("tommy", 3, DogState::Asleep);

    let transition = machine.trigger(DogEvent::Kick, &mut dog, "kicking Tommy").unwrap();
    assert_eq!(dog.state, DogState::Barking);
    assert_eq!(transition.source_state, DogState::Asleep);
    assert_eq!(transition.target_state, DogState::Barking);
    assert_eq!(transition.target_parent_state, Some(DogState::Awake));

    let transition = machine.trigger(DogEvent::Kick, &mut dog, "double-whammy").unwrap();
    assert_eq!(dog.state, DogState::Biting);
    assert_eq!(transition.source_state, DogState::Barking);
    assert_eq!(transition.source_parent_state, Some(DogState::Awake));

    machine.trigger(DogEvent::Feed, &mut dog, "dont bite, eat").unwrap();
    assert_eq!(dog.state, DogState::Eating);

    let error = machine.trigger(DogEvent::Pet, &mut dog, "eat more").unwrap_err();
    assert!(error.is(ErrorKind::CouldNotTransition));

    assert_eq!(
        dog.history.path(),
        vec![
            &DogState::Asleep,
            &DogState::Barking,
            &DogState::Biting,
            &DogState::Eating
        ]
    );
}

#[test]
fn parent_edge_reached_from_sub_state() {
    let machine = dog_machine();
    let mut dog = Dog::new("rex", 3, DogState::Barking);

    let transition = machine.trigger(DogEvent::Feed, &mut dog, "").unwrap();

    assert_eq!(transition.source_state, DogState::Barking);
    assert_eq!(transition.target_state, DogState::Eating);
    assert_eq!(dog.state, DogState::Eating);
}

#[test]
fn sub_state_edges_shadow_parent_edges() {
    let machine = dog_machine();
    let mut old_dog = Dog::new("rex", 12, DogState::Barking);

    // Awake declares Slap -> Biting, but Barking's own guarded Slap edges win
    machine.trigger(DogEvent::Slap, &mut old_dog, "").unwrap();

    assert_eq!(old_dog.state, DogState::Barking);
}

#[test]
fn guard_alternation_picks_target_by_age() {
    let machine = dog_machine();
    let mut puppy = Dog::new("bit", 1, DogState::Barking);
    let mut grown = Dog::new("bolt", 10, DogState::Barking);

    machine.trigger(DogEvent::Slap, &mut puppy, "").unwrap();
    machine.trigger(DogEvent::Slap, &mut grown, "").unwrap();

    assert_eq!(puppy.state, DogState::Biting);
    assert_eq!(grown.state, DogState::Barking);
}

#[test]
fn unregistered_event_leaves_terminal_state_unchanged() {
    let machine = dog_machine();
    let mut dog = Dog::new("rex", 3, DogState::Eating);

    let error = machine.trigger(DogEvent::Kick, &mut dog, "").unwrap_err();

    assert!(error.is(ErrorKind::CouldNotTransition));
    assert_eq!(dog.state, DogState::Eating);
    assert!(dog.history.is_empty());
}

#[test]
fn identical_triggers_yield_identical_transitions() {
    let machine = dog_machine();
    let mut first = Dog::new("a", 3, DogState::Asleep);
    let mut second = Dog::new("b", 3, DogState::Asleep);

    let one = machine.trigger(DogEvent::Slap, &mut first, "wake up").unwrap();
    let two = machine.trigger(DogEvent::Slap, &mut second, "wake up").unwrap();

    assert_eq!(one, two);
    assert_eq!(
        one.created_time,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
}

#[test]
fn illegal_state_configuration() {
    let result = StateMachineBuilder::<DogState, DogEvent, Dog>::new("HorseMachine")
        .configure_state(DogState::Asleep)
        .target(DogState::Awake, [DogEvent::Slap])
        .configure_state(DogState::Awake)
        .configure_sub_state(DogState::Awake, DogState::Asleep)
        .build();

    let errors = result.unwrap_err();
    assert!(errors.is(ErrorKind::IllegalState));
    assert!(errors.to_string().contains("HorseMachine"));
}

#[test]
fn errors_convert_into_crate_error() {
    fn run() -> Result<DogState, krsm::Error> {
        let machine = dog_machine();
        let mut dog = Dog::new("rex", 3, DogState::Eating);
        machine.trigger(DogEvent::Feed, &mut dog, "")?;
        Ok(dog.state)
    }

    let error = run().unwrap_err();
    assert!(error.is(ErrorKind::CouldNotTransition));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_machine_drives_many_resources() {
    let machine = Arc::new(dog_machine());

    let handles: Vec<_> = (0..16u32)
        .map(|i| {
            let machine = Arc::clone(&machine);
            tokio::spawn(async move {
                let mut dog = Dog::new(&format!("dog-{i}"), i, DogState::Asleep);
                machine.trigger(DogEvent::Kick, &mut dog, "kick")?;
                machine.trigger(DogEvent::Slap, &mut dog, "slap")?;
                Ok::<_, krsm::TriggerError>(dog)
            })
        })
        .collect();

    for handle in handles {
        let dog = handle.await.unwrap().unwrap();
        let expected = if dog.age < 10 {
            DogState::Biting
        } else {
            DogState::Barking
        };
        assert_eq!(dog.state, expected);
        assert_eq!(dog.history.len(), 2);
    }
}
