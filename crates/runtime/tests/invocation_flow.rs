//! End-to-end invocation and strike-run flows against the sim world.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;
use tokio::sync::broadcast;
use tokio::time::timeout;

use wyrm_core::{AbilityKey, AbortReason, Element, EntityId, GameConfig, SpatialOracle};
use wyrm_runtime::{
    AbilityEvent, Event, InvocationOutcome, ManualClock, Runtime, SimWorld, Topic,
};

const CASTER: EntityId = EntityId(1);
const TARGET: EntityId = EntityId(100);
const BYSTANDER: EntityId = EntityId(101);

fn lightning() -> AbilityKey {
    AbilityKey::primary(Element::Lightning)
}

fn fast_config() -> GameConfig {
    GameConfig {
        strike_interval_ms: 20,
        ..GameConfig::default()
    }
}

fn world_with_target() -> Arc<SimWorld> {
    let world = Arc::new(SimWorld::new());
    world.add_entity(CASTER, Vec3::ZERO, 20.0);
    world.set_facing(CASTER, Vec3::X);
    world.give_item(CASTER, lightning());
    world.add_entity(TARGET, Vec3::new(8.0, 0.0, 0.0), 1000.0);
    world
}

async fn next_ability_event(rx: &mut broadcast::Receiver<Event>) -> AbilityEvent {
    loop {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event bus closed");
        if let Event::Ability(event) = event {
            return event;
        }
    }
}

#[tokio::test]
async fn accepted_invocation_strikes_three_times_and_commits_the_cooldown() {
    let world = world_with_target();
    let clock = ManualClock::new();
    let runtime = Runtime::builder(world.clone())
        .config(fast_config())
        .clock(clock.clone())
        .start();
    let handle = runtime.handle();
    let mut events = runtime.subscribe(Topic::Ability);

    let outcome = handle.invoke(CASTER, lightning()).await.unwrap();
    assert_eq!(
        outcome,
        InvocationOutcome::Accepted {
            target: TARGET,
            cooldown_secs: 60
        }
    );

    let mut strikes = 0;
    loop {
        match next_ability_event(&mut events).await {
            AbilityEvent::Struck { target, .. } => {
                assert_eq!(target, TARGET);
                strikes += 1;
            }
            AbilityEvent::Completed { actor, .. } => {
                assert_eq!(actor, CASTER);
                break;
            }
            AbilityEvent::Invoked { .. } => {}
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(strikes, 3);
    assert_eq!(world.health(TARGET), Some(1000.0 - 3.0 * 4.0));

    // Cooldown was committed at invocation time.
    assert_eq!(handle.remaining_cooldown(CASTER, lightning()).await.unwrap(), 60);
    assert_eq!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::RejectedOnCooldown { remaining: 60 }
    );

    // Once simulated time passes the duration, invocation works again.
    clock.advance(60_000);
    assert!(matches!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::Accepted { .. }
    ));

    runtime.shutdown().await;
}

#[tokio::test]
async fn losing_the_required_item_aborts_the_run_but_keeps_the_cooldown() {
    let world = world_with_target();
    let clock = ManualClock::new();
    let runtime = Runtime::builder(world.clone())
        .config(GameConfig {
            strike_interval_ms: 50,
            ..GameConfig::default()
        })
        .clock(clock.clone())
        .start();
    let handle = runtime.handle();
    let mut events = runtime.subscribe(Topic::Ability);

    assert!(matches!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::Accepted { .. }
    ));
    world.take_item(CASTER, lightning());

    loop {
        match next_ability_event(&mut events).await {
            AbilityEvent::Aborted { reason, .. } => {
                assert_eq!(reason, AbortReason::PreconditionLost);
                break;
            }
            AbilityEvent::Completed { .. } => panic!("run should not complete"),
            _ => {}
        }
    }

    // Cooldown committed at invocation is still owed in full.
    assert_eq!(handle.remaining_cooldown(CASTER, lightning()).await.unwrap(), 60);

    runtime.shutdown().await;
}

#[tokio::test]
async fn dead_target_triggers_reacquisition_and_the_total_count_holds() {
    let world = world_with_target();
    // The replacement stands behind the caster, outside the acquisition
    // cone; only the no-direction reacquisition can pick it.
    world.add_entity(BYSTANDER, Vec3::new(-6.0, 0.0, 0.0), 1000.0);

    let runtime = Runtime::builder(world.clone())
        .config(GameConfig {
            strike_interval_ms: 50,
            ..GameConfig::default()
        })
        .clock(ManualClock::new())
        .start();
    let handle = runtime.handle();
    let mut events = runtime.subscribe(Topic::Ability);

    let outcome = handle.invoke(CASTER, lightning()).await.unwrap();
    assert_eq!(
        outcome,
        InvocationOutcome::Accepted {
            target: TARGET,
            cooldown_secs: 60
        }
    );

    let mut struck = Vec::new();
    let mut retargeted = None;
    loop {
        match next_ability_event(&mut events).await {
            AbilityEvent::Struck { target, .. } => {
                struck.push(target);
                if struck.len() == 1 {
                    world.kill(TARGET);
                }
            }
            AbilityEvent::Retargeted { from, to, .. } => retargeted = Some((from, to)),
            AbilityEvent::Completed { .. } => break,
            AbilityEvent::Aborted { reason, .. } => panic!("unexpected abort: {reason:?}"),
            _ => {}
        }
    }

    assert_eq!(retargeted, Some((TARGET, BYSTANDER)));
    assert_eq!(struck.len(), 3);
    assert_eq!(struck[0], TARGET);
    assert!(struck[1..].iter().all(|&target| target == BYSTANDER));

    runtime.shutdown().await;
}

#[tokio::test]
async fn run_aborts_when_the_last_target_dies_and_nothing_remains() {
    let world = Arc::new(SimWorld::new());
    world.add_entity(CASTER, Vec3::ZERO, 20.0);
    world.give_item(CASTER, lightning());
    // One strike of damage kills the only target.
    world.add_entity(TARGET, Vec3::new(8.0, 0.0, 0.0), 4.0);

    let runtime = Runtime::builder(world.clone())
        .config(fast_config())
        .clock(ManualClock::new())
        .start();
    let handle = runtime.handle();
    let mut events = runtime.subscribe(Topic::Ability);

    assert!(matches!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::Accepted { .. }
    ));

    let mut strikes = 0;
    loop {
        match next_ability_event(&mut events).await {
            AbilityEvent::Struck { .. } => strikes += 1,
            AbilityEvent::Aborted { reason, .. } => {
                assert_eq!(reason, AbortReason::NoTargetsRemaining);
                break;
            }
            AbilityEvent::Completed { .. } => panic!("run should not complete"),
            _ => {}
        }
    }
    assert_eq!(strikes, 1);
    assert!(!world.is_alive(TARGET));

    runtime.shutdown().await;
}

#[tokio::test]
async fn rejections_map_to_distinct_outcomes() {
    let world = Arc::new(SimWorld::new());
    world.add_entity(CASTER, Vec3::ZERO, 20.0);

    let runtime = Runtime::builder(world.clone())
        .config(fast_config())
        .clock(ManualClock::new())
        .start();
    let handle = runtime.handle();

    // No required item.
    assert_eq!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::RejectedPrecondition
    );

    // Item but empty sky.
    world.give_item(CASTER, lightning());
    assert_eq!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::RejectedNoTarget
    );

    // A target exists but a wall occludes it.
    world.add_entity(TARGET, Vec3::new(8.0, 0.0, 0.0), 1000.0);
    world.add_obstacle(Vec3::new(4.0, 1.6, 0.0), 1.0, false);
    assert_eq!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::RejectedNoTarget
    );

    runtime.shutdown().await;
}

#[tokio::test]
async fn cancellation_is_idempotent_and_stops_future_ticks() {
    let world = world_with_target();
    let runtime = Runtime::builder(world.clone())
        .config(GameConfig {
            strike_interval_ms: 200,
            ..GameConfig::default()
        })
        .clock(ManualClock::new())
        .start();
    let handle = runtime.handle();

    assert!(matches!(
        handle.invoke(CASTER, lightning()).await.unwrap(),
        InvocationOutcome::Accepted { .. }
    ));

    assert!(handle.cancel_run(CASTER, lightning()).await.unwrap());
    // Second cancellation finds nothing; still succeeds.
    assert!(!handle.cancel_run(CASTER, lightning()).await.unwrap());

    runtime.shutdown().await;
}
