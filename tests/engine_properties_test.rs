//! Integration test: engine invariants over long runs
//!
//! Drives the engine for thousands of ticks through the public API and
//! checks the properties that must hold on every step: pipe layout, gravity,
//! tier bookkeeping and event ordering.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyward::core::constants::{
    BIRD_WIDTH, BIRD_X, HITBOX_INSET, PIPE_COUNT, PIPE_SPACING, SCREEN_WIDTH,
};
use skyward::core::engine::gap_top_range;
use skyward::{Engine, SpeedTier, TickEvent};

/// Left edge of the bird's hitbox; pipes behind it can no longer hit.
const HITBOX_LEFT: f64 = BIRD_X - BIRD_WIDTH / 2.0 + HITBOX_INSET;

/// Flap whenever the bird sinks into the lower part of the next gap.
fn autopilot_wants_jump(engine: &Engine<ChaCha8Rng>) -> bool {
    let gap = engine.handicap().gap_size() as f64;
    let target = engine
        .pipes()
        .iter()
        .find(|pipe| pipe.trailing_edge() > HITBOX_LEFT)
        .map_or(300.0, |pipe| pipe.gap_top as f64 + gap - 50.0);
    engine.bird().y > target
}

fn engine(seed: u64) -> Engine<ChaCha8Rng> {
    Engine::new(ChaCha8Rng::seed_from_u64(seed), 0)
}

#[test]
fn test_pipe_layout_holds_every_tick() {
    let mut engine = engine(1);
    let (low, high) = gap_top_range(engine.handicap());

    for tick in 0..5_000 {
        if tick % 25 == 0 {
            engine.jump();
        }
        engine.tick();

        let pipes = engine.pipes();
        assert_eq!(pipes.len(), PIPE_COUNT, "tick {}", tick);
        for pair in pipes.iter().collect::<Vec<_>>().windows(2) {
            let spacing = pair[1].x - pair[0].x;
            assert!(
                (spacing - PIPE_SPACING).abs() < 1e-6,
                "tick {}: spacing {}",
                tick,
                spacing
            );
        }
        for pipe in pipes {
            assert!(pipe.gap_top >= low && pipe.gap_top < high);
            assert!(pipe.trailing_edge() >= 0.0);
            assert!(pipe.x <= SCREEN_WIDTH + 2.0 * PIPE_SPACING + 300.0);
        }
    }
}

#[test]
fn test_velocity_grows_without_jumps() {
    let mut engine = engine(2);
    let mut last = engine.bird().velocity;
    for _ in 0..200 {
        engine.tick();
        assert!(engine.bird().velocity > last);
        last = engine.bird().velocity;
    }
}

#[test]
fn test_tier_tracks_score_on_every_tick() {
    let mut engine = engine(3);
    let mut last_score = 0;
    let mut tier_changes = Vec::new();

    for _ in 0..4_000 {
        let events = engine.tick();

        assert!(engine.score() >= last_score);
        assert_eq!(engine.tier(), SpeedTier::for_score(engine.score()));
        assert!(engine.best_score() >= engine.score());
        last_score = engine.score();

        for event in &events {
            if let TickEvent::SpeedTierChanged { tier } = event {
                tier_changes.push((*tier, engine.score()));
            }
        }
    }

    // Passes are counted even when the bird is far off course
    assert!(engine.score() > 25);
    assert_eq!(
        tier_changes,
        vec![(SpeedTier::Two, 10), (SpeedTier::Three, 25)]
    );
}

#[test]
fn test_new_best_precedes_pass_event() {
    let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(4), 2);
    let mut seen_best = Vec::new();

    for _ in 0..2_000 {
        let events = engine.tick();
        for (i, event) in events.iter().enumerate() {
            if let TickEvent::NewBestScore { best } = event {
                assert_eq!(
                    events.get(i + 1),
                    Some(&TickEvent::ObstaclePassed { score: *best })
                );
                seen_best.push(*best);
            }
        }
        if let Some(pos) = events.iter().position(TickEvent::is_collision) {
            assert_eq!(pos, events.len() - 1, "collision must come last");
        }
    }

    // Scores 1 and 2 only tie the stored best
    assert_eq!(seen_best.first(), Some(&3));
}

#[test]
fn test_autopilot_survives_into_top_tier() {
    let mut engine = engine(5);
    engine.jump();

    for tick in 0..3_000 {
        if autopilot_wants_jump(&engine) {
            engine.jump();
        }
        let events = engine.tick();
        assert!(
            !events.iter().any(TickEvent::is_collision),
            "crashed at tick {} with score {}: {:?}",
            tick,
            engine.score(),
            events
        );
    }

    assert!(engine.score() >= 30, "score {}", engine.score());
    assert_eq!(engine.tier(), SpeedTier::Three);
}

#[test]
fn test_hard_mode_narrows_gaps_and_speeds_pipes() {
    let mut normal = engine(6);
    let mut hard = engine(6);
    hard.reset(true);

    assert!(hard.handicap().gap_size() < normal.handicap().gap_size());

    let normal_start = normal.pipes()[0].x;
    let hard_start = hard.pipes()[0].x;
    normal.tick();
    hard.tick();
    let normal_step = normal_start - normal.pipes()[0].x;
    let hard_step = hard_start - hard.pipes()[0].x;
    assert!((normal_step - 3.5).abs() < 1e-9);
    assert!((hard_step - 3.5 * 1.3).abs() < 1e-9);
}
