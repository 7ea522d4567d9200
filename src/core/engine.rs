//! Flight simulation: gravity, pipe scrolling, scoring, and collisions.
//!
//! The engine advances one fixed 16ms step per [`Engine::tick`] call and
//! reports what happened as a list of [`TickEvent`]s. It owns its random
//! source so that a seeded generator replays the exact same pipe layout.

use super::constants::{
    BASE_JUMP_IMPULSE, BIRD_X, FIRST_PIPE_OFFSET, GRAVITY, GROUND_HEIGHT, GROUND_LIMIT,
    PIPE_COUNT, PIPE_GAP, PIPE_SPACING, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use super::tier::{Handicap, SpeedTier};
use super::types::{Bird, CollisionCause, Pipe, TickEvent};
use rand::Rng;
use std::collections::VecDeque;

/// Half-open range `[low, high)` that a new pipe's gap top is drawn from.
pub fn gap_top_range(handicap: Handicap) -> (u32, u32) {
    let min_arm = handicap.min_arm();
    let max = SCREEN_HEIGHT as u32 - PIPE_GAP - GROUND_HEIGHT as u32 - min_arm;
    (min_arm, max)
}

/// Main simulation state.
#[derive(Debug, Clone)]
pub struct Engine<R: Rng> {
    rng: R,
    bird: Bird,
    /// Front-to-back in scroll direction; always `PIPE_COUNT` long.
    pipes: VecDeque<Pipe>,
    score: u32,
    best_score: u32,
    tier: SpeedTier,
    handicap: Handicap,
    /// Ticks since the last reset.
    tick_count: u64,
}

impl<R: Rng> Engine<R> {
    /// Create an engine ready for a normal-mode session.
    pub fn new(rng: R, best_score: u32) -> Self {
        let mut engine = Self {
            rng,
            bird: Bird::centered(),
            pipes: VecDeque::with_capacity(PIPE_COUNT),
            score: 0,
            best_score,
            tier: SpeedTier::One,
            handicap: Handicap::new(false),
            tick_count: 0,
        };
        engine.reset(false);
        engine
    }

    /// Put the bird back in the centre and lay out a fresh row of pipes.
    ///
    /// Keeps the best score. `hard_mode` applies to the session that follows.
    pub fn reset(&mut self, hard_mode: bool) {
        self.handicap = Handicap::new(hard_mode);
        self.bird = Bird::centered();
        self.score = 0;
        self.tier = SpeedTier::One;
        self.tick_count = 0;

        self.pipes.clear();
        for i in 0..PIPE_COUNT {
            self.spawn_pipe(SCREEN_WIDTH + FIRST_PIPE_OFFSET + i as f64 * PIPE_SPACING);
        }
    }

    /// Flap. Sets velocity directly rather than adding to it.
    pub fn jump(&mut self) {
        self.bird.velocity = BASE_JUMP_IMPULSE * self.tier.jump_modifier();
    }

    /// Advance the simulation by one fixed step.
    ///
    /// A `Collision` event is always the last event of the returned list.
    pub fn tick(&mut self) -> Vec<TickEvent> {
        let mut events = Vec::new();
        self.tick_count += 1;

        // 1. Gravity
        self.bird.velocity += GRAVITY * self.handicap.gravity_multiplier();
        self.bird.y += self.bird.velocity;

        // 2-3. Scroll pipes and score the ones that cleared the bird lane
        let step = self.tier.pipe_speed() * self.handicap.speed_multiplier();
        let mut newly_passed = 0;
        for pipe in &mut self.pipes {
            pipe.x -= step;
            if !pipe.passed && pipe.trailing_edge() < BIRD_X {
                pipe.passed = true;
                newly_passed += 1;
            }
        }
        for _ in 0..newly_passed {
            self.record_pass(&mut events);
        }

        // 4. Recycle pipes that left the screen
        while self
            .pipes
            .front()
            .is_some_and(|pipe| pipe.trailing_edge() < 0.0)
        {
            self.pipes.pop_front();
            let next_x = self
                .pipes
                .back()
                .map_or(SCREEN_WIDTH + FIRST_PIPE_OFFSET, |last| last.x + PIPE_SPACING);
            self.spawn_pipe(next_x);
        }

        // 5. Pipe collisions
        let hitbox = self.bird.hitbox();
        let gap_size = self.handicap.gap_size();
        if self
            .pipes
            .iter()
            .any(|pipe| pipe.collides_with(&hitbox, gap_size))
        {
            events.push(TickEvent::Collision {
                cause: CollisionCause::Pipe,
            });
            return events;
        }

        // 6. Field bounds
        if self.bird.y > GROUND_LIMIT {
            events.push(TickEvent::Collision {
                cause: CollisionCause::Ground,
            });
        } else if self.bird.y < 0.0 {
            events.push(TickEvent::Collision {
                cause: CollisionCause::Ceiling,
            });
        }

        events
    }

    fn record_pass(&mut self, events: &mut Vec<TickEvent>) {
        self.score += 1;
        if self.score > self.best_score {
            self.best_score = self.score;
            events.push(TickEvent::NewBestScore {
                best: self.best_score,
            });
        }
        events.push(TickEvent::ObstaclePassed { score: self.score });

        let tier = SpeedTier::for_score(self.score);
        if SpeedTier::is_threshold(self.score) {
            events.push(TickEvent::SpeedTierChanged { tier });
        }
        self.tier = tier;
    }

    fn spawn_pipe(&mut self, x: f64) {
        let (low, high) = gap_top_range(self.handicap);
        let gap_top = self.rng.gen_range(low..high);
        self.pipes.push_back(Pipe::new(x, gap_top));
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &VecDeque<Pipe> {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn tier(&self) -> SpeedTier {
        self.tier
    }

    pub fn handicap(&self) -> Handicap {
        self.handicap
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::PIPE_WIDTH;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine() -> Engine<ChaCha8Rng> {
        Engine::new(ChaCha8Rng::seed_from_u64(7), 0)
    }

    /// Replace the pipes with an evenly spaced row whose gap surrounds the
    /// bird's starting height.
    fn place_pipes(engine: &mut Engine<ChaCha8Rng>, first_x: f64) {
        engine.pipes = (0..PIPE_COUNT)
            .map(|i| Pipe::new(first_x + i as f64 * PIPE_SPACING, 200))
            .collect();
    }

    #[test]
    fn test_reset_lays_out_canonical_pipes() {
        let engine = engine();
        assert!((engine.bird().y - 300.0).abs() < f64::EPSILON);
        assert!(engine.bird().velocity.abs() < f64::EPSILON);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tier(), SpeedTier::One);
        assert_eq!(engine.pipes().len(), 3);

        let xs: Vec<f64> = engine.pipes().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1100.0, 1420.0, 1740.0]);
        assert!(engine.pipes().iter().all(|p| !p.passed));
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(1), 42);
        engine.score = 12;
        engine.tier = SpeedTier::Two;
        engine.reset(true);
        assert_eq!(engine.best_score(), 42);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tier(), SpeedTier::One);
        assert!(engine.handicap().hard_mode);
    }

    #[test]
    fn test_gravity_integration() {
        let mut engine = engine();
        engine.tick();
        assert!((engine.bird().velocity - 0.55).abs() < 1e-9);
        assert!((engine.bird().y - 300.55).abs() < 1e-9);

        engine.tick();
        assert!((engine.bird().velocity - 1.10).abs() < 1e-9);
        assert!((engine.bird().y - 301.65).abs() < 1e-9);
    }

    #[test]
    fn test_hard_mode_gravity_is_stronger() {
        let mut engine = engine();
        engine.reset(true);
        engine.tick();
        assert!((engine.bird().velocity - 0.66).abs() < 1e-9);
    }

    #[test]
    fn test_jump_sets_velocity_by_tier() {
        let mut engine = engine();
        engine.jump();
        assert!((engine.bird().velocity - (-11.0)).abs() < 1e-9);

        engine.tier = SpeedTier::Two;
        engine.jump();
        assert!((engine.bird().velocity - (-10.45)).abs() < 1e-9);

        engine.tier = SpeedTier::Three;
        engine.jump();
        assert!((engine.bird().velocity - (-9.9)).abs() < 1e-9);
    }

    #[test]
    fn test_pipes_scroll_by_tier_speed() {
        let mut engine = engine();
        engine.tick();
        assert!((engine.pipes()[0].x - 1096.5).abs() < 1e-9);

        engine.reset(true);
        engine.tick();
        assert!((engine.pipes()[0].x - (1100.0 - 4.55)).abs() < 1e-9);

        engine.reset(false);
        engine.tier = SpeedTier::Three;
        engine.tick();
        assert!((engine.pipes()[0].x - 1094.0).abs() < 1e-9);
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let mut engine = engine();
        // Trailing edge one pixel right of the lane; the next step carries it past
        place_pipes(&mut engine, BIRD_X - PIPE_WIDTH + 1.0);

        let events = engine.tick();
        assert_eq!(engine.score(), 1);
        assert!(engine.pipes()[0].passed);
        assert!(events.contains(&TickEvent::ObstaclePassed { score: 1 }));
        assert!(events.contains(&TickEvent::NewBestScore { best: 1 }));
        assert!(!events.iter().any(TickEvent::is_collision));

        let events = engine.tick();
        assert_eq!(engine.score(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_new_best_only_when_exceeded() {
        let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(3), 50);
        place_pipes(&mut engine, BIRD_X - PIPE_WIDTH + 1.0);
        let events = engine.tick();
        assert_eq!(events, vec![TickEvent::ObstaclePassed { score: 1 }]);
        assert_eq!(engine.best_score(), 50);
    }

    #[test]
    fn test_tier_changes_at_ten() {
        let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(3), 100);
        engine.score = 9;
        place_pipes(&mut engine, BIRD_X - PIPE_WIDTH + 1.0);

        let events = engine.tick();
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.tier(), SpeedTier::Two);
        assert_eq!(
            events,
            vec![
                TickEvent::ObstaclePassed { score: 10 },
                TickEvent::SpeedTierChanged {
                    tier: SpeedTier::Two
                },
            ]
        );

        engine.jump();
        assert!((engine.bird().velocity - (-11.0 * 0.95)).abs() < 1e-9);
    }

    #[test]
    fn test_tier_changes_at_twenty_five() {
        let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(3), 100);
        engine.score = 24;
        engine.tier = SpeedTier::Two;
        place_pipes(&mut engine, BIRD_X - PIPE_WIDTH + 1.0);

        let events = engine.tick();
        assert_eq!(engine.tier(), SpeedTier::Three);
        assert!(events.contains(&TickEvent::SpeedTierChanged {
            tier: SpeedTier::Three
        }));

        engine.jump();
        assert!((engine.bird().velocity - (-11.0 * 0.9)).abs() < 1e-9);
    }

    #[test]
    fn test_offscreen_pipe_is_recycled_behind_the_last() {
        let mut engine = engine();
        place_pipes(&mut engine, -PIPE_WIDTH + 1.0);
        engine.pipes[0].passed = true;
        let old_last_x = engine.pipes[2].x - 3.5;

        engine.tick();

        assert_eq!(engine.pipes().len(), 3);
        let new_last = &engine.pipes()[2];
        assert!((new_last.x - (old_last_x + PIPE_SPACING)).abs() < 1e-9);
        assert!(!new_last.passed);
        for pair in engine.pipes().iter().collect::<Vec<_>>().windows(2) {
            assert!((pair[1].x - pair[0].x - PIPE_SPACING).abs() < 1e-6);
        }
    }

    #[test]
    fn test_pipe_collision_stops_the_tick() {
        let mut engine = engine();
        // Gap starts at 400, so the top arm covers the bird at y≈300
        engine.pipes = (0..PIPE_COUNT)
            .map(|i| Pipe::new(BIRD_X - 20.0 + i as f64 * PIPE_SPACING, 400))
            .collect();
        // Would also be out of bounds; the pipe hit must win
        engine.bird.y = -50.0;
        engine.bird.velocity = 0.0;

        let events = engine.tick();
        assert_eq!(
            events,
            vec![TickEvent::Collision {
                cause: CollisionCause::Pipe
            }]
        );
    }

    #[test]
    fn test_ground_collision() {
        let mut engine = engine();
        engine.bird.y = GROUND_LIMIT + 1.0;
        let events = engine.tick();
        assert_eq!(
            events,
            vec![TickEvent::Collision {
                cause: CollisionCause::Ground
            }]
        );
    }

    #[test]
    fn test_ceiling_collision() {
        let mut engine = engine();
        engine.bird.y = 2.0;
        engine.bird.velocity = -5.0;
        let events = engine.tick();
        assert_eq!(
            events,
            vec![TickEvent::Collision {
                cause: CollisionCause::Ceiling
            }]
        );
    }

    #[test]
    fn test_gap_tops_stay_in_range() {
        let mut engine = engine();
        for hard in [false, true] {
            let (low, high) = gap_top_range(Handicap::new(hard));
            for _ in 0..200 {
                engine.reset(hard);
                for pipe in engine.pipes() {
                    assert!(pipe.gap_top >= low && pipe.gap_top < high);
                }
            }
        }
        assert_eq!(gap_top_range(Handicap::new(false)), (120, 200));
        assert_eq!(gap_top_range(Handicap::new(true)), (80, 240));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Engine::new(ChaCha8Rng::seed_from_u64(99), 0);
        let b = Engine::new(ChaCha8Rng::seed_from_u64(99), 0);
        let gaps_a: Vec<u32> = a.pipes().iter().map(|p| p.gap_top).collect();
        let gaps_b: Vec<u32> = b.pipes().iter().map(|p| p.gap_top).collect();
        assert_eq!(gaps_a, gaps_b);
    }
}
