//! Fixed timestep simulation tick
//!
//! Advances the game state by exactly one step. The phase order is fixed:
//! player, enemies, projectiles, then hit resolution.

use rand::Rng;

use super::collision::intersects;
use super::state::{Enemy, GameState, Projectile};

/// What happened during a tick (for logging and tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// (projectile index, enemy index) pairs at collision time
    pub hits: Vec<(usize, usize)>,
    /// Projectiles removed for stalling against the field edge
    pub culled: usize,
}

impl TickReport {
    pub fn enemies_destroyed(&self) -> usize {
        self.hits.len()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TickReport {
    let field = state.field;
    let settings = &state.settings;

    // Player moves along the held direction, if any
    let held = state.player.held;
    state.player.drive(held, settings.player_step, &field);

    // Each enemy rolls its own direction
    for enemy in &mut state.enemies {
        enemy.wander(rng, settings.enemy_step, &field);
    }

    for projectile in &mut state.projectiles {
        projectile.advance(&field);
    }

    let hits = find_hits(&state.projectiles, &state.enemies);
    if !hits.is_empty() {
        remove_hits(state, &hits);
    }

    let mut culled = 0;
    if state.settings.cull_stalled_projectiles {
        let before = state.projectiles.len();
        state.projectiles.retain(|p| !p.stalled);
        culled = before - state.projectiles.len();
    }

    state.time_ticks += 1;

    TickReport { hits, culled }
}

/// Pair each projectile with the first live enemy it touches
///
/// A projectile destroys at most one enemy, and an enemy already claimed
/// by an earlier projectile this tick cannot be hit again.
fn find_hits(projectiles: &[Projectile], enemies: &[Enemy]) -> Vec<(usize, usize)> {
    let mut claimed = vec![false; enemies.len()];
    let mut hits = Vec::new();

    for (projectile_idx, projectile) in projectiles.iter().enumerate() {
        let shell = projectile.bounds();
        let target = enemies
            .iter()
            .enumerate()
            .find(|(enemy_idx, enemy)| !claimed[*enemy_idx] && intersects(&shell, &enemy.bounds()))
            .map(|(enemy_idx, _)| enemy_idx);

        if let Some(enemy_idx) = target {
            claimed[enemy_idx] = true;
            hits.push((projectile_idx, enemy_idx));
        }
    }

    hits
}

/// Rebuild both collections without the entities marked by `hits`
fn remove_hits(state: &mut GameState, hits: &[(usize, usize)]) {
    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.enemies.len()];
    for &(projectile_idx, enemy_idx) in hits {
        spent[projectile_idx] = true;
        destroyed[enemy_idx] = true;
        log::debug!(
            "projectile {} destroyed enemy {} at {:?}",
            projectile_idx,
            enemy_idx,
            state.enemies[enemy_idx].pos
        );
    }

    state.projectiles = std::mem::take(&mut state.projectiles)
        .into_iter()
        .zip(spent)
        .filter_map(|(projectile, spent)| (!spent).then_some(projectile))
        .collect();
    state.enemies = std::mem::take(&mut state.enemies)
        .into_iter()
        .zip(destroyed)
        .filter_map(|(enemy, destroyed)| (!destroyed).then_some(enemy))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::input::InputEvent;
    use crate::sim::state::Direction;
    use glam::{IVec2, Vec2};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state(seed: u64) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&Settings::default(), &mut rng);
        (state, rng)
    }

    #[test]
    fn test_tick_counts() {
        let (mut state, mut rng) = new_state(12345);
        tick(&mut state, &mut rng);
        tick(&mut state, &mut rng);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_held_direction_moves_player_each_tick() {
        let (mut state, mut rng) = new_state(1);
        let start = state.player.pos;

        state.handle_input(InputEvent::DirectionPressed(Direction::Right));
        tick(&mut state, &mut rng);
        assert_eq!(state.player.pos, start + IVec2::new(2, 0));

        // Tap another key: movement continues to the right
        state.handle_input(InputEvent::DirectionPressed(Direction::Up));
        state.handle_input(InputEvent::DirectionReleased(Direction::Up));
        state.handle_input(InputEvent::DirectionPressed(Direction::Right));
        tick(&mut state, &mut rng);
        assert_eq!(state.player.pos, start + IVec2::new(4, 0));

        state.handle_input(InputEvent::DirectionReleased(Direction::Right));
        tick(&mut state, &mut rng);
        assert_eq!(state.player.pos, start + IVec2::new(4, 0));
    }

    #[test]
    fn test_fired_projectile_travels_speed_per_tick() {
        let (mut state, mut rng) = new_state(2);
        state.enemies.clear();

        state.handle_input(InputEvent::DirectionPressed(Direction::Up));
        state.handle_input(InputEvent::FirePressed);
        let spawn = state.projectiles[0].pos;
        assert_eq!(spawn, state.player.muzzle(10));

        tick(&mut state, &mut rng);
        let shell = &state.projectiles[0];
        assert_eq!(shell.pos.x, spawn.x);
        assert_eq!(shell.pos.y, spawn.y - 3.0);
    }

    #[test]
    fn test_hit_removes_projectile_and_enemy() {
        let (mut state, mut rng) = new_state(3);
        let player_before = state.player.pos;

        // Park an enemy right next to where the shell will be after one tick
        let muzzle = state.player.muzzle(10);
        state.enemies[0].pos = IVec2::new(muzzle.x as i32, muzzle.y as i32 - 40);
        state.handle_input(InputEvent::FirePressed);

        let report = tick(&mut state, &mut rng);
        assert_eq!(report.enemies_destroyed(), 1);
        assert_eq!(state.enemies.len(), 4);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.pos, player_before);
    }

    #[test]
    fn test_oversized_step_from_settings_file_ticks_safely() {
        let json = r#"{ "player_step": 2147483647, "enemy_step": 2147483647 }"#;
        let settings = Settings::from_json(json).unwrap().validated();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut state = GameState::new(&settings, &mut rng);

        state.handle_input(InputEvent::DirectionPressed(Direction::Right));
        tick(&mut state, &mut rng);
        assert_eq!(state.player.pos.x, 750);
        assert!(state.all_in_bounds());
    }

    #[test]
    fn test_one_enemy_per_projectile() {
        let (mut state, mut rng) = new_state(4);
        state.enemies = vec![
            Enemy::new(IVec2::new(100, 100), 40),
            Enemy::new(IVec2::new(100, 100), 40),
        ];
        state.settings.enemy_step = 0;
        state.projectiles = vec![Projectile::new(
            Vec2::new(110.0, 110.0),
            10.0,
            Direction::Left,
            3.0,
        )];

        let report = tick(&mut state, &mut rng);
        assert_eq!(report.hits, vec![(0, 0)]);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_two_projectiles_cannot_claim_same_enemy() {
        let (mut state, mut rng) = new_state(5);
        state.settings.enemy_step = 0;
        state.enemies = vec![Enemy::new(IVec2::new(300, 300), 40)];
        state.projectiles = vec![
            Projectile::new(Vec2::new(310.0, 310.0), 10.0, Direction::Up, 3.0),
            Projectile::new(Vec2::new(320.0, 320.0), 10.0, Direction::Down, 3.0),
        ];

        let report = tick(&mut state, &mut rng);
        assert_eq!(report.hits, vec![(0, 0)]);
        assert!(state.enemies.is_empty());
        // The second shell found nothing left to hit and keeps flying
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].direction, Direction::Down);
    }

    #[test]
    fn test_stalled_projectile_is_culled() {
        let (mut state, mut rng) = new_state(6);
        state.enemies.clear();
        state.projectiles = vec![Projectile::new(
            Vec2::new(200.0, 1.0),
            10.0,
            Direction::Up,
            3.0,
        )];

        let report = tick(&mut state, &mut rng);
        assert_eq!(report.culled, 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_stalled_projectile_kept_when_culling_disabled() {
        let (mut state, mut rng) = new_state(6);
        state.settings.cull_stalled_projectiles = false;
        state.enemies.clear();
        state.projectiles = vec![Projectile::new(
            Vec2::new(200.0, 1.0),
            10.0,
            Direction::Up,
            3.0,
        )];

        for _ in 0..10 {
            tick(&mut state, &mut rng);
        }
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(200.0, 1.0));
    }

    #[test]
    fn test_stalled_projectile_still_hits_this_tick() {
        let (mut state, mut rng) = new_state(7);
        state.settings.enemy_step = 0;
        state.enemies = vec![Enemy::new(IVec2::new(200, 0), 40)];
        state.projectiles = vec![Projectile::new(
            Vec2::new(210.0, 1.0),
            10.0,
            Direction::Up,
            3.0,
        )];

        let report = tick(&mut state, &mut rng);
        assert_eq!(report.enemies_destroyed(), 1);
        assert_eq!(report.culled, 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_determinism() {
        let (mut state1, mut rng1) = new_state(99999);
        let (mut state2, mut rng2) = new_state(99999);

        let inputs = [
            Some(InputEvent::DirectionPressed(Direction::Left)),
            Some(InputEvent::FirePressed),
            None,
            Some(InputEvent::DirectionReleased(Direction::Left)),
            Some(InputEvent::FirePressed),
        ];

        for input in inputs {
            if let Some(event) = input {
                state1.handle_input(event);
                state2.handle_input(event);
            }
            tick(&mut state1, &mut rng1);
            tick(&mut state2, &mut rng2);
        }

        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.projectiles, state2.projectiles);
    }

    proptest! {
        #[test]
        fn prop_everything_stays_in_field(
            seed in any::<u64>(),
            presses in prop::collection::vec((0u32..6, 0u32..4), 1..300)
        ) {
            let (mut state, mut rng) = new_state(seed);
            let mut enemies = state.enemies.len();

            for (action, dir) in presses {
                let direction = Direction::from_index(dir).unwrap_or(Direction::Up);
                match action {
                    0 => state.handle_input(InputEvent::DirectionPressed(direction)),
                    1 => state.handle_input(InputEvent::DirectionReleased(direction)),
                    2 => state.handle_input(InputEvent::FirePressed),
                    _ => {}
                }
                tick(&mut state, &mut rng);

                prop_assert!(state.all_in_bounds());
                prop_assert!(state.enemies.len() <= enemies);
                enemies = state.enemies.len();
            }
        }
    }
}
