//! Obstacle layout by rejection sampling
//!
//! Best-effort packing: candidates are drawn uniformly and kept only when they
//! clear every accepted rock by the configured buffer and sit inside the play
//! band. The attempt budget bounds the loop, so a crowded surface simply ends
//! up with fewer rocks.

use rand::Rng;

use super::collision::check_collision;
use super::object::EntityIds;
use super::obstacle::Obstacle;
use crate::config::GameConfig;
use crate::consts::OBSTACLE_SPRITE_WIDTH;

/// Candidate keeps `buffer` of clearance to every accepted obstacle
pub fn clear_of(candidate: &Obstacle, accepted: &[Obstacle], buffer: f32) -> bool {
    accepted.iter().all(|other| {
        let c = check_collision(candidate, other);
        c.distance >= c.sum_of_radii + buffer
    })
}

/// Candidate's sprite stays on screen and its base sits inside the play band
pub fn fits_play_band(candidate: &Obstacle, config: &GameConfig) -> bool {
    let sprite_x = candidate.pos.x - OBSTACLE_SPRITE_WIDTH * 0.5;
    let margin = candidate.radius * 3.0;
    sprite_x > 0.0
        && sprite_x < config.width - OBSTACLE_SPRITE_WIDTH
        && candidate.pos.y > config.top_margin + margin
        && candidate.pos.y < config.height - margin
}

/// Top `obstacles` up toward `config.obstacle_count`
///
/// Rocks already in `obstacles` count toward the target and are respected by
/// the spacing check. Returns how many were added.
pub fn place_obstacles<R: Rng + ?Sized>(
    obstacles: &mut Vec<Obstacle>,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut R,
) -> usize {
    let before = obstacles.len();
    let mut attempts = 0;

    while obstacles.len() < config.obstacle_count && attempts < config.obstacle_attempts {
        let candidate = Obstacle::candidate(0, config.width, config.height, rng);
        if clear_of(&candidate, obstacles, config.obstacle_buffer)
            && fits_play_band(&candidate, config)
        {
            obstacles.push(Obstacle {
                id: ids.next_id(),
                ..candidate
            });
        }
        attempts += 1;
    }

    let placed = obstacles.len() - before;
    if obstacles.len() < config.obstacle_count {
        log::debug!(
            "Placed {} of {} obstacles after {} attempts",
            obstacles.len(),
            config.obstacle_count,
            attempts
        );
    } else {
        log::debug!("Placed {} obstacles in {} attempts", placed, attempts);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::renderer::SpriteFrame;

    fn layout(seed: u64, config: &GameConfig) -> Vec<Obstacle> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::default();
        let mut obstacles = Vec::new();
        place_obstacles(&mut obstacles, config, &mut ids, &mut rng);
        obstacles
    }

    #[test]
    fn test_default_layout_places_some_obstacles() {
        let config = GameConfig::default();
        let obstacles = layout(1, &config);
        assert!(!obstacles.is_empty());
        assert!(obstacles.len() <= config.obstacle_count);
    }

    #[test]
    fn test_ids_are_sorted_and_unique() {
        let obstacles = layout(9, &GameConfig::default());
        assert!(obstacles.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_impossible_band_places_nothing() {
        // Play band narrower than the margins: every candidate is rejected
        let config = GameConfig {
            height: 400.0,
            top_margin: 300.0,
            ..GameConfig::default()
        };
        assert!(layout(5, &config).is_empty());
    }

    #[test]
    fn test_existing_obstacles_are_respected() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ids = EntityIds::default();
        let mut obstacles = vec![Obstacle::new(
            ids.next_id(),
            Vec2::new(640.0, 480.0),
            40.0,
            SpriteFrame::default(),
        )];
        place_obstacles(&mut obstacles, &config, &mut ids, &mut rng);

        let first = &obstacles[0];
        assert!(clear_of(first, &obstacles[1..], config.obstacle_buffer));
    }

    proptest! {
        #[test]
        fn prop_layout_is_spaced_and_in_bounds(seed in any::<u64>()) {
            let config = GameConfig::default();
            let obstacles = layout(seed, &config);

            prop_assert!(obstacles.len() <= config.obstacle_count);
            for (i, rock) in obstacles.iter().enumerate() {
                prop_assert!(fits_play_band(rock, &config));
                prop_assert!(clear_of(rock, &obstacles[i + 1..], config.obstacle_buffer));
            }
        }
    }
}
