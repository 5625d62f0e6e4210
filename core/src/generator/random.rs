use alloc::collections::BTreeSet;
use alloc::format;
use alloc::vec::Vec;

use super::*;

/// Smallest value a number-mode tile can show.
pub const NUMBER_MIN: u16 = 1000;

/// Largest value a number-mode tile can show.
pub const NUMBER_MAX: u16 = 9999;

/// Generation strategy that is purely seed-driven: photo mode draws
/// identifiers from the pool without replacement, number mode samples
/// distinct four-digit values.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomTileSetGenerator {
    seed: u64,
    pool: ImagePool,
}

impl RandomTileSetGenerator {
    pub fn new(seed: u64, pool: ImagePool) -> Self {
        Self { seed, pool }
    }
}

impl TileSetGenerator for RandomTileSetGenerator {
    fn generate(self, config: GameConfig) -> Result<TileSet> {
        use rand::prelude::*;

        let total = config.total_tiles();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let tiles: Vec<Tile> = match config.mode {
            TileMode::Photo => {
                let available = self.pool.available();
                if available < total {
                    return Err(GameError::PoolTooSmall {
                        required: total,
                        available,
                    });
                }

                let mut ids = self.pool.into_ids();
                // partial Fisher-Yates: the chosen slice is a uniform draw
                // without replacement, already in random order
                let (chosen, _rest) = ids.partial_shuffle(&mut rng, usize::from(total));
                chosen
                    .iter_mut()
                    .enumerate()
                    .map(|(i, id)| Tile::new(format!("photo-{i}"), core::mem::take(id)))
                    .collect()
            }
            TileMode::Number => {
                // resampling can only finish if the numeral space covers the
                // request; an unclamped config must not spin forever
                let available = NUMBER_MAX - NUMBER_MIN + 1;
                if available < total {
                    return Err(GameError::PoolTooSmall {
                        required: total,
                        available,
                    });
                }

                let mut seen = BTreeSet::new();
                let mut tiles = Vec::with_capacity(usize::from(total));
                while tiles.len() < usize::from(total) {
                    let value: u16 = rng.random_range(NUMBER_MIN..=NUMBER_MAX);
                    // resample on collision, uniqueness is enforced rather than assumed
                    if !seen.insert(value) {
                        continue;
                    }
                    tiles.push(Tile::new(
                        format!("number-{}", tiles.len()),
                        format!("{value}"),
                    ));
                }
                tiles
            }
        };

        TileSet::new(config, tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn pool() -> ImagePool {
        let ids = (0..25).map(|i| format!("img-{i:02}")).collect();
        ImagePool::new(ids).unwrap()
    }

    fn generate(seed: u64, grid_size: GridSize, mode: TileMode) -> TileSet {
        RandomTileSetGenerator::new(seed, pool())
            .generate(GameConfig::new(grid_size, mode))
            .unwrap()
    }

    #[test]
    fn fills_every_grid_size_with_distinct_contents() {
        for grid_size in MIN_GRID_SIZE..=MAX_GRID_SIZE {
            for mode in [TileMode::Photo, TileMode::Number] {
                let tile_set = generate(42, grid_size, mode);

                assert_eq!(tile_set.total_tiles(), square(grid_size));
                let contents: BTreeSet<_> =
                    tile_set.tiles().iter().map(|tile| &tile.content).collect();
                assert_eq!(contents.len(), tile_set.tiles().len());
            }
        }
    }

    #[test]
    fn photo_tiles_draw_from_the_pool() {
        let tile_set = generate(7, 4, TileMode::Photo);

        let pool_ids: BTreeSet<String> = pool().ids().iter().cloned().collect();
        for tile in tile_set.tiles() {
            assert!(pool_ids.contains(&tile.content));
        }
    }

    #[test]
    fn number_tiles_are_four_digit_numerals() {
        let tile_set = generate(7, 5, TileMode::Number);

        for tile in tile_set.tiles() {
            let value: u16 = tile.content.parse().unwrap();
            assert!((NUMBER_MIN..=NUMBER_MAX).contains(&value));
        }
    }

    #[test]
    fn tile_ids_are_positional() {
        let tile_set = generate(3, 2, TileMode::Number);

        let ids: Vec<_> = tile_set.tiles().iter().map(|tile| tile.id.as_str()).collect();
        assert_eq!(ids, ["number-0", "number-1", "number-2", "number-3"]);
    }

    #[test]
    fn same_seed_reproduces_the_same_tile_set() {
        for mode in [TileMode::Photo, TileMode::Number] {
            assert_eq!(generate(99, 5, mode), generate(99, 5, mode));
        }
    }

    #[test]
    fn different_seeds_produce_different_tile_sets() {
        assert_ne!(
            generate(1, 5, TileMode::Photo),
            generate(2, 5, TileMode::Photo)
        );
    }

    #[test]
    fn small_pool_is_rejected_at_generation_time() {
        // deserialization bypasses the constructor check, generation still guards
        let small: ImagePool = serde_json::from_str(r#"{"ids":["a","b","c"]}"#).unwrap();

        let result = RandomTileSetGenerator::new(0, small)
            .generate(GameConfig::new(2, TileMode::Photo));

        assert_eq!(
            result,
            Err(GameError::PoolTooSmall {
                required: 4,
                available: 3,
            })
        );
    }

    #[test]
    fn oversized_number_grid_is_rejected_at_generation_time() {
        // an unclamped config can ask for more tiles than there are numerals
        let config = GameConfig::new_unchecked(100, TileMode::Number);

        let result = RandomTileSetGenerator::new(0, pool()).generate(config);

        assert_eq!(
            result,
            Err(GameError::PoolTooSmall {
                required: 10_000,
                available: 9_000,
            })
        );
    }
}
