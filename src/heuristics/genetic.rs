//! Genetic metaheuristic for the visiting-order problem.
//!
//! Population-based search with elitism, tournament selection, ordered
//! constraint-preserving crossover, and swap mutation. All randomness comes
//! from a seeded ChaCha8 generator, so runs are reproducible. The endpoint
//! constraints are honored through a [`TourLayout`] computed once per run:
//! pinned positions are never touched by any operator, and when a round
//! trip has no pinned start the trailing slot simply mirrors whatever place
//! is first.

use crate::constraint::{Endpoints, TourLayout};
use crate::heuristics::TourSearch;
use crate::matrix::TravelMatrices;
use log::debug;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const UNSET: usize = usize::MAX;

/// Genetic strategy configuration.
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Number of generations to evolve; 0 returns the best of the
    /// initial random population.
    pub generations: usize,
    /// Probability of mutating an offspring.
    pub mutation_rate: f64,
    /// Fraction of the population carried over unchanged each generation.
    pub elite_frac: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.2,
            elite_frac: 0.1,
            seed: 42,
        }
    }
}

/// Individual in the population: a tour and its travel cost.
#[derive(Debug, Clone)]
struct Individual {
    tour: Vec<usize>,
    cost: f64,
}

impl Individual {
    fn new(tour: Vec<usize>, matrices: &TravelMatrices) -> Self {
        let cost = matrices.path_cost(&tour);
        Individual { tour, cost }
    }
}

/// Genetic optimization strategy.
#[derive(Debug, Clone)]
pub struct Genetic {
    pub config: GaConfig,
}

impl Genetic {
    pub fn new() -> Self {
        Genetic {
            config: GaConfig::default(),
        }
    }

    pub fn with_config(config: GaConfig) -> Self {
        Genetic { config }
    }

    /// Evolve a tour honoring `endpoints`. Lower travel cost is fitter;
    /// the best individual of the final population is returned.
    pub fn optimize(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize> {
        let n = matrices.len();
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![0];
        }

        let layout = TourLayout::new(n, endpoints);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let pop_size = self.config.population_size.max(1);

        let mut population: Vec<Individual> = (0..pop_size)
            .map(|_| Individual::new(self.random_tour(&layout, &mut rng), matrices))
            .collect();

        let elite_count = ((self.config.elite_frac * pop_size as f64) as usize).max(1);

        for generation in 0..self.config.generations {
            population.sort_by_key(|ind| OrderedFloat(ind.cost));
            debug!(
                "generation {}/{}: best cost {:.3}",
                generation, self.config.generations, population[0].cost
            );

            let mut next: Vec<Individual> =
                population.iter().take(elite_count).cloned().collect();

            while next.len() < pop_size {
                let (first, second) = self.select_parents(&population, &mut rng);
                let mut child = self.crossover(
                    &population[first].tour,
                    &population[second].tour,
                    &layout,
                    &mut rng,
                );

                if rng.gen::<f64>() < self.config.mutation_rate {
                    self.mutate(&mut child, &layout, &mut rng);
                }

                next.push(Individual::new(child, matrices));
            }

            population = next;
        }

        population.sort_by_key(|ind| OrderedFloat(ind.cost));
        population
            .into_iter()
            .next()
            .map(|ind| ind.tour)
            .unwrap_or_default()
    }

    /// Fixed slots from the layout, remaining places shuffled into the
    /// free slots.
    fn random_tour(&self, layout: &TourLayout, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut tour = vec![UNSET; layout.len()];
        for pos in 0..layout.len() {
            if let Some(place) = layout.pinned_at(pos) {
                tour[pos] = place;
            }
        }

        let mut places = layout.free_places();
        places.shuffle(rng);
        for (pos, place) in layout.free_positions().into_iter().zip(places) {
            tour[pos] = place;
        }

        if layout.mirrors_last() {
            tour[layout.len() - 1] = tour[0];
        }
        tour
    }

    /// Tournament of size 3 (without replacement): the two fittest of the
    /// draw become the parents.
    fn select_parents(&self, population: &[Individual], rng: &mut ChaCha8Rng) -> (usize, usize) {
        let draw = rand::seq::index::sample(rng, population.len(), 3.min(population.len()));
        let mut picks: Vec<usize> = draw.into_vec();
        picks.sort_by_key(|&i| OrderedFloat(population[i].cost));

        let first = picks[0];
        let second = picks.get(1).copied().unwrap_or(first);
        (first, second)
    }

    /// Ordered crossover over the free span: a random segment comes from
    /// parent 1, the rest fills left-to-right in parent 2's order. The
    /// parent-2 cursor is bounded; if it runs dry the fill falls back to
    /// the lowest place missing from the child.
    fn crossover(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        layout: &TourLayout,
        rng: &mut ChaCha8Rng,
    ) -> Vec<usize> {
        let len = layout.len();
        let mut child = vec![UNSET; len];
        for pos in 0..len {
            if let Some(place) = layout.pinned_at(pos) {
                child[pos] = place;
            }
        }

        let free = layout.free_positions();
        if let (Some(&lo), Some(&hi)) = (free.first(), free.last()) {
            let segment_start = rng.gen_range(lo..=hi);
            let segment_end = rng.gen_range(segment_start..=hi);
            child[segment_start..=segment_end]
                .copy_from_slice(&parent1[segment_start..=segment_end]);

            let mut cursor = 0;
            for pos in lo..=hi {
                if child[pos] != UNSET {
                    continue;
                }
                while cursor < parent2.len()
                    && (child.contains(&parent2[cursor])
                        || layout.is_pinned_place(parent2[cursor]))
                {
                    cursor += 1;
                }
                if cursor < parent2.len() {
                    child[pos] = parent2[cursor];
                    cursor += 1;
                } else {
                    child[pos] = layout
                        .free_places()
                        .into_iter()
                        .find(|place| !child.contains(place))
                        .unwrap_or(parent1[pos]);
                }
            }
        }

        if layout.mirrors_last() {
            child[len - 1] = child[0];
        }
        child
    }

    /// Swap two free positions, then re-sync the mirrored trailing slot.
    fn mutate(&self, tour: &mut [usize], layout: &TourLayout, rng: &mut ChaCha8Rng) {
        let free = layout.free_positions();
        if free.len() < 2 {
            return;
        }

        let picks = rand::seq::index::sample(rng, free.len(), 2);
        tour.swap(free[picks.index(0)], free[picks.index(1)]);

        if layout.mirrors_last() {
            tour[layout.len() - 1] = tour[0];
        }
    }
}

impl Default for Genetic {
    fn default() -> Self {
        Self::new()
    }
}

impl TourSearch for Genetic {
    fn search(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize> {
        self.optimize(matrices, endpoints)
    }

    fn name(&self) -> &'static str {
        "genetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrices(distance: Vec<Vec<f64>>) -> TravelMatrices {
        let duration = distance.clone();
        TravelMatrices::new(distance, duration).unwrap()
    }

    fn four_city() -> TravelMatrices {
        matrices(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
    }

    fn small_config(generations: usize) -> GaConfig {
        GaConfig {
            population_size: 30,
            generations,
            ..GaConfig::default()
        }
    }

    /// Every place exactly once, plus the trailing repeat on closed tours.
    fn assert_valid_tour(tour: &[usize], n: usize, closed: bool) {
        let body = if closed {
            assert_eq!(tour.len(), n + 1);
            assert_eq!(tour.first(), tour.last());
            &tour[..n]
        } else {
            assert_eq!(tour.len(), n);
            tour
        };
        let mut sorted = body.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_generations_returns_best_of_initial_population() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(0));
        let tour = ga.optimize(&matrices, &Endpoints::round_trip());
        assert_valid_tour(&tour, 4, true);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(20));
        let spec = Endpoints::round_trip();
        assert_eq!(ga.optimize(&matrices, &spec), ga.optimize(&matrices, &spec));
    }

    #[test]
    fn test_finds_the_optimal_round_trip() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(60));
        let tour = ga.optimize(&matrices, &Endpoints::round_trip());
        assert_valid_tour(&tour, 4, true);
        assert_eq!(matrices.path_cost(&tour), 80.0);
    }

    #[test]
    fn test_fixed_start_round_trip_pins_both_ends() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(15));
        let spec = Endpoints {
            start: Some(2),
            end: None,
            return_to_start: true,
        };
        let tour = ga.optimize(&matrices, &spec);
        assert_valid_tour(&tour, 4, true);
        assert_eq!(tour[0], 2);
        assert_eq!(tour[4], 2);
    }

    #[test]
    fn test_fixed_end_open_tour() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(15));
        let spec = Endpoints {
            start: None,
            end: Some(1),
            return_to_start: false,
        };
        let tour = ga.optimize(&matrices, &spec);
        assert_valid_tour(&tour, 4, false);
        assert_eq!(*tour.last().unwrap(), 1);
    }

    #[test]
    fn test_fixed_end_round_trip_keeps_end_before_the_return_leg() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(15));
        let spec = Endpoints {
            start: None,
            end: Some(3),
            return_to_start: true,
        };
        let tour = ga.optimize(&matrices, &spec);
        assert_valid_tour(&tour, 4, true);
        assert_eq!(tour[3], 3);
    }

    #[test]
    fn test_both_fixed_open_tour() {
        let matrices = four_city();
        let ga = Genetic::with_config(small_config(15));
        let spec = Endpoints {
            start: Some(3),
            end: Some(0),
            return_to_start: false,
        };
        let tour = ga.optimize(&matrices, &spec);
        assert_valid_tour(&tour, 4, false);
        assert_eq!(tour[0], 3);
        assert_eq!(tour[3], 0);
    }

    #[test]
    fn test_tiny_population_does_not_panic() {
        let matrices = four_city();
        let ga = Genetic::with_config(GaConfig {
            population_size: 2,
            generations: 5,
            ..GaConfig::default()
        });
        let tour = ga.optimize(&matrices, &Endpoints::free());
        assert_valid_tour(&tour, 4, false);
    }

    #[test]
    fn test_trivial_sizes() {
        let ga = Genetic::new();
        let empty = TravelMatrices::new(Vec::new(), Vec::new()).unwrap();
        assert!(ga.optimize(&empty, &Endpoints::free()).is_empty());

        let single = matrices(vec![vec![0.0]]);
        assert_eq!(ga.optimize(&single, &Endpoints::free()), vec![0]);
    }
}
