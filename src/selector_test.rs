use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn options(weights: &[(&str, u32)]) -> Vec<WheelOption> {
    weights
        .iter()
        .map(|(name, weight)| WheelOption::new(*name, *weight).unwrap())
        .collect()
}

// =============================================================================
// index_for_draw
// =============================================================================

#[test]
fn draw_maps_to_cumulative_runs() {
    let opts = options(&[("A", 3), ("B", 2), ("C", 1)]);
    let expected = [0, 0, 0, 1, 1, 2];
    for (draw, want) in (1..=6).zip(expected) {
        assert_eq!(index_for_draw(&opts, draw), Some(want), "draw {draw}");
    }
}

#[test]
fn draw_outside_range_is_none() {
    let opts = options(&[("A", 3), ("B", 2), ("C", 1)]);
    assert_eq!(index_for_draw(&opts, 0), None);
    assert_eq!(index_for_draw(&opts, 7), None);
}

#[test]
fn zero_weight_options_own_no_draws() {
    let mut opts = options(&[("A", 1), ("B", 1), ("C", 2)]);
    opts[1].weight = 0;
    assert_eq!(index_for_draw(&opts, 1), Some(0));
    assert_eq!(index_for_draw(&opts, 2), Some(2));
    assert_eq!(index_for_draw(&opts, 3), Some(2));
}

// =============================================================================
// select
// =============================================================================

#[test]
fn select_rejects_empty_list() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(select(&[], &mut rng), Err(InvalidInput::NoOptions));
}

#[test]
fn select_rejects_zero_total_weight() {
    let mut opts = options(&[("A", 1), ("B", 1)]);
    for o in &mut opts {
        o.weight = 0;
    }
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(select(&opts, &mut rng), Err(InvalidInput::ZeroTotalWeight));
}

#[test]
fn select_always_returns_index_in_range() {
    let opts = options(&[("A", 4), ("B", 1), ("C", 7), ("D", 2)]);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1_000 {
        let index = select(&opts, &mut rng).unwrap();
        assert!(index < opts.len());
    }
}

#[test]
fn select_is_reproducible_with_same_seed() {
    let opts = options(&[("A", 3), ("B", 2), ("C", 1)]);
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let picks_a: Vec<usize> = (0..100).map(|_| select(&opts, &mut a).unwrap()).collect();
    let picks_b: Vec<usize> = (0..100).map(|_| select(&opts, &mut b).unwrap()).collect();
    assert_eq!(picks_a, picks_b);
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn sampling_converges_to_weight_share() {
    const DRAWS: usize = 60_000;
    let opts = options(&[("A", 5), ("B", 3), ("C", 1), ("D", 1)]);
    let total = total_weight(&opts) as f64;
    let mut counts = vec![0usize; opts.len()];
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..DRAWS {
        counts[select(&opts, &mut rng).unwrap()] += 1;
    }

    for (option, count) in opts.iter().zip(counts) {
        let expected = f64::from(option.weight) / total;
        let observed = count as f64 / DRAWS as f64;
        assert!(
            (observed - expected).abs() < 0.01,
            "{}: observed {observed:.4}, expected {expected:.4}",
            option.name
        );
    }
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn heavy_option_wins_almost_always() {
    const DRAWS: usize = 20_000;
    let opts = options(&[("Light1", 1), ("Heavy", 1000), ("Light2", 1)]);
    let mut rng = StdRng::seed_from_u64(99);
    let heavy_wins = (0..DRAWS)
        .filter(|_| select(&opts, &mut rng).unwrap() == 1)
        .count();
    // Expected share is 1000/1002, about 0.998.
    assert!(heavy_wins as f64 / DRAWS as f64 > 0.99);
}
