//! End-to-end scenarios and the chi-squared goodness-of-fit check that is
//! the central correctness claim of the composition-and-rejection sampler:
//! over many draws, the empirical frequency of each element converges to
//! `weight / total_weight`.

use std::collections::HashMap;

use weighted_sampling_set::WeightedSamplingSet;

/// Chi-squared critical values at p = 0.001 for small degrees of freedom,
/// used by `chi_squared_goodness_of_fit` below. `df = k - 1` for `k`
/// categories.
fn critical_value_p001(df: usize) -> f64 {
    match df {
        1 => 10.828,
        2 => 13.816,
        3 => 16.266,
        4 => 18.467,
        5 => 20.515,
        6 => 22.458,
        7 => 24.322,
        8 => 26.125,
        9 => 27.877,
        _ => panic!("no tabulated critical value for df = {df}"),
    }
}

/// Fails the test if the observed category counts are inconsistent with the
/// expected proportions at significance level p = 0.001 (i.e. passes when
/// the fit is at least as good as a p > 0.001 threshold demands).
fn assert_goodness_of_fit(observed: &[u64], expected_proportions: &[f64], n: u64) {
    assert_eq!(observed.len(), expected_proportions.len());
    let statistic: f64 = observed
        .iter()
        .zip(expected_proportions)
        .map(|(&o, &p)| {
            let expected = p * n as f64;
            (o as f64 - expected).powi(2) / expected
        })
        .sum();
    let df = observed.len() - 1;
    let critical = critical_value_p001(df);
    assert!(
        statistic < critical,
        "chi-squared statistic {statistic} exceeds critical value {critical} at df={df} \
         (observed={observed:?}, expected_proportions={expected_proportions:?})"
    );
}

#[test]
fn scenario_1_two_elements_skewed_weights() {
    let mut set = WeightedSamplingSet::with_seed(1.0, 100.0, 1);
    set.insert("a", 1.0).unwrap();
    set.insert("b", 99.0).unwrap();
    assert_eq!(set.total_weight(), 100.0);
    assert_eq!(set.size(), 2);

    let n = 100_000u64;
    let mut counts = HashMap::new();
    for _ in 0..n {
        let (e, _) = set.sample().unwrap();
        *counts.entry(e).or_insert(0u64) += 1;
    }

    let freq_a = *counts.get("a").unwrap_or(&0) as f64 / n as f64;
    let freq_b = *counts.get("b").unwrap_or(&0) as f64 / n as f64;
    assert!((freq_a - 0.01).abs() < 0.002, "freq_a = {freq_a}");
    assert!((freq_b - 0.99).abs() < 0.002, "freq_b = {freq_b}");

    assert_goodness_of_fit(
        &[*counts.get("a").unwrap_or(&0), *counts.get("b").unwrap_or(&0)],
        &[0.01, 0.99],
        n,
    );
}

#[test]
fn scenario_2_single_element_determinism() {
    let mut set = WeightedSamplingSet::with_seed(1.0, 100.0, 2);
    set.insert("x", 42.0).unwrap();
    for _ in 0..100 {
        assert_eq!(set.sample(), Some(("x", 42.0)));
    }

    let results: Vec<_> = set.sample_without_replacement(3).collect();
    assert_eq!(results, vec![Some(("x", 42.0)), None, None]);
}

#[test]
fn scenario_3_update_across_groups() {
    let mut set = WeightedSamplingSet::with_seed(1.0, 1024.0, 3);
    set.insert("e", 1.5).unwrap();
    set.set_weight(&"e", 300.0).unwrap();

    assert_eq!(set.get_weight(&"e"), Some(300.0));
    assert_eq!(set.total_weight(), 300.0);
    for _ in 0..50 {
        assert_eq!(set.sample(), Some(("e", 300.0)));
    }
}

#[test]
fn scenario_4_erase_correctness_with_swap_remove() {
    let mut set = WeightedSamplingSet::with_seed(1.0, 100.0, 4);
    set.insert("a", 10.0).unwrap();
    set.insert("b", 10.0).unwrap();
    set.insert("c", 10.0).unwrap();
    set.erase(&"b").unwrap();

    let mut remaining: Vec<_> = set.iterate().map(|(e, w)| (*e, w)).collect();
    remaining.sort_by_key(|(e, _)| *e);
    assert_eq!(remaining, vec![("a", 10.0), ("c", 10.0)]);
    assert_eq!(set.total_weight(), 20.0);
}

#[test]
fn scenario_5_copy_independence_with_seed() {
    let mut set = WeightedSamplingSet::with_seed(1.0, 100.0, 5);
    set.insert("a", 10.0).unwrap();
    set.insert("b", 20.0).unwrap();
    set.insert("c", 30.0).unwrap();

    let mut copy = set.copy(Some(12345));

    set.erase(&"a").unwrap();
    set.erase(&"b").unwrap();
    set.erase(&"c").unwrap();

    assert_eq!(copy.size(), 3);
    assert!(copy.sample().is_some());
}

#[test]
fn scenario_6_heavy_skew_narrow_range_converges() {
    // w_min=1, w_max=2 (two groups: [1,2) and the boundary weight 2 itself)
    // with 1000 weight-1 elements and one weight-2 element: the weight-2
    // element should be sampled roughly twice as often per-element as any
    // weight-1 element.
    let mut set: WeightedSamplingSet<u32> = WeightedSamplingSet::with_seed(1.0, 2.0, 6);
    for i in 0..1000u32 {
        set.insert(i, 1.0).unwrap();
    }
    set.insert(1000, 2.0).unwrap();

    let n = 200_000u64;
    let mut counts = HashMap::new();
    for _ in 0..n {
        let (e, _) = set.sample().unwrap();
        *counts.entry(e).or_insert(0u64) += 1;
    }

    let total_weight = 1002.0; // 1000 * 1 + 1 * 2
    let heavy_freq = *counts.get(&1000).unwrap_or(&0) as f64 / n as f64;
    let expected_heavy = 2.0 / total_weight;
    assert!(
        (heavy_freq - expected_heavy).abs() < 0.002,
        "heavy_freq = {heavy_freq}, expected = {expected_heavy}"
    );
}

#[test]
fn sample_without_replacement_more_than_size_pads_with_none() {
    let mut set: WeightedSamplingSet<u32> = WeightedSamplingSet::with_seed(1.0, 100.0, 8);
    set.insert(1, 10.0).unwrap();
    set.insert(2, 20.0).unwrap();

    let results: Vec<_> = set.sample_without_replacement(5).collect();
    assert_eq!(results.len(), 5);
    assert_eq!(results.iter().filter(|r| r.is_some()).count(), 2);
    assert_eq!(results.iter().filter(|r| r.is_none()).count(), 3);

    // The set is left unchanged once the sequence completes.
    assert_eq!(set.size(), 2);
    assert_eq!(set.total_weight(), 30.0);
}
