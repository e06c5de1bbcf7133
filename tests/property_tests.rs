//! Property-based tests for cell registration and partition selection
//!
//! - Selection size, distinctness and membership invariants
//! - Seed determinism
//! - Registry idempotence
//! - Run with ProptestConfig::with_cases(100)

use std::collections::BTreeSet;

use c2s_train::data::RecordingEntry;
use c2s_train::partition::{random_select, TrainingSubset};
use c2s_train::registry::{self, CellIds};
use c2s_train::rng::ExperimentRng;
use c2s_train::Error;
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Labelled entries; several entries may share a cell
fn arb_labelled_entries() -> impl Strategy<Value = Vec<RecordingEntry>> {
    proptest::collection::vec(-50i64..50, 1..60).prop_map(|cells| {
        cells
            .into_iter()
            .map(|c| RecordingEntry::new().with_cell_num(c))
            .collect()
    })
}

/// Cell id set together with a valid selection size (1..=N)
fn arb_cells_and_k() -> impl Strategy<Value = (CellIds, usize)> {
    arb_labelled_entries().prop_flat_map(|entries| {
        let ids = CellIds::collect(&entries).unwrap();
        let n = ids.len();
        (Just(ids), 1..=n)
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: a selection of k cells has exactly k distinct valid cells
    #[test]
    fn prop_selection_has_exactly_k_distinct_cells(
        (ids, k) in arb_cells_and_k(),
        seed in any::<u64>()
    ) {
        let mut rng = ExperimentRng::seeded(seed);
        let subset = TrainingSubset::select(i64::try_from(k).unwrap(), &ids, &mut rng).unwrap();

        prop_assert_eq!(subset.indices().len(), k);
        let distinct: BTreeSet<usize> = subset.indices().iter().copied().collect();
        prop_assert_eq!(distinct.len(), k);
        prop_assert_eq!(subset.len(), k);
        for cell in subset.cells() {
            prop_assert!(ids.as_slice().contains(cell));
        }
    }

    /// Property: num_train = 0 selects the whole cell set
    #[test]
    fn prop_zero_selects_everything(entries in arb_labelled_entries(), seed in any::<u64>()) {
        let ids = CellIds::collect(&entries).unwrap();
        let mut rng = ExperimentRng::seeded(seed);
        let subset = TrainingSubset::select(0, &ids, &mut rng).unwrap();
        prop_assert_eq!(subset.cells(), ids.as_slice());
    }

    /// Property: asking for more than N cells fails with InvalidArgument
    #[test]
    fn prop_oversized_request_fails(n in 0usize..40, extra in 1usize..10, seed in any::<u64>()) {
        let mut rng = ExperimentRng::seeded(seed);
        let result = random_select(n + extra, n, &mut rng);
        prop_assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    /// Property: same seed, same inputs => same training subset
    #[test]
    fn prop_selection_deterministic((ids, k) in arb_cells_and_k(), seed in any::<u64>()) {
        let k = i64::try_from(k).unwrap();
        let a = TrainingSubset::select(k, &ids, &mut ExperimentRng::seeded(seed)).unwrap();
        let b = TrainingSubset::select(k, &ids, &mut ExperimentRng::seeded(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: registering labelled entries twice changes nothing
    #[test]
    fn prop_registry_idempotent(entries in arb_labelled_entries()) {
        let mut once = entries.clone();
        let ids_once = registry::register(&mut once).unwrap();
        let mut twice = once.clone();
        let ids_twice = registry::register(&mut twice).unwrap();

        prop_assert_eq!(&once, &entries);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(ids_once, ids_twice);
    }

    /// Property: unlabelled entries get their positions as cell numbers
    #[test]
    fn prop_registry_positional(n in 0usize..80) {
        let mut entries = vec![RecordingEntry::new(); n];
        let ids = registry::register(&mut entries).unwrap();
        prop_assert_eq!(ids.len(), n);
        for (k, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.cell_num(), Some(i64::try_from(k).unwrap()));
        }
    }
}
