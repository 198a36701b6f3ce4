use gel_digest::{
    DnaSequence, GelLane, MigrationModel, RestrictionEnzyme, assemble_fragments,
    digest::{combine_cleavage_sites, digest, digest_all},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn enzyme_strategy() -> impl Strategy<Value = (String, usize)> {
    "[ACGT]{1,6}".prop_flat_map(|pattern| {
        let len = pattern.len();
        (Just(pattern), 0..=len)
    })
}

proptest! {
    #[test]
    fn fragments_reassemble_sequence(seq in "[ACGT]{1,300}", (pattern, cut) in enzyme_strategy()) {
        let seq = DnaSequence::from_sequence(&seq).unwrap();
        let re = RestrictionEnzyme::new("Scan", &pattern, cut as isize).unwrap();
        let result = digest(&seq, &re).unwrap();
        let rebuilt = result
            .fragments
            .iter()
            .flat_map(|f| seq.fragment_bases(f).unwrap().iter().copied())
            .collect::<Vec<u8>>();
        prop_assert_eq!(rebuilt.as_slice(), seq.forward());
    }

    #[test]
    fn sites_are_sorted_and_unique(seq in "[ACGT]{1,300}", (pattern, cut) in enzyme_strategy()) {
        let seq = DnaSequence::from_sequence(&seq).unwrap();
        let re = RestrictionEnzyme::new("Scan", &pattern, cut as isize).unwrap();
        let sites = re.cleavage_sites(&seq);
        prop_assert!(sites.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(sites.iter().all(|&s| s <= seq.len()));
    }

    #[test]
    fn fragment_count_is_sites_plus_one(
        n in 0usize..500,
        raw in proptest::collection::btree_set(0usize..500, 0..40),
    ) {
        let sites = raw.into_iter().filter(|&s| s <= n).collect::<Vec<_>>();
        let fragments = assemble_fragments(n, &sites).unwrap();
        prop_assert_eq!(fragments.len(), sites.len() + 1);
        prop_assert_eq!(fragments.iter().map(|f| f.len()).sum::<usize>(), n);
        prop_assert!(fragments.windows(2).all(|w| w[0].end == w[1].start));
    }

    #[test]
    fn combined_sites_are_the_union(
        lists in proptest::collection::vec(proptest::collection::btree_set(0usize..200, 0..20), 0..6),
    ) {
        let lists = lists
            .into_iter()
            .map(|set| set.into_iter().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let combined = combine_cleavage_sites(lists.iter().map(Vec::as_slice));
        let union = lists.iter().flatten().copied().collect::<BTreeSet<_>>();
        prop_assert_eq!(combined, union.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn combined_digest_matches_individual_scans(
        seq in "[ACGT]{1,200}",
        enzymes in proptest::collection::vec(enzyme_strategy(), 1..5),
    ) {
        let seq = DnaSequence::from_sequence(&seq).unwrap();
        let enzymes = enzymes
            .into_iter()
            .enumerate()
            .map(|(i, (pattern, cut))| {
                RestrictionEnzyme::new(&format!("E{i}"), &pattern, cut as isize).unwrap()
            })
            .collect::<Vec<_>>();
        let run = digest_all(&seq, &enzymes).unwrap();
        let union = enzymes
            .iter()
            .flat_map(|re| re.cleavage_sites(&seq))
            .collect::<BTreeSet<_>>();
        prop_assert_eq!(&run.combined.sites, &union.into_iter().collect::<Vec<_>>());
        prop_assert_eq!(run.combined.fragments.len(), run.combined.sites.len() + 1);
    }

    #[test]
    fn migration_is_monotonic_and_bounded(
        lanes in proptest::collection::vec(proptest::collection::vec(1usize..50_000, 2..12), 1..5),
    ) {
        let lanes = lanes
            .into_iter()
            .enumerate()
            .map(|(i, lengths)| GelLane::new(&format!("lane {i}"), lengths))
            .collect::<Vec<_>>();
        let mut bands = MigrationModel::default().migrate(&lanes).unwrap();
        prop_assert!(bands.iter().all(|b| (0.0..=1.0).contains(&b.coordinate)));
        bands.sort_by(|a, b| b.length.cmp(&a.length));
        for pair in bands.windows(2) {
            prop_assert!(pair[0].coordinate <= pair[1].coordinate);
        }
    }
}
