use angcorr_match::{find_interval_overlaps, find_true_intervals, values_in_range, IndexRange};
use proptest::prelude::*;

fn ranges(pairs: &[(usize, usize)]) -> Vec<IndexRange> {
    pairs.iter().map(|&(start, end)| IndexRange::new(start, end)).collect()
}

fn mask(bits: &[u8]) -> Vec<bool> {
    bits.iter().map(|&bit| bit == 1).collect()
}

#[test]
fn runs_are_half_open_and_maximal() {
    assert_eq!(
        find_true_intervals(&mask(&[0, 1, 1, 1, 0, 0, 1, 0, 0, 1])),
        ranges(&[(1, 4), (6, 7), (9, 10)])
    );
}

#[test]
fn runs_cover_empty_and_full_masks() {
    assert!(find_true_intervals(&[]).is_empty());
    assert!(find_true_intervals(&[false, false]).is_empty());
    assert_eq!(find_true_intervals(&[true, true, true]), ranges(&[(0, 3)]));
}

#[test]
fn overlaps_follow_the_four_cases() {
    assert_eq!(
        find_interval_overlaps(&ranges(&[(1, 3), (5, 9), (10, 12)]), &ranges(&[(0, 2), (6, 7)])),
        ranges(&[(1, 2), (6, 7)])
    );
    // a inside b, a past the end of b, a before the start of b, a around b
    let b = ranges(&[(4, 10)]);
    assert_eq!(find_interval_overlaps(&ranges(&[(5, 7)]), &b), ranges(&[(5, 7)]));
    assert_eq!(find_interval_overlaps(&ranges(&[(8, 12)]), &b), ranges(&[(8, 10)]));
    assert_eq!(find_interval_overlaps(&ranges(&[(1, 6)]), &b), ranges(&[(4, 6)]));
    assert_eq!(find_interval_overlaps(&ranges(&[(0, 20)]), &b), ranges(&[(4, 10)]));
}

#[test]
fn touching_ranges_do_not_overlap() {
    assert!(find_interval_overlaps(&ranges(&[(0, 3)]), &ranges(&[(3, 5)])).is_empty());
    assert!(find_interval_overlaps(&ranges(&[(3, 5)]), &ranges(&[(0, 3)])).is_empty());
    assert!(find_interval_overlaps(&[], &ranges(&[(0, 3)])).is_empty());
}

#[test]
fn overlaps_are_listed_a_major() {
    let a = ranges(&[(0, 10), (20, 30)]);
    let b = ranges(&[(25, 27), (2, 4), (8, 22)]);
    assert_eq!(
        find_interval_overlaps(&a, &b),
        ranges(&[(2, 4), (8, 10), (25, 27), (20, 22)])
    );
}

#[test]
fn nan_is_never_in_range() {
    let values = [f64::NAN, 0.0, f64::INFINITY];
    assert_eq!(values_in_range(&values, 0.0, 1.0, 1.0), vec![false, true, false]);
}

proptest! {
    #[test]
    fn range_mask_matches_the_inclusive_test(
        values in prop::collection::vec(-2.0f64..2.0, 0..64),
        mean in -1.0f64..1.0,
        sigma_low in 0.0f64..1.0,
        sigma_up in 0.0f64..1.0,
    ) {
        let flags = values_in_range(&values, mean, sigma_low, sigma_up);
        prop_assert_eq!(flags.len(), values.len());
        for (value, flag) in values.iter().zip(flags) {
            prop_assert_eq!(flag, mean - sigma_low <= *value && *value <= mean + sigma_up);
        }
    }

    #[test]
    fn runs_reconstruct_the_mask(bits in prop::collection::vec(any::<bool>(), 0..80)) {
        let runs = find_true_intervals(&bits);
        let mut rebuilt = vec![false; bits.len()];
        for run in &runs {
            prop_assert!(!run.is_empty());
            for flag in &mut rebuilt[run.start..run.end] {
                *flag = true;
            }
        }
        prop_assert_eq!(rebuilt, bits.clone());
        for pair in runs.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn overlaps_of_runs_cover_the_joint_mask(
        pairs in prop::collection::vec((any::<bool>(), any::<bool>()), 0..80),
    ) {
        let (left, right): (Vec<bool>, Vec<bool>) = pairs.iter().copied().unzip();
        let overlaps = find_interval_overlaps(&find_true_intervals(&left), &find_true_intervals(&right));
        let covered: usize = overlaps.iter().map(IndexRange::len).sum();
        let joint = pairs.iter().filter(|(a, b)| *a && *b).count();
        prop_assert_eq!(covered, joint);
    }
}
