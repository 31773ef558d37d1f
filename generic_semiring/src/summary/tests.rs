use std::cmp::Ordering;

use crate::{
    SelectiveSemiring, Semiring,
    max_plus::{MaxPlus, Tropical},
};

use super::{Summary, SummarySemiring};

fn summary(score: i64, usage: &[usize]) -> Summary<MaxPlus<i64>> {
    Summary {
        score: MaxPlus::Finite(score),
        usage: usage.to_vec(),
    }
}

#[test]
fn larger_score_wins() {
    let semiring = SummarySemiring::new(Tropical::<i64>::new(), 3);
    let a = summary(-5, &[0, 0, 0]);
    let b = summary(-4, &[9, 9, 9]);

    assert_eq!(semiring.combine_sum(&a, &b), b);
    assert_eq!(semiring.combine_sum(&b, &a), b);
}

#[test]
fn tie_prefers_lexicographically_smaller_usage() {
    let semiring = SummarySemiring::new(Tropical::<i64>::new(), 3);
    let a = summary(-5, &[1, 0, 7]);
    let b = summary(-5, &[0, 3, 0]);
    let c = summary(-5, &[0, 2, 9]);

    assert_eq!(semiring.combine_sum(&a, &b), b);
    assert_eq!(semiring.combine_sum(&b, &c), c);
    assert_eq!(semiring.compare(&c, &a), Ordering::Greater);
    assert_eq!(semiring.compare(&a, &a), Ordering::Equal);
}

#[test]
fn product_adds_usage() {
    let semiring = SummarySemiring::new(Tropical::<i64>::new(), 3);
    let a = summary(-5, &[1, 0, 7]);
    let b = summary(2, &[0, 3, 1]);

    assert_eq!(semiring.combine_product(&a, &b), summary(-3, &[1, 3, 8]));
}

#[test]
fn identities_and_units() {
    let semiring = SummarySemiring::new(Tropical::<i64>::new(), 2);
    let unit = semiring.unit(MaxPlus::Finite(-30), 1);

    assert_eq!(unit, summary(-30, &[0, 1]));
    assert_eq!(semiring.combine_product(&unit, &semiring.one()), unit);
    assert_eq!(semiring.combine_sum(&unit, &semiring.zero()), unit);
    assert_eq!(
        semiring.combine_product(&unit, &semiring.zero()).score,
        MaxPlus::NegativeInfinity
    );
}

#[test]
#[should_panic]
fn mismatched_dimensions_panic() {
    let semiring = SummarySemiring::new(Tropical::<i64>::new(), 2);
    semiring.combine_product(&summary(0, &[1, 2]), &summary(0, &[1, 2, 3]));
}
