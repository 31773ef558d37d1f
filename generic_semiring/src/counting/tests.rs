use crate::{
    Semiring,
    max_plus::{MaxPlus, Tropical},
};

use super::{Counted, Counting};

fn counted(value: i64, count: u64) -> Counted<MaxPlus<i64>> {
    Counted {
        value: MaxPlus::Finite(value),
        count,
    }
}

#[test]
fn ties_add_counts() {
    let semiring = Counting::new(Tropical::<i64>::new());

    assert_eq!(
        semiring.combine_sum(&counted(-3, 2), &counted(-3, 5)),
        counted(-3, 7)
    );
    assert_eq!(
        semiring.combine_sum(&counted(-3, 2), &counted(-1, 5)),
        counted(-1, 5)
    );
    assert_eq!(
        semiring.combine_sum(&counted(4, 2), &counted(-1, 5)),
        counted(4, 2)
    );
}

#[test]
fn product_multiplies_counts() {
    let semiring = Counting::new(Tropical::<i64>::new());

    assert_eq!(
        semiring.combine_product(&counted(-3, 2), &counted(1, 3)),
        counted(-2, 6)
    );
}

#[test]
fn identities() {
    let semiring = Counting::new(Tropical::<i64>::new());
    let x = counted(8, 3);

    assert_eq!(semiring.combine_sum(&x, &semiring.zero()), x);
    assert_eq!(semiring.combine_product(&x, &semiring.one()), x);
    assert_eq!(semiring.combine_product(&x, &semiring.zero()).count, 0);
    assert_eq!(semiring.unit(MaxPlus::Finite(8)), counted(8, 1));
}

#[test]
fn counts_saturate() {
    let semiring = Counting::new(Tropical::<i64>::new());

    assert_eq!(
        semiring
            .combine_product(&counted(0, u64::MAX), &counted(0, 2))
            .count,
        u64::MAX
    );
    assert_eq!(
        semiring.combine_sum(&counted(0, u64::MAX), &counted(0, 2)).count,
        u64::MAX
    );
}
