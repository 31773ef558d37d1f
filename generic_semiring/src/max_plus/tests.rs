use crate::{SelectiveSemiring, Semiring};

use super::{MaxPlus, Tropical};

#[test]
fn negative_infinity_is_smallest() {
    assert!(MaxPlus::NegativeInfinity < MaxPlus::Finite(i64::MIN));
    assert!(MaxPlus::Finite(-3) < MaxPlus::Finite(2));
}

#[test]
fn identities() {
    let semiring = Tropical::<i32>::new();
    let x = MaxPlus::Finite(-7);

    assert_eq!(semiring.combine_sum(&x, &semiring.zero()), x);
    assert_eq!(semiring.combine_product(&x, &semiring.one()), x);
    assert_eq!(
        semiring.combine_product(&x, &semiring.zero()),
        MaxPlus::NegativeInfinity
    );
    assert!(semiring.is_zero(&semiring.zero()));
    assert!(!semiring.is_zero(&x));
}

#[test]
fn sum_is_max_and_product_is_addition() {
    let semiring = Tropical::<i64>::new();
    let a = MaxPlus::Finite(-2);
    let b = MaxPlus::Finite(5);

    assert_eq!(semiring.combine_sum(&a, &b), b);
    assert_eq!(semiring.combine_product(&a, &b), MaxPlus::Finite(3));
    assert_eq!(
        semiring.sum_all([&a, &b, &MaxPlus::Finite(1)]),
        MaxPlus::Finite(5)
    );
    assert_eq!(semiring.product_all([&a, &b, &b]), MaxPlus::Finite(8));
    assert_eq!(semiring.sum_all([]), MaxPlus::NegativeInfinity);
}

#[test]
fn distributivity() {
    let semiring = Tropical::<i64>::new();
    let values = [
        MaxPlus::NegativeInfinity,
        MaxPlus::Finite(-4),
        MaxPlus::Finite(0),
        MaxPlus::Finite(9),
    ];

    for a in &values {
        for b in &values {
            for c in &values {
                let left = semiring.combine_product(a, &semiring.combine_sum(b, c));
                let right = semiring.combine_sum(
                    &semiring.combine_product(a, b),
                    &semiring.combine_product(a, c),
                );
                assert_eq!(left, right);
            }
        }
    }
}

#[test]
fn parse_and_display() {
    assert_eq!("-inf".parse::<MaxPlus<i64>>(), Ok(MaxPlus::NegativeInfinity));
    assert_eq!("-12".parse::<MaxPlus<i64>>(), Ok(MaxPlus::Finite(-12)));
    assert!("x".parse::<MaxPlus<i64>>().is_err());
    assert_eq!(MaxPlus::Finite(4).to_string(), "4");
    assert_eq!(MaxPlus::<i32>::NegativeInfinity.to_string(), "-inf");
}

#[test]
fn products_saturate() {
    let semiring = Tropical::<i64>::new();
    let large = MaxPlus::Finite(i64::MAX - 1);
    let small = MaxPlus::Finite(i64::MIN + 1);

    assert_eq!(
        semiring.combine_product(&large, &MaxPlus::Finite(5)),
        MaxPlus::Finite(i64::MAX)
    );
    assert_eq!(
        semiring.combine_product(&small, &MaxPlus::Finite(-5)),
        MaxPlus::Finite(i64::MIN)
    );
    assert!(semiring.compare(&semiring.combine_product(&large, &large), &large).is_ge());
    assert!(
        semiring
            .combine_product(&small, &small)
            .gt(&MaxPlus::NegativeInfinity)
    );
}
