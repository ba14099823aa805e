proptest! {
    /// Prediction: multiplications = m*p*n, additions = m*p*(n-1), total = sum
    /// Failure: off-by-one in the addition count
    #[test]
    fn counts_follow_closed_form(m in 1u32..=2048, n in 1u32..=2048, p in 1u32..=2048) {
        let r = compute_flops(MatrixShape::new(m, n), MatrixShape::new(n, p)).unwrap();
        let (m, n, p) = (u128::from(m), u128::from(n), u128::from(p));
        prop_assert_eq!(r.multiplications, m * p * n);
        prop_assert_eq!(r.additions, m * p * (n - 1));
        prop_assert_eq!(r.total_flops, r.multiplications + r.additions);
        prop_assert_eq!(r.total_flops, m * p * (2 * n - 1));
    }

    /// Prediction: the output shape is a.rows x b.cols
    /// Failure: rows and columns swapped
    #[test]
    fn output_shape_is_outer_dimensions(m in 1u32..=512, n in 1u32..=512, p in 1u32..=512) {
        let r = compute_flops(MatrixShape::new(m, n), MatrixShape::new(n, p)).unwrap();
        prop_assert_eq!(r.output_shape, MatrixShape::new(m, p));
    }

    /// Prediction: any inner mismatch fails with both shapes attached
    /// Failure: mismatch silently accepted
    #[test]
    fn inner_mismatch_always_fails(m in 1u32..=512, n in 1u32..=512, k in 1u32..=512, p in 1u32..=512) {
        prop_assume!(n != k);
        let a = MatrixShape::new(m, n);
        let b = MatrixShape::new(k, p);
        let err = compute_flops(a, b).unwrap_err();
        prop_assert_eq!(err.a, a);
        prop_assert_eq!(err.b, b);
        prop_assert_eq!(err.reason, ShapeErrorKind::InnerDimensionMismatch);
    }

    /// Prediction: identical inputs give identical results
    /// Failure: hidden state between calls
    #[test]
    fn compute_is_idempotent(m in 1u32..=4096, n in 1u32..=4096, p in 1u32..=4096) {
        let a = MatrixShape::new(m, n);
        let b = MatrixShape::new(n, p);
        prop_assert_eq!(compute_flops(a, b), compute_flops(a, b));
    }

    /// Prediction: growing any of m, n, p never lowers the total
    /// Failure: non-monotone count (e.g. additions underflow)
    #[test]
    fn total_is_monotone(m in 1u32..=1000, n in 1u32..=1000, p in 1u32..=1000, d in 1u32..=100) {
        let total = |m: u32, n: u32, p: u32| {
            compute_flops(MatrixShape::new(m, n), MatrixShape::new(n, p)).unwrap().total_flops
        };
        let base = total(m, n, p);
        prop_assert!(total(m + d, n, p) >= base);
        prop_assert!(total(m, n + d, p) >= base);
        prop_assert!(total(m, n, p + d) >= base);
    }

    /// Prediction: a zero anywhere is rejected as a zero dimension
    /// Failure: zero-sized product reported as valid
    #[test]
    fn zero_dimension_always_fails(n in 1u32..=64, p in 1u32..=64, which in 0usize..4) {
        let mut dims = [n, n, n, p];
        dims[which] = 0;
        let err = compute_flops(
            MatrixShape::new(dims[0], dims[1]),
            MatrixShape::new(dims[2], dims[3]),
        )
        .unwrap_err();
        prop_assert_eq!(err.reason, ShapeErrorKind::ZeroDimension);
    }
}

#[test]
fn scenario_three_by_four_times_four_by_five() {
    let r = compute_flops(MatrixShape::new(3, 4), MatrixShape::new(4, 5)).unwrap();
    assert_eq!((r.multiplications, r.additions, r.total_flops), (60, 45, 105));
    assert_eq!(r.output_shape, MatrixShape::new(3, 5));
}

#[test]
fn scenario_two_by_three_times_five_by_two_fails() {
    assert!(compute_flops(MatrixShape::new(2, 3), MatrixShape::new(5, 2)).is_err());
}

#[test]
fn boundary_single_element() {
    let r = compute_flops(MatrixShape::new(1, 1), MatrixShape::new(1, 1)).unwrap();
    assert_eq!((r.multiplications, r.additions, r.total_flops), (1, 0, 1));
}

#[test]
fn boundary_zero_rows() {
    assert!(compute_flops(MatrixShape::new(0, 1), MatrixShape::new(1, 1)).is_err());
}
