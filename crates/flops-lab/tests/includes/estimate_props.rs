proptest! {
    /// Prediction: any peak/multiplier pair either errors or yields a
    /// finite time that is zero only for zero FLOPs
    /// Failure: throughput overflows to infinity and the time rounds to 0
    #[test]
    fn estimates_are_finite_or_rejected(
        flops in any::<u128>(),
        peak in prop::num::f64::ANY,
        k in prop::num::f64::ANY,
    ) {
        if let Ok(e) = estimate_time(flops, &common::device(peak), &common::precision(k)) {
            prop_assert!(e.seconds.is_finite());
            prop_assert!(e.adjusted_throughput_tflops.is_finite());
            prop_assert_eq!(e.seconds > 0.0, flops > 0);
        }
    }

    /// Prediction: a multiplier of k divides the time by exactly k
    /// Failure: multiplier applied to time instead of throughput
    #[test]
    fn precision_scales_time_inversely(
        flops in 0u128..=10u128.pow(15),
        peak in 0.1f64..200.0,
        k in prop::sample::select(vec![0.5f64, 1.0, 2.0, 4.0, 8.0]),
    ) {
        let base = estimate_time(flops, &common::device(peak), &common::precision(1.0)).unwrap();
        let scaled = estimate_time(flops, &common::device(peak), &common::precision(k)).unwrap();
        prop_assert!(
            common::approx_eq(scaled.seconds, base.seconds / k, 1e-12),
            "{} vs {}", scaled.seconds, base.seconds / k
        );
    }

    /// Prediction: ms, µs and ns are the seconds value scaled by 1e3, 1e6, 1e9
    /// Failure: unit fields computed inconsistently
    #[test]
    fn units_are_consistent(flops in 0u128..=10u128.pow(18), peak in 0.1f64..200.0, k in 0.5f64..8.0) {
        let e = estimate_time(flops, &common::device(peak), &common::precision(k)).unwrap();
        prop_assert!(common::approx_eq(e.milliseconds, e.seconds * 1e3, 1e-12));
        prop_assert!(common::approx_eq(e.microseconds, e.seconds * 1e6, 1e-12));
        prop_assert!(common::approx_eq(e.nanoseconds, e.seconds * 1e9, 1e-12));
        prop_assert!(e.seconds >= 0.0);
    }

    /// Prediction: the formatted unit is the largest one whose value is >= 1
    /// Failure: unit thresholds evaluated out of order
    #[test]
    fn formatted_unit_is_largest_at_least_one(flops in 1u128..=10u128.pow(18), peak in 0.1f64..200.0) {
        let e = estimate_time(flops, &common::device(peak), &common::precision(1.0)).unwrap();
        let expected = if e.seconds >= 1.0 {
            TimeUnit::Seconds
        } else if e.milliseconds >= 1.0 {
            TimeUnit::Milliseconds
        } else if e.microseconds >= 1.0 {
            TimeUnit::Microseconds
        } else {
            TimeUnit::Nanoseconds
        };
        prop_assert_eq!(e.unit, expected);
        let expected_suffix = format!(" {}", expected.suffix());
        prop_assert!(e.formatted.ends_with(&expected_suffix));
        let decimals = e.formatted.split(' ').next().unwrap().split('.').nth(1).unwrap().len();
        prop_assert_eq!(decimals, if expected == TimeUnit::Nanoseconds { 3 } else { 6 });
    }
}

#[test]
fn scenario_a100_fp32() {
    let catalog = common::builtin();
    let a100 = catalog.lookup_device("A100 SXM").unwrap();
    let fp32 = catalog.lookup_precision("fp32").unwrap();
    let e = estimate_time(105, a100, fp32).unwrap();
    assert!(common::approx_eq(e.seconds, 5.384_615_384_615_384e-12, 1e-12));
    assert_eq!(e.unit, TimeUnit::Nanoseconds);
    assert_eq!(e.formatted, "0.005 ns");
}

#[test]
fn scenario_a100_int8_is_a_quarter() {
    let catalog = common::builtin();
    let a100 = catalog.lookup_device("A100 SXM").unwrap();
    let fp32 = estimate_time(105, a100, catalog.lookup_precision("fp32").unwrap()).unwrap();
    let int8 = estimate_time(105, a100, catalog.lookup_precision("int8").unwrap()).unwrap();
    assert_eq!(int8.adjusted_throughput_tflops, 78.0);
    assert_eq!(int8.seconds, fp32.seconds / 4.0);
}

#[test]
fn zero_flops_is_zero_seconds() {
    let e = estimate_time(0, &common::device(19.5), &common::precision(1.0)).unwrap();
    assert_eq!(e.formatted, "0.000000 s");
}

#[test]
fn square_4096_on_h100_is_milliseconds() {
    let catalog = common::builtin();
    let a = MatrixShape::new(4096, 4096);
    let r = compute_flops(a, a).unwrap();
    let h100 = catalog.lookup_device("H100 SXM").unwrap();
    let fp32 = catalog.lookup_precision("fp32").unwrap();
    let e = estimate_time(r.total_flops, h100, fp32).unwrap();
    // 2*4096^3 - 4096^2 flops / 67e12 flops/s ≈ 2.05 ms
    assert_eq!(e.unit, TimeUnit::Milliseconds);
    assert!(e.milliseconds > 2.0 && e.milliseconds < 2.1);
}
