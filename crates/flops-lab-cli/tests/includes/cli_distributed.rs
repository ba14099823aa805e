    #[test]
    fn validate_shipped_catalog() {
        let output = Command::new(flops_bin())
            .arg("validate")
            .arg(catalog_dir())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run flops");
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Catalog is valid."));
    }

    #[test]
    fn validate_builtin_without_dir() {
        let output = run(&["validate"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("Catalog is valid."));
    }

    #[test]
    fn validate_reports_broken_catalog() {
        let dir = tiny_catalog();
        std::fs::write(
            dir.path().join("devices.yaml"),
            r#"
version: "1.0.0"
devices:
  - name: Dup
    series: S
    architecture: A
    peak_tflops: -1.0
  - name: Dup
    series: S
    architecture: A
    peak_tflops: 1.0
"#,
        )
        .unwrap();
        let output = Command::new(flops_bin())
            .arg("validate")
            .arg(dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run flops");
        assert!(!output.status.success());
        let out = stdout(&output);
        assert!(out.contains("CAT-001"), "{out}");
        assert!(out.contains("CAT-002"), "{out}");
    }

    #[test]
    fn validate_unparseable_yaml_fails() {
        let dir = tiny_catalog();
        std::fs::write(dir.path().join("devices.yaml"), "{{invalid").unwrap();
        let output = Command::new(flops_bin())
            .arg("validate")
            .arg(dir.path())
            .output()
            .expect("failed to run flops");
        assert!(!output.status.success());
    }

    #[test]
    fn collective_all_reduce_sums_everywhere() {
        let output = run(&["collective", "all-reduce", "-r", "2", "-e", "2"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let out = stdout(&output);
        // rank 0 holds [1, 2], rank 1 holds [3, 4]
        assert!(out.contains("rank 1: [4, 6]"), "{out}");
        assert!(out.contains("Elements sent: 4"), "{out}");
    }

    #[test]
    fn collective_ring_all_reduce() {
        let output = run(&["collective", "all-reduce", "--ring", "-r", "4", "-e", "8"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let out = stdout(&output);
        assert!(out.contains("scatter-reduce step 3"), "{out}");
        assert!(out.contains("all-gather step 3"), "{out}");
        // 2 * 3 * ceil(8 / 4)
        assert!(out.contains("Per rank: 12"), "{out}");
    }

    #[test]
    fn collective_ring_rejects_other_primitives() {
        let output = run(&["collective", "broadcast", "--ring"]);
        assert!(!output.status.success());
    }

    #[test]
    fn collective_every_primitive_runs() {
        for primitive in ["broadcast", "scatter", "gather", "all-gather", "reduce", "all-reduce"] {
            let output = run(&["collective", primitive]);
            assert!(output.status.success(), "{primitive}: {}", stderr(&output));
        }
    }

    #[test]
    fn collective_root_out_of_range_fails() {
        let output = run(&["collective", "reduce", "-r", "2", "--root", "5"]);
        assert!(!output.status.success());
    }

    #[test]
    fn shard_tensor_row_reports_reduction() {
        let output = run(&["shard", "8x6", "6x4", "-s", "tensor-row", "-r", "3"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let out = stdout(&output);
        assert!(out.contains("all-reduce of partial sums: 64 additions"), "{out}");
        assert!(out.contains("Busiest rank: 96 FLOPs"), "{out}");
    }

    #[test]
    fn shard_with_device_estimates_time() {
        let output = run(&["shard", "4096x4096", "4096x4096", "-r", "8", "-d", "H100 SXM"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("On H100 SXM at FP32"));
    }

    #[test]
    fn shard_pipeline_leaves_ranks_idle() {
        let output = run(&["shard", "8x6", "6x4", "-s", "pipeline", "-r", "2"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("rank 1   idle"));
    }

    #[test]
    fn shard_unknown_strategy_fails() {
        let output = run(&["shard", "8x6", "6x4", "-s", "zero"]);
        assert!(!output.status.success());
    }

    /// Rejected cleanly: non-zero exit, an `error:` line, no panic or abort.
    fn assert_rejected(args: &[&str]) {
        let output = run(args);
        assert!(!output.status.success(), "{args:?} succeeded");
        assert!(output.status.code().is_some(), "{args:?} was killed by a signal");
        let err = stderr(&output);
        assert!(err.contains("error:"), "{args:?}: {err}");
        assert!(!err.contains("panicked"), "{args:?}: {err}");
    }

    #[test]
    fn collective_rejects_oversized_element_count() {
        assert_rejected(&["collective", "all-reduce", "--ranks", "2", "--elements", "18446744073709551615"]);
        assert_rejected(&["collective", "all-reduce", "--elements", "257"]);
    }

    #[test]
    fn collective_rejects_oversized_rank_count() {
        assert_rejected(&["collective", "all-gather", "--ranks", "3000", "--elements", "1"]);
        assert_rejected(&["collective", "broadcast", "--ranks", "0"]);
    }

    #[test]
    fn collective_accepts_the_largest_sizes() {
        let output = run(&["collective", "all-gather", "--ranks", "32", "--elements", "1"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let output = run(&["collective", "reduce", "--ranks", "2", "--elements", "256"]);
        assert!(output.status.success(), "{}", stderr(&output));
    }

    #[test]
    fn shard_rejects_oversized_rank_count() {
        assert_rejected(&["shard", "8x8", "8x8", "--ranks", "4000000000"]);
        assert_rejected(&["shard", "8x8", "8x8", "--ranks", "1025"]);
        assert_rejected(&["shard", "8x8", "8x8", "--ranks", "0"]);
    }
