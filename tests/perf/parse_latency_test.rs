use std::time::Instant;

use crate::parser::parse_query_output;
use crate::projection::ranked_entries;

/// Nearest-rank percentile over millisecond samples.
fn percentile(samples: &mut [f64], pct: usize) -> f64 {
    let rank = (samples.len() * pct).div_ceil(100).max(1) - 1;
    let (_, value, _) = samples.select_nth_unstable_by(rank, f64::total_cmp);
    *value
}

#[test]
fn large_listing_parse_and_projection_p95_under_40ms() {
    let output: String = (0..2_000)
        .map(|i| format!("{}.{} C:\\Users\\me\\Projects\\repo_{i:05}\r\n", 2_000 - i, i % 10))
        .collect();

    for _ in 0..10 {
        let _ = parse_query_output(&output);
    }

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(20);
        for _ in 0..20 {
            let start = Instant::now();
            let ranked = parse_query_output(&output).unwrap();
            let _ = ranked_entries(&ranked);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(percentile(&mut samples, 95));
    }

    let median_p95 = percentile(&mut batch_p95.clone(), 50);

    assert!(
        median_p95 <= 40.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 40.0ms); batches={batch_p95:?}",
    );
}
