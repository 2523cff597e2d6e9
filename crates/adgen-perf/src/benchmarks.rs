//! Fixed industry CTR benchmark table.
//!
//! Values are percent CTRs for paid social placements. Unknown industries
//! resolve to the `default` bucket rather than failing.

/// One industry's benchmark distribution.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark {
    pub industry: &'static str,
    pub avg_ctr: f32,
    pub top_10_percent: f32,
}

const BENCHMARKS: &[Benchmark] = &[
    Benchmark {
        industry: "ecommerce",
        avg_ctr: 1.6,
        top_10_percent: 3.4,
    },
    Benchmark {
        industry: "saas",
        avg_ctr: 1.2,
        top_10_percent: 2.8,
    },
    Benchmark {
        industry: "finance",
        avg_ctr: 0.9,
        top_10_percent: 2.2,
    },
    Benchmark {
        industry: "health",
        avg_ctr: 1.1,
        top_10_percent: 2.6,
    },
    Benchmark {
        industry: "education",
        avg_ctr: 1.3,
        top_10_percent: 3.0,
    },
    Benchmark {
        industry: "travel",
        avg_ctr: 1.4,
        top_10_percent: 3.2,
    },
    Benchmark {
        industry: "food",
        avg_ctr: 1.7,
        top_10_percent: 3.6,
    },
    Benchmark {
        industry: "fashion",
        avg_ctr: 1.5,
        top_10_percent: 3.3,
    },
    Benchmark {
        industry: "default",
        avg_ctr: 1.2,
        top_10_percent: 2.9,
    },
];

/// Resolves an industry name to its benchmark; unknown or absent
/// industries get the default bucket.
#[must_use]
pub fn lookup_benchmark(industry: Option<&str>) -> &'static Benchmark {
    let needle = industry.map(str::to_lowercase);
    BENCHMARKS
        .iter()
        .find(|b| Some(b.industry) == needle.as_deref())
        .unwrap_or_else(|| {
            BENCHMARKS
                .last()
                .expect("benchmark table is non-empty by construction")
        })
}

/// Places a predicted CTR in the benchmark distribution, 1–99.
///
/// Linear below the average (1–50), linear from average to top decile
/// (50–90), saturating above.
#[must_use]
pub fn percentile(predicted: f32, benchmark: &Benchmark) -> u8 {
    let pct = if predicted <= benchmark.avg_ctr {
        50.0 * predicted / benchmark.avg_ctr
    } else if predicted <= benchmark.top_10_percent {
        50.0 + 40.0 * (predicted - benchmark.avg_ctr)
            / (benchmark.top_10_percent - benchmark.avg_ctr)
    } else {
        90.0 + 9.0 * ((predicted / benchmark.top_10_percent) - 1.0).min(1.0)
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = pct.round().clamp(1.0, 99.0) as u8;
    pct
}
