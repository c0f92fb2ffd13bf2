//! Runs the three path-max engines over one instance, times them, and checks
//! that they agree.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::graph::Weight;
use crate::loader::Instance;

/// Per-query times at or above this are printed as `N/A`.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, Default)]
pub struct HarnessConfig {
    /// Leave out the naive engine (it is linear per query).
    pub skip_v1: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EngineRun {
    pub answers: Vec<Option<Weight>>,
    pub preprocessing: Duration,
    pub query_times: Vec<Duration>,
}

impl EngineRun {
    pub fn query_total(&self) -> Duration {
        self.query_times.iter().sum()
    }

    pub fn total(&self) -> Duration {
        self.preprocessing + self.query_total()
    }
}

#[derive(Clone, Debug)]
pub struct ComparisonReport {
    pub vertex_count: usize,
    pub query_count: usize,
    pub v1: Option<EngineRun>,
    pub v2: EngineRun,
    pub v3: EngineRun,
    pub results_identical: bool,
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

fn answer_queries<F>(queries: &[(usize, usize)], mut query: F) -> (Vec<Option<Weight>>, Vec<Duration>)
where
    F: FnMut(usize, usize) -> Option<Weight>,
{
    queries
        .iter()
        .map(|&(u, v)| timed(|| query(u, v)))
        .unzip()
}

/// Runs v1 (unless skipped), v2 and v3 over every query of `instance`.
///
/// Each engine works on its own clone of the tree. Returns `None` if the tree
/// has no live vertex to root at.
pub fn run_comparison(instance: &Instance, config: &HarnessConfig) -> Option<ComparisonReport> {
    let queries = &instance.queries;

    let v1 = (!config.skip_v1).then(|| {
        let tree = instance.tree.clone();
        let (answers, query_times) = answer_queries(queries, |u, v| tree.path_max_v1(u, v));
        EngineRun {
            answers,
            preprocessing: Duration::ZERO,
            query_times,
        }
    });

    let mut tree = instance.tree.clone();
    let (center, v2_pre) = timed(|| tree.compute_center_and_parent());
    center?;
    let (v2_answers, v2_times) = answer_queries(queries, |u, v| tree.path_max_v2(u, v));
    let v2 = EngineRun {
        answers: v2_answers,
        preprocessing: v2_pre,
        query_times: v2_times,
    };

    let ((), v3_pre) = timed(|| tree.preprocess_v3(queries));
    let (v3_answers, v3_times) = answer_queries(queries, |u, v| tree.path_max_v3(u, v));
    let v3 = EngineRun {
        answers: v3_answers,
        preprocessing: v3_pre,
        query_times: v3_times,
    };

    let reference = v1.as_ref().unwrap_or(&v2);
    let mismatch = (0..queries.len()).find(|&i| {
        reference.answers[i] != v2.answers[i] || reference.answers[i] != v3.answers[i]
    });
    if let Some(i) = mismatch {
        let (u, v) = queries[i];
        warn!(
            query = i,
            u,
            v,
            v1 = ?v1.as_ref().map(|run| run.answers[i]),
            v2 = ?v2.answers[i],
            v3 = ?v3.answers[i],
            "engines disagree"
        );
    }

    let report = ComparisonReport {
        vertex_count: instance.tree.vertex_count(),
        query_count: queries.len(),
        v1,
        v2,
        v3,
        results_identical: mismatch.is_none(),
    };
    info!(
        n = report.vertex_count,
        queries = report.query_count,
        identical = report.results_identical,
        "comparison finished"
    );
    Some(report)
}

fn write_query_times<W: Write>(out: &mut W, label: &str, times: &[Duration]) -> io::Result<()> {
    writeln!(out, "RUNTIME_{label}_QUERIES_START")?;
    for &t in times {
        if t >= QUERY_TIMEOUT {
            writeln!(out, "N/A")?;
        } else {
            writeln!(out, "{:.6}", millis(t))?;
        }
    }
    writeln!(out, "RUNTIME_{label}_QUERIES_END")
}

impl ComparisonReport {
    /// The answers every other engine is checked against: v1 if it ran,
    /// otherwise v2.
    pub fn reference_answers(&self) -> &[Option<Weight>] {
        &self.v1.as_ref().unwrap_or(&self.v2).answers
    }

    pub fn write_timings<W: Write>(&self, mut out: W) -> io::Result<()> {
        if self.query_count == 0 {
            return writeln!(out, "no queries");
        }

        let v1_times = self.v1.as_ref().map_or(&[][..], |run| &run.query_times[..]);
        write_query_times(&mut out, "V1", v1_times)?;
        writeln!(out, "RUNTIME_V2_PREPROCESSING {:.6}", millis(self.v2.preprocessing))?;
        write_query_times(&mut out, "V2", &self.v2.query_times)?;
        writeln!(out, "RUNTIME_V3_PREPROCESSING {:.6}", millis(self.v3.preprocessing))?;
        write_query_times(&mut out, "V3", &self.v3.query_times)?;

        writeln!(out, "n = {}, |P| = {}", self.vertex_count, self.query_count)?;
        match &self.v1 {
            Some(run) => writeln!(
                out,
                "  v1: {:.3} ms (queries only, no preprocessing)",
                millis(run.query_total())
            )?,
            None => writeln!(out, "  v1: skipped")?,
        }
        for (label, run) in [("v2", &self.v2), ("v3", &self.v3)] {
            writeln!(
                out,
                "  {label}: preprocessing {:.3} ms + queries {:.3} ms = total {:.3} ms",
                millis(run.preprocessing),
                millis(run.query_total()),
                millis(run.total())
            )?;
        }
        writeln!(
            out,
            "  identical results: {}",
            if self.results_identical { "yes" } else { "no" }
        )
    }

    /// One line per query: the reference answer rounded to an integer, `-1`
    /// when there is no path.
    pub fn write_answers<W: Write>(&self, mut out: W) -> io::Result<()> {
        for answer in self.reference_answers() {
            match answer {
                Some(w) => writeln!(out, "{}", w.round() as i64)?,
                None => writeln!(out, "-1")?,
            }
        }
        Ok(())
    }
}
