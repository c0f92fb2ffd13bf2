//! Plain-text instance import.
//!
//! ```text
//! n m
//! u v w      (m lines, 1-indexed endpoints, real weight)
//! Q
//! u v        (Q lines, 1-indexed query pairs)
//! ```
//!
//! Tokens are whitespace separated; line breaks carry no meaning. When
//! `m != n - 1` the graph is reduced to Prim's spanning tree from vertex 0.
//! Weights must be finite. A vertex count the edges could not cover
//! (`n > 2m + 1`) is rejected, as is any count the body runs out before.

use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use crate::graph::{Graph, Vertex, Weight};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("invalid token {token:?}, expected {expected}")]
    InvalidToken {
        token: String,
        expected: &'static str,
    },
    #[error("invalid {what}: {value}")]
    InvalidCount { what: &'static str, value: i64 },
    #[error("vertex {vertex} out of range 1..={n}")]
    VertexOutOfRange { vertex: i64, n: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// A tree and the queries to run on it; query pairs are 0-indexed.
#[derive(Clone, Debug)]
pub struct Instance {
    pub tree: Graph,
    pub queries: Vec<(Vertex, Vertex)>,
}

struct Tokens<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_ascii_whitespace(),
        }
    }

    fn raw(&mut self, expected: &'static str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or(LoadError::UnexpectedEof { expected })
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        let token = self.raw(expected)?;
        token.parse().map_err(|_| LoadError::InvalidToken {
            token: token.to_owned(),
            expected,
        })
    }

    /// `nan` and the infinities parse as `f64` but are not weights.
    fn weight(&mut self) -> Result<Weight> {
        let expected = "edge weight";
        let token = self.raw(expected)?;
        match token.parse::<Weight>() {
            Ok(w) if w.is_finite() => Ok(w),
            _ => Err(LoadError::InvalidToken {
                token: token.to_owned(),
                expected,
            }),
        }
    }

    fn count(&mut self, what: &'static str, min: i64) -> Result<usize> {
        let value: i64 = self.next(what)?;
        if value < min {
            return Err(LoadError::InvalidCount { what, value });
        }
        Ok(value as usize)
    }

    fn vertex(&mut self, n: usize) -> Result<Vertex> {
        let vertex: i64 = self.next("vertex")?;
        if vertex < 1 || vertex > n as i64 {
            return Err(LoadError::VertexOutOfRange { vertex, n });
        }
        Ok((vertex - 1) as Vertex)
    }
}

pub fn parse_instance(input: &str) -> Result<Instance> {
    let mut tokens = Tokens::new(input);
    let n = tokens.count("vertex count", 1)?;
    let m = tokens.count("edge count", 0)?;

    // Nothing is sized from the header until the edges have been read.
    let mut edges = Vec::new();
    for _ in 0..m {
        let u = tokens.vertex(n)?;
        let v = tokens.vertex(n)?;
        let w = tokens.weight()?;
        edges.push((u, v, w));
    }
    if n > 2 * m + 1 {
        return Err(LoadError::InvalidCount {
            what: "vertex count",
            value: n as i64,
        });
    }

    let mut tree = Graph::from_edges(n, false, &edges);
    if m != n - 1 {
        warn!(n, m, "input is not a tree, reducing with prim from vertex 0");
        tree = tree.prim(0);
    }

    let q = tokens.count("query count", 0)?;
    let mut queries = Vec::new();
    for _ in 0..q {
        let u = tokens.vertex(n)?;
        let v = tokens.vertex(n)?;
        queries.push((u, v));
    }

    info!(n, m, queries = q, "instance loaded");
    Ok(Instance { tree, queries })
}

pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let input = std::fs::read_to_string(path)?;
    parse_instance(&input)
}
