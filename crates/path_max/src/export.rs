use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::graph::Graph;

/// One line per live vertex: `u -> (v, w), (v, w)`.
pub fn write_adjacency<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    for u in graph.live_vertices() {
        write!(out, "{u} ->")?;
        for (i, edge) in graph.live_neighbors(u).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(out, "{sep}({}, {})", edge.to, edge.weight)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "vertices (live): {} | edges: {} | {}",
        graph.live_vertex_count(),
        graph.edge_count(),
        if graph.is_directed() { "directed" } else { "undirected" }
    )
}

/// Graphviz rendering; weights become edge labels.
pub fn write_dot<W: Write>(graph: &Graph, name: &str, mut out: W) -> io::Result<()> {
    let (kind, op) = if graph.is_directed() {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };
    writeln!(out, "{kind} {name} {{")?;
    for v in graph.live_vertices() {
        writeln!(out, "  {v};")?;
    }
    for (u, v, w) in graph.edges() {
        writeln!(out, "  {u} {op} {v} [label=\"{w}\"];")?;
    }
    writeln!(out, "}}")
}

pub fn write_dot_file(graph: &Graph, name: &str, path: impl AsRef<Path>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_dot(graph, name, &mut out)?;
    out.flush()
}
