use std::io::{self, Write};

use path_max::{Graph, Vertex, export};
use tracing::debug;

const EDGES: [(Vertex, Vertex, f64); 6] = [
    (0, 1, 2.0),
    (1, 2, 1.0),
    (2, 3, 4.0),
    (3, 0, 1.0),
    (0, 4, 1.5),
    (4, 2, 2.5),
];

fn join(order: &[Vertex]) -> String {
    order.iter().map(Vertex::to_string).collect::<Vec<_>>().join(" ")
}

fn show_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |x| x.to_string())
}

/// Builds the five-vertex graph, reduces it to its MST and runs every engine
/// on it, printing each step to `out`.
pub fn run<W: Write>(mut out: W) -> io::Result<()> {
    let graph = Graph::from_edges(5, false, &EDGES);
    writeln!(out, "== graph")?;
    export::write_summary(&graph, &mut out)?;
    export::write_adjacency(&graph, &mut out)?;
    writeln!(out, "dfs(0): {}", join(&graph.dfs(0)))?;
    writeln!(out, "bfs(0): {}", join(&graph.bfs(0)))?;

    let kruskal = graph.kruskal();
    let mut mst = graph.prim(0);
    writeln!(out, "== kruskal (total {})", kruskal.total_weight())?;
    export::write_adjacency(&kruskal, &mut out)?;
    writeln!(out, "== prim from 0 (total {})", mst.total_weight())?;
    export::write_adjacency(&mst, &mut out)?;

    let Some(center) = mst.compute_center_and_parent() else {
        return writeln!(out, "tree is empty");
    };
    debug!(center, levels = mst.lifting_levels(), "rooted demo tree");
    writeln!(out, "== rooted at center {center}, diameter {} edges", mst.diameter_length())?;
    for v in mst.live_vertices() {
        writeln!(
            out,
            "{v}: parent {} weight {} depth {}",
            show_or_dash(mst.parent(v)),
            show_or_dash(mst.parent_edge_weight(v)),
            show_or_dash(mst.depth(v)),
        )?;
    }
    writeln!(out, "lca(1, 4) = {}", show_or_dash(mst.lca(1, 4)))?;
    writeln!(out, "max to ancestor (2, 0) = {}", show_or_dash(mst.max_on_path_to_ancestor(2, 0)))?;
    writeln!(out, "max to ancestor (4, 0) = {}", show_or_dash(mst.max_on_path_to_ancestor(4, 0)))?;

    let queries = [(0, 2), (1, 4), (3, 4), (2, 2)];
    mst.preprocess_v3(&queries);
    writeln!(out, "== path max")?;
    for (u, v) in queries {
        writeln!(
            out,
            "({u}, {v}): v1 {} v2 {} v3 {}",
            show_or_dash(mst.path_max_v1(u, v)),
            show_or_dash(mst.path_max_v2(u, v)),
            show_or_dash(mst.path_max_v3(u, v)),
        )?;
    }
    Ok(())
}
