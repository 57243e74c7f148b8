use simple_graphs::{graph6, AdjacencyList, GraphError};

/// graph6 string, order, edge count, neighbours of vertex 0.
type Fixture = (&'static str, usize, usize, &'static [usize]);

const FIXTURES: &[Fixture] = &[
    ("?", 0, 0, &[]),
    ("@", 1, 0, &[]),
    ("A?", 2, 0, &[]),
    ("A_", 2, 1, &[1]),
    ("Bw", 3, 3, &[1, 2]),
    ("Ch", 4, 3, &[1]),
    ("C~", 4, 6, &[1, 2, 3]),
    ("IheA@GUAo", 10, 15, &[1, 4, 5]),
];

#[test]
fn fixtures_decode() {
    for &(text, order, edges, alist) in FIXTURES {
        let graph: AdjacencyList = text.parse().unwrap();
        assert_eq!(graph.number_of_vertices(), order, "order of {text}");
        assert_eq!(graph.number_of_edges(), edges, "edges of {text}");
        assert_eq!(graph.alist(), alist, "alist of {text}");
        assert_eq!(graph.vertices().len(), order);
        assert_eq!(graph6::order(text).unwrap(), order);
    }
}

#[test]
fn fixtures_reencode() {
    for &(text, ..) in FIXTURES {
        let graph = AdjacencyList::from_graph6(text).unwrap();
        assert_eq!(graph.to_graph6().unwrap(), text);
    }
}

#[test]
fn fixtures_survive_json() {
    for &(text, ..) in FIXTURES {
        let graph = AdjacencyList::from_graph6(text).unwrap();
        let json = graph.serialize().unwrap();
        assert_eq!(AdjacencyList::deserialize(&json).unwrap(), graph);
    }
}

#[test]
fn complete_graph_on_63_vertices_uses_long_prefix() {
    let mut graph = AdjacencyList::with_vertices(63);
    for v in 1..63 {
        for u in 0..v {
            graph.add_edge(u, v).unwrap();
        }
    }
    let text = graph.to_graph6().unwrap();
    assert!(text.starts_with("~??~"));

    let decoded = AdjacencyList::from_graph6(&text).unwrap();
    assert_eq!(decoded.number_of_edges(), 63 * 62 / 2);
    assert_eq!(decoded.degree(62), Some(62));
    assert_eq!(decoded, graph);
}

#[test]
fn multi_graph_file() {
    let file = ">>graph6<<Bw\nCh\n";
    let orders: Vec<usize> = file
        .lines()
        .map(|line| AdjacencyList::from_graph6(line).unwrap().number_of_vertices())
        .collect();
    assert_eq!(orders, vec![3, 4]);
}

#[test]
fn invalid_inputs() {
    assert!(matches!(
        AdjacencyList::from_graph6(""),
        Err(GraphError::EmptyInput)
    ));
    assert!(matches!(
        AdjacencyList::from_graph6("Bw?"),
        Err(GraphError::LengthMismatch { .. })
    ));
    assert!(matches!(
        AdjacencyList::from_graph6("B\x7f"),
        Err(GraphError::InvalidByte { position: 1, .. })
    ));
}
