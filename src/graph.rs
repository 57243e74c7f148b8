use crate::{graph6, GraphError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// An undirected simple graph on the vertices `0..n`, stored as one sorted
/// neighbour list per vertex.
#[derive(Default, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct AdjacencyList {
    adjacency: Vec<Vec<usize>>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with `order` vertices and no edges.
    pub fn with_vertices(order: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); order],
        }
    }

    pub fn from_graph6(text: &str) -> Result<Self> {
        let decoded = graph6::decode(text)?;
        let mut graph = Self::with_vertices(decoded.order);
        for (u, v) in decoded.edges {
            graph.adjacency[u].push(v);
            graph.adjacency[v].push(u);
        }
        for neighbors in &mut graph.adjacency {
            neighbors.sort_unstable();
        }
        Ok(graph)
    }

    pub fn to_graph6(&self) -> Result<String> {
        graph6::encode(self.number_of_vertices(), self.edges())
    }

    pub fn number_of_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn vertices(&self) -> BTreeSet<usize> {
        (0..self.number_of_vertices()).collect()
    }

    pub fn number_of_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Neighbours of vertex 0, or an empty slice for the empty graph.
    pub fn alist(&self) -> &[usize] {
        self.neighbors(0).unwrap_or(&[])
    }

    pub fn neighbors(&self, vertex: usize) -> Option<&[usize]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    pub fn degree(&self, vertex: usize) -> Option<usize> {
        self.adjacency.get(vertex).map(Vec::len)
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|neighbors| neighbors.binary_search(&v).is_ok())
    }

    /// All edges as `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| {
                neighbors
                    .iter()
                    .copied()
                    .filter(move |&v| u < v)
                    .map(move |v| (u, v))
            })
    }

    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.number_of_vertices() {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                order: self.number_of_vertices(),
            });
        }
        Ok(())
    }

    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }

        let index = match self.adjacency[u].binary_search(&v) {
            Ok(_) => return Ok(false),
            Err(index) => index,
        };
        self.adjacency[u].insert(index, v);
        if let Err(index) = self.adjacency[v].binary_search(&u) {
            self.adjacency[v].insert(index, u);
        }
        trace!("added edge {u} - {v}");
        Ok(true)
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        let Ok(index) = self.adjacency[u].binary_search(&v) else {
            return Ok(false);
        };
        self.adjacency[u].remove(index);
        if let Ok(index) = self.adjacency[v].binary_search(&u) {
            self.adjacency[v].remove(index);
        }
        trace!("removed edge {u} - {v}");
        Ok(true)
    }

    /// Checks sortedness, range, absence of self-loops and symmetry.
    pub fn validate(&self) -> Result<()> {
        let order = self.number_of_vertices();
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            if neighbors.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(GraphError::InvalidAdjacency(format!(
                    "neighbours of {u} are not strictly increasing"
                )));
            }
            for &v in neighbors {
                if v >= order {
                    return Err(GraphError::VertexOutOfRange { vertex: v, order });
                }
                if v == u {
                    return Err(GraphError::SelfLoop(u));
                }
                if self.adjacency[v].binary_search(&u).is_err() {
                    return Err(GraphError::InvalidAdjacency(format!(
                        "edge {u} - {v} is missing its reverse"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn to_dot(&self) -> String {
        let mut dot_str = String::from("graph G {\n");
        for vertex in 0..self.number_of_vertices() {
            dot_str.push_str(&format!("\t{vertex};\n"));
        }
        for (u, v) in self.edges() {
            dot_str.push_str(&format!("\t{u} -- {v};\n"));
        }
        dot_str.push('}');
        dot_str
    }

    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(&self).map_err(|e| GraphError::Serialization(e.to_string()))
    }

    pub fn deserialize(data: &str) -> Result<Self> {
        let graph: Self = serde_json::from_str(data).map_err(json_error)?;
        graph.validate()?;
        debug!(
            "deserialized graph with {} vertices and {} edges",
            graph.number_of_vertices(),
            graph.number_of_edges()
        );
        Ok(graph)
    }

    /// Reads consecutive JSON graphs in any layout, validating each one.
    /// A syntax error ends the stream; an invalid graph does not.
    pub fn read_json<R: Read>(reader: R) -> impl Iterator<Item = Result<Self>> {
        serde_json::Deserializer::from_reader(reader)
            .into_iter::<Self>()
            .map(|graph| -> Result<Self> {
                let graph = graph.map_err(json_error)?;
                graph.validate()?;
                Ok(graph)
            })
    }

    pub fn traverse_dfs(&self, start: usize) -> Option<Vec<usize>> {
        self.adjacency.get(start)?;
        let mut visited = vec![false; self.number_of_vertices()];
        let mut stack = vec![start];
        let mut result = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited[current] {
                visited[current] = true;
                result.push(current);

                // Reversed so the smallest neighbour is popped first.
                for &neighbor in self.adjacency[current].iter().rev() {
                    if !visited[neighbor] {
                        stack.push(neighbor);
                    }
                }
            }
        }

        Some(result)
    }

    pub fn traverse_bfs(&self, start: usize) -> Option<Vec<usize>> {
        self.adjacency.get(start)?;
        let mut visited = vec![false; self.number_of_vertices()];
        let mut queue = VecDeque::new();
        let mut result = Vec::new();

        queue.push_back(start);
        visited[start] = true;

        while let Some(current) = queue.pop_front() {
            result.push(current);

            for &neighbor in &self.adjacency[current] {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        Some(result)
    }
}

impl FromStr for AdjacencyList {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_graph6(s)
    }
}

fn json_error(e: serde_json::Error) -> GraphError {
    if e.is_io() {
        GraphError::Io(e.into())
    } else {
        GraphError::Deserialization(format!("Failed to deserialize graph: {}", e))
    }
}

impl fmt::Display for AdjacencyList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

#[derive(Default)]
pub struct AdjacencyListBuilder {
    graph: AdjacencyList,
}

impl AdjacencyListBuilder {
    pub fn with_vertices(order: usize) -> Self {
        Self {
            graph: AdjacencyList::with_vertices(order),
        }
    }

    pub fn add_vertex(&mut self) -> &mut Self {
        self.graph.add_vertex();
        self
    }

    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<&mut Self> {
        self.graph.add_edge(u, v)?;
        Ok(self)
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) -> Result<&mut Self> {
        self.graph.remove_edge(u, v)?;
        Ok(self)
    }

    pub fn build(self) -> AdjacencyList {
        self.graph
    }
}
