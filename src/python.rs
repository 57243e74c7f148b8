//! Extension module exposing `simple_graphs.AdjacencyList`.

use crate::{AdjacencyList, GraphError};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashSet;

impl From<GraphError> for PyErr {
    fn from(error: GraphError) -> Self {
        match error {
            GraphError::VertexOutOfRange { .. } => PyIndexError::new_err(error.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Adjacency List object
#[pyclass(name = "AdjacencyList", module = "simple_graphs")]
#[derive(Debug, Clone)]
pub struct PyAdjacencyList {
    inner: AdjacencyList,
}

#[pymethods]
impl PyAdjacencyList {
    #[new]
    fn new(g6: &str) -> PyResult<Self> {
        Ok(Self {
            inner: AdjacencyList::from_graph6(g6)?,
        })
    }

    fn number_of_vertices(&self) -> usize {
        self.inner.number_of_vertices()
    }

    fn vertices(&self) -> HashSet<usize> {
        self.inner.vertices().into_iter().collect()
    }

    fn number_of_edges(&self) -> usize {
        self.inner.number_of_edges()
    }

    #[pyo3(name = "Alist")]
    fn alist(&self) -> Vec<usize> {
        self.inner.alist().to_vec()
    }

    fn neighbors(&self, vertex: usize) -> PyResult<Vec<usize>> {
        self.inner
            .neighbors(vertex)
            .map(<[usize]>::to_vec)
            .ok_or_else(|| {
                GraphError::VertexOutOfRange {
                    vertex,
                    order: self.inner.number_of_vertices(),
                }
                .into()
            })
    }

    fn to_graph6(&self) -> PyResult<String> {
        Ok(self.inner.to_graph6()?)
    }

    fn __len__(&self) -> usize {
        self.inner.number_of_vertices()
    }

    fn __repr__(&self) -> String {
        format!(
            "AdjacencyList(vertices={}, edges={})",
            self.inner.number_of_vertices(),
            self.inner.number_of_edges()
        )
    }
}

/// Module containing simple graph classes
#[pymodule]
fn simple_graphs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyAdjacencyList>()?;
    Ok(())
}
