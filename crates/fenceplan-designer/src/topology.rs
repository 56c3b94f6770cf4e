//! Endpoint connectivity between fence lines.
//!
//! Line endpoints closer than a tolerance share a vertex. Chains are maximal
//! walks through degree-2 vertices; they stop at free ends and junctions.

use crate::geometry::Point;
use crate::model::{Line, LineEnd};

/// A shared endpoint location.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point,
    /// (line index, end) pairs meeting here, in line order.
    pub ends: Vec<(usize, LineEnd)>,
}

impl Vertex {
    pub fn degree(&self) -> usize {
        self.ends.len()
    }
}

/// One line within a chain, with the direction it is walked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    pub line: usize,
    /// Walked from `b` to `a`.
    pub reversed: bool,
}

/// An ordered walk of connected lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub links: Vec<ChainLink>,
    /// The walk returns to its starting vertex.
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct LineGraph {
    vertices: Vec<Vertex>,
    line_vertices: Vec<[usize; 2]>,
}

fn end_slot(end: LineEnd) -> usize {
    match end {
        LineEnd::A => 0,
        LineEnd::B => 1,
    }
}

fn opposite(end: LineEnd) -> LineEnd {
    match end {
        LineEnd::A => LineEnd::B,
        LineEnd::B => LineEnd::A,
    }
}

impl LineGraph {
    /// Groups line endpoints into vertices. Each endpoint joins the first
    /// existing vertex within `tolerance`.
    pub fn build(lines: &[Line], tolerance: f64) -> Self {
        let tol_sq = tolerance * tolerance;
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut line_vertices = vec![[0usize; 2]; lines.len()];

        for (li, line) in lines.iter().enumerate() {
            for end in [LineEnd::A, LineEnd::B] {
                let p = line.endpoint(end);
                let vi = match vertices.iter().position(|v| v.pos.distance_sq_to(&p) <= tol_sq) {
                    Some(vi) => vi,
                    None => {
                        vertices.push(Vertex {
                            pos: p,
                            ends: Vec::new(),
                        });
                        vertices.len() - 1
                    }
                };
                vertices[vi].ends.push((li, end));
                line_vertices[li][end_slot(end)] = vi;
            }
        }

        Self {
            vertices,
            line_vertices,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_of(&self, line: usize, end: LineEnd) -> usize {
        self.line_vertices[line][end_slot(end)]
    }

    /// Splits the graph into chains. Open chains start at free ends and
    /// junctions in vertex order; the remaining lines form closed loops.
    pub fn chains(&self) -> Vec<Chain> {
        let mut visited = vec![false; self.line_vertices.len()];
        let mut chains = Vec::new();

        for (vi, vertex) in self.vertices.iter().enumerate() {
            if vertex.degree() == 2 {
                continue;
            }
            for &(li, end) in &vertex.ends {
                if !visited[li] {
                    chains.push(self.walk(vi, li, end, &mut visited));
                }
            }
        }

        for li in 0..self.line_vertices.len() {
            if !visited[li] {
                let start = self.vertex_of(li, LineEnd::A);
                chains.push(self.walk(start, li, LineEnd::A, &mut visited));
            }
        }

        chains
    }

    fn walk(&self, start: usize, line: usize, entry: LineEnd, visited: &mut [bool]) -> Chain {
        let mut links = Vec::new();
        let mut closed = false;
        let (mut li, mut entry_end) = (line, entry);

        loop {
            visited[li] = true;
            links.push(ChainLink {
                line: li,
                reversed: entry_end == LineEnd::B,
            });

            let exit_end = opposite(entry_end);
            let exit = self.vertex_of(li, exit_end);
            if exit == start {
                closed = self.vertices[start].degree() == 2;
                break;
            }
            if self.vertices[exit].degree() != 2 {
                break;
            }

            let next = self.vertices[exit]
                .ends
                .iter()
                .find(|&&(l, e)| !(l == li && e == exit_end))
                .copied();
            match next {
                Some((next_line, next_end)) if !visited[next_line] => {
                    li = next_line;
                    entry_end = next_end;
                }
                _ => break,
            }
        }

        Chain { links, closed }
    }
}
