//! Reader and writer for the graph6 format.
//!
//! A graph6 string is a size prefix `N(n)` followed by the upper triangle of
//! the adjacency matrix, taken column by column and packed six bits to a
//! printable byte.

use crate::{GraphError, Result};
use log::{debug, trace};

/// Optional header some tools write in front of the first graph.
pub const HEADER: &str = ">>graph6<<";

/// Largest order expressible with the eight byte prefix.
pub const MAX_ORDER: u64 = (1 << 36) - 1;

const BIAS: u8 = 63;
const LONG_MARKER: u8 = 126;

/// A decoded graph6 record: the order and its edges as `(u, v)` with `u < v`,
/// in the order they appear in the bit stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph6 {
    pub order: usize,
    pub edges: Vec<(usize, usize)>,
}

fn strip(text: &str) -> &[u8] {
    let text = text.trim_end_matches(['\n', '\r']);
    text.strip_prefix(HEADER).unwrap_or(text).as_bytes()
}

fn sextet(bytes: &[u8], position: usize) -> Result<u8> {
    match bytes.get(position) {
        Some(&byte) if (BIAS..=LONG_MARKER).contains(&byte) => Ok(byte - BIAS),
        Some(&byte) => Err(GraphError::InvalidByte { position, byte }),
        None => Err(GraphError::LengthMismatch {
            expected: position + 1,
            found: bytes.len(),
        }),
    }
}

/// Parses `N(n)`, returning the order and the number of bytes it occupied.
fn parse_order(bytes: &[u8]) -> Result<(u64, usize)> {
    let first = *bytes.first().ok_or(GraphError::EmptyInput)?;
    if first != LONG_MARKER {
        return Ok((sextet(bytes, 0)? as u64, 1));
    }

    let (start, width) = if bytes.get(1) == Some(&LONG_MARKER) {
        (2, 6)
    } else {
        (1, 3)
    };
    let mut order = 0u64;
    for position in start..start + width {
        order = (order << 6) | sextet(bytes, position)? as u64;
    }
    Ok((order, start + width))
}

fn write_order(order: u64, out: &mut Vec<u8>) -> Result<()> {
    let width = match order {
        0..=62 => {
            out.push(order as u8 + BIAS);
            return Ok(());
        }
        63..=258_047 => {
            out.push(LONG_MARKER);
            3
        }
        _ if order <= MAX_ORDER => {
            out.extend([LONG_MARKER, LONG_MARKER]);
            6
        }
        _ => return Err(GraphError::OrderTooLarge(order)),
    };
    for shift in (0..width).rev() {
        out.push(((order >> (6 * shift)) & 0x3f) as u8 + BIAS);
    }
    Ok(())
}

/// Number of body bytes that follow the prefix for a graph of `order` vertices.
fn body_len(order: usize) -> Result<usize> {
    let bits = order
        .checked_mul(order.saturating_sub(1))
        .map(|pairs| pairs / 2)
        .ok_or(GraphError::OrderTooLarge(order as u64))?;
    Ok(bits.div_ceil(6))
}

/// Position of the pair `{u, v}` (`u < v`) in the column-wise bit stream.
fn bit_index(u: usize, v: usize) -> usize {
    v * (v - 1) / 2 + u
}

/// Reads only the size prefix.
pub fn order(text: &str) -> Result<usize> {
    let (order, _) = parse_order(strip(text))?;
    usize::try_from(order).map_err(|_| GraphError::OrderTooLarge(order))
}

pub fn decode(text: &str) -> Result<Graph6> {
    let bytes = strip(text);
    let (order, offset) = parse_order(bytes)?;
    let order = usize::try_from(order).map_err(|_| GraphError::OrderTooLarge(order))?;

    let body = &bytes[offset..];
    let expected = body_len(order)?;
    if body.len() != expected {
        return Err(GraphError::LengthMismatch {
            expected,
            found: body.len(),
        });
    }
    let body = (0..body.len())
        .map(|i| sextet(body, i).map_err(|e| shift_position(e, offset)))
        .collect::<Result<Vec<u8>>>()?;

    let mut edges = Vec::new();
    let mut index = 0;
    for v in 1..order {
        for u in 0..v {
            if (body[index / 6] >> (5 - index % 6)) & 1 == 1 {
                trace!("graph6 edge {u} - {v}");
                edges.push((u, v));
            }
            index += 1;
        }
    }

    debug!("decoded graph6 with {order} vertices and {} edges", edges.len());
    Ok(Graph6 { order, edges })
}

fn shift_position(error: GraphError, offset: usize) -> GraphError {
    match error {
        GraphError::InvalidByte { position, byte } => GraphError::InvalidByte {
            position: position + offset,
            byte,
        },
        other => other,
    }
}

/// Encodes a simple graph. Edges may be given in either orientation;
/// duplicates collapse onto the same bit.
pub fn encode<I>(order: usize, edges: I) -> Result<String>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut body = vec![0u8; body_len(order)?];
    for (a, b) in edges {
        let (u, v) = if a < b { (a, b) } else { (b, a) };
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        if v >= order {
            return Err(GraphError::VertexOutOfRange { vertex: v, order });
        }
        let index = bit_index(u, v);
        body[index / 6] |= 1 << (5 - index % 6);
    }

    let mut out = Vec::with_capacity(body.len() + 8);
    write_order(order as u64, &mut out)?;
    out.extend(body.into_iter().map(|sextet| sextet + BIAS));
    Ok(out.into_iter().map(char::from).collect())
}

impl Graph6 {
    pub fn encode(&self) -> Result<String> {
        encode(self.order, self.edges.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_small_graphs() {
        assert_eq!(decode("?").unwrap(), Graph6::default());
        assert_eq!(decode("@").unwrap().order, 1);
        assert_eq!(decode("A_").unwrap().edges, vec![(0, 1)]);
        assert!(decode("A?").unwrap().edges.is_empty());
        assert_eq!(decode("Bw").unwrap().edges, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(decode("Ch").unwrap().edges, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_decode_header_and_newline() {
        let graph = decode(">>graph6<<C~\r\n").unwrap();
        assert_eq!(graph.order, 4);
        assert_eq!(graph.edges.len(), 6);
    }

    #[test]
    fn test_padding_bits_ignored() {
        // 'x' carries a set padding bit after the three edge bits.
        assert_eq!(decode("Bx").unwrap().edges.len(), 3);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(""), Err(GraphError::EmptyInput)));
        assert!(matches!(decode("\n"), Err(GraphError::EmptyInput)));
        assert!(matches!(
            decode("C"),
            Err(GraphError::LengthMismatch {
                expected: 1,
                found: 0
            })
        ));
        assert!(matches!(
            decode("A__"),
            Err(GraphError::LengthMismatch {
                expected: 1,
                found: 2
            })
        ));
        assert!(matches!(
            decode("C "),
            Err(GraphError::InvalidByte {
                position: 1,
                byte: b' '
            })
        ));
        assert!(matches!(
            decode("~?"),
            Err(GraphError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_long_prefix() {
        let empty = encode(63, []).unwrap();
        assert!(empty.starts_with("~??~"));
        assert_eq!(empty.len(), 4 + 1953_usize.div_ceil(6));
        assert_eq!(order(&empty).unwrap(), 63);

        let mut out = Vec::new();
        write_order(258_048, &mut out).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(&out[..2], b"~~");
        assert_eq!(parse_order(&out).unwrap(), (258_048, 8));

        assert!(matches!(
            write_order(MAX_ORDER + 1, &mut Vec::new()),
            Err(GraphError::OrderTooLarge(_))
        ));
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(0, []).unwrap(), "?");
        assert_eq!(encode(2, [(1, 0)]).unwrap(), "A_");
        assert_eq!(encode(4, [(0, 1), (2, 1), (3, 2)]).unwrap(), "Ch");
        assert!(matches!(encode(3, [(1, 1)]), Err(GraphError::SelfLoop(1))));
        assert!(matches!(
            encode(3, [(0, 3)]),
            Err(GraphError::VertexOutOfRange {
                vertex: 3,
                order: 3
            })
        ));
    }

    #[test]
    fn test_petersen() {
        let graph = decode("IheA@GUAo").unwrap();
        assert_eq!(graph.order, 10);
        assert_eq!(graph.edges.len(), 15);
        assert_eq!(graph.encode().unwrap(), "IheA@GUAo");
    }
}
