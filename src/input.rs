//! Line readers for node and edge files.
//!
//! Both formats are line oriented. Blank lines and lines starting with `#`
//! are comments. A node file holds one identifier per line; an edge file holds
//! `source<TAB>target` per line (any whitespace is accepted when there is no
//! tab).

use std::io::{self, BufRead};

use itertools::Either;
use tracing::warn;

fn content_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Ok((i + 1, trimmed.to_owned())))
                }
            }
            Err(e) => Some(Err(e)),
        })
}

pub fn read_nodes<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    content_lines(reader).map(|line| line.map(|(_, id)| id)).collect()
}

/// Reads `(source, target)` pairs. Lines with fewer than two fields are
/// skipped with a warning, extra fields are ignored.
pub fn read_edges<R: BufRead>(reader: R) -> io::Result<Vec<(String, String)>> {
    let mut edges = Vec::new();
    for line in content_lines(reader) {
        let (number, line) = line?;
        match split_edge(&line) {
            Some((source, target)) => edges.push((source.to_owned(), target.to_owned())),
            None => warn!(line = number, content = %line, "skipping edge line with fewer than two fields"),
        }
    }
    Ok(edges)
}

fn split_edge(line: &str) -> Option<(&str, &str)> {
    let mut fields = if line.contains('\t') {
        Either::Left(line.split('\t').map(str::trim))
    } else {
        Either::Right(line.split_whitespace())
    };
    let source = fields.next().filter(|s| !s.is_empty())?;
    let target = fields.next().filter(|s| !s.is_empty())?;
    Some((source, target))
}
