use std::collections::HashMap;

use forage_core::{Item, Similarity};
use forage_ports::{LexiconError, LexiconResult, LexicalResource, SimilarityKind};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Precomputed lexical tables for one domain (e.g. animals)
///
/// Rows and columns of both matrices follow the order of `labels`, as does the
/// frequency vector.
#[derive(Debug, Clone)]
pub struct LexicalTables {
    labels: Vec<Item>,
    index: HashMap<Item, usize>,
    semantic: Vec<Vec<Similarity>>,
    phonological: Option<Vec<Vec<Similarity>>>,
    frequencies: Vec<f64>,
}

impl LexicalTables {
    /// Create tables from a semantic matrix and per-item frequencies
    pub fn new(
        labels: Vec<Item>,
        semantic: Vec<Vec<Similarity>>,
        frequencies: Vec<f64>,
    ) -> LexiconResult<Self> {
        check_matrix("semantic similarity matrix", &semantic, labels.len())?;
        if frequencies.len() != labels.len() {
            return Err(LexiconError::DimensionMismatch {
                table: "frequency table",
                expected: labels.len(),
                actual: frequencies.len(),
            });
        }

        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Ok(Self {
            labels,
            index,
            semantic,
            phonological: None,
            frequencies,
        })
    }

    /// Attach a phonological similarity matrix in the same label order
    pub fn with_phonology(mut self, phonological: Vec<Vec<Similarity>>) -> LexiconResult<Self> {
        check_matrix(
            "phonological similarity matrix",
            &phonological,
            self.labels.len(),
        )?;
        self.phonological = Some(phonological);
        Ok(self)
    }

    pub fn labels(&self) -> &[Item] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn position(&self, item: &str) -> LexiconResult<usize> {
        self.index
            .get(item)
            .copied()
            .ok_or_else(|| LexiconError::UnknownItem(item.to_string()))
    }
}

impl LexicalResource for LexicalTables {
    fn similarity(&self, kind: SimilarityKind, a: &str, b: &str) -> LexiconResult<Similarity> {
        let row = self.position(a)?;
        let col = self.position(b)?;
        let matrix = match kind {
            SimilarityKind::Semantic => &self.semantic,
            SimilarityKind::Phonological => {
                self.phonological
                    .as_ref()
                    .ok_or(LexiconError::MissingTable("phonological similarity matrix"))?
            }
        };
        Ok(matrix[row][col])
    }

    fn frequency(&self, item: &str) -> LexiconResult<f64> {
        Ok(self.frequencies[self.position(item)?])
    }

    fn has_phonology(&self) -> bool {
        self.phonological.is_some()
    }
}

/// Square, `n`×`n` and symmetric
fn check_matrix(table: &'static str, matrix: &[Vec<Similarity>], n: usize) -> LexiconResult<()> {
    if matrix.len() != n {
        return Err(LexiconError::DimensionMismatch {
            table,
            expected: n,
            actual: matrix.len(),
        });
    }
    for row in matrix {
        if row.len() != n {
            return Err(LexiconError::DimensionMismatch {
                table,
                expected: n,
                actual: row.len(),
            });
        }
    }
    for row in 0..n {
        for col in (row + 1)..n {
            if (matrix[row][col] - matrix[col][row]).abs() > SYMMETRY_TOLERANCE {
                return Err(LexiconError::AsymmetricMatrix { table, row, col });
            }
        }
    }
    Ok(())
}
