use forage_core::{Item, Similarity};
use forage_ports::{LexiconResult, LexicalResource, SimilarityKind};
use log::debug;
use serde::{Deserialize, Serialize};

/// Value stored at position 0 of a similarity series (no predecessor)
pub const PLACEHOLDER_SIMILARITY: Similarity = 0.0001;

/// Per-position lexical series for one fluency list
///
/// `semantic[k]` and `phonological[k]` hold the similarity between item `k`
/// and item `k - 1`; position 0 holds [`PLACEHOLDER_SIMILARITY`].
/// `frequency[k]` is the frequency of item `k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub semantic: Vec<Similarity>,
    pub phonological: Option<Vec<Similarity>>,
    pub frequency: Vec<f64>,
}

impl HistorySeries {
    /// Derive the series for `items` from precomputed tables
    ///
    /// Phonological similarities are included when the resource carries them.
    pub fn build(items: &[Item], resource: &dyn LexicalResource) -> LexiconResult<Self> {
        let semantic = adjacent_similarities(items, resource, SimilarityKind::Semantic)?;
        let phonological = if resource.has_phonology() {
            Some(adjacent_similarities(
                items,
                resource,
                SimilarityKind::Phonological,
            )?)
        } else {
            None
        };
        let frequency = items
            .iter()
            .map(|item| resource.frequency(item))
            .collect::<LexiconResult<Vec<_>>>()?;

        debug!("Built history series for {} items", items.len());
        Ok(Self {
            semantic,
            phonological,
            frequency,
        })
    }

    pub fn len(&self) -> usize {
        self.semantic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semantic.is_empty()
    }
}

fn adjacent_similarities(
    items: &[Item],
    resource: &dyn LexicalResource,
    kind: SimilarityKind,
) -> LexiconResult<Vec<Similarity>> {
    let mut series = Vec::with_capacity(items.len());
    for (k, item) in items.iter().enumerate() {
        if k == 0 {
            // Still validate the first item against the vocabulary
            resource.similarity(kind, item, item)?;
            series.push(PLACEHOLDER_SIMILARITY);
        } else {
            series.push(resource.similarity(kind, item, &items[k - 1])?);
        }
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LexicalTables;
    use approx::assert_relative_eq;
    use forage_ports::LexiconError;

    fn tables() -> LexicalTables {
        let labels = ["cat", "dog", "eel"].iter().map(|s| s.to_string()).collect();
        let semantic = vec![
            vec![1.0, 0.8, 0.1],
            vec![0.8, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ];
        let phon = vec![
            vec![1.0, 0.3, 0.4],
            vec![0.3, 1.0, 0.5],
            vec![0.4, 0.5, 1.0],
        ];
        LexicalTables::new(labels, semantic, vec![5.0, 6.0, 1.5])
            .unwrap()
            .with_phonology(phon)
            .unwrap()
    }

    fn items(words: &[&str]) -> Vec<Item> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_adjacent_pairs() {
        let series = HistorySeries::build(&items(&["cat", "dog", "eel", "cat"]), &tables()).unwrap();
        assert_eq!(series.len(), 4);
        assert_relative_eq!(series.semantic[0], PLACEHOLDER_SIMILARITY);
        assert_relative_eq!(series.semantic[1], 0.8);
        assert_relative_eq!(series.semantic[2], 0.2);
        assert_relative_eq!(series.semantic[3], 0.1);

        let phon = series.phonological.unwrap();
        assert_relative_eq!(phon[2], 0.5);
        assert_eq!(series.frequency, vec![5.0, 6.0, 1.5, 5.0]);
    }

    #[test]
    fn test_unknown_first_item() {
        let err = HistorySeries::build(&items(&["yak", "dog"]), &tables()).unwrap_err();
        assert_eq!(err, LexiconError::UnknownItem("yak".to_string()));
    }

    #[test]
    fn test_without_phonology() {
        let labels = vec!["cat".to_string()];
        let tables = LexicalTables::new(labels, vec![vec![1.0]], vec![2.0]).unwrap();
        let series = HistorySeries::build(&items(&["cat"]), &tables).unwrap();
        assert!(series.phonological.is_none());
        assert_eq!(series.semantic, vec![PLACEHOLDER_SIMILARITY]);
    }
}
