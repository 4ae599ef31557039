//! Page words in reading order.

use crate::geometry::Rect;

/// One word on a page.
///
/// Immutable once the page's [`WordIndex`] is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Bounding box in page coordinates
    pub bbox: Rect,
    /// The word's text token
    pub text: String,
    /// Position in the page's natural reading order
    pub order: usize,
}

/// The words of one page, in the reading order the collaborator supplied.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: Vec<Word>,
}

impl WordIndex {
    /// Build an index from `(bbox, text)` pairs already in reading order.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (Rect, S)>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .enumerate()
            .map(|(order, (bbox, text))| Word {
                bbox,
                text: text.into(),
                order,
            })
            .collect();
        Self { words }
    }

    /// Number of words on the page.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the page has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at reading-order position `index`.
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// All words in reading order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Reading-order indices of the words whose box intersects `region`.
    pub fn covered_by(&self, region: &Rect) -> Vec<usize> {
        self.words
            .iter()
            .filter(|w| w.bbox.intersects(region))
            .map(|w| w.order)
            .collect()
    }

    /// Texts of the words at `indices`, skipping indices off the page.
    pub fn texts<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a str> + 'a {
        indices
            .iter()
            .filter_map(move |&i| self.words.get(i))
            .map(|w| w.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> WordIndex {
        WordIndex::new(vec![
            (Rect::from_points(0.0, 0.0, 30.0, 10.0), "The"),
            (Rect::from_points(35.0, 0.0, 70.0, 10.0), "quick"),
            (Rect::from_points(75.0, 0.0, 110.0, 10.0), "brown"),
            (Rect::from_points(0.0, 15.0, 25.0, 25.0), "fox"),
        ])
    }

    #[test]
    fn test_orders_follow_input() {
        let index = line();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get(3).map(|w| w.order), Some(3));
        assert_eq!(index.get(1).map(|w| w.text.as_str()), Some("quick"));
    }

    #[test]
    fn test_covered_by_uses_intersection() {
        let index = line();
        // Clips the edge of "quick" and "brown"; covers neither completely.
        let region = Rect::from_points(60.0, 2.0, 80.0, 8.0);
        assert_eq!(index.covered_by(&region), vec![1, 2]);
    }

    #[test]
    fn test_covered_by_keeps_reading_order() {
        let index = line();
        let region = Rect::from_points(0.0, 0.0, 200.0, 30.0);
        let covered = index.covered_by(&region);
        assert_eq!(covered, vec![0, 1, 2, 3]);
        let texts: Vec<&str> = index.texts(&covered).collect();
        assert_eq!(texts, vec!["The", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_nothing_covered() {
        assert!(line().covered_by(&Rect::from_points(500.0, 500.0, 510.0, 510.0)).is_empty());
        assert!(WordIndex::default().is_empty());
    }
}
