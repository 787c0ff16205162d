use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(section, item)` coordinate on a rendering surface.
///
/// Whether the coordinate refers to the pre-batch or the post-batch
/// structure depends on the command carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_section_then_item() {
        let mut paths = vec![
            IndexPath::new(1, 0),
            IndexPath::new(0, 3),
            IndexPath::new(0, 1),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![IndexPath::new(0, 1), IndexPath::new(0, 3), IndexPath::new(1, 0)]
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(IndexPath::new(2, 5).to_string(), "[2, 5]");
    }
}
