//! Open-set types shared by every accordion controller.
//!
//! [`OpenSet`] carries the pure transition functions; the coordinator only
//! decides which set is effective and when to notify.

use serde::{Deserialize, Serialize};

/// Whether more than one section may be open at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// At most one section is open.
    #[default]
    Single,
    /// Any number of sections may be open.
    Multiple,
}

impl ControlMode {
    /// Mode selected by the `allow_multiple_open` option.
    pub fn from_allow_multiple(allow_multiple_open: bool) -> Self {
        if allow_multiple_open {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    /// Whether this mode admits more than one open section.
    pub fn allows_multiple(self) -> bool {
        self == Self::Multiple
    }
}

/// An ordered set of open section indices.
///
/// Iteration order is activation order. Duplicates never occur: building a
/// set from a sequence keeps the first occurrence of each index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct OpenSet(Vec<usize>);

impl OpenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Whether `index` is open.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Number of open sections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no section is open.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first opened index, if any.
    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Iterate over open indices in activation order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Borrow the indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// The set after opening `index` under `mode`.
    ///
    /// Opening an already open index returns the set unchanged. In
    /// [`ControlMode::Multiple`] the index is appended; in
    /// [`ControlMode::Single`] it replaces the whole set.
    pub fn activated(&self, index: usize, mode: ControlMode) -> Self {
        if self.contains(index) {
            return self.clone();
        }
        match mode {
            ControlMode::Multiple => {
                let mut next = self.0.clone();
                next.push(index);
                Self(next)
            }
            ControlMode::Single => Self(vec![index]),
        }
    }

    /// The set after closing `index`.
    ///
    /// Closing an index that is not open returns the set unchanged, as does
    /// closing the only open index while `allow_all_closed` is false. The
    /// relative order of the remaining indices is preserved.
    pub fn deactivated(&self, index: usize, allow_all_closed: bool) -> Self {
        let Some(position) = self.0.iter().position(|&open| open == index) else {
            return self.clone();
        };
        if self.0.len() == 1 && !allow_all_closed {
            return self.clone();
        }
        let mut next = self.0.clone();
        next.remove(position);
        Self(next)
    }
}

impl FromIterator<usize> for OpenSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut indices = Vec::new();
        for index in iter {
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        Self(indices)
    }
}

impl From<Vec<usize>> for OpenSet {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

impl From<OpenSet> for Vec<usize> {
    fn from(set: OpenSet) -> Self {
        set.0
    }
}

/// A configured open value: one index or a list of indices.
///
/// Deserializes from either a number or an array of numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenValue {
    /// A single open index.
    One(usize),
    /// Several open indices, in order.
    Many(Vec<usize>),
}

impl OpenValue {
    /// Normalize to an ordered, duplicate-free set.
    pub fn to_open_set(&self) -> OpenSet {
        match self {
            OpenValue::One(index) => OpenSet(vec![*index]),
            OpenValue::Many(indices) => indices.iter().copied().collect(),
        }
    }
}

impl From<usize> for OpenValue {
    fn from(index: usize) -> Self {
        Self::One(index)
    }
}

impl From<Vec<usize>> for OpenValue {
    fn from(indices: Vec<usize>) -> Self {
        Self::Many(indices)
    }
}

impl From<&[usize]> for OpenValue {
    fn from(indices: &[usize]) -> Self {
        Self::Many(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for OpenValue {
    fn from(indices: [usize; N]) -> Self {
        Self::Many(indices.to_vec())
    }
}

impl From<OpenSet> for OpenValue {
    fn from(set: OpenSet) -> Self {
        Self::Many(set.0)
    }
}

/// The payload of an open-set change notification.
///
/// Single-mode accordions report the open index (or `None` once everything is
/// closed); multiple-mode accordions report the full ordered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenSections {
    /// The open index of a single-mode accordion.
    Single(Option<usize>),
    /// The open indices of a multiple-mode accordion, in activation order.
    Multiple(Vec<usize>),
}

impl OpenSections {
    /// Build the payload for `set` as reported in `mode`.
    pub fn from_set(set: &OpenSet, mode: ControlMode) -> Self {
        match mode {
            ControlMode::Single => Self::Single(set.first()),
            ControlMode::Multiple => Self::Multiple(set.0.clone()),
        }
    }

    /// Whether `index` is open in this payload.
    pub fn contains(&self, index: usize) -> bool {
        match self {
            Self::Single(open) => *open == Some(index),
            Self::Multiple(open) => open.contains(&index),
        }
    }

    /// The open indices as a set.
    pub fn to_open_set(&self) -> OpenSet {
        match self {
            Self::Single(open) => open.iter().copied().collect(),
            Self::Multiple(open) => open.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> OpenSet {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_from_iter_dedupes_keeping_first() {
        assert_eq!(set(&[2, 0, 2, 1, 0]).as_slice(), &[2, 0, 1]);
    }

    #[test]
    fn test_activate_single_replaces() {
        let next = set(&[0]).activated(2, ControlMode::Single);
        assert_eq!(next.as_slice(), &[2]);
    }

    #[test]
    fn test_activate_multiple_appends_in_order() {
        let next = set(&[3])
            .activated(1, ControlMode::Multiple)
            .activated(0, ControlMode::Multiple);
        assert_eq!(next.as_slice(), &[3, 1, 0]);
    }

    #[test]
    fn test_activate_is_idempotent() {
        for mode in [ControlMode::Single, ControlMode::Multiple] {
            let once = set(&[1]).activated(4, mode);
            let twice = once.activated(4, mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_deactivate_preserves_order() {
        let next = set(&[4, 1, 7]).deactivated(1, false);
        assert_eq!(next.as_slice(), &[4, 7]);
    }

    #[test]
    fn test_deactivate_unknown_is_noop() {
        let open = set(&[1]);
        assert_eq!(open.deactivated(5, true), open);
    }

    #[test]
    fn test_deactivate_last_respects_allow_all_closed() {
        let open = set(&[1]);
        assert_eq!(open.deactivated(1, false), open);
        assert!(open.deactivated(1, true).is_empty());
    }

    #[test]
    fn test_single_mode_never_exceeds_one() {
        let mut open = OpenSet::new();
        for index in [0, 3, 1, 1, 2, 0] {
            open = open.activated(index, ControlMode::Single);
            assert!(open.len() <= 1);
        }
        assert_eq!(open.as_slice(), &[0]);
    }

    #[test]
    fn test_never_empty_without_allow_all_closed() {
        let mut open = set(&[0]);
        let steps: [(bool, usize); 8] = [
            (false, 0),
            (true, 1),
            (false, 0),
            (false, 1),
            (true, 2),
            (false, 2),
            (false, 1),
            (false, 2),
        ];
        for (activate, index) in steps {
            open = if activate {
                open.activated(index, ControlMode::Multiple)
            } else {
                open.deactivated(index, false)
            };
            assert!(!open.is_empty());
        }
    }

    #[test]
    fn test_open_value_normalization() {
        assert_eq!(OpenValue::from(1).to_open_set().as_slice(), &[1]);
        assert_eq!(OpenValue::from([0, 1, 0]).to_open_set().as_slice(), &[0, 1]);
        assert!(OpenValue::from(Vec::new()).to_open_set().is_empty());
    }

    #[test]
    fn test_open_sections_payload() {
        let open = set(&[2, 0]);
        assert_eq!(
            OpenSections::from_set(&open, ControlMode::Multiple),
            OpenSections::Multiple(vec![2, 0])
        );
        assert_eq!(
            OpenSections::from_set(&open, ControlMode::Single),
            OpenSections::Single(Some(2))
        );
        assert_eq!(
            OpenSections::from_set(&OpenSet::new(), ControlMode::Single),
            OpenSections::Single(None)
        );
        assert!(OpenSections::Single(Some(2)).contains(2));
        assert!(!OpenSections::Multiple(vec![1]).contains(2));
    }

    #[test]
    fn test_control_mode_from_flag() {
        assert_eq!(ControlMode::from_allow_multiple(true), ControlMode::Multiple);
        assert_eq!(ControlMode::from_allow_multiple(false), ControlMode::Single);
        assert!(!ControlMode::default().allows_multiple());
    }
}
