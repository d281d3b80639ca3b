/*
  Copyright 2024 the linkwalk developers

  Licensed under the Apache License, Version 2.0 (the "License");
  you may not use this file except in compliance with the License.
  You may obtain a copy of the License at

      http://www.apache.org/licenses/LICENSE-2.0

  Unless required by applicable law or agreed to in writing, software
  distributed under the License is distributed on an "AS IS" BASIS,
  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
  See the License for the specific language governing permissions and
  limitations under the License.
*/
use crate::node::LinkNode;
use nalgebra::RealField;
use std::ops::Index;

/// An ordered, dependency-respecting sequence of links anchored at a
/// reference link.
///
/// The reference link is always at index 0. The first
/// `num_upward_connections()` steps of the sequence walk toward the
/// structural root (each entry is the parent of the previous one); every
/// later entry is reachable from the reference link through child edges and
/// appears after the link it is solved from. The traversal holds shared
/// handles only; it never creates or destroys links, and it must be rebuilt
/// (or repaired with [`append`](Traversal::append) /
/// [`remove`](Traversal::remove)) whenever the underlying connectivity
/// changes.
///
/// # Examples
///
/// ```
/// use linkwalk::*;
///
/// let l0 = LinkBuilder::<f64>::new().name("l0").into_node();
/// let l1 = LinkBuilder::new().name("l1").into_node();
/// let l2 = LinkBuilder::new().name("l2").into_node();
/// connect![l0 => l1 => l2];
///
/// let traversal = Traversal::from_reference(&l1, true, true);
/// let names = traversal
///     .iter()
///     .map(|l| l.link().name.clone())
///     .collect::<Vec<_>>();
/// assert_eq!(names, ["l1", "l0", "l2"]);
/// assert_eq!(traversal.num_upward_connections(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Traversal<T: RealField> {
    pub(crate) links: Vec<LinkNode<T>>,
    num_upward_connections: usize,
}

impl<T: RealField> Default for Traversal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Traversal<T>
where
    T: RealField,
{
    /// Create an empty traversal
    pub fn new() -> Self {
        Traversal {
            links: Vec::new(),
            num_upward_connections: 0,
        }
    }

    /// Create a traversal anchored at `reference`
    ///
    /// Equivalent to [`find`](Traversal::find) on an empty traversal.
    pub fn from_reference(reference: &LinkNode<T>, do_upward: bool, do_downward: bool) -> Self {
        let mut traversal = Self::new();
        traversal.find(reference, do_upward, do_downward);
        traversal
    }

    /// Rebuild the sequence by a depth-first walk anchored at `reference`
    ///
    /// Any previous contents are cleared first. If `do_upward` is set, the
    /// chain of parents of `reference` is visited first, in root-ward
    /// order, stopping at the root or at a parent belonging to a different
    /// mechanism. If `do_downward` is set, every link reachable through
    /// child edges (from the reference link and from every visited
    /// ancestor) is visited afterwards, parent before child.
    pub fn find(&mut self, reference: &LinkNode<T>, do_upward: bool, do_downward: bool) {
        self.num_upward_connections = 0;
        self.links.clear();
        self.visit(reference, do_upward, do_downward, false, None);
    }

    fn visit(
        &mut self,
        link: &LinkNode<T>,
        do_upward: bool,
        do_downward: bool,
        is_upward: bool,
        prev: Option<&LinkNode<T>>,
    ) {
        self.links.push(link.clone());
        if is_upward {
            self.num_upward_connections += 1;
        }

        if do_upward {
            if let Some(parent) = link.parent() {
                if parent.mechanism_id() == link.mechanism_id() {
                    self.visit(&parent, do_upward, true, true, Some(link));
                }
            }
        }
        if do_downward {
            let children = link.children().to_vec();
            for child in &children {
                if prev.map_or(true, |p| p != child) {
                    self.visit(child, false, true, false, None);
                }
            }
        }
    }

    /// Add `link` to the end of the sequence
    ///
    /// `is_downward` states how the new entry is connected relative to the
    /// existing traversal order; an upward connection increments the
    /// upward-connection count.
    pub fn append(&mut self, link: LinkNode<T>, is_downward: bool) {
        self.links.push(link);
        if !is_downward {
            self.num_upward_connections += 1;
        }
    }

    /// Remove `link` from the sequence
    ///
    /// Returns `false` and leaves the traversal untouched if `link` is not
    /// contained. When the removed entry lies within the upward region
    /// (index not greater than the upward-connection count) the count is
    /// decremented.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwalk::*;
    ///
    /// let l0 = LinkBuilder::<f64>::new().into_node();
    /// let l1 = LinkBuilder::new().into_node();
    /// let other = LinkBuilder::<f64>::new().into_node();
    /// connect![l0 => l1];
    ///
    /// let mut traversal = Traversal::from_reference(&l0, true, true);
    /// assert_eq!(traversal.len(), 2);
    /// assert!(!traversal.remove(&other));
    /// assert_eq!(traversal.len(), 2);
    /// assert!(traversal.remove(&l1));
    /// assert_eq!(traversal.len(), 1);
    /// ```
    pub fn remove(&mut self, link: &LinkNode<T>) -> bool {
        match self.links.iter().position(|l| l == link) {
            Some(index) => {
                if index <= self.num_upward_connections {
                    self.num_upward_connections = self.num_upward_connections.saturating_sub(1);
                }
                self.links.remove(index);
                true
            }
            None => false,
        }
    }

    /// Extend the traversal by one link at the front, toward `target`
    ///
    /// Finds the link directly connected to the current front entry that
    /// lies on the tree path toward `target`, inserts it at index 0 and
    /// returns it. The upward-connection count is incremented when the new
    /// front connects to the old front through an upward edge (the old
    /// front is the parent of the inserted link). Returns `None` if the
    /// traversal is empty or no such link exists.
    pub fn prepend_root_adjacent_link_toward(
        &mut self,
        target: &LinkNode<T>,
    ) -> Option<LinkNode<T>> {
        if self.links.is_empty() {
            return None;
        }
        let mut is_upward = true;
        let front = self.links[0].clone();
        let link_to_prepend = find_root_adjacent_link(target, None, &front, &mut is_upward)?;
        self.links.insert(0, link_to_prepend.clone());
        if is_upward {
            self.num_upward_connections += 1;
        }
        Some(link_to_prepend)
    }

    /// Number of upward connections at the beginning of the sequence
    #[inline]
    pub fn num_upward_connections(&self) -> usize {
        self.num_upward_connections
    }

    /// Whether the entry at `index` is reached through a downward step
    #[inline]
    pub fn is_downward(&self, index: usize) -> bool {
        index > self.num_upward_connections
    }

    /// The link the traversal is anchored at (index 0)
    #[inline]
    pub fn reference_link(&self) -> Option<&LinkNode<T>> {
        self.links.first()
    }

    #[inline]
    pub fn link(&self, index: usize) -> Option<&LinkNode<T>> {
        self.links.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.num_upward_connections = 0;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkNode<T>> {
        self.links.iter()
    }
}

impl<T: RealField> Index<usize> for Traversal<T> {
    type Output = LinkNode<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.links[index]
    }
}

impl<'a, T: RealField> IntoIterator for &'a Traversal<T> {
    type Item = &'a LinkNode<T>;
    type IntoIter = std::slice::Iter<'a, LinkNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Search the path from `link` toward `root` and return the link adjacent
/// to `root` on that path.
///
/// The parent direction is exhausted before the child subtrees, excluding
/// the node the recursion arrived from. On return, `is_upward` tells
/// whether `root` was reached from the found link through a parent step
/// (i.e. whether the found link hangs below `root`).
fn find_root_adjacent_link<T: RealField>(
    link: &LinkNode<T>,
    prev: Option<&LinkNode<T>>,
    root: &LinkNode<T>,
    is_upward: &mut bool,
) -> Option<LinkNode<T>> {
    if link == root {
        return prev.cloned();
    }
    if *is_upward {
        if let Some(parent) = link.parent() {
            if prev.map_or(true, |p| *p != parent) {
                if let Some(found) = find_root_adjacent_link(&parent, Some(link), root, is_upward) {
                    return Some(found);
                }
            }
        }
    }
    *is_upward = false;
    let children = link.children().to_vec();
    for child in &children {
        if prev.map_or(true, |p| p != child) {
            if let Some(found) = find_root_adjacent_link(child, Some(link), root, is_upward) {
                return Some(found);
            }
        }
    }
    None
}
