//! The AVL tree holding the missions, keyed by difficulty level.

use std::cmp::{self, Ordering};
use std::fmt;

use termtree::Tree;
use tracing::{debug, trace};

use crate::mission::Mission;

/// An ordered collection of missions implemented with an AVL tree.
///
/// Each difficulty level holds at most one mission description.
///
/// ```
/// use mission_tree::MissionTree;
/// let mut tree = MissionTree::new();
/// tree.insert(10, "Clear the cellar");
/// tree.insert(20, "Guard the bridge");
/// tree.insert(30, "Find the lost ring");
/// assert_eq!(tree.get(20), Some("Guard the bridge"));
/// assert_eq!(tree.search(30).unwrap().to_string(), "[Level 30] Find the lost ring");
/// assert!(tree.remove(20));
/// assert!(tree.get(20).is_none());
/// ```
#[derive(Clone, Default)]
pub struct MissionTree {
    root: Link,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node {
    level: i32,
    description: String,
    left: Link,
    right: Link,
    height: usize,
}

type Link = Option<Box<Node>>;

/// An iterator over the missions of a tree, in ascending level order.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl MissionTree {
    /// Creates an empty tree.
    /// No memory is allocated until the first mission is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no missions.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of missions in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree. A single mission has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns the description stored at the given level.
    pub fn get(&self, level: i32) -> Option<&str> {
        self.find(level).map(|node| node.description.as_str())
    }

    /// Returns the mission stored at the given level.
    pub fn search(&self, level: i32) -> Option<Mission<'_>> {
        self.find(level).map(Node::as_mission)
    }

    /// Returns true if a mission is stored at the given level.
    pub fn contains(&self, level: i32) -> bool {
        self.find(level).is_some()
    }

    /// Returns the mission with the lowest level.
    pub fn first(&self) -> Option<Mission<'_>> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(current.as_mission())
    }

    /// Returns the mission with the highest level.
    pub fn last(&self) -> Option<Mission<'_>> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(current.as_mission())
    }

    /// Inserts a mission into the tree.
    /// An existing mission at the same level gets its description replaced.
    /// Returns whether the level was not present before.
    pub fn insert(&mut self, level: i32, description: impl Into<String>) -> bool {
        let (root, inserted) = Node::insert(self.root.take(), level, description.into());
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
            debug!(level, len = self.num_nodes, "inserted mission");
        } else {
            debug!(level, "replaced mission description");
        }
        inserted
    }

    /// Removes the mission at the given level.
    /// Returns whether a mission was removed.
    pub fn remove(&mut self, level: i32) -> bool {
        let (root, removed) = Node::remove(self.root.take(), level);
        self.root = root;
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
            debug!(level, len = self.num_nodes, "removed mission");
        }
        removed
    }

    /// Gets an iterator over the missions, sorted by level.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Returns all missions rendered as `[Level L] description`, sorted by level.
    pub fn list_in_order(&self) -> Vec<String> {
        self.iter().map(|mission| mission.to_string()).collect()
    }

    /// Renders the tree shape, one node per line, with height and balance factor.
    pub fn dump_structure(&self) -> String {
        match self.root.as_deref() {
            None => String::from("Empty tree"),
            Some(root) => root.display_tree().to_string(),
        }
    }

    /// Asserts the AVL tree invariants: search order, balance, heights and node count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check(link: &Link, lower: Option<i32>, upper: Option<i32>) -> (usize, usize) {
            let Some(node) = link else {
                return (0, 0);
            };

            // Check search order against all ancestors
            if let Some(lower) = lower {
                assert!(node.level > lower);
            }
            if let Some(upper) = upper {
                assert!(node.level < upper);
            }

            let (left_height, left_nodes) = check(&node.left, lower, Some(node.level));
            let (right_height, right_nodes) = check(&node.right, Some(node.level), upper);

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            (node.height, left_nodes + right_nodes + 1)
        }

        let (_, num_nodes) = check(&self.root, None, None);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.iter().count(), self.num_nodes);
    }

    fn find(&self, level: i32) -> Option<&Node> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match level.cmp(&node.level) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        current
    }
}

impl Node {
    fn create(level: i32, description: String) -> Box<Node> {
        Box::new(Node {
            level,
            description,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn as_mission(&self) -> Mission<'_> {
        Mission::new(self.level, &self.description)
    }

    /// Inserts below the given link and returns the new subtree root.
    /// The flag tells whether a node was created.
    fn insert(link: Link, level: i32, description: String) -> (Box<Node>, bool) {
        let Some(mut node) = link else {
            return (Node::create(level, description), true);
        };

        let inserted = match level.cmp(&node.level) {
            Ordering::Less => {
                let (left, inserted) = Node::insert(node.left.take(), level, description);
                node.left = Some(left);
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = Node::insert(node.right.take(), level, description);
                node.right = Some(right);
                inserted
            }
            Ordering::Equal => {
                node.description = description;
                false
            }
        };
        (Node::rebalance(node), inserted)
    }

    /// Removes the level below the given link and returns the new subtree root.
    /// The flag tells whether a node was removed.
    fn remove(link: Link, level: i32) -> (Link, bool) {
        let Some(mut node) = link else {
            return (None, false);
        };

        let removed = match level.cmp(&node.level) {
            Ordering::Less => {
                let (left, removed) = Node::remove(node.left.take(), level);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Node::remove(node.right.take(), level);
                node.right = right;
                removed
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Node is stem or leaf, splice in its only child
                (None, right) => return (right, true),
                (left, None) => return (left, true),
                (Some(left), Some(right)) => {
                    // Promote the smallest node of the right subtree
                    let (right, successor) = Node::remove_min(right);
                    let Node {
                        level, description, ..
                    } = *successor;
                    node.level = level;
                    node.description = description;
                    node.left = Some(left);
                    node.right = right;
                    true
                }
            },
        };
        (Some(Node::rebalance(node)), removed)
    }

    /// Unlinks the smallest node of the subtree.
    /// Returns the new subtree root and the unlinked node.
    fn remove_min(mut node: Box<Node>) -> (Link, Box<Node>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min) = Node::remove_min(left);
                node.left = left;
                (Some(Node::rebalance(node)), min)
            }
        }
    }

    /// Adjusts the height and restores the AVL condition at this node if necessary.
    /// Returns the root of the rebalanced subtree.
    fn rebalance(mut node: Box<Node>) -> Box<Node> {
        node.adjust_height();
        let balance = node.balance_factor();
        if balance > 1 {
            // Left heavy, rotate right
            if balance_factor(&node.left) < 0 {
                node.left = node.left.take().map(Node::rotate_left);
            }
            Node::rotate_right(node)
        } else if balance < -1 {
            // Right heavy, rotate left
            if balance_factor(&node.right) > 0 {
                node.right = node.right.take().map(Node::rotate_right);
            }
            Node::rotate_left(node)
        } else {
            node
        }
    }

    fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        let Some(mut right) = node.right.take() else {
            return node;
        };
        trace!(level = node.level, pivot = right.level, "rotate left");
        node.right = right.left.take();
        node.adjust_height();
        right.left = Some(node);
        right.adjust_height();
        right
    }

    fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        let Some(mut left) = node.left.take() else {
            return node;
        };
        trace!(level = node.level, pivot = left.level, "rotate right");
        node.left = left.right.take();
        node.adjust_height();
        left.right = Some(node);
        left.adjust_height();
        left
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn display_tree(&self) -> Tree<String> {
        let label = format!(
            "Lv{} (h={}, bf={}): {}",
            self.level,
            self.height,
            self.balance_factor(),
            self.description
        );
        let children = self.left.iter().chain(self.right.iter());
        Tree::new(label).with_leaves(children.map(|child| child.display_tree()))
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor(link: &Link) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_edge(root);
        iter
    }

    fn push_left_edge(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Mission<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_edge(&node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.as_mission())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a MissionTree {
    type Item = Mission<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> Extend<(i32, S)> for MissionTree {
    fn extend<I: IntoIterator<Item = (i32, S)>>(&mut self, iter: I) {
        for (level, description) in iter {
            self.insert(level, description);
        }
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for MissionTree {
    fn from_iter<I: IntoIterator<Item = (i32, S)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl fmt::Debug for MissionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|mission| (mission.level, mission.description)))
            .finish()
    }
}
