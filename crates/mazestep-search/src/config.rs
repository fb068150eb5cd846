//! Engine configuration.

use std::fmt;

use mazestep_core::Connectivity;

/// Which end of the container [`FirstSearch`](crate::FirstSearch) pops from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Queue: breadth-first.
    Fifo,
    /// Stack: depth-first.
    Lifo,
}

/// Whether expanded cells are deduplicated globally.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// No visited set; a cell may be expanded again via another path.
    Tree,
    /// Every cell is expanded at most once.
    #[default]
    Graph,
}

/// The descriptor that turns [`FirstSearch`](crate::FirstSearch) into BFS,
/// DFS, tree or graph search, optionally depth-limited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub order: Order,
    pub mode: Mode,
    /// Deepest node that may be pushed; `None` is unbounded.
    pub max_depth: Option<u32>,
    /// Skip neighbors already on the popped node's path back to the start.
    pub check_path_to_start: bool,
}

impl Variant {
    pub const fn breadth_first(mode: Mode) -> Self {
        Self {
            order: Order::Fifo,
            mode,
            max_depth: None,
            check_path_to_start: false,
        }
    }

    pub const fn depth_first(mode: Mode) -> Self {
        Self {
            order: Order::Lifo,
            mode,
            max_depth: None,
            check_path_to_start: false,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_path_check(mut self, check: bool) -> Self {
        self.check_path_to_start = check;
        self
    }

    /// Whether a node at `depth` may be pushed.
    #[inline]
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

/// The engine family a [`StepDriver`](crate::StepDriver) builds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    BreadthFirst,
    DepthFirst,
    Bidirectional,
    UniformCost,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::Bidirectional,
        Self::UniformCost,
    ];

    /// Uniform cost starts on 8-connectivity so diagonal steps matter;
    /// everything else starts on 4.
    pub const fn default_connectivity(self) -> Connectivity {
        match self {
            Self::UniformCost => Connectivity::Eight,
            _ => Connectivity::Four,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth-first",
            Self::DepthFirst => "depth-first",
            Self::Bidirectional => "bidirectional",
            Self::UniformCost => "uniform-cost",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to (re)build an engine on a grid.
///
/// `mode`, `max_depth` and `check_path_to_start` only affect
/// [`Algorithm::BreadthFirst`] and [`Algorithm::DepthFirst`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub connectivity: Connectivity,
    pub max_depth: Option<u32>,
    pub check_path_to_start: bool,
}

impl SearchConfig {
    /// Defaults for `algorithm`, including its preferred connectivity.
    pub const fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            mode: Mode::Graph,
            connectivity: algorithm.default_connectivity(),
            max_depth: None,
            check_path_to_start: false,
        }
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_path_check(mut self, check: bool) -> Self {
        self.check_path_to_start = check;
        self
    }

    /// The [`Variant`] for BFS/DFS, `None` for the other algorithms.
    pub const fn variant(&self) -> Option<Variant> {
        let base = match self.algorithm {
            Algorithm::BreadthFirst => Variant::breadth_first(self.mode),
            Algorithm::DepthFirst => Variant::depth_first(self.mode),
            Algorithm::Bidirectional | Algorithm::UniformCost => return None,
        };
        Some(
            base.with_max_depth(self.max_depth)
                .with_path_check(self.check_path_to_start),
        )
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_limit() {
        let v = Variant::depth_first(Mode::Tree).with_max_depth(Some(2));
        assert!(v.allows_depth(2));
        assert!(!v.allows_depth(3));
        assert!(Variant::breadth_first(Mode::Graph).allows_depth(u32::MAX));
    }

    #[test]
    fn config_variant() {
        let cfg = SearchConfig::new(Algorithm::DepthFirst)
            .with_mode(Mode::Tree)
            .with_max_depth(Some(5))
            .with_path_check(true);
        let v = cfg.variant().unwrap();
        assert_eq!(v.order, Order::Lifo);
        assert_eq!(v.mode, Mode::Tree);
        assert_eq!(v.max_depth, Some(5));
        assert!(v.check_path_to_start);
        assert_eq!(SearchConfig::new(Algorithm::UniformCost).variant(), None);
    }

    #[test]
    fn default_connectivity() {
        assert_eq!(
            SearchConfig::new(Algorithm::UniformCost).connectivity,
            Connectivity::Eight
        );
        assert_eq!(SearchConfig::default().connectivity, Connectivity::Four);
        assert_eq!(SearchConfig::default().algorithm, Algorithm::BreadthFirst);
    }
}
