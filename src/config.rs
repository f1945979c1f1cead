/// Which structure backs overlap queries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexStrategy {
    /// Box-keyed tree with sub-linear range queries.
    BoxTree,
    /// Reverse-sorted linear scan. Slower, but simple enough to act as the
    /// reference implementation the tree is checked against in tests.
    LinearScan,
}

/// Per-store configuration. Passed explicitly to every constructor; there
/// is no global state controlling store behavior.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StoreConfig {
    /// When true, constructors verify that the entries handed to them are
    /// pairwise disjoint and report `OverlappingIntervals` on a violation.
    /// When false, disjointness is assumed.
    pub validate_disjoint: bool,
    pub index_strategy: IndexStrategy,
}

impl Default for StoreConfig {
    fn default() -> StoreConfig {
        StoreConfig {
            validate_disjoint: true,
            index_strategy: IndexStrategy::BoxTree,
        }
    }
}

impl StoreConfig {
    pub fn assuming_disjoint() -> StoreConfig {
        StoreConfig {
            validate_disjoint: false,
            ..StoreConfig::default()
        }
    }

    pub fn with_linear_scan(self) -> StoreConfig {
        StoreConfig {
            index_strategy: IndexStrategy::LinearScan,
            ..self
        }
    }
}
