//! In-memory storage and query engine for values declared valid over
//! axis-aligned intervals in a one-, two-, or three-dimensional discrete
//! coordinate space.
//!
//! The core pieces: a per-axis interval algebra over sentinel-extended
//! [`DomainPoint`]s, its composition into 2-D and 3-D boxes, a
//! [`DimensionalStore`] that keeps stored intervals pairwise disjoint
//! through partial overwrite and removal, a compression engine restoring
//! the minimal canonical representation, a box-keyed spatial index, and a
//! diff engine for synchronizing snapshots.

mod config;
mod diff;
mod dimensional;
mod discrete;
mod domain_point;
mod error;
mod interval;
mod interval2d;
mod interval3d;
mod spatial;
mod store;
mod valid_data;

pub use config::{IndexStrategy, StoreConfig};
pub use diff::{diff_actions, DiffAction};
pub use dimensional::{compress_boxes, DimensionalInterval};
pub use discrete::DiscreteValue;
pub use domain_point::DomainPoint;
pub use error::DimDataError;
pub use interval::{
    complement_within, compress_intervals, unique_intervals, Interval, Remainder, RemainderKind,
};
pub use interval2d::{Axis2, ExclusionCase2, Interval2d};
pub use interval3d::{Axis3, ExclusionCase3, Interval3d};
pub use spatial::{BoxTree, HashBox, SpatialIndex};
pub use store::DimensionalStore;
pub use valid_data::ValidData;

/// Store over a single axis.
pub type Store1d<V, T> = DimensionalStore<V, Interval<T>>;

/// Store over a horizontal and a vertical axis.
pub type Store2d<V, X, Y> = DimensionalStore<V, Interval2d<X, Y>>;

/// Store over horizontal, vertical, and depth axes.
pub type Store3d<V, X, Y, Z> = DimensionalStore<V, Interval3d<X, Y, Z>>;
