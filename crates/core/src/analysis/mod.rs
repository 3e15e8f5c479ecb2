//! Aliasing detection over the bindings of a single allocation.
//!
//! The computation runs in three stages:
//! - Boundary extraction: every distinct start/end coordinate, ascending.
//! - Sweep: walk consecutive coordinate pairs while tracking the bindings
//!   that cover the current position.
//! - Assembly: give every emitted region a stable sharer order.
//!
//! Bindings occupy half-open ranges `[offset, offset + size)`, so bindings that
//! only touch at a boundary are never reported as aliased. The computation is
//! pure: nothing is retained between calls, and calls for different
//! allocations can run concurrently.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for aliasing computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    /// `offset + size` does not fit in 64 bits.
    #[error("Binding {id} overflows the 64-bit address space (offset {offset}, size {size})")]
    InvalidBinding { id: u64, offset: u64, size: u64 },

    /// The same identifier was used by more than one binding of an allocation.
    #[error("Binding id {id} appears more than once in the same allocation")]
    DuplicateBinding { id: u64 },

    /// A binding-level error, tagged with the allocation it came from.
    #[error("Failed to analyze allocation {handle}")]
    Allocation {
        handle: u64,
        #[source]
        source: Box<AliasError>,
    },
}

/// Convenience result type for aliasing computations.
pub type AliasResult<T> = Result<T, AliasError>;

/// A byte range inside one allocation, occupied by a single resource.
///
/// `id` must be unique within the set passed to one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub id: u64,
    pub offset: u64,
    pub size: u64,
}

impl Binding {
    pub fn new(id: u64, offset: u64, size: u64) -> Self {
        Self { id, offset, size }
    }

    /// Exclusive end of the binding, or `None` if it overflows.
    pub fn checked_end(&self) -> Option<u64> {
        self.offset.checked_add(self.size)
    }

    fn end(&self) -> AliasResult<u64> {
        self.checked_end().ok_or(AliasError::InvalidBinding {
            id: self.id,
            offset: self.offset,
            size: self.size,
        })
    }
}

/// A maximal range where two or more bindings overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRegion {
    pub offset: u64,
    pub size: u64,
    /// Identifiers of every binding covering the range, ascending.
    pub sharers: Vec<u64>,
}

impl AliasRegion {
    /// Exclusive end of the region, clamped to `u64::MAX` for regions that
    /// did not come out of the sweep.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

/// What to do when two bindings of one allocation share an identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`AliasError::DuplicateBinding`].
    #[default]
    Reject,
    /// Treat equal identifiers as one logical binding. This under-reports
    /// aliasing between the colliding bindings.
    Merge,
}

/// Knobs for [`compute_aliasing_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AliasOptions {
    pub duplicate_ids: DuplicatePolicy,
}

/// Compute the aliased regions of `bindings` using the default options.
pub fn compute_aliasing(bindings: &[Binding]) -> AliasResult<Vec<AliasRegion>> {
    compute_aliasing_with(bindings, &AliasOptions::default())
}

/// Compute the aliased regions of `bindings`.
///
/// Regions are disjoint, ascending by offset, and each has at least two
/// sharers. The result does not depend on the order of `bindings`.
pub fn compute_aliasing_with(
    bindings: &[Binding],
    options: &AliasOptions,
) -> AliasResult<Vec<AliasRegion>> {
    validate(bindings, options)?;

    let points = boundary_points(bindings)?;
    let regions = sweep(bindings, &points)?;
    let regions = assemble(regions);

    debug!(
        bindings = bindings.len(),
        points = points.len(),
        regions = regions.len(),
        "computed aliasing"
    );
    Ok(regions)
}

/// Sorted, duplicate-free list of every `offset` and `end` in `bindings`.
///
/// Zero-size bindings contribute a single coordinate.
pub fn boundary_points(bindings: &[Binding]) -> AliasResult<Vec<u64>> {
    let mut points = Vec::with_capacity(bindings.len() * 2);
    for binding in bindings {
        points.push(binding.offset);
        points.push(binding.end()?);
    }
    points.sort_unstable();
    points.dedup();
    Ok(points)
}

/// Check input preconditions. Errors report the smallest offending id so the
/// outcome does not depend on input order.
fn validate(bindings: &[Binding], options: &AliasOptions) -> AliasResult<()> {
    if let Some(bad) =
        bindings.iter().filter(|b| b.checked_end().is_none()).min_by_key(|b| b.id)
    {
        return Err(AliasError::InvalidBinding { id: bad.id, offset: bad.offset, size: bad.size });
    }

    if options.duplicate_ids == DuplicatePolicy::Reject {
        let mut ids: Vec<u64> = bindings.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(AliasError::DuplicateBinding { id: pair[0] });
        }
    }

    Ok(())
}

/// Bindings keyed by the coordinate where they start and where they end.
#[derive(Debug, Default)]
struct BoundaryIndex {
    starts_at: HashMap<u64, Vec<u64>>,
    ends_at: HashMap<u64, Vec<u64>>,
}

impl BoundaryIndex {
    /// Zero-size bindings are left out; they cover no range.
    fn build(bindings: &[Binding]) -> AliasResult<Self> {
        let mut index = Self::default();
        for binding in bindings.iter().filter(|b| b.size > 0) {
            let end = binding.end()?;
            index.starts_at.entry(binding.offset).or_default().push(binding.id);
            index.ends_at.entry(end).or_default().push(binding.id);
        }
        Ok(index)
    }
}

fn sweep(bindings: &[Binding], points: &[u64]) -> AliasResult<Vec<AliasRegion>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let index = BoundaryIndex::build(bindings)?;
    let mut active: HashSet<u64> = HashSet::new();
    let mut regions = Vec::new();

    for pair in points.windows(2) {
        let (point, next) = (pair[0], pair[1]);

        // Removals first: a binding ending here must not meet one starting here.
        if let Some(ending) = index.ends_at.get(&point) {
            for id in ending {
                active.remove(id);
            }
        }
        if let Some(starting) = index.starts_at.get(&point) {
            active.extend(starting.iter().copied());
        }

        if active.len() > 1 {
            trace!(offset = point, size = next - point, sharers = active.len(), "aliased region");
            regions.push(AliasRegion {
                offset: point,
                size: next - point,
                sharers: active.iter().copied().collect(),
            });
        }
    }

    Ok(regions)
}

/// Sort the sharers of each region. Regions already arrive in offset order.
fn assemble(mut regions: Vec<AliasRegion>) -> Vec<AliasRegion> {
    for region in &mut regions {
        region.sharers.sort_unstable();
    }
    debug_assert!(regions.windows(2).all(|w| w[0].end() <= w[1].offset));
    regions
}
