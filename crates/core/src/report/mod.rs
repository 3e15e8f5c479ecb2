//! Per-allocation aliasing reports.
//!
//! A report pairs each allocation's metadata with the aliased regions found
//! among its bindings. Allocations are analyzed independently and in
//! parallel; the report is still ordered by allocation handle.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{compute_aliasing_with, AliasError, AliasOptions, AliasRegion, AliasResult};
use crate::config::AnalysisConfig;
use crate::model::{
    flag_names, sort_bindings, Allocation, FlagConstant, MemoryBinding, MemoryBreakdown, MemoryMapping,
};

/// Report for a whole breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    pub allocations: Vec<AllocationReport>,
}

impl MemoryReport {
    /// Number of aliased regions across all allocations.
    pub fn total_aliases(&self) -> usize {
        self.allocations.iter().map(|a| a.aliases.len()).sum()
    }
}

/// Report for a single allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub handle: u64,
    pub name: String,
    pub device: u64,
    pub memory_type: u32,
    pub size: u64,
    /// Names of the set allocation flags.
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MemoryMapping>,
    pub binding_count: usize,
    /// Bindings ordered by offset, size, handle. Empty when the config
    /// disables the binding listing.
    pub bindings: Vec<MemoryBinding>,
    pub aliases: Vec<AliasRegion>,
}

/// Analyze one allocation.
pub fn analyze_allocation(
    allocation: &Allocation,
    flag_constants: &[FlagConstant],
    options: &AliasOptions,
) -> AliasResult<AllocationReport> {
    let aliases = compute_aliasing_with(&allocation.analysis_bindings(), options).map_err(
        |source| AliasError::Allocation { handle: allocation.handle, source: Box::new(source) },
    )?;

    let mut bindings = allocation.bindings.clone();
    sort_bindings(&mut bindings);

    Ok(AllocationReport {
        handle: allocation.handle,
        name: allocation.name.clone(),
        device: allocation.device,
        memory_type: allocation.memory_type,
        size: allocation.size,
        flags: flag_names(allocation.flags, flag_constants),
        mapping: allocation.active_mapping().copied(),
        binding_count: bindings.len(),
        bindings,
        aliases,
    })
}

/// Build a report for every allocation that passes the config's filter.
///
/// If several allocations fail, the error for the lowest handle is returned.
pub fn build_report(
    breakdown: &MemoryBreakdown,
    config: &AnalysisConfig,
) -> AliasResult<MemoryReport> {
    let mut selected: Vec<&Allocation> =
        breakdown.allocations.iter().filter(|a| config.includes_allocation(a.handle)).collect();
    selected.sort_by_key(|a| a.handle);

    let options = config.alias_options();
    let results: Vec<AliasResult<AllocationReport>> = selected
        .par_iter()
        .map(|allocation| analyze_allocation(allocation, &breakdown.allocation_flags, &options))
        .collect();

    let mut allocations = results.into_iter().collect::<AliasResult<Vec<_>>>()?;
    if !config.show_bindings {
        for allocation in &mut allocations {
            allocation.bindings.clear();
        }
    }

    let report = MemoryReport { api: breakdown.api.clone(), allocations };
    info!(
        allocations = report.allocations.len(),
        aliases = report.total_aliases(),
        "built memory report"
    );
    Ok(report)
}
