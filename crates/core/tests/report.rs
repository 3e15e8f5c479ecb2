use memalias_core::analysis::{AliasError, AliasRegion, DuplicatePolicy};
use memalias_core::config::AnalysisConfig;
use memalias_core::model::{
    Allocation, BindingKind, FlagConstant, MemoryBinding, MemoryBreakdown, MemoryMapping,
};
use memalias_core::report::{analyze_allocation, build_report};

fn binding(handle: u64, offset: u64, size: u64) -> MemoryBinding {
    MemoryBinding { handle, name: format!("res{handle}"), offset, size, kind: BindingKind::Buffer }
}

fn allocation(handle: u64, bindings: Vec<MemoryBinding>) -> Allocation {
    Allocation {
        handle,
        name: format!("alloc{handle}"),
        device: 1,
        memory_type: 2,
        size: 1024,
        flags: 0x3,
        mapping: None,
        bindings,
    }
}

fn breakdown() -> MemoryBreakdown {
    MemoryBreakdown {
        api: Some("vulkan".into()),
        allocation_flags: vec![
            FlagConstant { name: "DEVICE_LOCAL".into(), value: 1 },
            FlagConstant { name: "HOST_VISIBLE".into(), value: 2 },
        ],
        allocations: vec![
            allocation(20, vec![binding(3, 0, 10), binding(4, 5, 10)]),
            allocation(10, vec![binding(1, 0, 5), binding(2, 5, 5)]),
        ],
    }
}

#[test]
fn report_orders_allocations_by_handle() {
    let report = build_report(&breakdown(), &AnalysisConfig::default()).unwrap();
    let handles: Vec<u64> = report.allocations.iter().map(|a| a.handle).collect();
    assert_eq!(handles, vec![10, 20]);
    assert_eq!(report.api.as_deref(), Some("vulkan"));
}

#[test]
fn report_contains_aliases_and_flags() {
    let report = build_report(&breakdown(), &AnalysisConfig::default()).unwrap();
    assert!(report.allocations[0].aliases.is_empty());
    assert_eq!(
        report.allocations[1].aliases,
        vec![AliasRegion { offset: 5, size: 5, sharers: vec![3, 4] }]
    );
    assert_eq!(report.allocations[1].flags, vec!["DEVICE_LOCAL", "HOST_VISIBLE"]);
    assert_eq!(report.total_aliases(), 1);
}

#[test]
fn report_honours_allocation_filter() {
    let config = AnalysisConfig { allocations: vec![20], ..AnalysisConfig::default() };
    let report = build_report(&breakdown(), &config).unwrap();
    assert_eq!(report.allocations.len(), 1);
    assert_eq!(report.allocations[0].handle, 20);
}

#[test]
fn hidden_bindings_keep_their_count() {
    let config = AnalysisConfig { show_bindings: false, ..AnalysisConfig::default() };
    let report = build_report(&breakdown(), &config).unwrap();
    assert!(report.allocations.iter().all(|a| a.bindings.is_empty()));
    assert!(report.allocations.iter().all(|a| a.binding_count == 2));
}

#[test]
fn bindings_are_listed_in_display_order() {
    let alloc = allocation(1, vec![binding(9, 8, 8), binding(7, 0, 8), binding(8, 0, 4)]);
    let report = analyze_allocation(&alloc, &[], &Default::default()).unwrap();
    let order: Vec<u64> = report.bindings.iter().map(|b| b.handle).collect();
    assert_eq!(order, vec![8, 7, 9]);
}

#[test]
fn zero_sized_mapping_is_dropped() {
    let mut alloc = allocation(1, vec![]);
    alloc.mapping = Some(MemoryMapping { mapped_address: 0x10, offset: 0, size: 0 });
    let report = analyze_allocation(&alloc, &[], &Default::default()).unwrap();
    assert!(report.mapping.is_none());
}

#[test]
fn errors_name_the_lowest_failing_allocation() {
    let mut input = breakdown();
    input.allocations.push(allocation(30, vec![binding(1, 0, 4), binding(1, 8, 4)]));
    input.allocations.push(allocation(15, vec![binding(6, u64::MAX, 1)]));

    let err = build_report(&input, &AnalysisConfig::default()).unwrap_err();
    match err {
        AliasError::Allocation { handle, source } => {
            assert_eq!(handle, 15);
            assert_eq!(*source, AliasError::InvalidBinding { id: 6, offset: u64::MAX, size: 1 });
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn merge_policy_flows_from_config() {
    let mut input = breakdown();
    input.allocations = vec![allocation(1, vec![binding(1, 0, 4), binding(1, 8, 4)])];
    assert!(build_report(&input, &AnalysisConfig::default()).is_err());

    let config = AnalysisConfig { duplicate_ids: DuplicatePolicy::Merge, ..AnalysisConfig::default() };
    let report = build_report(&input, &config).unwrap();
    assert!(report.allocations[0].aliases.is_empty());
}
