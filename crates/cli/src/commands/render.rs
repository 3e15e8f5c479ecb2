//! Plain-text rendering of memory reports.

use memalias_core::analysis::AliasRegion;
use memalias_core::model::{aspect_list, BindingKind, MemoryBinding};
use memalias_core::report::{AllocationReport, MemoryReport};

const INDENT: &str = "    ";

/// Rendering switches, usually taken from the resolved config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub show_bindings: bool,
    pub hex_offsets: bool,
}

struct Lines {
    out: String,
    hex: bool,
}

impl Lines {
    fn push(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }
}

fn num(hex: bool, value: u64) -> String {
    if hex {
        format!("{:#x}", value)
    } else {
        value.to_string()
    }
}

/// Render a full report: allocation metadata, bindings, and aliased regions.
pub fn render_report(report: &MemoryReport, options: &RenderOptions) -> String {
    let mut lines = Lines { out: String::new(), hex: options.hex_offsets };
    lines.push(0, format!("{} memory allocations", report.allocations.len()));
    for allocation in &report.allocations {
        render_allocation(&mut lines, allocation, options);
    }
    lines.out
}

/// Render only the aliased regions of each allocation.
pub fn render_aliases(report: &MemoryReport, options: &RenderOptions) -> String {
    let mut lines = Lines { out: String::new(), hex: options.hex_offsets };
    for allocation in &report.allocations {
        lines.push(0, format!("Allocation {} ({})", allocation.handle, allocation.name));
        render_regions(&mut lines, &allocation.aliases);
    }
    lines.out
}

fn render_allocation(lines: &mut Lines, allocation: &AllocationReport, options: &RenderOptions) {
    let hex = lines.hex;
    lines.push(0, format!("Name: {}", allocation.name));
    lines.push(1, format!("Handle:      {}", allocation.handle));
    lines.push(1, format!("Device:      {}", allocation.device));
    lines.push(1, format!("Memory Type: {}", allocation.memory_type));
    lines.push(1, format!("Size:        {}", num(hex, allocation.size)));

    if !allocation.flags.is_empty() {
        lines.push(1, "Flags:");
        for flag in &allocation.flags {
            lines.push(2, flag);
        }
    }

    if let Some(mapping) = &allocation.mapping {
        lines.push(1, format!("Mapped into host memory at {:#x}", mapping.mapped_address));
        lines.push(2, format!("Offset: {}", num(hex, mapping.offset)));
        lines.push(2, format!("Size:   {}", num(hex, mapping.size)));
    }

    if options.show_bindings {
        lines.push(1, format!("{} bindings:", allocation.binding_count));
        for binding in &allocation.bindings {
            render_binding(lines, binding);
        }
    } else {
        lines.push(1, format!("{} bindings", allocation.binding_count));
    }

    render_regions(lines, &allocation.aliases);
}

fn render_binding(lines: &mut Lines, binding: &MemoryBinding) {
    let hex = lines.hex;
    lines.push(1, format!("{}: {}", binding.kind.label(), binding.name));
    lines.push(2, format!("Handle: {}", binding.handle));
    lines.push(2, format!("Offset: {}", num(hex, binding.offset)));
    lines.push(2, format!("Size:   {}", num(hex, binding.size)));

    match &binding.kind {
        BindingKind::Buffer | BindingKind::Image => {}
        BindingKind::SparseImageBlock {
            x_offset,
            y_offset,
            width,
            height,
            mip_level,
            array_layer,
            aspects,
        } => {
            lines.push(2, format!("Block Offset: ({}, {})", x_offset, y_offset));
            lines.push(2, format!("Block Extent: ({}, {})", width, height));
            lines.push(2, format!("Mip Level:    {}", mip_level));
            lines.push(2, format!("Array Layer:  {}", array_layer));
            lines.push(2, format!("Aspects:      {}", aspect_list(aspects)));
        }
        BindingKind::SparseImageMetadata { array_layer, offset } => {
            lines.push(2, format!("Array Layer:     {}", array_layer));
            lines.push(2, format!("Mip Tail Offset: {}", num(hex, *offset)));
        }
        BindingKind::SparseImageMipTail { array_layer, offset, aspects } => {
            lines.push(2, format!("Array Layer:     {}", array_layer));
            lines.push(2, format!("Mip Tail Offset: {}", num(hex, *offset)));
            lines.push(2, format!("Aspects:         {}", aspect_list(aspects)));
        }
        BindingKind::SparseOpaqueImageBlock { offset } => {
            lines.push(2, format!("Image Memory Offset: {}", num(hex, *offset)));
        }
        BindingKind::SparseBufferBlock { offset } => {
            lines.push(2, format!("Buffer Memory Offset: {}", num(hex, *offset)));
        }
    }
}

fn render_regions(lines: &mut Lines, regions: &[AliasRegion]) {
    let hex = lines.hex;
    if regions.is_empty() {
        lines.push(1, "No aliased regions");
        return;
    }

    lines.push(1, format!("{} aliased regions:", regions.len()));
    for (i, region) in regions.iter().enumerate() {
        lines.push(1, format!("{}:", i));
        lines.push(2, format!("Offset: {}", num(hex, region.offset)));
        lines.push(2, format!("Size:   {}", num(hex, region.size)));
        lines.push(2, "Shared by:");
        for sharer in &region.sharers {
            lines.push(3, sharer.to_string());
        }
    }
}
