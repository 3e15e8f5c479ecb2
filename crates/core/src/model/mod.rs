//! Data model for a captured memory breakdown.
//!
//! These types mirror what a capture analysis service reports about device
//! memory: allocations, their host mappings, and the resources bound into
//! them. Only [`MemoryBinding::to_binding`] feeds the aliasing computation;
//! everything else exists for reporting.

use serde::{Deserialize, Serialize};

use crate::analysis::Binding;

/// Snapshot of every allocation known at one point of a capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBreakdown {
    /// Graphics API the capture was recorded against (e.g., `vulkan`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    /// Named bits of the allocation flag word. Empty if the API's flags are
    /// not a bitfield.
    #[serde(default)]
    pub allocation_flags: Vec<FlagConstant>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

/// A named flag bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagConstant {
    pub name: String,
    pub value: u64,
}

/// Names of every constant whose bits are set in `flags`, in constant order.
pub fn flag_names(flags: u64, constants: &[FlagConstant]) -> Vec<String> {
    if flags == 0 {
        return Vec::new();
    }
    constants.iter().filter(|c| flags & c.value != 0).map(|c| c.name.clone()).collect()
}

/// One device memory allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub handle: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub device: u64,
    #[serde(default)]
    pub memory_type: u32,
    pub size: u64,
    #[serde(default)]
    pub flags: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MemoryMapping>,
    #[serde(default)]
    pub bindings: Vec<MemoryBinding>,
}

impl Allocation {
    /// The host mapping, if the allocation is actually mapped.
    pub fn active_mapping(&self) -> Option<&MemoryMapping> {
        self.mapping.as_ref().filter(|m| m.size != 0)
    }

    /// Project every binding onto the analysis representation.
    pub fn analysis_bindings(&self) -> Vec<Binding> {
        self.bindings.iter().map(MemoryBinding::to_binding).collect()
    }
}

/// Host mapping of (part of) an allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMapping {
    pub mapped_address: u64,
    pub offset: u64,
    pub size: u64,
}

/// A resource bound into an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBinding {
    pub handle: u64,
    #[serde(default)]
    pub name: String,
    pub offset: u64,
    pub size: u64,
    pub kind: BindingKind,
}

impl MemoryBinding {
    pub fn to_binding(&self) -> Binding {
        Binding::new(self.handle, self.offset, self.size)
    }
}

/// What kind of resource a binding is, with any per-kind detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BindingKind {
    Buffer,
    Image,
    SparseImageBlock {
        x_offset: u32,
        y_offset: u32,
        width: u32,
        height: u32,
        mip_level: u32,
        array_layer: u32,
        #[serde(default)]
        aspects: Vec<Aspect>,
    },
    SparseImageMetadata {
        array_layer: u32,
        offset: u64,
    },
    SparseImageMipTail {
        array_layer: u32,
        offset: u64,
        #[serde(default)]
        aspects: Vec<Aspect>,
    },
    SparseOpaqueImageBlock {
        offset: u64,
    },
    SparseBufferBlock {
        offset: u64,
    },
}

impl BindingKind {
    pub fn label(&self) -> &'static str {
        match self {
            BindingKind::Buffer => "Buffer",
            BindingKind::Image => "Image",
            BindingKind::SparseImageBlock { .. } => "Sparse Image Block",
            BindingKind::SparseImageMetadata { .. } => "Sparse Image Metadata",
            BindingKind::SparseImageMipTail { .. } => "Sparse Image Mip Tail",
            BindingKind::SparseOpaqueImageBlock { .. } => "Sparse Opaque Image Block",
            BindingKind::SparseBufferBlock { .. } => "Sparse Buffer Block",
        }
    }
}

/// Image aspect covered by a sparse binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Color,
    Depth,
    Stencil,
}

impl Aspect {
    pub fn label(&self) -> &'static str {
        match self {
            Aspect::Color => "Color",
            Aspect::Depth => "Depth",
            Aspect::Stencil => "Stencil",
        }
    }
}

/// Human-readable, comma-separated aspect list.
pub fn aspect_list(aspects: &[Aspect]) -> String {
    aspects.iter().map(Aspect::label).collect::<Vec<_>>().join(", ")
}

/// Sort bindings by offset, then size, then handle.
pub fn sort_bindings(bindings: &mut [MemoryBinding]) {
    bindings.sort_by(|a, b| {
        a.offset.cmp(&b.offset).then(a.size.cmp(&b.size)).then(a.handle.cmp(&b.handle))
    });
}
