use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Region;

/// How a newly drawn shape is combined with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Replace,
    Add,
    Subtract,
    Intersect,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 4] = [
        InteractionMode::Replace,
        InteractionMode::Add,
        InteractionMode::Subtract,
        InteractionMode::Intersect,
    ];

    /// Label of the history entry created by this interaction.
    pub fn undo_name(&self) -> &'static str {
        match self {
            InteractionMode::Replace => "Replace Selection",
            InteractionMode::Add => "Add Selection",
            InteractionMode::Subtract => "Subtract Selection",
            InteractionMode::Intersect => "Selection Intersect",
        }
    }

    pub fn combine(&self, old: &Region, new: &Region) -> Region {
        combine(old, new, *self)
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InteractionMode::Replace => "Replace",
            InteractionMode::Add => "Add",
            InteractionMode::Subtract => "Subtract",
            InteractionMode::Intersect => "Intersect",
        };
        f.write_str(name)
    }
}

/// Combines the existing selection region with a newly drawn one.
///
/// Neither input is modified. The builder calls this again for every pointer
/// sample with the same `old` and a growing `new`, so the result depends only
/// on the two operands.
pub fn combine(old: &Region, new: &Region, mode: InteractionMode) -> Region {
    match mode {
        InteractionMode::Replace => new.clone(),
        InteractionMode::Add => old.union(new),
        InteractionMode::Subtract => old.subtract(new),
        InteractionMode::Intersect => old.intersect(new),
    }
}
