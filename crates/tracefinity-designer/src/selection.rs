//! Editor selection.

use std::fmt;

/// At most one selected entity per editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A placed tool, by placement id.
    Tool(String),
    /// A text label, by id.
    Label(String),
    /// An outer-ring vertex, by index.
    Vertex(usize),
    /// A cutout, by id.
    Cutout(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Tool(id) => write!(f, "tool {}", id),
            Selection::Label(id) => write!(f, "label {}", id),
            Selection::Vertex(i) => write!(f, "vertex {}", i),
            Selection::Cutout(id) => write!(f, "cutout {}", id),
        }
    }
}
