//! Pure level-by-level tree formatting.
//!
//! Formatting is strictly read-only and lives apart from the mutation
//! paths; nothing in the core ever prints. Tests and debugging call
//! [`BTreeIndex::dump`] (or use the `Display` impl) when they want to see
//! a tree.

use std::fmt::{self, Write};

use super::BTreeIndex;

impl BTreeIndex {
    /// Render the tree one level per line, e.g.:
    ///
    /// ```text
    /// L0: [6 12]
    /// L1: [5] [7 10] [17 20 30]
    /// ```
    ///
    /// Returns `"(empty)"` for the empty tree. Output is a debugging aid
    /// and not a stable format.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.write_levels(&mut out)
            .expect("formatting into a String cannot fail");
        out
    }

    fn write_levels(&self, out: &mut impl Write) -> fmt::Result {
        let Some(root) = self.root else {
            return out.write_str("(empty)");
        };

        let mut level = vec![root];
        let mut depth = 0;
        while !level.is_empty() {
            if depth > 0 {
                out.write_char('\n')?;
            }
            write!(out, "L{depth}:")?;

            let mut next = Vec::new();
            for &id in &level {
                let node = self.node(id);
                out.write_str(" [")?;
                for (i, key) in node.keys().iter().enumerate() {
                    if i > 0 {
                        out.write_char(' ')?;
                    }
                    write!(out, "{key}")?;
                }
                out.write_char(']')?;
                next.extend_from_slice(node.children());
            }
            level = next;
            depth += 1;
        }
        Ok(())
    }
}

impl fmt::Display for BTreeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_levels(f)
    }
}
