//! Choice vector slots for the expansion recursion
//!
//! Each parameter line owns one slot recording which alternative is selected
//! for the combination being emitted. A tagged value replaces the classic
//! trick of offsetting interval values by a large constant to share an
//! integer slot with literal indices.

use crate::params::{Component, ParamLine};
use crate::utils::trim;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// No selection made yet. Only observable for lines that cannot resolve
    /// a value, such as a RES line with no components.
    Unset,
    /// Index of the selected literal component.
    Literal(usize),
    /// Concrete integer drawn from an interval component.
    Interval(i64),
}

/// Render the selected value of one line as the text stamped into the
/// template and the comment block. Literal text is trimmed at render time.
pub fn render_value(line: &ParamLine, choice: Choice) -> String {
    match choice {
        Choice::Unset => String::new(),
        Choice::Interval(value) => value.to_string(),
        Choice::Literal(index) => match line.components.get(index) {
            Some(Component::Literal { text, .. }) => trim(text).to_string(),
            _ => String::new(),
        },
    }
}

/// Map a 1-based purpose ordinal onto a RES line's component index by
/// accumulating repeat weights in declaration order. An ordinal beyond the
/// total weight clamps to the last component.
pub fn res_component_for_ordinal(line: &ParamLine, ordinal: u64) -> usize {
    let mut cumulative = 0u64;
    for (index, component) in line.components.iter().enumerate() {
        cumulative += component.repeat() as u64;
        if cumulative >= ordinal {
            return index;
        }
    }
    line.components.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{parse_line, Component, LineKind};

    #[test]
    fn test_res_ordinal_mapping_default_weights() {
        let (line, _) = parse_line("RES(x;y;z)");
        assert_eq!(res_component_for_ordinal(&line, 1), 0);
        assert_eq!(res_component_for_ordinal(&line, 2), 1);
        assert_eq!(res_component_for_ordinal(&line, 3), 2);
        // Beyond the total weight the mapping clamps to the last component.
        assert_eq!(res_component_for_ordinal(&line, 4), 2);
    }

    #[test]
    fn test_res_ordinal_mapping_weighted() {
        let (line, _) = parse_line("RES(x:2;y:1)");
        assert_eq!(res_component_for_ordinal(&line, 1), 0);
        assert_eq!(res_component_for_ordinal(&line, 2), 0);
        assert_eq!(res_component_for_ordinal(&line, 3), 1);
        assert_eq!(res_component_for_ordinal(&line, 4), 1);
    }

    #[test]
    fn test_render_literal_trims() {
        let line = crate::params::ParamLine {
            kind: LineKind::Set,
            components: vec![Component::literal("  spaced  ")],
        };
        assert_eq!(render_value(&line, Choice::Literal(0)), "spaced");
    }

    #[test]
    fn test_render_interval_value() {
        let (line, _) = parse_line("SET(1..3)");
        assert_eq!(render_value(&line, Choice::Interval(2)), "2");
    }

    #[test]
    fn test_render_unset_is_empty() {
        let (line, _) = parse_line("SET(a)");
        assert_eq!(render_value(&line, Choice::Unset), "");
    }
}
