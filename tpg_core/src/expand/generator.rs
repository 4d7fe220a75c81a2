//! Cartesian expansion of a parsed purpose over its parameter lines
//!
//! Every SET line contributes one axis whose points are its literal
//! components plus every integer of its intervals, in declaration order.
//! RES lines contribute no axis; they are resolved per generated purpose
//! from its ordinal. The expansion walks the axes depth-first so that the
//! last SET line varies fastest.

use crate::expand::choice::{render_value, res_component_for_ordinal, Choice};
use crate::expand::template::{
    comment_line, param_tag, substitute, COMMENT_NONE, FINALLY_TAG, PARAMS_TAG, PURPOSE_NUMBER_TAG,
};
use crate::params::Purpose;

/// Result of expanding one purpose specification.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Concatenated generated purpose bodies.
    pub text: String,
    /// Number of purposes generated.
    pub count: u64,
}

/// Expand `purpose` against `template`, numbering generated purposes from
/// `base_number + 1`. `finally_code` fills the finally placeholder of each
/// generated purpose.
pub fn generate(purpose: &Purpose, template: &str, finally_code: &str, base_number: u64) -> Expansion {
    let mut choices = vec![Choice::Unset; purpose.lines.len()];
    let mut output = String::new();
    let mut ordinal: u64 = 1;
    expand(
        purpose,
        template,
        finally_code,
        base_number,
        0,
        &mut choices,
        &mut output,
        &mut ordinal,
    );
    Expansion {
        text: output,
        count: ordinal - 1,
    }
}

#[allow(clippy::too_many_arguments)]
fn expand(
    purpose: &Purpose,
    template: &str,
    finally_code: &str,
    base_number: u64,
    index: usize,
    choices: &mut Vec<Choice>,
    output: &mut String,
    ordinal: &mut u64,
) {
    if index == purpose.lines.len() {
        if *ordinal == 1 {
            output.clear();
        }
        output.push_str(&render_purpose(
            purpose,
            template,
            finally_code,
            base_number,
            choices,
            *ordinal,
        ));
        *ordinal += 1;
        return;
    }

    let line = &purpose.lines[index];
    if line.is_res() {
        // Resolved at render time from the purpose ordinal.
        expand(
            purpose,
            template,
            finally_code,
            base_number,
            index + 1,
            choices,
            output,
            ordinal,
        );
        return;
    }

    for (slot, component) in line.components.iter().enumerate() {
        match *component {
            crate::params::Component::Literal { .. } => {
                choices[index] = Choice::Literal(slot);
                expand(
                    purpose,
                    template,
                    finally_code,
                    base_number,
                    index + 1,
                    choices,
                    output,
                    ordinal,
                );
            }
            crate::params::Component::Interval { low, high, .. } => {
                // An inverted interval spans no values and prunes the branch.
                for value in low..=high {
                    choices[index] = Choice::Interval(value);
                    expand(
                        purpose,
                        template,
                        finally_code,
                        base_number,
                        index + 1,
                        choices,
                        output,
                        ordinal,
                    );
                }
            }
        }
    }
    choices[index] = Choice::Unset;
}

fn render_purpose(
    purpose: &Purpose,
    template: &str,
    finally_code: &str,
    base_number: u64,
    choices: &[Choice],
    ordinal: u64,
) -> String {
    let mut text = substitute(template, FINALLY_TAG, finally_code);

    let mut comments = String::new();
    for (index, line) in purpose.lines.iter().enumerate() {
        let choice = if line.is_res() {
            if line.components.is_empty() {
                Choice::Unset
            } else {
                Choice::Literal(res_component_for_ordinal(line, ordinal))
            }
        } else {
            choices[index]
        };
        let value = render_value(line, choice);
        comments.push_str(&comment_line(&value));
        text = substitute(&text, &param_tag(index), &value);
    }

    text = substitute(&text, PURPOSE_NUMBER_TAG, &(base_number + ordinal).to_string());

    if comments.is_empty() {
        comments.push_str(COMMENT_NONE);
    }
    substitute(&text, PARAMS_TAG, &comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::parser::parse_line;
    use crate::params::Purpose;

    fn purpose_of(lines: &[&str]) -> Purpose {
        let mut purpose = Purpose::new();
        for raw in lines {
            let (line, warning) = parse_line(raw);
            assert!(warning.is_ok(), "unexpected warning for {:?}", raw);
            purpose.push_line(line);
        }
        purpose
    }

    #[test]
    fn test_single_set_line_enumerates_components() {
        let purpose = purpose_of(&["SET(alpha;beta;gamma)"]);
        let expansion = generate(&purpose, "[<%0%>]\n", "", 0);
        assert_eq!(expansion.count, 3);
        assert_eq!(expansion.text, "[alpha]\n[beta]\n[gamma]\n");
    }

    #[test]
    fn test_interval_enumerates_every_integer() {
        let purpose = purpose_of(&["SET(1..3)"]);
        let expansion = generate(&purpose, "v=<%0%>;", "", 0);
        assert_eq!(expansion.count, 3);
        assert_eq!(expansion.text, "v=1;v=2;v=3;");
    }

    #[test]
    fn test_two_set_lines_vary_last_line_fastest() {
        let purpose = purpose_of(&["SET(a;b)", "SET(1..2)"]);
        let expansion = generate(&purpose, "(<%0%>,<%1%>)", "", 0);
        assert_eq!(expansion.count, 4);
        assert_eq!(expansion.text, "(a,1)(a,2)(b,1)(b,2)");
    }

    #[test]
    fn test_purpose_numbers_start_above_base() {
        let purpose = purpose_of(&["SET(x;y)"]);
        let expansion = generate(&purpose, "#<%purpose_number%> ", "", 10);
        assert_eq!(expansion.text, "#11 #12 ");
    }

    #[test]
    fn test_res_line_cycles_with_ordinal() {
        let purpose = purpose_of(&["SET(1..4)", "RES(even;odd)"]);
        let expansion = generate(&purpose, "<%0%>:<%1%>\n", "", 0);
        assert_eq!(expansion.count, 4);
        // Ordinals past the cumulative repeat total clamp to the last
        // component.
        assert_eq!(expansion.text, "1:even\n2:odd\n3:odd\n4:odd\n");
    }

    #[test]
    fn test_res_repeat_counts_weight_the_mapping() {
        let purpose = purpose_of(&["SET(1..4)", "RES(lo:2;hi:2)"]);
        let expansion = generate(&purpose, "<%1%>;", "", 0);
        assert_eq!(expansion.text, "lo;lo;hi;hi;");
    }

    #[test]
    fn test_res_only_purpose_yields_one_purpose() {
        let purpose = purpose_of(&["RES(only)"]);
        let expansion = generate(&purpose, "r=<%0%> n=<%purpose_number%>", "", 0);
        assert_eq!(expansion.count, 1);
        assert_eq!(expansion.text, "r=only n=1");
    }

    #[test]
    fn test_empty_purpose_yields_one_purpose_with_none_comment() {
        let purpose = Purpose::new();
        let expansion = generate(&purpose, "<%params%>", "", 0);
        assert_eq!(expansion.count, 1);
        assert_eq!(expansion.text, "//    none\n");
    }

    #[test]
    fn test_params_comment_lists_values_in_line_order() {
        let purpose = purpose_of(&["SET(a)", "SET(b)"]);
        let expansion = generate(&purpose, "<%params%>", "", 0);
        assert_eq!(expansion.text, "//    a\n//    b\n");
    }

    #[test]
    fn test_finally_substituted_before_parameters() {
        let purpose = purpose_of(&["SET(cleanup)"]);
        let expansion = generate(&purpose, "fin{<%finally%>}", "do(<%0%>);", 0);
        assert_eq!(expansion.text, "fin{do(cleanup);}");
    }

    #[test]
    fn test_common_line_contributes_single_value() {
        let purpose = purpose_of(&["plain text line"]);
        let expansion = generate(&purpose, "<%0%>|", "", 0);
        assert_eq!(expansion.count, 1);
        assert_eq!(expansion.text, "plain text line|");
    }

    #[test]
    fn test_inverted_interval_prunes_all_combinations() {
        let (line, warning) = parse_line("SET(5..5)");
        assert!(warning.is_ok());
        let mut purpose = Purpose::new();
        purpose.push_line(line);
        // Force an inverted interval directly; the parser never builds one
        // from well-formed input.
        purpose.lines[0].components[0] = crate::params::Component::interval(5, 3);
        let expansion = generate(&purpose, "x", "", 0);
        assert_eq!(expansion.count, 0);
        assert_eq!(expansion.text, "");
    }

    #[test]
    fn test_count_matches_combination_count() {
        let purpose = purpose_of(&["SET(a;b;c)", "SET(0..1)", "RES(r)"]);
        let expansion = generate(&purpose, ".", "", 0);
        assert_eq!(expansion.count, purpose.combination_count());
        assert_eq!(expansion.count, 6);
    }
}
