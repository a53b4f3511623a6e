//! Candidate presentation and selection.

use std::io::{self, Write};

use crate::console::is_affirmative;
use crate::record::Record;

const RULE: &str = "----------------------------------------------------------";

/// Outcome of one selection round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(Record),
    NoSelection,
}

/// Print the numbered candidate table.
///
/// # Errors
/// Returns an error if `out` cannot be written.
pub fn render(records: &[Record], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "    PC Name\t\tPC Description")?;
    writeln!(out, "{RULE}")?;
    for (i, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {}\t\t{}",
            i + 1,
            record.name(),
            record.description()
        )?;
    }
    writeln!(out, "{RULE}")?;
    out.flush()
}

/// Prompt matching the number of candidates.
pub const fn prompt_for(count: usize) -> &'static str {
    if count == 1 {
        "Connect to PC? "
    } else {
        "Select a PC to connect to. "
    }
}

/// Resolve a technician's answer against the candidates.
///
/// One candidate: `y`, `Y` or `1` selects it. Several: a 1-based index
/// selects that entry. Anything else selects nothing. The candidate list
/// is consumed either way.
pub fn resolve(mut candidates: Vec<Record>, answer: &str) -> Selection {
    let picked = match candidates.len() {
        0 => None,
        1 if is_affirmative(answer) => Some(0),
        1 => None,
        count => parse_choice(answer).filter(|&index| index < count),
    };
    match picked {
        Some(index) => Selection::Chosen(candidates.swap_remove(index)),
        None => Selection::NoSelection,
    }
}

/// 1-based decimal index to 0-based; rejects signs, blanks and zero.
fn parse_choice(answer: &str) -> Option<usize> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candidates(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::with_timestamp(format!("IT42{i:02}"), None, "03/14 09:26"))
            .collect()
    }

    fn chosen_name(selection: &Selection) -> Option<&str> {
        match selection {
            Selection::Chosen(r) => Some(r.name()),
            Selection::NoSelection => None,
        }
    }

    // --- single candidate ---

    #[test]
    fn single_candidate_confirmed() {
        for answer in ["y", "Y", "1"] {
            let s = resolve(candidates(1), answer);
            assert_eq!(chosen_name(&s), Some("IT4201"), "answer {answer:?}");
        }
    }

    #[test]
    fn single_candidate_declined() {
        for answer in ["", "n", "N", "yes", "2", "0", " y"] {
            assert_eq!(resolve(candidates(1), answer), Selection::NoSelection);
        }
    }

    // --- several candidates ---

    #[test]
    fn numeric_choice_is_one_based() {
        let s = resolve(candidates(5), "3");
        assert_eq!(chosen_name(&s), Some("IT4203"));
    }

    #[test]
    fn first_and_last_are_reachable() {
        assert_eq!(chosen_name(&resolve(candidates(5), "1")), Some("IT4201"));
        assert_eq!(chosen_name(&resolve(candidates(5), "5")), Some("IT4205"));
    }

    #[test]
    fn out_of_range_selects_nothing() {
        assert_eq!(resolve(candidates(5), "0"), Selection::NoSelection);
        assert_eq!(resolve(candidates(5), "6"), Selection::NoSelection);
        assert_eq!(
            resolve(candidates(5), "99999999999999999999999"),
            Selection::NoSelection
        );
    }

    #[test]
    fn non_numeric_selects_nothing() {
        for answer in ["abc", "", "-1", "+2", " 2", "2.0", "y"] {
            assert_eq!(
                resolve(candidates(5), answer),
                Selection::NoSelection,
                "answer {answer:?}"
            );
        }
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(chosen_name(&resolve(candidates(3), "02")), Some("IT4202"));
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert_eq!(resolve(Vec::new(), "1"), Selection::NoSelection);
    }

    // --- presentation ---

    #[test]
    fn render_numbers_from_one() {
        let mut out = Vec::new();
        render(&candidates(2), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    PC Name\t\tPC Description");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[2], " 1. IT4201\t\tUnknown");
        assert_eq!(lines[3], " 2. IT4202\t\tUnknown");
        assert_eq!(lines[4], RULE);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn render_pads_single_digit_indices_only() {
        let mut out = Vec::new();
        render(&candidates(10), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n 9. IT4209\t"));
        assert!(text.contains("\n10. IT4210\t"));
    }

    #[test]
    fn prompt_depends_on_count() {
        assert_eq!(prompt_for(1), "Connect to PC? ");
        assert_eq!(prompt_for(4), "Select a PC to connect to. ");
    }
}
