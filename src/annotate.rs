/// Stand-in when only the job title is known.
pub const NO_FULL_NAME: &str = "NA";

/// Stand-in when only the full name is known.
pub const NO_JOB_TITLE: &str = "Unknown";

/// Build the `Full Name | Job Title` description typed after a session.
///
/// Returns `None` when both parts are blank, meaning the description
/// should be left as it is.
pub fn compose_description(full_name: &str, job_title: &str) -> Option<String> {
    let full_name = full_name.trim();
    let job_title = job_title.trim();
    if full_name.is_empty() && job_title.is_empty() {
        return None;
    }
    let full_name = if full_name.is_empty() {
        NO_FULL_NAME
    } else {
        full_name
    };
    let job_title = if job_title.is_empty() {
        NO_JOB_TITLE
    } else {
        job_title
    };
    Some(format!("{full_name} | {job_title}"))
}

/// Reduce a description to the form the description search reports.
///
/// The search drops the `Description` header, dashes and spaces, so a stored
/// `Jane Doe | Clerk` comes back as `JaneDoe|Clerk`.
pub fn search_form(description: &str) -> String {
    description
        .replace("Description", "")
        .replace(['-', ' '], "")
}

/// Whether `composed` differs from what the search reported as `current`.
pub fn differs_from(composed: &str, current: &str) -> bool {
    search_form(composed) != search_form(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_parts_present() {
        assert_eq!(
            compose_description("Jane Doe", "Clerk").as_deref(),
            Some("Jane Doe | Clerk")
        );
    }

    #[test]
    fn both_blank_leaves_description_alone() {
        assert_eq!(compose_description("", ""), None);
        assert_eq!(compose_description("  ", "\t"), None);
    }

    #[test]
    fn blank_full_name_becomes_na() {
        assert_eq!(
            compose_description("", "Clerk").as_deref(),
            Some("NA | Clerk")
        );
    }

    #[test]
    fn blank_job_title_becomes_unknown() {
        assert_eq!(
            compose_description("Jane Doe", " ").as_deref(),
            Some("Jane Doe | Unknown")
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            compose_description("  Jane Doe ", " Clerk  ").as_deref(),
            Some("Jane Doe | Clerk")
        );
    }

    #[test]
    fn search_form_strips_spaces_and_dashes() {
        assert_eq!(search_form("Jane Doe | Clerk"), "JaneDoe|Clerk");
        assert_eq!(search_form("Mary-Ann Lee | IT Tech"), "MaryAnnLee|ITTech");
    }

    #[test]
    fn composed_matches_its_searched_form() {
        assert!(!differs_from("Jane Doe | Clerk", "JaneDoe|Clerk"));
        assert!(!differs_from("Jane Doe | Clerk", "Jane Doe | Clerk"));
        assert!(differs_from("Jane Doe | Manager", "JaneDoe|Clerk"));
        assert!(differs_from("NA | Clerk", "Unknown"));
    }
}
