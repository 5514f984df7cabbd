use validator::Validate;

pub const ROLES: [&str; 2] = ["seeker", "employer"];
pub const JOB_TYPES: [&str; 4] = ["full-time", "part-time", "contract", "remote"];
pub const APPLICATION_STATUSES: [&str; 4] = ["pending", "reviewed", "accepted", "rejected"];

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Invalid or absent roles fall back to seeker rather than rejecting the
/// registration; clients rely on this.
pub fn coerce_role(role: Option<&str>) -> &'static str {
    match role {
        Some("employer") => "employer",
        _ => "seeker",
    }
}

pub fn is_valid_job_type(value: &str) -> bool {
    JOB_TYPES.contains(&value)
}

pub fn is_valid_application_status(value: &str) -> bool {
    APPLICATION_STATUSES.contains(&value)
}

/// Username to try first when registering: the explicit one if non-blank,
/// otherwise the email's local part.
pub fn username_base(email: &str, provided: Option<&str>) -> String {
    match provided.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

/// At least 7 digit/plus characters once formatting is stripped.
pub fn is_valid_phone(value: &str) -> bool {
    let significant = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .count();
    significant >= 7
}

/// Bare hostnames get an https:// prefix; anything with a scheme passes
/// through untouched.
pub fn normalize_website(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

pub fn is_profile_link_for(value: &str, domain: &str) -> bool {
    value.to_lowercase().contains(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_coercion_defaults_to_seeker() {
        assert_eq!(coerce_role(Some("employer")), "employer");
        assert_eq!(coerce_role(Some("seeker")), "seeker");
        assert_eq!(coerce_role(Some("admin")), "seeker");
        assert_eq!(coerce_role(None), "seeker");
    }

    #[test]
    fn username_base_prefers_explicit_name() {
        assert_eq!(username_base("jane@example.com", Some("janedoe")), "janedoe");
        assert_eq!(username_base("jane@example.com", Some("  ")), "jane");
        assert_eq!(username_base("jane@example.com", None), "jane");
    }

    #[test]
    fn phone_requires_seven_significant_chars() {
        assert!(is_valid_phone("+1 (555) 123-4567"));
        assert!(is_valid_phone("5551234"));
        assert!(!is_valid_phone("555-12"));
        assert!(!is_valid_phone("call me"));
    }

    #[test]
    fn website_gets_scheme_when_missing() {
        assert_eq!(normalize_website("example.com"), "https://example.com");
        assert_eq!(normalize_website("http://example.com"), "http://example.com");
        assert_eq!(normalize_website("  example.com "), "https://example.com");
    }

    #[test]
    fn profile_links_must_mention_their_domain() {
        assert!(is_profile_link_for("https://LinkedIn.com/in/jane", "linkedin.com"));
        assert!(!is_profile_link_for("https://example.com/jane", "linkedin.com"));
    }

    #[test]
    fn vocabularies_reject_unknown_values() {
        assert!(is_valid_job_type("remote"));
        assert!(!is_valid_job_type("freelance"));
        assert!(is_valid_application_status("reviewed"));
        assert!(!is_valid_application_status("archived"));
    }
}
