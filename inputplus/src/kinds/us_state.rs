//! [`UsState`]: a United States state given by name or postal abbreviation.
use crate::utils::{Rejection, Validate};

/// Postal abbreviation and name of every state, plus the District of Columbia.
pub const US_STATES: [(&str, &str); 51] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Accepts `ca`, `CA` or `california`. Returns the abbreviation (`CA`), or
/// the name (`California`) with [`UsState::names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsState {
    pub return_name: bool,
}

impl UsState {
    pub fn abbreviations() -> Self {
        UsState { return_name: false }
    }

    pub fn names() -> Self {
        UsState { return_name: true }
    }
}

impl Validate for UsState {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        US_STATES
            .iter()
            .find(|(abbr, name)| abbr.eq_ignore_ascii_case(input) || name.eq_ignore_ascii_case(input))
            .map(|(abbr, name)| if self.return_name { name } else { abbr })
            .map(|state| state.to_string())
            .ok_or_else(|| Rejection::InvalidUsState(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_state_abbreviation_or_name() {
        let state = UsState::default();
        assert_eq!(state.validate("ca"), Ok("CA".to_string()));
        assert_eq!(state.validate("California"), Ok("CA".to_string()));
        assert_eq!(state.validate("new york"), Ok("NY".to_string()));

        let state = UsState::names();
        assert_eq!(state.validate("ca"), Ok("California".to_string()));
        assert_eq!(state.validate("DISTRICT OF COLUMBIA"), Ok("District of Columbia".to_string()));
    }

    #[test]
    fn test_us_state_rejects_unknown() {
        let state = UsState::abbreviations();
        assert_eq!(
            state.validate("Ontario").unwrap_err().to_string(),
            "'Ontario' is not a state."
        );
        assert!(state.validate("C").is_err());
        assert!(state.validate("newyork").is_err());
    }

    #[test]
    fn test_us_state_table_is_consistent() {
        for (i, (abbr, name)) in US_STATES.iter().enumerate() {
            assert_eq!(abbr.len(), 2);
            assert!(abbr.chars().all(|c| c.is_ascii_uppercase()));
            assert!(
                US_STATES[i + 1..]
                    .iter()
                    .all(|(a, n)| a != abbr && n != name)
            );
        }
    }
}
