use thingsctl_core::{Error, Result, MAX_ARGUMENT_LENGTH};

/// Characters that can trigger command substitution or truncate the command
/// line even inside single quotes. Every other shell metacharacter is inert
/// once the argument has been single-quoted by the script engine.
const FORBIDDEN_CHARACTERS: [char; 3] = ['`', '$', '\0'];

/// Things identifiers are ASCII alphanumeric strings in this length range
const ITEM_ID_LENGTH: std::ops::RangeInclusive<usize> = 20..=24;

/// Validation of values bound for script command lines
pub struct SecurityValidator;

impl SecurityValidator {
    /// Certify that one argument can be passed to a script.
    ///
    /// The value comes back unchanged. This is not a general sanitizer: it
    /// says nothing about whether the value makes sense to the application.
    pub fn sanitize_argument(value: &str, field: &str) -> Result<String> {
        if value.is_empty() {
            return Ok(String::new());
        }

        if value.chars().count() > MAX_ARGUMENT_LENGTH {
            return Err(Error::validation(
                field,
                format!("value is too long (max {MAX_ARGUMENT_LENGTH} characters)"),
            ));
        }

        if value.contains(FORBIDDEN_CHARACTERS) {
            tracing::warn!(field = %field, "rejected argument with forbidden characters");
            return Err(Error::validation(
                field,
                "contains invalid characters (backticks, $, or null bytes not allowed)",
            ));
        }

        Ok(value.to_string())
    }

    /// Like [`Self::sanitize_argument`], treating an absent value as empty
    pub fn sanitize(value: Option<&str>, field: &str) -> Result<String> {
        match value {
            Some(value) => Self::sanitize_argument(value, field),
            None => Ok(String::new()),
        }
    }

    /// Certify a whole positional vector, naming each slot `argument[i]`
    pub fn sanitize_arguments(args: &[String]) -> Result<Vec<String>> {
        args.iter()
            .enumerate()
            .map(|(index, arg)| Self::sanitize_argument(arg, &format!("argument[{index}]")))
            .collect()
    }

    /// Validate a Things item identifier (to-do, project, or area)
    pub fn validate_item_id(id: &str) -> Result<()> {
        let well_formed =
            ITEM_ID_LENGTH.contains(&id.len()) && id.chars().all(|c| c.is_ascii_alphanumeric());

        if well_formed {
            Ok(())
        } else {
            Err(Error::validation(
                "id",
                format!(
                    "'{id}' is not a Things ID. Expected an alphanumeric string of {}-{} characters such as \"aBc123dEf456gHi789JkL\", not the item's title",
                    ITEM_ID_LENGTH.start(),
                    ITEM_ID_LENGTH.end()
                ),
            ))
        }
    }

    /// Validate a script name before it is turned into a file path
    pub fn validate_script_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::validation("script", "script name cannot be empty"));
        }

        let safe = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(Error::validation(
                "script",
                format!("script name '{name}' may only contain letters, digits, '-' and '_'"),
            ));
        }

        Ok(())
    }
}
