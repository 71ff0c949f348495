//! Constraint checks attached to string and number schemas
//!
//! Each check carries an optional custom message; without one the default
//! wording below is reported.

use regex::Regex;
use std::sync::LazyLock;

// Local part of at least one character ending in a non-dot, an `@`, one or
// more dotted labels and an alphabetic top-level domain. Leading dots and
// consecutive dots are rejected separately.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Whether `value` is a syntactically plausible email address
///
/// # Examples
///
/// ```
/// use formsmith_schema::check::is_email;
///
/// assert!(is_email("a@b.com"));
/// assert!(is_email("first.last+tag@mail.example.org"));
/// assert!(!is_email("bad"));
/// assert!(!is_email(".a@b.com"));
/// assert!(!is_email("a..b@c.com"));
/// ```
pub fn is_email(value: &str) -> bool {
	!value.starts_with('.') && !value.contains("..") && EMAIL_REGEX.is_match(value)
}

/// Whether `value` parses as an absolute URL
pub fn is_url(value: &str) -> bool {
	url::Url::parse(value).is_ok()
}

#[derive(Debug, Clone)]
pub enum StringCheck {
	MinLength {
		value: usize,
		message: Option<String>,
	},
	MaxLength {
		value: usize,
		message: Option<String>,
	},
	Email {
		message: Option<String>,
	},
	Url {
		message: Option<String>,
	},
	Regex {
		pattern: Regex,
		message: Option<String>,
	},
}

impl StringCheck {
	pub fn is_email(&self) -> bool {
		matches!(self, StringCheck::Email { .. })
	}

	pub(crate) fn set_message(&mut self, text: String) {
		let (StringCheck::MinLength { message, .. }
		| StringCheck::MaxLength { message, .. }
		| StringCheck::Email { message }
		| StringCheck::Url { message }
		| StringCheck::Regex { message, .. }) = self;
		*message = Some(text);
	}

	/// The failure message for `value`, `None` when it passes
	pub fn evaluate(&self, value: &str) -> Option<String> {
		// Lengths count UTF-16 code units.
		let length = value.encode_utf16().count();
		let (passed, message, default) = match self {
			StringCheck::MinLength { value: min, message } => (
				length >= *min,
				message,
				format!("String must contain at least {min} character(s)"),
			),
			StringCheck::MaxLength { value: max, message } => (
				length <= *max,
				message,
				format!("String must contain at most {max} character(s)"),
			),
			StringCheck::Email { message } => {
				(is_email(value), message, "Invalid email".to_string())
			}
			StringCheck::Url { message } => (is_url(value), message, "Invalid url".to_string()),
			StringCheck::Regex { pattern, message } => {
				(pattern.is_match(value), message, "Invalid".to_string())
			}
		};
		(!passed).then(|| message.clone().unwrap_or(default))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberCheck {
	Min {
		value: f64,
		inclusive: bool,
		message: Option<String>,
	},
	Max {
		value: f64,
		inclusive: bool,
		message: Option<String>,
	},
	Int {
		message: Option<String>,
	},
}

impl NumberCheck {
	pub(crate) fn set_message(&mut self, text: String) {
		let (NumberCheck::Min { message, .. }
		| NumberCheck::Max { message, .. }
		| NumberCheck::Int { message }) = self;
		*message = Some(text);
	}

	/// The failure message for `value`, `None` when it passes
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_schema::NumberCheck;
	///
	/// let min = NumberCheck::Min { value: 0.0, inclusive: true, message: None };
	/// assert_eq!(min.evaluate(0.0), None);
	/// assert_eq!(
	/// 	min.evaluate(-1.0).as_deref(),
	/// 	Some("Number must be greater than or equal to 0")
	/// );
	/// ```
	pub fn evaluate(&self, value: f64) -> Option<String> {
		let (passed, message, default) = match self {
			NumberCheck::Min {
				value: min,
				inclusive,
				message,
			} => {
				let relation = if *inclusive {
					"greater than or equal to"
				} else {
					"greater than"
				};
				(
					if *inclusive { value >= *min } else { value > *min },
					message,
					format!("Number must be {relation} {}", format_number(*min)),
				)
			}
			NumberCheck::Max {
				value: max,
				inclusive,
				message,
			} => {
				let relation = if *inclusive {
					"less than or equal to"
				} else {
					"less than"
				};
				(
					if *inclusive { value <= *max } else { value < *max },
					message,
					format!("Number must be {relation} {}", format_number(*max)),
				)
			}
			NumberCheck::Int { message } => (
				value.fract() == 0.0,
				message,
				"Expected integer, received float".to_string(),
			),
		};
		(!passed).then(|| message.clone().unwrap_or(default))
	}
}

/// Shortest decimal form: integral values print without a fraction
pub(crate) fn format_number(value: f64) -> String {
	if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
		format!("{}", value as i64)
	} else {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", 1, Some("String must contain at least 1 character(s)"))]
	#[case("a", 1, None)]
	#[case("é", 1, None)]
	fn test_min_length(#[case] input: &str, #[case] min: usize, #[case] expected: Option<&str>) {
		let check = StringCheck::MinLength {
			value: min,
			message: None,
		};

		assert_eq!(check.evaluate(input).as_deref(), expected);
	}

	#[rstest]
	fn test_custom_message_replaces_default() {
		// Arrange
		let mut check = StringCheck::Email { message: None };

		// Act
		check.set_message("Invalid email address".to_string());

		// Assert
		assert_eq!(check.evaluate("bad").as_deref(), Some("Invalid email address"));
		assert_eq!(check.evaluate("a@b.com"), None);
	}

	#[rstest]
	#[case("https://example.com/path", true)]
	#[case("mailto:someone@example.com", true)]
	#[case("example.com", false)]
	#[case("", false)]
	fn test_url_check(#[case] input: &str, #[case] valid: bool) {
		let check = StringCheck::Url { message: None };

		assert_eq!(check.evaluate(input).is_none(), valid);
	}

	#[rstest]
	fn test_exclusive_bounds() {
		let gt = NumberCheck::Min {
			value: 1.5,
			inclusive: false,
			message: None,
		};
		let lt = NumberCheck::Max {
			value: 10.0,
			inclusive: false,
			message: None,
		};

		assert_eq!(gt.evaluate(1.5).as_deref(), Some("Number must be greater than 1.5"));
		assert_eq!(lt.evaluate(10.0).as_deref(), Some("Number must be less than 10"));
		assert_eq!(lt.evaluate(9.99), None);
	}

	#[rstest]
	#[case(1e20, "100000000000000000000")]
	#[case(9_007_199_254_740_991.0, "9007199254740991")]
	#[case(-42.0, "-42")]
	#[case(0.25, "0.25")]
	fn test_min_message_prints_bound(#[case] bound: f64, #[case] printed: &str) {
		let min = NumberCheck::Min {
			value: bound,
			inclusive: true,
			message: None,
		};

		let message = min.evaluate(bound - bound.abs() - 1.0);

		assert_eq!(
			message,
			Some(format!("Number must be greater than or equal to {printed}"))
		);
	}

	#[rstest]
	fn test_int_check() {
		let int = NumberCheck::Int { message: None };

		assert_eq!(int.evaluate(3.0), None);
		assert_eq!(int.evaluate(3.5).as_deref(), Some("Expected integer, received float"));
	}
}
