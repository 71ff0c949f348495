//! Schema node types and their builders

use crate::check::{NumberCheck, StringCheck};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Kind tag of a [`SchemaNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
	String,
	Number,
	Boolean,
	Enum,
	Object,
	Optional,
	Array,
}

/// Recursive description of an expected value
#[derive(Debug, Clone)]
pub enum SchemaNode {
	String(StringSchema),
	Number(NumberSchema),
	Boolean(BooleanSchema),
	Enum(EnumSchema),
	Object(ObjectSchema),
	/// The wrapped node, or absent
	Optional(Box<SchemaNode>),
	/// A list whose every element matches the wrapped node
	Array(Box<SchemaNode>),
}

impl SchemaNode {
	pub fn kind(&self) -> SchemaKind {
		match self {
			SchemaNode::String(_) => SchemaKind::String,
			SchemaNode::Number(_) => SchemaKind::Number,
			SchemaNode::Boolean(_) => SchemaKind::Boolean,
			SchemaNode::Enum(_) => SchemaKind::Enum,
			SchemaNode::Object(_) => SchemaKind::Object,
			SchemaNode::Optional(_) => SchemaKind::Optional,
			SchemaNode::Array(_) => SchemaKind::Array,
		}
	}

	/// Whether this is a string schema carrying an email check
	pub fn has_email_check(&self) -> bool {
		match self {
			SchemaNode::String(string) => string.has_email_check(),
			_ => false,
		}
	}

	pub fn as_string(&self) -> Option<&StringSchema> {
		match self {
			SchemaNode::String(string) => Some(string),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&NumberSchema> {
		match self {
			SchemaNode::Number(number) => Some(number),
			_ => None,
		}
	}

	pub fn as_enum(&self) -> Option<&EnumSchema> {
		match self {
			SchemaNode::Enum(values) => Some(values),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&ObjectSchema> {
		match self {
			SchemaNode::Object(object) => Some(object),
			_ => None,
		}
	}
}

/// Wrappers available on every schema
pub trait SchemaNodeExt: Into<SchemaNode> + Sized {
	/// Accept an absent value
	fn optional(self) -> SchemaNode {
		SchemaNode::Optional(Box::new(self.into()))
	}

	/// Expect a list of values matching this schema
	fn array(self) -> SchemaNode {
		SchemaNode::Array(Box::new(self.into()))
	}
}

impl<T: Into<SchemaNode>> SchemaNodeExt for T {}

#[derive(Debug, Clone, Default)]
pub struct StringSchema {
	pub checks: Vec<StringCheck>,
}

impl StringSchema {
	pub fn has_email_check(&self) -> bool {
		self.checks.iter().any(StringCheck::is_email)
	}

	/// At least `length` characters
	pub fn min(self, length: usize) -> Self {
		self.check(StringCheck::MinLength {
			value: length,
			message: None,
		})
	}

	/// At most `length` characters
	pub fn max(self, length: usize) -> Self {
		self.check(StringCheck::MaxLength {
			value: length,
			message: None,
		})
	}

	pub fn email(self) -> Self {
		self.check(StringCheck::Email { message: None })
	}

	pub fn url(self) -> Self {
		self.check(StringCheck::Url { message: None })
	}

	pub fn regex(self, pattern: Regex) -> Self {
		self.check(StringCheck::Regex {
			pattern,
			message: None,
		})
	}

	/// Replace the default message of the most recently added check
	///
	/// Without any check this does nothing.
	pub fn message(mut self, message: impl Into<String>) -> Self {
		if let Some(check) = self.checks.last_mut() {
			check.set_message(message.into());
		}
		self
	}

	fn check(mut self, check: StringCheck) -> Self {
		self.checks.push(check);
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
	pub checks: Vec<NumberCheck>,
	/// Convert non-numeric input to a number before checking
	pub coerce: bool,
}

impl NumberSchema {
	/// Greater than or equal to `value`
	pub fn min(self, value: f64) -> Self {
		self.check(NumberCheck::Min {
			value,
			inclusive: true,
			message: None,
		})
	}

	/// Strictly greater than `value`
	pub fn gt(self, value: f64) -> Self {
		self.check(NumberCheck::Min {
			value,
			inclusive: false,
			message: None,
		})
	}

	/// Less than or equal to `value`
	pub fn max(self, value: f64) -> Self {
		self.check(NumberCheck::Max {
			value,
			inclusive: true,
			message: None,
		})
	}

	/// Strictly less than `value`
	pub fn lt(self, value: f64) -> Self {
		self.check(NumberCheck::Max {
			value,
			inclusive: false,
			message: None,
		})
	}

	pub fn int(self) -> Self {
		self.check(NumberCheck::Int { message: None })
	}

	/// Replace the default message of the most recently added check
	pub fn message(mut self, message: impl Into<String>) -> Self {
		if let Some(check) = self.checks.last_mut() {
			check.set_message(message.into());
		}
		self
	}

	fn check(mut self, check: NumberCheck) -> Self {
		self.checks.push(check);
		self
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanSchema;

/// One of a fixed, ordered set of strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
	pub values: Vec<String>,
}

impl EnumSchema {
	pub fn values(&self) -> &[String] {
		&self.values
	}

	pub fn contains(&self, value: &str) -> bool {
		self.values.iter().any(|v| v == value)
	}
}

type Predicate = Arc<dyn Fn(&Map<String, Value>) -> bool + Send + Sync>;

/// Whole-object condition checked after every property validated
#[derive(Clone)]
pub struct Refinement {
	predicate: Predicate,
	pub message: String,
}

impl Refinement {
	pub fn holds(&self, value: &Map<String, Value>) -> bool {
		(self.predicate)(value)
	}
}

impl fmt::Debug for Refinement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Refinement")
			.field("message", &self.message)
			.finish_non_exhaustive()
	}
}

/// Named properties in declaration order, plus object-level refinements
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
	shape: Vec<(String, SchemaNode)>,
	refinements: Vec<Refinement>,
}

impl ObjectSchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build from `(name, node)` pairs
	pub fn from_shape<I, K>(shape: I) -> Self
	where
		I: IntoIterator<Item = (K, SchemaNode)>,
		K: Into<String>,
	{
		Self {
			shape: shape.into_iter().map(|(k, v)| (k.into(), v)).collect(),
			refinements: Vec::new(),
		}
	}

	/// Declare a property; redeclaring a name replaces it in place
	pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
		let name = name.into();
		let node = node.into();
		match self.shape.iter_mut().find(|(existing, _)| *existing == name) {
			Some(slot) => slot.1 = node,
			None => self.shape.push((name, node)),
		}
		self
	}

	/// Require `predicate` to hold on the validated object
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_schema::{enumeration, object};
	/// use serde_json::json;
	///
	/// let country = object()
	/// 	.field("options", enumeration(["USA", "Canada"]))
	/// 	.refine(|v| v.get("options").is_some(), "Country is required");
	///
	/// assert!(country.validate(&json!({"options": "USA"})).is_ok());
	/// ```
	pub fn refine<F>(mut self, predicate: F, message: impl Into<String>) -> Self
	where
		F: Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
	{
		self.refinements.push(Refinement {
			predicate: Arc::new(predicate),
			message: message.into(),
		});
		self
	}

	pub fn shape(&self) -> &[(String, SchemaNode)] {
		&self.shape
	}

	pub fn refinements(&self) -> &[Refinement] {
		&self.refinements
	}

	pub fn get(&self, name: &str) -> Option<&SchemaNode> {
		self.shape
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, node)| node)
	}

	/// Property names in declaration order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.shape.iter().map(|(key, _)| key.as_str())
	}

	pub fn len(&self) -> usize {
		self.shape.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shape.is_empty()
	}
}

impl From<StringSchema> for SchemaNode {
	fn from(schema: StringSchema) -> Self {
		SchemaNode::String(schema)
	}
}

impl From<NumberSchema> for SchemaNode {
	fn from(schema: NumberSchema) -> Self {
		SchemaNode::Number(schema)
	}
}

impl From<BooleanSchema> for SchemaNode {
	fn from(schema: BooleanSchema) -> Self {
		SchemaNode::Boolean(schema)
	}
}

impl From<EnumSchema> for SchemaNode {
	fn from(schema: EnumSchema) -> Self {
		SchemaNode::Enum(schema)
	}
}

impl From<ObjectSchema> for SchemaNode {
	fn from(schema: ObjectSchema) -> Self {
		SchemaNode::Object(schema)
	}
}

pub fn string() -> StringSchema {
	StringSchema::default()
}

pub fn number() -> NumberSchema {
	NumberSchema::default()
}

/// A number schema converting its input the way `Number(value)` does
///
/// Strings are parsed (blank strings become 0), booleans become 1 or 0 and
/// `null` becomes 0. Input that does not convert fails as not-a-number.
pub fn coerce_number() -> NumberSchema {
	NumberSchema {
		checks: Vec::new(),
		coerce: true,
	}
}

pub fn boolean() -> BooleanSchema {
	BooleanSchema
}

/// One of the given strings
pub fn enumeration<I, S>(values: I) -> EnumSchema
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	EnumSchema {
		values: values.into_iter().map(Into::into).collect(),
	}
}

pub fn object() -> ObjectSchema {
	ObjectSchema::new()
}
