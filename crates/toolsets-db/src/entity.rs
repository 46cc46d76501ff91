//! Entity capabilities.
//!
//! Fixture loading only needs three things from a model instance: its model
//! identifier, its primary key, and the ability to be cloned and stored behind
//! a trait object. Applications implement the typed [`Model`] trait; every
//! model automatically becomes an object-safe [`Entity`].

use std::any::Any;
use std::fmt;

use serde_json::Value;

/// Primary key of a model instance.
///
/// A key is an ordered list of column values. `Value::Null` marks a column
/// that has not been assigned yet (for example an auto-increment id).
///
/// # Example
///
/// ```
/// use toolsets_db::PrimaryKey;
///
/// assert!(PrimaryKey::new(1).is_set());
/// assert!(!PrimaryKey::new(None::<i64>).is_set());
///
/// // A partially assigned composite key counts as unset.
/// let partial = PrimaryKey::composite([Some(1), None]);
/// assert!(!partial.is_set());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimaryKey {
	components: Vec<Value>,
}

impl PrimaryKey {
	/// Creates a single-column primary key.
	pub fn new(value: impl Into<Value>) -> Self {
		Self {
			components: vec![value.into()],
		}
	}

	/// Creates a multi-column primary key.
	pub fn composite<I, V>(values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self {
			components: values.into_iter().map(Into::into).collect(),
		}
	}

	/// Creates a key with no components, for models without a primary key value.
	pub fn unset() -> Self {
		Self::default()
	}

	/// Returns the key columns in declaration order.
	pub fn components(&self) -> &[Value] {
		&self.components
	}

	/// Returns true if the key spans more than one column.
	pub fn is_composite(&self) -> bool {
		self.components.len() > 1
	}

	/// Returns true only if every column of the key holds a value.
	pub fn is_set(&self) -> bool {
		!self.components.is_empty() && self.components.iter().all(|c| !c.is_null())
	}

	/// Returns a stable string form used to index rows.
	pub fn cache_key(&self) -> String {
		Value::Array(self.components.clone()).to_string()
	}
}

impl fmt::Display for PrimaryKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.components.as_slice() {
			[] => f.write_str("<unset>"),
			[single] => write!(f, "{}", single),
			many => {
				f.write_str("(")?;
				for (i, component) in many.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}", component)?;
				}
				f.write_str(")")
			}
		}
	}
}

/// A typed persistent model.
///
/// # Example
///
/// ```
/// use toolsets_db::{Model, PrimaryKey};
///
/// #[derive(Debug, Clone)]
/// struct Role {
///     id: Option<i64>,
///     name: String,
/// }
///
/// impl Model for Role {
///     const MODEL_ID: &'static str = "auth.Role";
///
///     fn primary_key(&self) -> PrimaryKey {
///         PrimaryKey::new(self.id)
///     }
/// }
/// ```
pub trait Model: Clone + fmt::Debug + Send + Sync + 'static {
	/// Model identifier in format "app.Model" (e.g., "auth.User").
	const MODEL_ID: &'static str;

	/// Returns the primary key of this instance.
	fn primary_key(&self) -> PrimaryKey;
}

/// Object-safe view of a [`Model`] instance.
pub trait Entity: fmt::Debug + Send + Sync + 'static {
	/// Returns the model identifier.
	fn model_id(&self) -> &'static str;

	/// Returns the primary key of this instance.
	fn key(&self) -> PrimaryKey;

	/// Clones the instance behind a new box.
	fn clone_entity(&self) -> Box<dyn Entity>;

	/// Returns the instance as `Any` for downcasting.
	fn as_any(&self) -> &dyn Any;
}

impl<M: Model> Entity for M {
	fn model_id(&self) -> &'static str {
		M::MODEL_ID
	}

	fn key(&self) -> PrimaryKey {
		self.primary_key()
	}

	fn clone_entity(&self) -> Box<dyn Entity> {
		Box::new(self.clone())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl dyn Entity {
	/// Returns true if the instance is of model type `M`.
	pub fn is<M: Model>(&self) -> bool {
		self.as_any().is::<M>()
	}

	/// Downcasts to a concrete model type.
	pub fn downcast_ref<M: Model>(&self) -> Option<&M> {
		self.as_any().downcast_ref::<M>()
	}
}

impl Clone for Box<dyn Entity> {
	fn clone(&self) -> Self {
		(**self).clone_entity()
	}
}

/// Conversion into a boxed [`Entity`].
///
/// Implemented for every [`Model`] and for `Box<dyn Entity>`, so a producer may
/// return either a single model type or a mix of models.
pub trait IntoEntity {
	/// Boxes the value as an entity.
	fn into_entity(self) -> Box<dyn Entity>;
}

impl<M: Model> IntoEntity for M {
	fn into_entity(self) -> Box<dyn Entity> {
		Box::new(self)
	}
}

impl IntoEntity for Box<dyn Entity> {
	fn into_entity(self) -> Box<dyn Entity> {
		self
	}
}
