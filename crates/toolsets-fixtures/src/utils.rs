//! Helpers for working with fixture producers.

/// Returns the first instance produced by `producer` that matches `predicate`.
///
/// Producers returned by [`FixtureRegistry::register`](crate::FixtureRegistry::register)
/// stay typed, so tests can pick a specific seeded instance.
///
/// # Example
///
/// ```
/// use toolsets_fixtures::find_instance;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Role {
///     id: i64,
///     name: &'static str,
/// }
///
/// fn roles() -> Vec<Role> {
///     vec![Role { id: 1, name: "admin" }, Role { id: 2, name: "user" }]
/// }
///
/// let user = find_instance(roles, |r| r.name == "user");
/// assert_eq!(user.map(|r| r.id), Some(2));
/// assert!(find_instance(roles, |r| r.name == "guest").is_none());
/// ```
pub fn find_instance<F, I, P>(producer: F, predicate: P) -> Option<I::Item>
where
	F: FnOnce() -> I,
	I: IntoIterator,
	P: FnMut(&I::Item) -> bool,
{
	producer().into_iter().find(predicate)
}
