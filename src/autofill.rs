//! Sample triples that fill in the add-relationship form as the user types.

/// An example `entity1 --[relationship]--> entity2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Example {
	/// Source entity.
	pub entity1: &'static str,
	/// Relationship label.
	pub relationship: &'static str,
	/// Target entity.
	pub entity2: &'static str,
}

const fn ex(entity1: &'static str, relationship: &'static str, entity2: &'static str) -> Example {
	Example {
		entity1,
		relationship,
		entity2,
	}
}

/// Suggestions, in lookup order.
pub const EXAMPLES: &[Example] = &[
	ex("Laptop", "belongs_to", "Electronics"),
	ex("Tablet", "is_a", "Electronics"),
	ex("iPhone", "belongs_to", "Electronics"),
	ex("Laptop", "sold_by", "Amazon"),
	ex("Amazon", "manages", "Flipkart"),
	ex("Customer1", "purchases_from", "Amazon"),
	ex("Electronics", "has_category", "Accessories"),
	ex("Seller1", "partner_of", "Amazon"),
	ex("Laptop", "priced_at", "999"),
	ex("Product1", "reviewed_by", "Customer1"),
];

fn same(a: &str, b: &str) -> bool {
	a.to_lowercase() == b.to_lowercase()
}

/// First example whose entity1 equals `entity1`, ignoring case.
pub fn suggest_for_entity(entity1: &str) -> Option<&'static Example> {
	EXAMPLES.iter().find(|e| same(e.entity1, entity1))
}

/// Target of the first example matching both `entity1` and `relationship`.
pub fn suggest_target(entity1: &str, relationship: &str) -> Option<&'static str> {
	EXAMPLES
		.iter()
		.find(|e| same(e.entity1, entity1) && same(e.relationship, relationship))
		.map(|e| e.entity2)
}
