//! Category rules: which measurements a category takes and their bounds.

use serde::Serialize;

/// Static measurement configuration for one product category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    /// Category name, the lookup key.
    pub category: &'static str,
    /// Whether listings in this category carry a weight.
    pub has_weight: bool,
    /// Whether listings in this category carry a quantity.
    pub has_quantity: bool,
    pub weight_unit: &'static str,
    pub quantity_unit: &'static str,
    /// Suggested weight shown in an empty form.
    pub weight_placeholder: &'static str,
    /// Suggested quantity shown in an empty form.
    pub quantity_placeholder: &'static str,
    pub weight_min: f64,
    pub weight_max: f64,
    pub weight_step: f64,
    pub quantity_min: u32,
    pub quantity_max: u32,
    pub quantity_step: u32,
}

macro_rules! measured {
    (
        $category:literal, $quantity_unit:literal,
        weight: $wmin:literal ..= $wmax:literal step $wstep:literal,
        quantity: $qmin:literal ..= $qmax:literal,
        placeholders: ($wph:literal, $qph:literal)
    ) => {
        CategoryRule {
            category: $category,
            has_weight: true,
            has_quantity: true,
            weight_unit: "g",
            quantity_unit: $quantity_unit,
            weight_placeholder: $wph,
            quantity_placeholder: $qph,
            weight_min: $wmin,
            weight_max: $wmax,
            weight_step: $wstep,
            quantity_min: $qmin,
            quantity_max: $qmax,
            quantity_step: 1,
        }
    };
}

/// Every category a vendor can list under. The last entry doubles as the
/// fallback for unknown names.
pub static CATEGORY_RULES: [CategoryRule; 10] = [
    measured!(
        "Puja Items & Accessories", "pieces",
        weight: 5.0 ..= 2000.0 step 5.0,
        quantity: 1 ..= 50,
        placeholders: ("100", "1")
    ),
    measured!(
        "Idols & Murtis", "pieces",
        weight: 50.0 ..= 10000.0 step 10.0,
        quantity: 1 ..= 10,
        placeholders: ("500", "1")
    ),
    measured!(
        "Incense & Dhoop", "sticks",
        weight: 10.0 ..= 1000.0 step 5.0,
        quantity: 1 ..= 500,
        placeholders: ("50", "20")
    ),
    measured!(
        "Sacred Books & Scriptures", "books",
        weight: 50.0 ..= 2000.0 step 10.0,
        quantity: 1 ..= 20,
        placeholders: ("300", "1")
    ),
    measured!(
        "Rudraksha & Malas", "beads",
        weight: 5.0 ..= 500.0 step 1.0,
        quantity: 1 ..= 1008,
        placeholders: ("25", "108")
    ),
    measured!(
        "Yantras & Sacred Geometry", "pieces",
        weight: 20.0 ..= 5000.0 step 5.0,
        quantity: 1 ..= 25,
        placeholders: ("200", "1")
    ),
    measured!(
        "Temple Decorations", "pieces",
        weight: 10.0 ..= 3000.0 step 5.0,
        quantity: 1 ..= 100,
        placeholders: ("150", "1")
    ),
    measured!(
        "Spiritual Jewelry", "pieces",
        weight: 1.0 ..= 200.0 step 1.0,
        quantity: 1 ..= 50,
        placeholders: ("15", "1")
    ),
    measured!(
        "Ayurvedic Products", "bottles",
        weight: 10.0 ..= 1000.0 step 5.0,
        quantity: 1 ..= 50,
        placeholders: ("100", "1")
    ),
    measured!(
        "Festival Items", "pieces",
        weight: 20.0 ..= 5000.0 step 10.0,
        quantity: 1 ..= 100,
        placeholders: ("200", "1")
    ),
];

impl CategoryRule {
    /// All rules in display order.
    pub fn all() -> &'static [CategoryRule] {
        &CATEGORY_RULES
    }

    /// The rule used when a category name matches nothing.
    pub fn fallback() -> &'static CategoryRule {
        &CATEGORY_RULES[CATEGORY_RULES.len() - 1]
    }

    /// Exact-match lookup.
    pub fn find(category: &str) -> Option<&'static CategoryRule> {
        CATEGORY_RULES.iter().find(|rule| rule.category == category)
    }

    /// Lookup that falls back to [`CategoryRule::fallback`].
    pub fn lookup(category: &str) -> &'static CategoryRule {
        Self::find(category).unwrap_or_else(Self::fallback)
    }

    /// Check if `category` names a rule in the table.
    pub fn is_known(category: &str) -> bool {
        Self::find(category).is_some()
    }

    pub fn weight_in_range(&self, weight: f64) -> bool {
        weight >= self.weight_min && weight <= self.weight_max
    }

    pub fn quantity_in_range(&self, quantity: u32) -> bool {
        quantity >= self.quantity_min && quantity <= self.quantity_max
    }

    /// "Weight must be between 5 and 500 g"
    pub fn weight_range_message(&self) -> String {
        format!(
            "Weight must be between {} and {} {}",
            self.weight_min, self.weight_max, self.weight_unit
        )
    }

    /// "Quantity must be between 1 and 1008 beads"
    pub fn quantity_range_message(&self) -> String {
        format!(
            "Quantity must be between {} and {} {}",
            self.quantity_min, self.quantity_max, self.quantity_unit
        )
    }
}
