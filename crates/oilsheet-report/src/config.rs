//! Report configuration tables.
//!
//! All tables are immutable and handed to [`crate::build_report`] through a
//! [`ReportConfig`]. [`ReportConfig::default`] returns the tables for the
//! current game version.

/// Name of the sheet listing every oil.
pub const COMPARISON_SHEET: &str = "Comparison Table";

/// Catch-all category for rows matching no predicate.
pub const MISC_CATEGORY: &str = "MISC";

/// Column width applied to every used column of every sheet.
pub const DEFAULT_COLUMN_WIDTH: f64 = 20.0;

/// Internal field name to column header.
pub const COLUMN_LABELS: &[(&str, &str)] = &[
    ("displayName", "Name"),
    ("includedInDemo", "Demo"),
    ("includedInEarlyAccess", "Early Access"),
    ("basePrice", "Base Price"),
    ("CostsDurability", "Costs Durability"),
    ("Kick", "Recoil"),
    ("Reload Speed", "Reload Speed"),
    ("Damage", "Damage"),
    ("Critical damage chance", "Crit Chance"),
    ("Disables aiming", "Disables Aiming"),
    ("Projectile drag multiplier", "More Drag"),
    ("Spread", "Spread"),
    ("Loot Chance Multiplier", "Loot\nChance\nMultiplier"),
    ("Bullet bounces", "Bullet Bounces"),
    ("Time scale", "Bullet Speed"),
    ("Damage%", "Damage%"),
    ("Bullet size", "Bullet Size"),
    ("Bullet drop", "Bullet Drop"),
    ("No money drops", "No Money Drops"),
    ("Move speed", "Move Speed"),
    ("Rounds per minute", "RPM"),
    ("Bullet Penetration", "Bullet Penetration"),
    ("Jump power", "Jump Power"),
    ("Max Durability", "Max Durability"),
    ("Number of projectiles", "Projectile Amount"),
    ("Projectile bounciness", "Projectile Bounciness"),
    ("Chance this consumes ammo", "Ammo Consume Chance"),
    ("Chance to consume extra ammo", "Chance to Consume Extra Ammo"),
    ("No organs drop", "No Organs Drop"),
    ("Durability Per Shot", "Durability Per Shot"),
    ("Projectile force multiplier", "Projectile Force Multiplier"),
    ("Accuracy when moving", "Accuracy When Moving"),
    ("Enchantment Random Oil", "Enchantment Random Oil"),
    (MISC_CATEGORY, MISC_CATEGORY),
];

/// Fields rendered as `Yes` / empty instead of 1 / 0.
pub const FLAG_FIELDS: &[&str] = &[
    "includedInDemo",
    "includedInEarlyAccess",
    "CostsDurability",
    "Disables aiming",
    "No money drops",
    "No organs drop",
];

/// Sign test applied to a row value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Value < 0.
    Negative,
    /// Value > 0.
    Positive,
    /// Value is present and non-zero.
    Present,
}

impl Predicate {
    /// Test a numeric value. Missing values are passed as 0.
    #[inline]
    pub fn test(self, value: f64) -> bool {
        match self {
            Self::Negative => value < 0.0,
            Self::Positive => value > 0.0,
            Self::Present => value != 0.0,
        }
    }
}

/// A named row group, defined by a field and a predicate on its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub field: &'static str,
    pub predicate: Predicate,
}

impl Category {
    pub const fn new(field: &'static str, predicate: Predicate) -> Self {
        Self { field, predicate }
    }
}

/// Categories in sheet order. Each describes a beneficial effect.
pub const CATEGORIES: &[Category] = &[
    Category::new("Kick", Predicate::Negative),
    Category::new("Reload Speed", Predicate::Positive),
    Category::new("Damage", Predicate::Positive),
    Category::new("Critical damage chance", Predicate::Positive),
    Category::new("Spread", Predicate::Negative),
    Category::new("Bullet bounces", Predicate::Positive),
    Category::new("Time scale", Predicate::Positive),
    Category::new("Damage%", Predicate::Positive),
    Category::new("Bullet size", Predicate::Positive),
    Category::new("Rounds per minute", Predicate::Positive),
    Category::new("Bullet Penetration", Predicate::Positive),
    Category::new("Max Durability", Predicate::Positive),
    Category::new("Number of projectiles", Predicate::Positive),
    Category::new("Chance this consumes ammo", Predicate::Negative),
];

/// Tables driving row construction, grouping and layout.
#[derive(Debug, Clone, Copy)]
pub struct ReportConfig {
    pub column_labels: &'static [(&'static str, &'static str)],
    pub flag_fields: &'static [&'static str],
    pub categories: &'static [Category],
    pub column_width: f64,
}

impl ReportConfig {
    /// Get the header for a field, or the field name itself when unmapped.
    pub fn column_label<'a>(&self, field: &'a str) -> &'a str {
        self.column_labels
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, label)| *label)
            .unwrap_or(field)
    }

    /// Check if a field renders as a Yes/empty flag.
    #[inline]
    pub fn is_flag(&self, field: &str) -> bool {
        self.flag_fields.contains(&field)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column_labels: COLUMN_LABELS,
            flag_fields: FLAG_FIELDS,
            categories: CATEGORIES,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
