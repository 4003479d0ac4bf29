//! Record name matching.

use regex::Regex;

use crate::Result;

/// Oil item records: `Enchantment_<Stem>Oil`.
pub const OIL_PATTERN: &str = r"^Enchantment_(.*)Oil";

/// Oil items and their enchantment definitions, selected for per-record dumps.
pub const DUMP_PATTERN: &str = r"^Enchantment(Definition)?_(.*)Oil";

/// Level-generation node names that appear thousands of times and carry no
/// item data. They are kept in the document but never dumped.
pub const BLACKLIST: &[&str] = &[
    "",
    "Meta And Loading Setup Node",
    "Runner",
    "Create Start Area Node",
    "Finalize Level Node",
    "Spawn Pool Objects Node",
    "Spawn Enemies Node",
    "Reg Static Units And Mutate Units Node",
    "Spawn Player Node",
    "Build Nav Mesh Node",
    "Await Nav Mesh Build Node",
    "Show Level Node",
    "Setup Loot Node",
    "Create Main Path Node",
    "Spawn Events Node",
    "Add extra rooms",
    "Add Barricades Node",
    "Add extension rooms",
];

/// Name rules applied while extracting.
#[derive(Debug, Clone)]
pub struct NameRules {
    oil: Regex,
    dump: Regex,
    blacklist: &'static [&'static str],
}

impl NameRules {
    /// Build rules from explicit patterns.
    pub fn new(oil: &str, dump: &str, blacklist: &'static [&'static str]) -> Result<Self> {
        Ok(Self {
            oil: Regex::new(oil)?,
            dump: Regex::new(dump)?,
            blacklist,
        })
    }

    /// Check if a record name denotes an oil item.
    #[inline]
    pub fn is_oil(&self, name: &str) -> bool {
        self.oil.is_match(name)
    }

    /// Get the stem of an oil name (`Fire` for `Enchantment_FireOil`).
    pub fn oil_stem<'n>(&self, name: &'n str) -> Option<&'n str> {
        self.oil
            .captures(name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Check if a record should be written as a per-record dump.
    #[inline]
    pub fn is_dumped(&self, name: &str) -> bool {
        self.dump.is_match(name)
    }

    /// Check if a record name is a known uninteresting node.
    #[inline]
    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.contains(&name)
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            oil: Regex::new(OIL_PATTERN).expect("built-in oil pattern is valid"),
            dump: Regex::new(DUMP_PATTERN).expect("built-in dump pattern is valid"),
            blacklist: BLACKLIST,
        }
    }
}
