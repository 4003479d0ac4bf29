//! Typed views of the oil reference chain.
//!
//! An oil item references one enchantment definition, which lists modifiers,
//! each of which references an attribute record supplying a display name:
//!
//! ```text
//! Enchantment_<X>Oil ──appliesEnchantment──▶ EnchantmentDefinition_<X>Oil
//!                                                 │ modifiersApplied[]
//!                                                 ▼
//!                                   { attribute ──▶ <attribute record>, modType, value }
//! ```
//!
//! Every lookup goes through [`Document::resolve`], so a dangling reference
//! is reported with both ends named.

use oilsheet_common::{Document, PathId, Record, Value};

use crate::{Error, Result};

/// Attribute name whose multiplicative modifiers get their own column.
pub const DAMAGE_ATTRIBUTE: &str = "Damage";

/// Column name for multiplicative damage modifiers.
pub const DAMAGE_PERCENT: &str = "Damage%";

/// How a modifier combines with the base stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierMode {
    /// 100: added to the stat, or a boolean toggle.
    Additive,
    /// 200: multiplies the stat.
    Multiplicative,
    /// 300: bullet size class.
    SizeClass,
    /// Any other code.
    Other(i64),
}

impl ModifierMode {
    /// Decode a `modType` code.
    pub fn from_code(code: i64) -> Self {
        match code {
            100 => Self::Additive,
            200 => Self::Multiplicative,
            300 => Self::SizeClass,
            other => Self::Other(other),
        }
    }

    /// Get the `modType` code.
    pub fn code(self) -> i64 {
        match self {
            Self::Additive => 100,
            Self::Multiplicative => 200,
            Self::SizeClass => 300,
            Self::Other(code) => code,
        }
    }
}

/// An `Enchantment_*Oil` item record.
#[derive(Debug, Clone, Copy)]
pub struct OilItem<'a> {
    record: Record<'a>,
}

impl<'a> OilItem<'a> {
    /// Look up an oil item by an id taken from the document's `oil_ids`.
    pub fn load(document: &'a Document, id: PathId) -> Result<Self> {
        let record = document.record(id).ok_or(Error::MissingOil(id))?;
        Ok(Self { record })
    }

    /// Get the underlying record.
    #[inline]
    pub fn record(&self) -> Record<'a> {
        self.record
    }

    /// In-game display name.
    pub fn display_name(&self) -> Result<&'a str> {
        Ok(self.record.str_field("displayName")?)
    }

    /// Resolve the enchantment definition this oil applies.
    pub fn definition(&self, document: &'a Document) -> Result<EnchantmentDefinition<'a>> {
        let target = self.record.reference("appliesEnchantment")?;
        let record = document.resolve(target, self.record.id())?;
        Ok(EnchantmentDefinition { record })
    }
}

/// An `EnchantmentDefinition_*Oil` record.
#[derive(Debug, Clone, Copy)]
pub struct EnchantmentDefinition<'a> {
    record: Record<'a>,
}

impl<'a> EnchantmentDefinition<'a> {
    /// Get the underlying record.
    #[inline]
    pub fn record(&self) -> Record<'a> {
        self.record
    }

    /// Whether applying the oil costs weapon durability.
    pub fn costs_durability(&self) -> Result<&'a Value> {
        Ok(self.record.field("CostsDurability")?)
    }

    /// Parse the `modifiersApplied` entries.
    pub fn modifiers(&self) -> Result<Vec<Modifier>> {
        let definition = self.record.id();
        self.record
            .array_field("modifiersApplied")?
            .iter()
            .enumerate()
            .map(|(index, entry)| -> Result<Modifier> {
                let fields = entry
                    .as_object()
                    .ok_or(Error::InvalidModifier { definition, index })?;
                let entry = Record::new(definition, fields);

                Ok(Modifier {
                    attribute: entry.reference("attribute")?,
                    mode: ModifierMode::from_code(entry.i64_field("modType")?),
                    value: entry.field("value")?.clone(),
                })
            })
            .collect()
    }
}

/// One stat adjustment applied by an enchantment.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    /// Attribute record supplying the stat name.
    pub attribute: PathId,
    /// Combination mode.
    pub mode: ModifierMode,
    /// Raw value.
    pub value: Value,
}

impl Modifier {
    /// Resolve the attribute's display name.
    ///
    /// Uses `label`; `itemDescriptionName` is only a fallback because it is
    /// missing or stale on several attribute records.
    pub fn attribute_name<'a>(
        &self,
        document: &'a Document,
        definition: PathId,
    ) -> Result<&'a str> {
        let attribute = document.resolve(self.attribute, definition)?;
        if let Some(label) = attribute.get_str("label") {
            return Ok(label);
        }

        match attribute.get_str("itemDescriptionName") {
            Some(name) => {
                tracing::warn!(
                    "Attribute {} has no label; using itemDescriptionName {:?}",
                    attribute.id(),
                    name
                );
                Ok(name)
            }
            None => Ok(attribute.str_field("label")?),
        }
    }

    /// Column name for this modifier given its attribute name.
    ///
    /// Multiplicative damage is kept apart from flat damage.
    pub fn column_name<'n>(&self, attribute_name: &'n str) -> &'n str {
        if attribute_name == DAMAGE_ATTRIBUTE && self.mode == ModifierMode::Multiplicative {
            DAMAGE_PERCENT
        } else {
            attribute_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{fields, reference};
    use oilsheet_common::serde_json::json;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.insert(
            PathId(1),
            fields(json!({
                "m_Name": "Enchantment_FireOil",
                "displayName": "Fire Oil",
                "appliesEnchantment": reference(2),
            })),
        );
        doc.insert(
            PathId(2),
            fields(json!({
                "m_Name": "EnchantmentDefinition_FireOil",
                "CostsDurability": 1,
                "modifiersApplied": [
                    { "attribute": reference(3), "modType": 200, "value": 10.0 },
                    { "attribute": reference(4), "modType": 100, "value": 2 },
                ],
            })),
        );
        doc.insert(PathId(3), fields(json!({ "m_Name": "Damage", "label": "Damage" })));
        doc.insert(
            PathId(4),
            fields(json!({ "m_Name": "Bounce", "itemDescriptionName": "Bullet bounces" })),
        );
        doc
    }

    #[test]
    fn test_chain() {
        let doc = sample();
        let oil = OilItem::load(&doc, PathId(1)).unwrap();
        assert_eq!(oil.display_name().unwrap(), "Fire Oil");

        let definition = oil.definition(&doc).unwrap();
        assert_eq!(definition.record().id(), PathId(2));

        let modifiers = definition.modifiers().unwrap();
        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[0].mode, ModifierMode::Multiplicative);
        assert_eq!(modifiers[0].attribute_name(&doc, PathId(2)).unwrap(), "Damage");
        assert_eq!(modifiers[1].attribute_name(&doc, PathId(2)).unwrap(), "Bullet bounces");
    }

    #[test]
    fn test_damage_percent_only_for_multiplicative() {
        let mut modifier = Modifier {
            attribute: PathId(3),
            mode: ModifierMode::Multiplicative,
            value: json!(10),
        };
        assert_eq!(modifier.column_name("Damage"), "Damage%");
        assert_eq!(modifier.column_name("Spread"), "Spread");

        modifier.mode = ModifierMode::Additive;
        assert_eq!(modifier.column_name("Damage"), "Damage");
    }

    #[test]
    fn test_dangling_definition() {
        let mut doc = sample();
        doc.insert(
            PathId(1),
            fields(json!({ "displayName": "Fire Oil", "appliesEnchantment": reference(77) })),
        );

        let oil = OilItem::load(&doc, PathId(1)).unwrap();
        let err = oil.definition(&doc).unwrap_err();
        assert!(matches!(
            err,
            Error::Common(oilsheet_common::Error::MissingRecord {
                id: PathId(77),
                referenced_by: PathId(1),
            })
        ));
    }

    #[test]
    fn test_dangling_oil_id() {
        let doc = sample();
        let err = OilItem::load(&doc, PathId(99)).unwrap_err();
        assert!(matches!(err, Error::MissingOil(PathId(99))));
        assert!(err.to_string().contains("oil_ids"));
    }

    #[test]
    fn test_invalid_modifier_entry() {
        let mut doc = sample();
        doc.insert(
            PathId(2),
            fields(json!({ "CostsDurability": 0, "modifiersApplied": [42] })),
        );

        let definition = OilItem::load(&doc, PathId(1))
            .unwrap()
            .definition(&doc)
            .unwrap();
        assert!(matches!(
            definition.modifiers(),
            Err(Error::InvalidModifier { index: 0, .. })
        ));
    }

    #[test]
    fn test_mode_codes() {
        for code in [100, 200, 300, 400] {
            assert_eq!(ModifierMode::from_code(code).code(), code);
        }
        assert_eq!(ModifierMode::from_code(400), ModifierMode::Other(400));
    }
}
