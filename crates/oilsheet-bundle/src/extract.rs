//! MonoBehaviour extraction.
//!
//! Walks an [`ObjectSource`] once, decodes every MonoBehaviour that carries
//! typetree metadata and collects the results into a [`Document`].

use oilsheet_common::{Document, PathId};

use crate::{NameRules, ObjectSource, Result};

/// Extracts MonoBehaviour records from an object source.
pub struct Extractor<'a> {
    rules: &'a NameRules,
}

impl<'a> Extractor<'a> {
    /// Create an extractor with the given name rules.
    pub fn new(rules: &'a NameRules) -> Self {
        Self { rules }
    }

    /// Extract every readable MonoBehaviour into a document.
    ///
    /// `progress` is called with `(done, total)` object counts after each
    /// object, skipped ones included. A decode failure aborts the whole run.
    pub fn extract<S, F>(&self, source: &mut S, mut progress: F) -> Result<Document>
    where
        S: ObjectSource + ?Sized,
        F: FnMut(usize, usize),
    {
        let objects = source.objects();
        let total = objects.len();
        let mut document = Document::new();
        let mut skipped = 0usize;

        for (done, object) in objects.iter().enumerate() {
            if !object.is_readable_mono_behaviour() {
                tracing::trace!(
                    "Skipping object {} ({:?}, typetree: {})",
                    object.path_id,
                    object.class,
                    object.has_typetree
                );
                skipped += 1;
                progress(done + 1, total);
                continue;
            }

            let tree = source.read_typetree(object)?;
            let name = tree
                .get(oilsheet_common::NAME_FIELD)
                .and_then(|v| v.as_str())
                .unwrap_or_default();

            if self.rules.is_blacklisted(name) {
                tracing::debug!("Ignoring {:?}", name);
            } else {
                tracing::info!("Parsing {}", name);
            }

            if document.insert(object.path_id, tree).is_some() {
                tracing::warn!(
                    "Duplicate path id {} (file {}); keeping the later object",
                    object.path_id,
                    object.file_index
                );
            }

            progress(done + 1, total);
        }

        let oil_ids = self.oil_ids(&document);
        tracing::info!(
            "Extracted {} records ({} oils, {} other objects skipped)",
            document.len(),
            oil_ids.len(),
            skipped
        );
        document.set_oil_ids(oil_ids);

        Ok(document)
    }

    /// Collect the ids of oil records in ascending path id order.
    pub fn oil_ids(&self, document: &Document) -> Vec<PathId> {
        document
            .records()
            .filter(|record| {
                let Some(name) = record.name() else {
                    return false;
                };
                let is_oil = self.rules.is_oil(name);
                if is_oil {
                    tracing::debug!(
                        "Oil {} ({})",
                        record.id(),
                        self.rules.oil_stem(name).unwrap_or(name)
                    );
                }
                is_oil
            })
            .map(|record| record.id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySource, ObjectClass, ObjectInfo};
    use oilsheet_common::serde_json::json;

    fn sample_source() -> MemorySource {
        let mut source = MemorySource::new();
        source
            .push_mono_behaviour(20, json!({ "m_Name": "Enchantment_FireOil", "basePrice": 50 }))
            .push_mono_behaviour(-3, json!({ "m_Name": "EnchantmentDefinition_FireOil" }))
            .push_mono_behaviour(8, json!({ "m_Name": "Runner" }))
            .push_mono_behaviour(5, json!({ "m_Name": "Enchantment_IceOil" }))
            .push(
                ObjectInfo {
                    file_index: 0,
                    path_id: PathId(99),
                    class: ObjectClass::Other(1),
                    has_typetree: true,
                },
                None,
            )
            .push(
                ObjectInfo {
                    file_index: 0,
                    path_id: PathId(100),
                    class: ObjectClass::MonoBehaviour,
                    has_typetree: false,
                },
                None,
            );
        source
    }

    #[test]
    fn test_filters_and_keeps_blacklisted() {
        let rules = NameRules::default();
        let mut source = sample_source();

        let doc = Extractor::new(&rules).extract(&mut source, |_, _| {}).unwrap();

        assert_eq!(doc.len(), 4);
        assert!(doc.record(PathId(8)).is_some());
        assert!(doc.record(PathId(99)).is_none());
        assert!(doc.record(PathId(100)).is_none());
        assert_eq!(doc.record(PathId(20)).unwrap().get_i64("basePrice"), Some(50));
    }

    #[test]
    fn test_oil_ids_once_each_and_sorted() {
        let rules = NameRules::default();
        let mut source = sample_source();
        // Same oil again from a second serialized file.
        source.push(
            ObjectInfo {
                file_index: 1,
                path_id: PathId(20),
                class: ObjectClass::MonoBehaviour,
                has_typetree: true,
            },
            Some(json!({ "m_Name": "Enchantment_FireOil", "basePrice": 60 })),
        );

        let doc = Extractor::new(&rules).extract(&mut source, |_, _| {}).unwrap();

        assert_eq!(doc.oil_ids(), &[PathId(5), PathId(20)]);
        assert_eq!(doc.record(PathId(20)).unwrap().get_i64("basePrice"), Some(60));
    }

    #[test]
    fn test_progress_reports_every_object() {
        let rules = NameRules::default();
        let mut source = sample_source();
        let mut calls = Vec::new();

        Extractor::new(&rules)
            .extract(&mut source, |done, total| calls.push((done, total)))
            .unwrap();

        assert_eq!(calls.len(), 6);
        assert_eq!(calls.last(), Some(&(6, 6)));
    }

    #[test]
    fn test_deterministic() {
        let rules = NameRules::default();
        let extractor = Extractor::new(&rules);

        let first = extractor.extract(&mut sample_source(), |_, _| {}).unwrap();
        let second = extractor.extract(&mut sample_source(), |_, _| {}).unwrap();

        let mut a = Vec::new();
        let mut b = Vec::new();
        first.write_pretty(&mut a).unwrap();
        second.write_pretty(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_failure_aborts() {
        let rules = NameRules::default();
        let mut source = sample_source();
        source.push(
            ObjectInfo {
                file_index: 0,
                path_id: PathId(7),
                class: ObjectClass::MonoBehaviour,
                has_typetree: true,
            },
            None,
        );

        let err = Extractor::new(&rules)
            .extract(&mut source, |_, _| {})
            .unwrap_err();
        assert!(matches!(err, crate::Error::Decode { path_id: PathId(7), .. }));
    }
}
