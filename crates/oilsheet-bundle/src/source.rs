//! Object sources.
//!
//! Decoding the Unity container format is left to an external library. The
//! extractor only needs to enumerate objects and read one typetree at a
//! time, which is what [`ObjectSource`] describes.

use std::ops::Range;

use oilsheet_common::{Map, PathId, Value};

use crate::{Error, Result};

/// Unity class of an object, as far as the extractor cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    /// Class id 114, designer-authored script data.
    MonoBehaviour,
    /// Any other class id.
    Other(i32),
}

impl ObjectClass {
    /// Unity's class id for MonoBehaviour.
    pub const MONO_BEHAVIOUR_ID: i32 = 114;

    /// Classify a raw class id.
    #[inline]
    pub fn from_id(id: i32) -> Self {
        if id == Self::MONO_BEHAVIOUR_ID {
            Self::MonoBehaviour
        } else {
            Self::Other(id)
        }
    }
}

/// Metadata for one object in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Index of the serialized file inside the bundle.
    pub file_index: usize,
    /// Object path id.
    pub path_id: PathId,
    /// Object class.
    pub class: ObjectClass,
    /// Whether embedded typetree metadata is available for this object.
    pub has_typetree: bool,
}

impl ObjectInfo {
    /// Build object metadata from the raw fields of a serialized file's
    /// object table.
    pub fn from_raw(file_index: usize, path_id: i64, class_id: i32, has_typetree: bool) -> Self {
        Self {
            file_index,
            path_id: PathId(path_id),
            class: ObjectClass::from_id(class_id),
            has_typetree,
        }
    }

    /// Check if the extractor should decode this object.
    #[inline]
    pub fn is_readable_mono_behaviour(&self) -> bool {
        self.class == ObjectClass::MonoBehaviour && self.has_typetree
    }
}

/// Index into a serialized file's type table, or `None` for a negative id.
#[inline]
pub fn type_index(type_id: i32) -> Option<usize> {
    usize::try_from(type_id).ok()
}

/// Byte range of an object's data inside its serialized file.
///
/// Object offsets are relative to the file's data section. Returns `None`
/// when the range overflows or ends past `file_len`.
pub fn object_data_range(
    data_offset: u64,
    offset: u64,
    size: u64,
    file_len: usize,
) -> Option<Range<usize>> {
    let start = data_offset.checked_add(offset)?;
    let end = start.checked_add(size)?;
    let range = usize::try_from(start).ok()?..usize::try_from(end).ok()?;
    (range.end <= file_len).then_some(range)
}

/// A container of decodable objects.
pub trait ObjectSource {
    /// List every object in enumeration order.
    fn objects(&self) -> Vec<ObjectInfo>;

    /// Decode one object's typetree into a field mapping.
    fn read_typetree(&mut self, object: &ObjectInfo) -> Result<Map<String, Value>>;
}

/// An object source over typetrees that were decoded elsewhere.
///
/// Used to feed pre-decoded data through the extractor, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    objects: Vec<(ObjectInfo, Option<Value>)>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a MonoBehaviour with the given typetree.
    pub fn push_mono_behaviour(&mut self, path_id: i64, tree: Value) -> &mut Self {
        self.push(
            ObjectInfo {
                file_index: 0,
                path_id: PathId(path_id),
                class: ObjectClass::MonoBehaviour,
                has_typetree: true,
            },
            Some(tree),
        )
    }

    /// Add an arbitrary object; `tree` is returned when it is read.
    pub fn push(&mut self, info: ObjectInfo, tree: Option<Value>) -> &mut Self {
        self.objects.push((info, tree));
        self
    }
}

impl ObjectSource for MemorySource {
    fn objects(&self) -> Vec<ObjectInfo> {
        self.objects.iter().map(|(info, _)| *info).collect()
    }

    fn read_typetree(&mut self, object: &ObjectInfo) -> Result<Map<String, Value>> {
        let tree = self
            .objects
            .iter()
            .find(|(info, _)| info == object)
            .and_then(|(_, tree)| tree.clone())
            .ok_or_else(|| Error::Decode {
                path_id: object.path_id,
                message: "no typetree data".to_string(),
            })?;

        match tree {
            Value::Object(map) => Ok(map),
            _ => Err(Error::NotAMapping(object.path_id)),
        }
    }
}
