//! Unity bundle adapter backed by `rabex`.
//!
//! The bundle is memory-mapped, every serialized file inside it is loaded,
//! and objects are decoded with their embedded typetree. Objects of files
//! built without typetrees report `has_typetree: false` and are skipped by
//! the extractor.

use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use oilsheet_common::{Map, Value};
use rabex::files::bundlefile::{BundleFileReader, ExtractionConfig};
use rabex::files::SerializedFile;

use crate::source::{object_data_range, type_index};
use crate::{Error, ObjectInfo, ObjectSource, Result};

/// Resource payloads stored next to serialized files; never typetree data.
const RESOURCE_SUFFIXES: &[&str] = &[".resS", ".resource"];

/// A Unity asset bundle opened for extraction.
pub struct UnityBundle {
    path: PathBuf,
    files: Vec<LoadedFile>,
}

struct LoadedFile {
    name: String,
    file: SerializedFile,
    data: Vec<u8>,
}

impl UnityBundle {
    /// Open a bundle and load all serialized files it contains.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let open_error = |e: &dyn std::fmt::Display| Error::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut reader = BundleFileReader::from_reader(
            Cursor::new(&mmap[..]),
            &ExtractionConfig::default(),
        )
        .map_err(|e| open_error(&e))?;

        let mut files = Vec::new();
        while let Some(entry) = reader.next() {
            let mut entry = entry.map_err(|e| open_error(&e))?;
            let name = entry.path.clone();
            if RESOURCE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
                tracing::debug!("Skipping resource file {}", name);
                continue;
            }

            let data = entry.read_vec().map_err(|e| open_error(&e))?;
            let file = SerializedFile::from_reader(&mut Cursor::new(data.as_slice()))
                .map_err(|e| open_error(&e))?;

            tracing::debug!("Loaded serialized file {} ({} bytes)", name, data.len());
            files.push(LoadedFile { name, file, data });
        }

        tracing::info!(
            "Opened {} with {} serialized files",
            path.display(),
            files.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            files,
        })
    }

    /// Get the bundle path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the names of the serialized files inside the bundle.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

impl ObjectSource for UnityBundle {
    fn objects(&self) -> Vec<ObjectInfo> {
        self.files
            .iter()
            .enumerate()
            .flat_map(|(file_index, loaded)| {
                loaded.file.objects().map(move |object| {
                    let has_typetree = type_index(object.m_TypeID)
                        .and_then(|index| loaded.file.m_Types.get(index))
                        .is_some_and(|ty| ty.m_Nodes.is_some());

                    ObjectInfo::from_raw(
                        file_index,
                        object.m_PathID,
                        object.m_ClassID as i32,
                        has_typetree,
                    )
                })
            })
            .collect()
    }

    fn read_typetree(&mut self, info: &ObjectInfo) -> Result<Map<String, Value>> {
        let decode_error = |message: String| Error::Decode {
            path_id: info.path_id,
            message,
        };

        let loaded = self
            .files
            .get(info.file_index)
            .ok_or_else(|| decode_error(format!("no serialized file {}", info.file_index)))?;
        let object = loaded
            .file
            .objects()
            .find(|o| o.m_PathID == info.path_id.get())
            .ok_or_else(|| decode_error("object not found".to_string()))?;
        let typetree = type_index(object.m_TypeID)
            .and_then(|index| loaded.file.m_Types.get(index))
            .and_then(|ty| ty.m_Nodes.as_ref())
            .ok_or_else(|| decode_error("no typetree".to_string()))?;

        let range = object_data_range(
            loaded.file.m_Header.m_DataOffset as u64,
            object.m_Offset as u64,
            object.m_Size as u64,
            loaded.data.len(),
        )
        .ok_or_else(|| {
            decode_error(format!(
                "object data at {}+{} ({} bytes) is out of bounds",
                loaded.file.m_Header.m_DataOffset, object.m_Offset, object.m_Size
            ))
        })?;
        let bytes = &loaded.data[range];

        let value: Value = rabex::serde_typetree::from_reader_endianed(
            &mut Cursor::new(bytes),
            typetree,
            loaded.file.m_Header.m_Endianess,
        )
        .map_err(|e| decode_error(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::NotAMapping(info.path_id)),
        }
    }
}
