pub mod loader;
pub mod schema;

use self::loader::{load_stream_file, StreamData};
pub use self::schema::{FieldKind, FieldSpec, Stream};
use crate::config::StreamSwitches;
use crate::error::{SladError, SladResult};
use crate::selector::event::RawEvent;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Typed storage for one field across all records.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    I32(Vec<i32>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    List(Vec<Vec<f64>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::I32(v) => v.len(),
            Column::F64(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::List(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Column::I32(_) => FieldKind::I32,
            Column::F64(_) => FieldKind::F64,
            Column::Bool(_) => FieldKind::Bool,
            Column::List(_) => FieldKind::List,
        }
    }
}

/// Anything the event loop can pull logical records from by index.
pub trait RecordSource: Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn event(&self, index: usize) -> RawEvent;
}

impl RecordSource for [RawEvent] {
    fn len(&self) -> usize {
        <[RawEvent]>::len(self)
    }

    fn event(&self, index: usize) -> RawEvent {
        self[index].clone()
    }
}

impl RecordSource for Vec<RawEvent> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn event(&self, index: usize) -> RawEvent {
        self[index].clone()
    }
}

/// The primary stream plus every loaded satellite, joined by record index and
/// exposed through one by-name read interface.
#[derive(Debug, Default)]
pub struct EventStore {
    len: usize,
    columns: HashMap<String, Column>,
    streams: Vec<Stream>,
}

impl EventStore {
    /// Empty store of `len` records; columns are added with [`EventStore::insert_column`].
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: HashMap::new(),
            streams: Vec::new(),
        }
    }

    /// Opens the primary file and every satellite the switches enable.
    /// A satellite that is enabled but missing, malformed, or of a different
    /// length than the primary aborts the open.
    pub fn open<P: AsRef<Path>>(main_path: P, switches: &StreamSwitches) -> SladResult<Self> {
        let main_path = main_path.as_ref();
        info!("📂 Opening primary stream: {}", main_path.display());

        let primary = load_stream_file(Stream::Events, main_path)?;
        let mut store = EventStore::new(primary.len);
        store.attach(primary)?;

        for stream in Stream::satellites() {
            if !stream.is_enabled(switches) {
                info!("   Skipping stream '{}' (disabled)", stream);
                continue;
            }
            let path = satellite_path(main_path, stream);
            info!("🔗 Joining stream '{}': {}", stream, path.display());
            let data = load_stream_file(stream, &path)?;
            store.attach(data)?;
        }

        info!(
            "   Store ready: {} records across {} streams.",
            store.len,
            store.streams.len()
        );
        Ok(store)
    }

    fn attach(&mut self, data: StreamData) -> SladResult<()> {
        if data.len != self.len {
            return Err(SladError::Join {
                stream: data.stream.to_string(),
                expected: self.len,
                found: data.len,
            });
        }
        for (name, column) in data.columns {
            self.insert_column(name, column)?;
        }
        self.streams.push(data.stream);
        Ok(())
    }

    pub fn insert_column(&mut self, name: impl Into<String>, column: Column) -> SladResult<()> {
        let name = name.into();
        let stream = Stream::owner_of(&name)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "memory".to_string());

        if column.len() != self.len {
            return Err(SladError::Join {
                stream,
                expected: self.len,
                found: column.len(),
            });
        }
        if let Some(owner) = Stream::owner_of(&name) {
            let declared = owner.fields().iter().find(|f| f.name == name).map(|f| f.kind);
            if declared != Some(column.kind()) {
                return Err(SladError::Schema {
                    stream,
                    field: name,
                    detail: format!("expected {:?}, got {:?}", declared, column.kind()),
                });
            }
        }
        if self.columns.contains_key(&name) {
            return Err(SladError::Schema {
                stream,
                field: name,
                detail: "field provided by more than one stream".to_string(),
            });
        }
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn get_i32(&self, name: &str, index: usize) -> Option<i32> {
        match self.columns.get(name)? {
            Column::I32(v) => v.get(index).copied(),
            _ => None,
        }
    }

    pub fn get_f64(&self, name: &str, index: usize) -> Option<f64> {
        match self.columns.get(name)? {
            Column::F64(v) => v.get(index).copied(),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str, index: usize) -> Option<bool> {
        match self.columns.get(name)? {
            Column::Bool(v) => v.get(index).copied(),
            _ => None,
        }
    }

    pub fn get_list(&self, name: &str, index: usize) -> Option<&[f64]> {
        match self.columns.get(name)? {
            Column::List(v) => v.get(index).map(Vec::as_slice),
            _ => None,
        }
    }
}

impl RecordSource for EventStore {
    fn len(&self) -> usize {
        self.len
    }

    fn event(&self, index: usize) -> RawEvent {
        RawEvent::from_store(self, index)
    }
}

/// `runs/AmBe_v2.csv` + `_veto_cluster` -> `runs/AmBe_v2_veto_cluster.csv`.
pub fn satellite_path(main_path: &Path, stream: Stream) -> PathBuf {
    let stem = main_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = stream.suffix().unwrap_or("");
    main_path.with_file_name(format!("{}{}.csv", stem, suffix))
}
