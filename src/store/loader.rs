use super::schema::{FieldKind, Stream};
use super::Column;
use crate::error::{SladError, SladResult};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

pub struct StreamData {
    pub stream: Stream,
    pub len: usize,
    pub columns: Vec<(String, Column)>,
}

pub fn load_stream_file<P: AsRef<Path>>(stream: Stream, path: P) -> SladResult<StreamData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SladError::MissingStream {
            stream: stream.to_string(),
            path: path.display().to_string(),
        },
        _ => SladError::Io(e),
    })?;
    debug!("   Loading stream '{}' from: {}", stream, path.display());
    load_stream(stream, file)
}

/// Reads one stream's CSV, keeping only the declared fields (in schema order).
pub fn load_stream<R: Read>(stream: Stream, reader: R) -> SladResult<StreamData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let specs = stream.fields();

    let mut positions = Vec::with_capacity(specs.len());
    for spec in specs {
        let pos = headers
            .iter()
            .position(|h| h == spec.name)
            .ok_or_else(|| SladError::Schema {
                stream: stream.to_string(),
                field: spec.name.to_string(),
                detail: "column not found in header".to_string(),
            })?;
        positions.push(pos);
    }

    let mut columns: Vec<Column> = specs.iter().map(|s| Column::empty(s.kind)).collect();
    let mut len = 0;

    for (row, result) in rdr.records().enumerate() {
        let rec = result?;
        // 1-based file line; the header is line 1
        let line = rec
            .position()
            .map(|p| p.line())
            .unwrap_or(row as u64 + 2);
        for ((spec, &pos), column) in specs.iter().zip(&positions).zip(columns.iter_mut()) {
            let raw = rec.get(pos).unwrap_or("");
            column.push_parsed(raw).map_err(|_| SladError::Parse {
                stream: stream.to_string(),
                field: spec.name.to_string(),
                line,
                value: raw.to_string(),
            })?;
        }
        len += 1;
    }

    debug!(
        "   -> Stream '{}': {} records, {} fields.",
        stream,
        len,
        specs.len()
    );

    Ok(StreamData {
        stream,
        len,
        columns: specs
            .iter()
            .map(|s| s.name.to_string())
            .zip(columns)
            .collect(),
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Option<Vec<f64>> {
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(';').map(|v| v.trim().parse().ok()).collect()
}

impl Column {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::I32 => Column::I32(Vec::new()),
            FieldKind::F64 => Column::F64(Vec::new()),
            FieldKind::Bool => Column::Bool(Vec::new()),
            FieldKind::List => Column::List(Vec::new()),
        }
    }

    fn push_parsed(&mut self, raw: &str) -> Result<(), ()> {
        match self {
            Column::I32(v) => v.push(raw.parse().map_err(|_| ())?),
            Column::F64(v) => v.push(raw.parse().map_err(|_| ())?),
            Column::Bool(v) => v.push(parse_bool(raw).ok_or(())?),
            Column::List(v) => v.push(parse_list(raw).ok_or(())?),
        }
        Ok(())
    }
}
