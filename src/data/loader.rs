use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{Categorical, CelestialBody, CellValue, Metric, Player, PlayerTable};

/// Columns nobody downstream reads: coordinates and the internal serial number.
pub const DROPPED_COLUMNS: [&str; 3] = ["lat", "lon", "sn"];

pub const VENUS_COLUMN: &str = "venus_cycle";

// ---------------------------------------------------------------------------
// Once-cached loader
// ---------------------------------------------------------------------------

/// Reads one input file at most once per session and hands out the shared,
/// read-only table on every call.
#[derive(Debug)]
pub struct DatasetLoader {
    path: PathBuf,
    /// Held for the whole first read, so concurrent callers wait for it
    /// instead of reading the file again.
    cache: Mutex<Option<Arc<PlayerTable>>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetLoader {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table, or return the cached one.
    ///
    /// Failures are not cached: a later call reads the file again.
    pub fn load(&self) -> Result<Arc<PlayerTable>, DataError> {
        // The slot is only written after a complete read, so a poisoned lock
        // still holds either nothing or a whole table.
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = cache.as_ref() {
            log::debug!("Using cached table for {}", self.path.display());
            return Ok(Arc::clone(table));
        }

        let table = load_file(&self.path).map_err(|e| {
            log::error!("Failed to load {}: {e:#}", self.path.display());
            DataError::DataUnavailable {
                path: self.path.clone(),
                reason: format!("{e:#}"),
            }
        })?;

        log::info!(
            "Loaded {} players from {} with pass-through columns {:?}",
            table.len(),
            self.path.display(),
            table.extra_columns
        );
        let unclassified = table.out_of_vocabulary_rows();
        if unclassified > 0 {
            log::warn!("{unclassified} rows carry sign or Venus values outside the vocabulary");
        }

        let table = Arc::new(table);
        *cache = Some(Arc::clone(&table));
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one player per line (the usual input)
/// * `.json`    – `[{ "gp": 82, "sun": "LEO", ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<PlayerTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Where each required column sits in the source header.
struct Layout {
    metrics: [usize; Metric::COUNT],
    signs: [usize; CelestialBody::COUNT],
    venus: usize,
    /// Pass-through columns (index, name), dropped columns excluded.
    extra: Vec<(usize, String)>,
}

impl Layout {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("missing '{name}' column"))
        };

        let mut metrics = [0; Metric::COUNT];
        for metric in Metric::ALL {
            metrics[metric.index()] = find(metric.column())?;
        }
        let mut signs = [0; CelestialBody::COUNT];
        for body in CelestialBody::ALL {
            signs[body.index()] = find(body.column())?;
        }
        let venus = find(VENUS_COLUMN)?;

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| {
                !DROPPED_COLUMNS.contains(&h.as_str())
                    && !metrics.contains(i)
                    && !signs.contains(i)
                    && *i != venus
            })
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(Layout {
            metrics,
            signs,
            venus,
            extra,
        })
    }

    /// Every source column a player is built from.
    fn used_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.metrics
            .iter()
            .chain(&self.signs)
            .chain(std::iter::once(&self.venus))
            .copied()
            .chain(self.extra.iter().map(|(i, _)| *i))
    }

    fn extra_columns(&self) -> Vec<String> {
        self.extra.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Assemble one player; `cell(i)` yields the value of source column `i`.
    fn player(&self, row: usize, cell: impl Fn(usize) -> CellValue) -> Result<Player> {
        let mut metrics = [0.0; Metric::COUNT];
        for metric in Metric::ALL {
            let value = cell(self.metrics[metric.index()]);
            metrics[metric.index()] = value.as_f64().with_context(|| {
                format!("Row {row}, '{}': '{value}' is not a number", metric.column())
            })?;
        }

        let signs = std::array::from_fn(|i| Categorical::parse(&cell(self.signs[i]).as_text()));
        let venus_cycle = Categorical::parse(&cell(self.venus).as_text());

        let extra: BTreeMap<String, CellValue> = self
            .extra
            .iter()
            .map(|(i, name)| (name.clone(), cell(*i)))
            .collect();

        Ok(Player {
            metrics,
            signs,
            venus_cycle,
            extra,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PlayerTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let layout = Layout::resolve(&headers).context("CSV header")?;

    let mut players = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let player = layout.player(row_no, |i| CellValue::guess(record.get(i).unwrap_or("").trim()))?;
        players.push(player);
    }

    Ok(PlayerTable::new(players, layout.extra_columns()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`. The
/// columns are taken from the first record.
fn load_json(path: &Path) -> Result<PlayerTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;
    let Some(first) = records.first() else {
        return Ok(PlayerTable::default());
    };
    let headers: Vec<String> = first
        .as_object()
        .context("Row 0 is not a JSON object")?
        .keys()
        .cloned()
        .collect();
    let layout = Layout::resolve(&headers).context("JSON record keys")?;

    let mut players = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let player = layout.player(i, |col| {
            obj.get(&headers[col])
                .map(json_to_cell)
                .unwrap_or(CellValue::Null)
        })?;
        players.push(player);
    }

    Ok(PlayerTable::new(players, layout.extra_columns()))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PlayerTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let layout = Layout::resolve(&headers).context("parquet schema")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut players = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let mut columns: Vec<Option<ArrayRef>> = vec![None; batch.num_columns()];
        for i in layout.used_columns() {
            columns[i] = Some(normalize_column(batch.column(i), &headers[i])?);
        }

        let offset = players.len();
        for row in 0..batch.num_rows() {
            let player = layout.player(offset + row, |i| {
                columns[i]
                    .as_ref()
                    .map_or(CellValue::Null, |col| extract_cell(col, row))
            })?;
            players.push(player);
        }
    }

    Ok(PlayerTable::new(players, layout.extra_columns()))
}

/// Bring a column to one of the types [`extract_cell`] reads: other integer
/// widths and unsigned types become `Float64`, everything else (string
/// views, dictionaries, dates, ...) is cast to `Utf8`.
fn normalize_column(col: &ArrayRef, name: &str) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Null
        | DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int32
        | DataType::Int64
        | DataType::Float32
        | DataType::Float64
        | DataType::Boolean => return Ok(Arc::clone(col)),
        dt if dt.is_numeric() => DataType::Float64,
        _ => DataType::Utf8,
    };
    cast(col, &target).with_context(|| {
        format!("column '{name}': cannot read {} as {target}", col.data_type())
    })
}

/// Extract a single cell from a column prepared by [`normalize_column`].
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => CellValue::Null,
    }
}
