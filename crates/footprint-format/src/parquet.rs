//! Apache Parquet output format.

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, StringArray, TimestampMillisecondArray, UInt32Array,
    UInt64Array,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use footprint_aggregate::Cluster;
use footprint_types::Tick;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter, LevelRow};

/// Parquet formatter.
///
/// Cluster files hold one summary row per cluster; footprint levels go to a
/// separate long-format file via [`Formatter::write_levels`].
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

fn parquet_err(e: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(e.to_string())
}

fn utc_millis() -> DataType {
    DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into()))
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for tick data.
    fn tick_schema() -> Schema {
        Schema::new(vec![
            Field::new("timestamp", utc_millis(), false),
            Field::new("symbol", DataType::Utf8, false),
            Field::new("price", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
            Field::new("side", DataType::Utf8, false),
        ])
    }

    /// Creates the Arrow schema for cluster summaries.
    fn cluster_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::UInt64, false),
            Field::new("symbol", DataType::Utf8, false),
            Field::new("start_time", utc_millis(), false),
            Field::new("end_time", utc_millis(), true),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume_buy", DataType::Float64, false),
            Field::new("volume_sell", DataType::Float64, false),
            Field::new("volume_total", DataType::Float64, false),
            Field::new("delta", DataType::Float64, false),
            Field::new("body_volume", DataType::Float64, false),
            Field::new("wick_volume", DataType::Float64, false),
            Field::new("body_volume_ratio", DataType::Float64, false),
            Field::new("poc", DataType::Float64, false),
            Field::new("tick_count", DataType::UInt32, false),
            Field::new("is_closed", DataType::Boolean, false),
        ])
    }

    /// Creates the Arrow schema for footprint rows.
    fn level_schema() -> Schema {
        Schema::new(vec![
            Field::new("cluster_id", DataType::UInt64, false),
            Field::new("price", DataType::Float64, false),
            Field::new("volume_buy", DataType::Float64, false),
            Field::new("volume_sell", DataType::Float64, false),
            Field::new("volume_total", DataType::Float64, false),
            Field::new("delta", DataType::Float64, false),
            Field::new("tick_count", DataType::UInt32, false),
        ])
    }

    /// Converts ticks to Arrow RecordBatch.
    fn ticks_to_batch(schema: SchemaRef, ticks: &[Tick]) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = ticks.iter().map(Tick::timestamp_millis).collect();
        let symbols: Vec<_> = ticks.iter().map(|t| t.symbol.as_str()).collect();
        let prices: Vec<_> = ticks.iter().map(|t| t.price).collect();
        let volumes: Vec<_> = ticks.iter().map(|t| t.volume).collect();
        let sides: Vec<_> = ticks.iter().map(|t| t.side.as_str()).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(TimestampMillisecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(StringArray::from(symbols)),
                Arc::new(Float64Array::from(prices)),
                Arc::new(Float64Array::from(volumes)),
                Arc::new(StringArray::from(sides)),
            ],
        )
        .map_err(parquet_err)
    }

    /// Converts cluster summaries to Arrow RecordBatch.
    fn clusters_to_batch(
        schema: SchemaRef,
        clusters: &[Arc<Cluster>],
    ) -> Result<RecordBatch, FormatError> {
        let float_column = |f: fn(&Cluster) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(
                clusters.iter().map(|c| f(c)).collect::<Vec<_>>(),
            ))
        };

        let ids: Vec<_> = clusters.iter().map(|c| c.id).collect();
        let symbols: Vec<_> = clusters.iter().map(|c| c.symbol.as_str()).collect();
        let starts: Vec<_> = clusters
            .iter()
            .map(|c| c.start_time.timestamp_millis())
            .collect();
        let ends: Vec<_> = clusters
            .iter()
            .map(|c| c.end_time.map(|t| t.timestamp_millis()))
            .collect();
        let tick_counts: Vec<_> = clusters.iter().map(|c| c.tick_count).collect();
        let closed: Vec<_> = clusters.iter().map(|c| c.is_closed).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(UInt64Array::from(ids)),
                Arc::new(StringArray::from(symbols)),
                Arc::new(TimestampMillisecondArray::from(starts).with_timezone("UTC")),
                Arc::new(TimestampMillisecondArray::from(ends).with_timezone("UTC")),
                float_column(|c| c.open),
                float_column(|c| c.high),
                float_column(|c| c.low),
                float_column(|c| c.close),
                float_column(|c| c.volume_buy),
                float_column(|c| c.volume_sell),
                float_column(|c| c.volume_total),
                float_column(|c| c.delta),
                float_column(|c| c.body_volume),
                float_column(|c| c.wick_volume),
                float_column(|c| c.body_volume_ratio),
                float_column(|c| c.poc),
                Arc::new(UInt32Array::from(tick_counts)),
                Arc::new(BooleanArray::from(closed)),
            ],
        )
        .map_err(parquet_err)
    }

    /// Converts footprint rows to Arrow RecordBatch.
    fn levels_to_batch(schema: SchemaRef, rows: &[LevelRow<'_>]) -> Result<RecordBatch, FormatError> {
        let float_column = |f: fn(&LevelRow<'_>) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
        };

        let ids: Vec<_> = rows.iter().map(|r| r.cluster_id).collect();
        let tick_counts: Vec<_> = rows.iter().map(|r| r.level.tick_count).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(UInt64Array::from(ids)),
                float_column(|r| r.level.price),
                float_column(|r| r.level.volume_buy),
                float_column(|r| r.level.volume_sell),
                float_column(|r| r.level.volume_total),
                float_column(|r| r.level.delta),
                Arc::new(UInt32Array::from(tick_counts)),
            ],
        )
        .map_err(parquet_err)
    }

    /// Writes `items` in row-group sized batches.
    fn write_batches<W, T, F>(
        &self,
        schema: Schema,
        items: &[T],
        to_batch: F,
        writer: W,
    ) -> Result<(), FormatError>
    where
        W: Write + Send,
        F: Fn(SchemaRef, &[T]) -> Result<RecordBatch, FormatError>,
    {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer =
            ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props)).map_err(parquet_err)?;

        for chunk in items.chunks(self.row_group_size.max(1)) {
            let batch = to_batch(Arc::clone(&schema), chunk)?;
            arrow_writer.write(&batch).map_err(parquet_err)?;
        }

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_batches(Self::tick_schema(), ticks, Self::ticks_to_batch, writer)
    }

    fn write_clusters<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(
            Self::cluster_schema(),
            clusters,
            Self::clusters_to_batch,
            writer,
        )
    }

    fn write_levels<W: Write + Send>(
        &self,
        clusters: &[Arc<Cluster>],
        writer: W,
    ) -> Result<(), FormatError> {
        let rows: Vec<_> = LevelRow::from_clusters(clusters).collect();
        self.write_batches(Self::level_schema(), &rows, Self::levels_to_batch, writer)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
