//! Column-oriented tables produced by the collectors.
//!
//! Every table is a struct of column vectors. Rows are appended through a
//! typed row struct, which keeps all columns the same length. Snapshots
//! serialize a table as a JSON object mapping column name to value array,
//! and [`Table::to_record_batch`] converts it for the Parquet export.

use std::sync::Arc;

use arrow_array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_schema::{ArrowError, DataType, Field, Schema};
use serde::{Deserialize, Serialize};

/// A value type that can be stored in a table column.
pub trait ColumnType: Sized {
    fn data_type() -> DataType;
    fn nullable() -> bool;
    fn to_array(values: &[Self]) -> ArrayRef;
}

impl ColumnType for i64 {
    fn data_type() -> DataType {
        DataType::Int64
    }

    fn nullable() -> bool {
        false
    }

    fn to_array(values: &[Self]) -> ArrayRef {
        Arc::new(Int64Array::from(values.to_vec()))
    }
}

impl ColumnType for String {
    fn data_type() -> DataType {
        DataType::Utf8
    }

    fn nullable() -> bool {
        false
    }

    fn to_array(values: &[Self]) -> ArrayRef {
        Arc::new(StringArray::from_iter_values(values.iter()))
    }
}

impl ColumnType for Option<String> {
    fn data_type() -> DataType {
        DataType::Utf8
    }

    fn nullable() -> bool {
        true
    }

    fn to_array(values: &[Self]) -> ArrayRef {
        Arc::new(StringArray::from(
            values.iter().map(|v| v.as_deref()).collect::<Vec<_>>(),
        ))
    }
}

/// Operations shared by all column tables.
pub trait Table {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Number of rows, taken from the first column.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name and length of every column, in declaration order.
    fn column_lengths(&self) -> Vec<(&'static str, usize)>;

    /// `true` when every column holds the same number of values.
    fn is_aligned(&self) -> bool {
        let lengths = self.column_lengths();
        lengths.windows(2).all(|w| w[0].1 == w[1].1)
    }

    fn schema() -> Schema;

    fn to_record_batch(&self) -> Result<RecordBatch, ArrowError>;
}

macro_rules! column_table {
    (
        $(#[$meta:meta])*
        $table:ident / $row:ident = $name:literal {
            $($col:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $table {
            $(pub $col: Vec<$ty>,)+
        }

        /// One logical record of the table.
        #[derive(Debug, Clone, PartialEq)]
        pub struct $row {
            $(pub $col: $ty,)+
        }

        impl $table {
            pub fn push(&mut self, row: $row) {
                $(self.$col.push(row.$col);)+
            }

            /// Returns the record at `index`, if every column has one.
            pub fn row(&self, index: usize) -> Option<$row> {
                Some($row {
                    $($col: self.$col.get(index)?.clone(),)+
                })
            }

            pub fn rows(&self) -> impl Iterator<Item = $row> + '_ {
                (0..self.len()).filter_map(|i| self.row(i))
            }
        }

        impl Table for $table {
            const NAME: &'static str = $name;

            fn len(&self) -> usize {
                [$(self.$col.len()),+][0]
            }

            fn column_lengths(&self) -> Vec<(&'static str, usize)> {
                vec![$((stringify!($col), self.$col.len())),+]
            }

            fn schema() -> Schema {
                Schema::new(vec![
                    $(Field::new(
                        stringify!($col),
                        <$ty as ColumnType>::data_type(),
                        <$ty as ColumnType>::nullable(),
                    ),)+
                ])
            }

            fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
                RecordBatch::try_new(
                    Arc::new(Self::schema()),
                    vec![$(<$ty as ColumnType>::to_array(&self.$col),)+],
                )
            }
        }
    };
}

column_table! {
    /// Playlists per category, as listed by `/top/playlist`.
    PlaylistTable / PlaylistRow = "playlists" {
        category: String,
        playlist_id: i64,
        playlist_name: String,
        play_count: i64,
        share_count: i64,
        track_count: i64,
        comment_count: i64,
        subscribed_count: i64,
    }
}

column_table! {
    /// One row per artist per track of every collected playlist.
    TrackTable / TrackRow = "tracks" {
        playlist_id: i64,
        track_id: i64,
        track_name: String,
        artist_id: i64,
    }
}

column_table! {
    /// Artist details joined onto the track rows they were found in.
    ArtistTable / ArtistRow = "artists" {
        track_id: i64,
        playlist_id: i64,
        artist_id: i64,
        artist_name: String,
        artist_area: Option<String>,
        artist_type: Option<String>,
        artist_alias: Option<String>,
        artist_production: Option<String>,
        artist_description: Option<String>,
    }
}

column_table! {
    ArtistMiscTable / ArtistMiscRow = "artist_misc" {
        artist_id: i64,
        artist_name: String,
        mv_count: i64,
        track_count: i64,
        album_count: i64,
    }
}

column_table! {
    AlbumTable / AlbumRow = "artist_albums" {
        artist_id: i64,
        album_id: i64,
        album_name: String,
    }
}

column_table! {
    SalesTable / SalesRow = "artist_sales" {
        album_id: i64,
        sales: i64,
    }
}
