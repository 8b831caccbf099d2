//! IO utilities for loading solver output files.

pub mod text_table;

pub use text_table::{
    read_numeric_table, read_numeric_table_with_config, Delimiter, TableReaderConfig,
};
