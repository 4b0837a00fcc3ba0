//! CSV reading and writing for record collections.

mod reader;

pub use reader::{
    read_csv_frame, read_csv_header, read_csv_text_columns, write_csv_frame,
};
