mod csv_export;

pub(crate) use csv_export::{csv_file_name, write_csv_file};
