pub mod csv_file_adapter;
