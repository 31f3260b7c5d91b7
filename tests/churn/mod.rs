mod binary_files;
mod linear_history;
mod merge_history;
mod report_formats;
mod revision_ranges;
