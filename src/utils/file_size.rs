const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Size in MiB with two decimals, e.g. `2.00` for 2,097,152 bytes.
    pub fn format_megabytes(size: u64) -> String {
        format!("{:.2}", size as f64 / BYTES_PER_MIB)
    }
}
