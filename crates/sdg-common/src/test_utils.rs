//! Test utilities and shared fixtures for the SDG dashboard workspace.
//!
//! Enabled with the `testing` feature so that other crates can use the same
//! sample dataset in their unit and integration tests.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample SDG 08 extracts shaped like the Pacific Data Hub CSV export.
pub mod fixtures {
    /// Header of the sample dataset, using the default column names.
    pub const HEADER: &str =
        "INDICATOR,Pacific Island Countries and territories,TIME_PERIOD,OBS_VALUE";

    /// A small dataset with inconsistent entity spelling, a blank value, a
    /// non-numeric value, and two indicators.
    pub const SAMPLE_CSV: &str = "\
INDICATOR,Pacific Island Countries and territories,TIME_PERIOD,OBS_VALUE
SL_TLF_UEM,Fiji ,2019,10
SL_TLF_UEM,fiji,2019,20
SL_TLF_UEM,Tonga,2020,5
SL_TLF_UEM,Tonga,2021,7
SL_TLF_UEM,  SAMOA,2019,
SL_TLF_UEM,Samoa,2020,n/a
SL_TLF_UEM,Samoa,2021,8.5
NY_GDP_PCAP,Fiji,2018,-1.2
NY_GDP_PCAP,Fiji,2019,0.4
NY_GDP_PCAP,Vanuatu,2019,2.1
";

    /// Rows of [`SAMPLE_CSV`] that carry a numeric value for `SL_TLF_UEM`.
    pub const SAMPLE_UNEMPLOYMENT_ROWS: usize = 5;

    /// Build a CSV document from the default header and `rows`.
    pub fn csv_with_rows(rows: &[(&str, &str, &str, &str)]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (indicator, entity, period, value) in rows {
            out.push_str(&format!("{indicator},{entity},{period},{value}\n"));
        }
        out
    }

    /// Write `contents` to a fresh temporary `.csv` file.
    #[cfg(feature = "testing")]
    pub fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("Failed to create temporary CSV file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temporary CSV file");
        file.flush().expect("Failed to flush temporary CSV file");
        file
    }
}
