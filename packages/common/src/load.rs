use crate::result::CommonResult;
use crate::validate::validate;
use metanord_model::Page;
use std::path::{Path, PathBuf};

/// Parse page JSON and reject trees that break the content invariants
pub fn parse_page(json: &str) -> CommonResult<Page> {
    let page: Page = serde_json::from_str(json)?;
    validate(&page)?;
    Ok(page)
}

/// Read and validate a page file
pub fn read_page(path: &Path) -> CommonResult<Page> {
    let json = std::fs::read_to_string(path)?;
    parse_page(&json)
}

/// Write pretty page JSON atomically
pub fn write_page(path: &Path, page: &Page) -> CommonResult<()> {
    write_atomic(path, &serde_json::to_vec_pretty(page)?)?;
    Ok(())
}

/// Write via a sibling `.tmp` file and rename so readers never see partial JSON
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}
